use apicatalog::analytics::{CallLogRecorder, MemoizedAnalytics};
use apicatalog::catalog::{AddApiError, Catalog, NewApiData, NewEndpoint};
use apicatalog::config::{CliConfig, Config};
use apicatalog::core::constants::output_formats;
use apicatalog::core::{ApiCallLogRecord, ApiDefinition, CatalogError, HttpMethod, NewCallLog};
use apicatalog::policy::{HttpPolicyGenerator, PolicyRequest, generate_api_policy};
use apicatalog::reporting::logging;
use apicatalog::reporting::{DashboardData, HtmlDashboard};
use apicatalog::storage::{ApiRepository, CallLogRepository, FileStore, Repository};
use apicatalog::ui::ProgressReporter;
use apicatalog::ui::completion::print_completions;
use apicatalog::ui::output;
use apicatalog::ui::wizard::run_blueprint_wizard;
use apicatalog::ui::{Cli, Commands, cli_to_config};
use clap::{CommandFactory, Parser};

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_apicatalog_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Commands::CompletionGenerate { shell } => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        _ => None,
    }
}

/// Main dispatch extracted from main() for testing
pub async fn run_apicatalog_logic(cli: &Cli) -> AppResult<i32> {
    let cli_config = cli_to_config(cli);

    let config = load_and_merge_config(&cli_config)?;
    config.validate()?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    let store = FileStore::new(config.data_dir_path());
    logging::log_data_dir(store.root());

    let mut catalog = Catalog::load(ApiRepository::new(store.clone()));
    let format = output_settings.output_format.as_str();

    match &cli.command {
        Commands::List { search } => {
            let apis = catalog.search(search.as_deref().unwrap_or_default());
            output::display_api_list(&apis, search.as_deref(), format)?;
            Ok(0)
        }
        Commands::Show { api_id, html } => {
            let api = catalog.find(api_id)?;
            output::display_api_documentation(api, format)?;
            if let Some(path) = html {
                write_documentation_page(api, path, &output_settings)?;
            }
            Ok(0)
        }
        Commands::Create {
            file,
            name,
            api_version,
            description,
            endpoints,
            interactive,
        } => {
            let data = if *interactive {
                run_blueprint_wizard()?
            } else if let Some(path) = file {
                NewApiData::load_from_file(path)?
            } else {
                blueprint_from_flags(
                    name.as_deref(),
                    api_version.as_deref(),
                    description.as_deref(),
                    endpoints,
                )?
            };
            create_api(&mut catalog, data, format)
        }
        Commands::Call {
            api_id,
            method,
            path,
            ..
        } => {
            let mut recorder = CallLogRecorder::load(CallLogRepository::new(store));
            let record = simulate_call(
                &catalog,
                &mut recorder,
                api_id,
                *method,
                path,
                config.user_id(),
            )?;
            output::display_call_simulated(&record, format)?;
            Ok(0)
        }
        Commands::Stats { .. } => {
            let recorder = CallLogRecorder::load(CallLogRepository::new(store));
            show_stats(&catalog, &recorder, &config, &output_settings)?;
            Ok(0)
        }
        Commands::Policy {
            functionality,
            sensitivity,
            compliance,
        } => {
            let request = PolicyRequest {
                api_functionality: functionality.clone(),
                data_sensitivity: sensitivity.clone(),
                compliance_requirements: compliance.clone(),
            };
            request_policy(&request, &config, &output_settings).await
        }
        // Handled before dispatch
        Commands::CompletionGenerate { .. } => Ok(0),
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> AppResult<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn is_text(&self) -> bool {
        self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let output_format = config.output_format().to_string();
    let show_progress = !quiet && output_format == output_formats::TEXT;

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// Build a blueprint from `create` flags; missing values are left for validation to report
pub fn blueprint_from_flags(
    name: Option<&str>,
    version: Option<&str>,
    description: Option<&str>,
    endpoints: &[String],
) -> AppResult<NewApiData> {
    let endpoints = endpoints
        .iter()
        .map(|spec| NewEndpoint::parse(spec))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewApiData {
        name: name.unwrap_or_default().trim().to_string(),
        version: version
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| NewApiData::default().version),
        description: description.unwrap_or_default().trim().to_string(),
        endpoints,
    })
}

/// Add a blueprint to the catalog; invalid blueprints exit with 1
pub fn create_api<R>(catalog: &mut Catalog<R>, data: NewApiData, format: &str) -> AppResult<i32>
where
    R: Repository<Item = ApiDefinition>,
{
    match catalog.add(data) {
        Ok(api) => {
            output::display_api_created(&api, format)?;
            Ok(0)
        }
        Err(AddApiError::Invalid(errors)) => {
            output::display_field_errors(&errors, format)?;
            Ok(1)
        }
        Err(AddApiError::Storage(e)) => Err(e.into()),
    }
}

/// Record a simulated call to a documented endpoint
pub fn simulate_call<C, L>(
    catalog: &Catalog<C>,
    recorder: &mut CallLogRecorder<L>,
    api_id: &str,
    method: HttpMethod,
    path: &str,
    user_id: &str,
) -> AppResult<ApiCallLogRecord>
where
    C: Repository<Item = ApiDefinition>,
    L: Repository<Item = ApiCallLogRecord>,
{
    let api = catalog.find(api_id)?;
    let endpoint = api.find_endpoint(method, path).ok_or_else(|| {
        CatalogError::NotFound(format!("endpoint {method} {path} in API '{api_id}'"))
    })?;

    let record = recorder.record(NewCallLog {
        api_id: api.id.clone(),
        endpoint_path: endpoint.path.clone(),
        endpoint_method: endpoint.method,
        user_id: user_id.to_string(),
    })?;
    Ok(record)
}

/// Print the monitoring page and write the dashboard when configured
pub fn show_stats<C, L>(
    catalog: &Catalog<C>,
    recorder: &CallLogRecorder<L>,
    config: &Config,
    output_settings: &OutputSettings,
) -> AppResult<()>
where
    C: Repository<Item = ApiDefinition>,
    L: Repository<Item = ApiCallLogRecord>,
{
    let mut analytics = MemoizedAnalytics::new();
    let summary = analytics.get(recorder.logs(), catalog.apis());
    let now = chrono::Utc::now();

    output::display_stats(&summary, now, &output_settings.output_format)?;

    if let Some(ref dashboard_path) = config.html_dashboard_path {
        let dashboard_data = DashboardData {
            summary: summary.as_ref().clone(),
            api_count: catalog.apis().len(),
            generated_at: now,
        };

        if let Err(e) = HtmlDashboard::generate_dashboard(&dashboard_data, dashboard_path) {
            logging::log_warning(&format!("Failed to generate HTML dashboard: {e}"));
            eprintln!("Warning: Failed to generate HTML dashboard: {e}");
        } else if output_settings.is_text() && !output_settings.quiet {
            println!("📊 HTML dashboard generated: {dashboard_path}");
        }
    }

    Ok(())
}

/// Write the standalone HTML documentation page of `api`
pub fn write_documentation_page(
    api: &ApiDefinition,
    path: &str,
    output_settings: &OutputSettings,
) -> AppResult<()> {
    std::fs::write(path, output::render_api_documentation_html(api)).inspect_err(|e| {
        logging::log_error(
            &format!("Could not write documentation page '{path}'"),
            Some(e),
        );
    })?;

    if output_settings.is_text() && !output_settings.quiet {
        println!("📄 HTML documentation generated: {path}");
    }
    Ok(())
}

/// Ask the policy assistant; exits with 1 unless a policy was produced
pub async fn request_policy(
    request: &PolicyRequest,
    config: &Config,
    output_settings: &OutputSettings,
) -> AppResult<i32> {
    let generator = HttpPolicyGenerator::from_config(config)?;

    let mut progress = ProgressReporter::new(output_settings.show_progress);
    progress.start_spinner("Generating policy suggestions...");
    let state = generate_api_policy(&generator, request).await;
    progress.finish_and_clear();

    output::display_policy_state(&state, &output_settings.output_format)?;
    Ok(if state.is_success() { 0 } else { 1 })
}
