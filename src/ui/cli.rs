// Command-line interface definitions and parsing for apicatalog

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use crate::core::types::HttpMethod;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "apicatalog", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Storage
    /// Directory holding the catalog and call logs (default: .apicatalog)
    #[arg(long, value_name = "DIR", global = true, help_heading = "Storage")]
    pub data_dir: Option<String>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, global = true, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Policy Assistant
    /// Base URL of the generative language API
    #[arg(long, value_name = "URL", global = true, help_heading = "Policy Assistant")]
    pub ai_endpoint: Option<String>,

    /// Model used for policy suggestions
    #[arg(long, value_name = "MODEL", global = true, help_heading = "Policy Assistant")]
    pub ai_model: Option<String>,

    /// Policy request timeout in seconds (default: 60)
    #[arg(long, value_name = "SECONDS", global = true, help_heading = "Policy Assistant")]
    pub ai_timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", global = true, help_heading = "Policy Assistant")]
    pub user_agent: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the APIs in the catalog
    List {
        /// Only show APIs whose name or description contains this text
        #[arg(short = 's', long, value_name = "QUERY")]
        search: Option<String>,
    },
    /// Show the documentation of one API
    Show {
        /// Id of the API
        api_id: String,

        /// Also write an HTML documentation page
        #[arg(long, value_name = "PATH")]
        html: Option<String>,
    },
    /// Add a new API to the catalog
    Create {
        /// Read the blueprint from a JSON or TOML file
        #[arg(long, value_name = "FILE", conflicts_with_all = ["name", "interactive"])]
        file: Option<String>,

        /// API name
        #[arg(long)]
        name: Option<String>,

        /// Semantic version (default: 1.0.0)
        #[arg(long, value_name = "VERSION")]
        api_version: Option<String>,

        /// Short description of the API
        #[arg(long)]
        description: Option<String>,

        /// Endpoint as "METHOD /path Summary" (repeatable)
        #[arg(long = "endpoint", value_name = "ENDPOINT")]
        endpoints: Vec<String>,

        /// Fill in the blueprint interactively
        #[arg(short = 'i', long, conflicts_with = "name")]
        interactive: bool,
    },
    /// Simulate a call to an endpoint and record it
    Call {
        /// Id of the API
        api_id: String,

        /// HTTP method of the endpoint
        #[arg(value_parser = parse_method)]
        method: HttpMethod,

        /// Path of the endpoint as documented, e.g. /users/{userId}
        path: String,

        /// User id recorded for the call (default: user-john-doe)
        #[arg(long, value_name = "USER")]
        user: Option<String>,
    },
    /// Show usage analytics
    Stats {
        /// Generate HTML dashboard report
        #[arg(long, value_name = "PATH")]
        html_dashboard: Option<String>,
    },
    /// Suggest security and governance policies for an API
    Policy {
        /// What the API does (at least 20 characters)
        #[arg(long, value_name = "TEXT", default_value = "")]
        functionality: String,

        /// Kind of data the API handles (at least 10 characters)
        #[arg(long, value_name = "TEXT", default_value = "")]
        sensitivity: String,

        /// Compliance requirements, e.g. "none" or "HIPAA"
        #[arg(long, value_name = "TEXT", default_value = "")]
        compliance: String,
    },
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_method(value: &str) -> Result<HttpMethod, String> {
    value.parse::<HttpMethod>().map_err(|e| e.to_string())
}

/// Convert parsed CLI arguments into a CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let non_empty = |value: &Option<String>| {
        value
            .as_ref()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let (user_id, html_dashboard_path) = match &cli.command {
        Commands::Call { user, .. } => (non_empty(user), None),
        Commands::Stats { html_dashboard } => (None, non_empty(html_dashboard)),
        _ => (None, None),
    };

    CliConfig {
        data_dir: non_empty(&cli.data_dir),
        user_id,
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        ai_endpoint: non_empty(&cli.ai_endpoint),
        ai_model: non_empty(&cli.ai_model),
        ai_timeout: cli.ai_timeout,
        user_agent: non_empty(&cli.user_agent),
        config_file: non_empty(&cli.config),
        no_config: cli.no_config,
        html_dashboard_path,
    }
}
