use crate::config::Config;
use crate::core::types::ApiCallLogRecord;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: data_dir={}, user_id={}, format={}",
        config.data_dir_path().display(),
        config.user_id(),
        config.output_format()
    );
    info!(
        "Policy assistant: endpoint={}, model={}, key_env={}, timeout={}s",
        config.ai_endpoint(),
        config.ai_model(),
        config.ai_api_key_env(),
        config.ai_timeout_duration().as_secs()
    );
}

/// Log which data directory the collections are read from
pub fn log_data_dir(path: &Path) {
    debug!("Using data directory {}", path.display());
}

/// Log that a persisted collection was replaced by the built-in data
pub fn log_storage_fallback(key: &str, reason: &str) {
    warn!("Stored collection '{key}' is unusable ({reason}); using built-in data");
}

/// Log a newly recorded simulated call
pub fn log_call_recorded(record: &ApiCallLogRecord) {
    info!(
        "Recorded call {} {} on {} by {}",
        record.endpoint_method, record.endpoint_path, record.api_id, record.user_id
    );
}

/// Log an analytics recomputation
pub fn log_analytics_computed(total_calls: usize, unique_users: usize) {
    debug!("Analytics computed: {total_calls} call(s) from {unique_users} user(s)");
}

/// Log an outgoing policy suggestion request
pub fn log_policy_request(model: &str, prompt_chars: usize) {
    info!("Requesting policy suggestions from {model} ({prompt_chars} prompt characters)");
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
