//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, output_formats, timeouts};
use crate::core::error::{CatalogError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted collections
    pub data_dir: Option<String>,

    /// User id attached to simulated calls
    pub user_id: Option<String>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Base URL of the generative language API
    pub ai_endpoint: Option<String>,

    /// Model used for policy suggestions
    pub ai_model: Option<String>,

    /// Environment variable holding the API key
    pub ai_api_key_env: Option<String>,

    /// Timeout in seconds for the policy request
    pub ai_timeout: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Generate HTML dashboard report
    pub html_dashboard_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Some(defaults::DATA_DIR.to_string()),
            user_id: Some(defaults::USER_ID.to_string()),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            ai_endpoint: Some(defaults::AI_ENDPOINT.to_string()),
            ai_model: Some(defaults::AI_MODEL.to_string()),
            ai_api_key_env: Some(defaults::AI_API_KEY_ENV.to_string()),
            ai_timeout: Some(timeouts::DEFAULT_AI_TIMEOUT_SECONDS),
            user_agent: None,
            html_dashboard_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Could not read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            CatalogError::Config(format!("Invalid TOML in config file '{}': {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        Self::load_from_dir(Path::new("."))
    }

    /// Look for `.apicatalog.toml` in `start` and up to three parent
    /// directories, falling back to defaults.
    pub fn load_from_dir(start: &Path) -> Self {
        let mut dir = start.to_path_buf();
        for _ in 0..=3 {
            let candidate = dir.join(defaults::CONFIG_FILE);
            if candidate.is_file() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return config,
                    Err(e) => {
                        crate::reporting::logging::log_warning(&format!("Ignoring {e}"));
                    }
                }
            }
            dir = dir.join("..");
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Storage
        if let Some(ref data_dir) = cli_config.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
        if let Some(ref user_id) = cli_config.user_id {
            self.user_id = Some(user_id.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }

        // Policy assistant
        if let Some(ref endpoint) = cli_config.ai_endpoint {
            self.ai_endpoint = Some(endpoint.clone());
        }
        if let Some(ref model) = cli_config.ai_model {
            self.ai_model = Some(model.clone());
        }
        if let Some(timeout) = cli_config.ai_timeout {
            self.ai_timeout = Some(timeout);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }

        // Reporting
        if let Some(ref dashboard_path) = cli_config.html_dashboard_path {
            self.html_dashboard_path = Some(dashboard_path.clone());
        }
    }

    pub fn data_dir_path(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(defaults::DATA_DIR))
    }

    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(defaults::USER_ID)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    pub fn ai_endpoint(&self) -> &str {
        self.ai_endpoint.as_deref().unwrap_or(defaults::AI_ENDPOINT)
    }

    pub fn ai_model(&self) -> &str {
        self.ai_model.as_deref().unwrap_or(defaults::AI_MODEL)
    }

    pub fn ai_api_key_env(&self) -> &str {
        self.ai_api_key_env
            .as_deref()
            .unwrap_or(defaults::AI_API_KEY_ENV)
    }

    /// Get the policy request timeout as Duration
    pub fn ai_timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.ai_timeout
                .unwrap_or(timeouts::DEFAULT_AI_TIMEOUT_SECONDS),
        )
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.ai_timeout {
            if timeout == 0 {
                return Err(CatalogError::Config(
                    "AI timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(CatalogError::Config(format!(
                    "AI timeout of {timeout} seconds is too large (>1 hour). Consider using a smaller value."
                )));
            }
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(CatalogError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        if let Some(ref user_id) = self.user_id
            && user_id.trim().is_empty()
        {
            return Err(CatalogError::Config("User id cannot be empty.".to_string()));
        }

        if let Some(ref endpoint) = self.ai_endpoint
            && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(CatalogError::Config(format!(
                "AI endpoint '{endpoint}' must start with http:// or https://"
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Storage
    pub data_dir: Option<String>, // --data-dir
    pub user_id: Option<String>,  // call --user

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format

    // Policy assistant
    pub ai_endpoint: Option<String>, // --ai-endpoint
    pub ai_model: Option<String>,    // --ai-model
    pub ai_timeout: Option<u64>,     // --ai-timeout
    pub user_agent: Option<String>,  // --user-agent

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config

    // Reporting
    pub html_dashboard_path: Option<String>, // stats --html-dashboard
}
