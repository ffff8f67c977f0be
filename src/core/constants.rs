/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the storage keys, limits, fallback labels and
/// user-facing messages used across the application.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful output with sections and tables
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - plain text without colors or decorations
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Keys of the persisted collections
pub mod storage_keys {
    /// Collection of API definitions
    pub const APIS: &str = "user_apis";
    /// Bounded call-log sequence
    pub const CALL_LOGS: &str = "api_analytics_logs";
    /// File extension used by the file-backed store
    pub const FILE_EXTENSION: &str = "json";
}

/// Limits applied by the analytics pipeline
pub mod limits {
    /// Maximum number of retained call-log records
    pub const MAX_CALL_LOGS: usize = 500;
    /// Number of entries shown in the usage chart
    pub const CHART_ENTRIES: usize = 5;
    /// Longest chart label kept before truncation
    pub const CHART_NAME_MAX_CHARS: usize = 15;
    /// Suffix appended to truncated chart labels
    pub const CHART_NAME_ELLIPSIS: &str = "...";
    /// Number of records in the recent-calls feed
    pub const RECENT_CALLS: usize = 10;
}

/// Fallback labels
pub mod labels {
    /// Display name for log records whose API is not in the catalog
    pub const UNKNOWN_API: &str = "Unknown API";
    /// Placeholder when there is no most popular API
    pub const NOT_AVAILABLE: &str = "N/A";
    /// Prefix of schema anchors
    pub const SCHEMA_ANCHOR_PREFIX: &str = "schema-";
    /// Media type used for request and response bodies
    pub const JSON_MEDIA_TYPE: &str = "application/json";
}

/// Defaults for configuration values
pub mod defaults {
    /// Data directory relative to the working directory
    pub const DATA_DIR: &str = ".apicatalog";
    /// Config file name searched in standard locations
    pub const CONFIG_FILE: &str = ".apicatalog.toml";
    /// Identity attached to simulated calls
    pub const USER_ID: &str = "user-john-doe";
    /// Generative AI endpoint base
    pub const AI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Generative AI model
    pub const AI_MODEL: &str = "gemini-2.0-flash";
    /// Environment variable holding the AI API key
    pub const AI_API_KEY_ENV: &str = "GEMINI_API_KEY";
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default AI request timeout in seconds
    pub const DEFAULT_AI_TIMEOUT_SECONDS: u64 = 60;
    /// Maximum reasonable timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
}

/// Blueprint and policy form rules
pub mod form_rules {
    pub const API_NAME_MIN_CHARS: usize = 3;
    pub const API_DESCRIPTION_MIN_CHARS: usize = 10;
    pub const VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+$";

    pub const FUNCTIONALITY_MIN_CHARS: usize = 20;
    pub const SENSITIVITY_MIN_CHARS: usize = 10;
    pub const COMPLIANCE_MIN_CHARS: usize = 2;
}

/// User-facing messages
pub mod messages {
    pub const NAME_TOO_SHORT: &str = "API name must be at least 3 characters";
    pub const VERSION_FORMAT: &str = "Version must be in semantic format (e.g., 1.0.0)";
    pub const DESCRIPTION_TOO_SHORT: &str = "Description must be at least 10 characters";
    pub const ENDPOINTS_REQUIRED: &str = "At least one endpoint is required";
    pub const PATH_MUST_START_WITH_SLASH: &str = "Path must start with /";
    pub const SUMMARY_REQUIRED: &str = "Summary is required";

    pub const FUNCTIONALITY_TOO_SHORT: &str =
        "Please describe the API functionality in at least 20 characters.";
    pub const SENSITIVITY_TOO_SHORT: &str =
        "Please describe the data sensitivity in at least 10 characters.";
    pub const COMPLIANCE_TOO_SHORT: &str =
        "Please specify compliance requirements (e.g., \"none\", \"HIPAA\").";

    pub const POLICY_VALIDATION_FAILED: &str = "Validation failed. Please check the fields.";
    pub const POLICY_GENERATED: &str = "Policy generated successfully.";
    pub const POLICY_EMPTY: &str =
        "The AI failed to generate a policy. Please try again with a more detailed description.";
    pub const POLICY_UNEXPECTED_ERROR: &str =
        "An unexpected error occurred while generating the policy. Please try again later.";
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for analytics sections
    pub const CHART_EMOJI: &str = "📊";
    /// Emoji for user counts
    pub const USERS_EMOJI: &str = "👥";
    /// Emoji for the policy assistant
    pub const SPARKLES_EMOJI: &str = "✨";
    /// Character used to draw chart bars
    pub const BAR_CHAR: &str = "█";
    /// Width of the longest chart bar in characters
    pub const BAR_WIDTH: usize = 40;
}
