use std::fmt;

/// Comprehensive error types for apicatalog operations
#[derive(Debug)]
pub enum CatalogError {
    /// IO error (data directory, config file, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Persisted collection could not be read or written
    Storage(String),

    /// JSON serialization or parsing error
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// HTTP client error
    Http(reqwest::Error),

    /// The AI endpoint answered with something unusable
    Policy(String),

    /// Unknown API id or endpoint
    NotFound(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// Interactive prompt error
    Prompt(dialoguer::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "IO error: {err}"),
            CatalogError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CatalogError::Storage(msg) => write!(f, "Storage error: {msg}"),
            CatalogError::Json(err) => write!(f, "JSON error: {err}"),
            CatalogError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            CatalogError::Http(err) => write!(f, "HTTP error: {err}"),
            CatalogError::Policy(msg) => write!(f, "Policy generation error: {msg}"),
            CatalogError::NotFound(what) => write!(f, "Not found: {what}"),
            CatalogError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            CatalogError::Prompt(err) => write!(f, "Prompt error: {err}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            CatalogError::TomlParsing(err) => Some(err),
            CatalogError::Http(err) => Some(err),
            CatalogError::Prompt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Json(err)
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::TomlParsing(err)
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Http(err)
    }
}

impl From<dialoguer::Error> for CatalogError {
    fn from(err: dialoguer::Error) -> Self {
        CatalogError::Prompt(err)
    }
}

/// Type alias for Results using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = CatalogError::Config("Invalid timeout".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid timeout"
        );

        let not_found = CatalogError::NotFound("API 'billing-api'".to_string());
        assert_eq!(format!("{not_found}"), "Not found: API 'billing-api'");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let catalog_error = CatalogError::from(io_error);

        match catalog_error {
            CatalogError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let catalog_error = CatalogError::from(json_error);

        match catalog_error {
            CatalogError::Json(_) => {} // Expected
            _ => panic!("Expected Json variant"),
        }
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let catalog_error = CatalogError::from(toml_error);

        match catalog_error {
            CatalogError::TomlParsing(_) => {} // Expected
            _ => panic!("Expected TomlParsing variant"),
        }
    }

    #[test]
    fn test_string_error_variants_display() {
        let errors = vec![
            CatalogError::Config("Bad config".to_string()),
            CatalogError::Storage("Disk full".to_string()),
            CatalogError::Policy("No candidates".to_string()),
            CatalogError::NotFound("missing".to_string()),
            CatalogError::InvalidArgument("Bad arg".to_string()),
        ];

        for error in errors {
            let display_str = format!("{error}");
            assert!(!display_str.is_empty());
            assert!(display_str.contains(':'));
        }
    }

    #[test]
    fn test_error_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let catalog_error = CatalogError::Io(io_error);

        assert!(catalog_error.source().is_some());

        let config_error = CatalogError::Config("test".to_string());
        assert!(config_error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogError>();
    }
}
