//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::SyncConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SyncConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<SyncConfig, ConfigError> {
    let config: SyncConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config = parse_config(
            r#"
            [source]
            url = "http://127.0.0.1:9000/providers.json"
            timeout_secs = 5

            [schedule]
            success_interval_secs = 120
            min_backoff_ms = 250
            max_backoff_secs = 60
            factor = 1.5
            jitter = true

            [observability]
            metrics_address = "127.0.0.1:9091"

            [admin]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.source.url, "http://127.0.0.1:9000/providers.json");
        assert_eq!(config.schedule.min_backoff_ms, 250);
        assert!(config.schedule.jitter);
        assert!(!config.admin.enabled);
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config(
            r#"
            [schedule]
            success_interval_secs = 0
            min_backoff_ms = 0
            "#,
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("schedule.success_interval_secs"));
        assert!(message.contains("schedule.min_backoff_ms"));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_config("[schedule\nfactor = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
