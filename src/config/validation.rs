//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the source URL is a usable http(s) endpoint
//! - Validate value ranges (intervals > 0, backoff bounds ordered)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SyncConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::SyncConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("source.url '{url}' is invalid: {reason}")]
    InvalidSourceUrl { url: String, reason: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("schedule.min_backoff_ms ({min_ms} ms) exceeds schedule.max_backoff_secs ({max_secs} s)")]
    BackoffBounds { min_ms: u64, max_secs: u64 },

    #[error("schedule.factor must be at least 1.0, got {0}")]
    Factor(f64),

    #[error("{field} '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SyncConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.source.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidSourceUrl {
            url: config.source.url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidSourceUrl {
            url: config.source.url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.source.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "source.timeout_secs" });
    }

    let schedule = &config.schedule;
    if schedule.success_interval_secs == 0 {
        errors.push(ValidationError::Zero { field: "schedule.success_interval_secs" });
    }
    if schedule.min_backoff_ms == 0 {
        errors.push(ValidationError::Zero { field: "schedule.min_backoff_ms" });
    }
    if schedule.min_backoff() > schedule.max_backoff() {
        errors.push(ValidationError::BackoffBounds {
            min_ms: schedule.min_backoff_ms,
            max_secs: schedule.max_backoff_secs,
        });
    }
    if !(schedule.factor >= 1.0) || !schedule.factor.is_finite() {
        errors.push(ValidationError::Factor(schedule.factor));
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "observability.metrics_address",
                value: addr.clone(),
            });
        }
    }

    if config.admin.enabled && config.admin.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "admin.bind_address",
            value: config.admin.bind_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SyncConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = SyncConfig::default();
        config.source.url = "ftp://example.com/config.json".into();
        config.schedule.success_interval_secs = 0;
        config.schedule.min_backoff_ms = 10_000;
        config.schedule.max_backoff_secs = 1;
        config.schedule.factor = 0.5;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::InvalidSourceUrl { .. }));
        assert!(errors.contains(&ValidationError::Zero { field: "schedule.success_interval_secs" }));
        assert!(errors.contains(&ValidationError::Factor(0.5)));
    }

    #[test]
    fn test_unparseable_url() {
        let mut config = SyncConfig::default();
        config.source.url = "not a url".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("not a url"));
    }

    #[test]
    fn test_bad_metrics_address() {
        let mut config = SyncConfig::default();
        config.observability.metrics_address = Some("localhost".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidAddress {
                field: "observability.metrics_address",
                value: "localhost".into(),
            }]
        );
    }
}
