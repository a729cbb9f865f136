//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the sync
//! service. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public gist holding the shared scraper configuration.
pub const DEFAULT_SOURCE_URL: &str =
    "https://gist.githubusercontent.com/jpillora/4d945b46b3025843b066adf3d685be6b/raw/scraper-config.json";

/// Root configuration for the sync service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    /// Remote document settings.
    pub source: SourceConfig,

    /// Refresh cadence and retry bounds.
    pub schedule: ScheduleConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin HTTP surface.
    pub admin: AdminConfig,
}

/// Where the remote configuration is fetched from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Endpoint returning one JSON document.
    pub url: String,

    /// Total request timeout in seconds (connect + body).
    pub timeout_secs: u64,

    /// User-Agent header sent with every fetch.
    pub user_agent: String,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("search-config-sync/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Refresh cadence and backoff bounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Sleep after an unchanged or applied cycle, in seconds.
    pub success_interval_secs: u64,

    /// First retry delay after a failure, in milliseconds.
    pub min_backoff_ms: u64,

    /// Retry delay ceiling, in seconds.
    pub max_backoff_secs: u64,

    /// Multiplier applied per consecutive failure.
    pub factor: f64,

    /// Randomize each retry delay between the minimum and the computed delay.
    pub jitter: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            success_interval_secs: 30 * 60,
            min_backoff_ms: 100,
            max_backoff_secs: 30 * 60,
            factor: 2.0,
            jitter: false,
        }
    }
}

impl ScheduleConfig {
    pub fn success_interval(&self) -> Duration {
        Duration::from_secs(self.success_interval_secs)
    }

    pub fn min_backoff(&self) -> Duration {
        Duration::from_millis(self.min_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,

    /// Prometheus exporter bind address. Metrics export is off when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "search_config_sync=info,tower_http=info".to_string(),
            metrics_address: None,
        }
    }
}

/// Admin HTTP surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Serve the read-only status endpoints.
    pub enabled: bool,

    /// Admin bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}
