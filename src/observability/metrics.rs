//! Metrics collection and exposition.
//!
//! # Metrics
//! - `config_refresh_cycles_total` (counter): cycles by `outcome`
//!   (applied, unchanged, failed)
//! - `config_refresh_failures_total` (counter): failures by `kind`
//!   (transport, read, parse, apply)
//! - `config_refresh_fetch_count` (gauge): changed documents applied
//! - `config_refresh_backoff_seconds` (gauge): delay before the next attempt
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_cycle(outcome: &'static str) {
    metrics::counter!("config_refresh_cycles_total", "outcome" => outcome).increment(1);
}

pub fn record_failure(kind: &'static str) {
    metrics::counter!("config_refresh_failures_total", "kind" => kind).increment(1);
}

pub fn record_fetch_count(count: u64) {
    metrics::gauge!("config_refresh_fetch_count").set(count as f64);
}

pub fn record_backoff(delay: Duration) {
    metrics::gauge!("config_refresh_backoff_seconds").set(delay.as_secs_f64());
}
