//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Refresh loop, fetcher, sinks produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (cycle counters and gauges)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event, no string-formatted state
//! - `RUST_LOG` overrides the configured filter
//! - Metric recording is always on; exporting is opt-in

pub mod logging;
pub mod metrics;
