//! Remote search-provider configuration sync.
//!
//! A single background task keeps the host's provider set in step with a
//! remote JSON document: fetch, canonicalize, compare, apply on change,
//! notify, sleep, and back off exponentially on any failure.

pub mod admin;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod refresh;
pub mod resilience;
pub mod sink;

pub use config::SyncConfig;
pub use lifecycle::Shutdown;
pub use refresh::{canonicalize, RefreshLoop, RefreshState};
pub use resilience::BackoffScheduler;
pub use sink::{ConfigSink, StateNotifier};
