//! Remote configuration refresh subsystem.
//!
//! # Data Flow
//! ```text
//! worker.rs (one task, strictly sequential)
//!     → fetcher.rs (GET remote document)
//!     → canonical.rs (validate + re-indent)
//!     → compare with state.rs current bytes
//!     → changed: ConfigSink::load → state.rs swap → StateNotifier::push
//!     → sleep success interval, or backoff delay on any error
//! ```
//!
//! # Design Decisions
//! - Comparison is byte equality of canonical form; reordered keys count as a change
//! - Parse errors and network errors share one retry path
//! - Current bytes live behind `ArcSwap` so readers never block the loop

pub mod canonical;
pub mod error;
pub mod fetcher;
pub mod state;
pub mod worker;

pub use canonical::canonicalize;
pub use error::RefreshError;
pub use fetcher::{ConfigFetcher, HttpFetcher};
pub use state::{RefreshState, RefreshStatus, DEFAULT_CONFIG};
pub use worker::{Cycle, CycleOutcome, RefreshLoop};
