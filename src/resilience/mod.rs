//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Refresh cycle fails (transport, read, parse or apply):
//!     → backoff.rs hands out the next retry delay
//!     → the loop sleeps that long, then tries again
//! Refresh cycle succeeds:
//!     → backoff.rs resets to the minimum delay
//! ```
//!
//! # Design Decisions
//! - Delays only grow while failures are consecutive
//! - A ceiling bounds worst-case staleness once the source recovers
//! - Jitter is opt-in so the default schedule stays deterministic

pub mod backoff;

pub use backoff::BackoffScheduler;
