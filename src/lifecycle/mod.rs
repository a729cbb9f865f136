//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → seed state from embedded default
//!     → build fetcher, registry, broadcaster → spawn refresh loop + admin server
//!
//! Shutdown (shutdown.rs):
//!     signals.rs sees SIGINT/SIGTERM → Shutdown::trigger → tasks exit their loops
//! ```
//!
//! # Design Decisions
//! - Ordered startup: state is seeded before any task can read it
//! - Background tasks own a shutdown receiver each
//! - Startup errors are fatal; refresh errors never are

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{start, Service, StartupError};
