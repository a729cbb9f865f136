//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SyncConfig (validated, immutable)
//!     → handed to the refresh loop, fetcher and admin surface at startup
//! ```
//!
//! # Design Decisions
//! - This is the service's own settings, not the remote provider document
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AdminConfig, ObservabilityConfig, ScheduleConfig, SourceConfig, SyncConfig};
