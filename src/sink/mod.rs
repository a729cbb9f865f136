//! Host-side collaborators of the refresh loop.
//!
//! # Data Flow
//! ```text
//! refresh loop (changed canonical document)
//!     → ConfigSink::load (providers.rs activates the provider set)
//!     → StateNotifier::push (broadcast.rs fans the new set out to subscribers)
//! ```
//!
//! # Design Decisions
//! - The loop only knows the two traits; the host decides what "activate" means
//! - A sink that returns an error must leave the previous configuration active
//! - Notifying never blocks the loop

pub mod broadcast;
pub mod providers;

use std::sync::Arc;
use thiserror::Error;

pub use broadcast::StateBroadcaster;
pub use providers::{ProviderConfig, ProviderRegistry, ProviderSet, Selector};

/// Why a sink refused a configuration.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("document does not match the provider schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("provider '{id}' is invalid: {reason}")]
    InvalidProvider { id: String, reason: String },

    #[error("configuration rejected: {0}")]
    Rejected(String),
}

/// Activates a new configuration inside the host.
///
/// Called at most once per refresh cycle and never concurrently. Loading the
/// same bytes twice must be harmless.
pub trait ConfigSink: Send + Sync {
    fn load(&self, canonical: &[u8]) -> Result<(), SinkError>;
}

/// Tells subscribers that the active configuration changed.
pub trait StateNotifier: Send + Sync {
    fn push(&self);
}

impl<T: ConfigSink + ?Sized> ConfigSink for Arc<T> {
    fn load(&self, canonical: &[u8]) -> Result<(), SinkError> {
        (**self).load(canonical)
    }
}

impl<T: StateNotifier + ?Sized> StateNotifier for Arc<T> {
    fn push(&self) {
        (**self).push()
    }
}
