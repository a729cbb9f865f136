//! Shared view of the last applied configuration.
//!
//! Written only by the refresh loop's apply step; read from anywhere.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::refresh::canonical::canonicalize;

/// Built-in provider document used until the first successful fetch.
pub const DEFAULT_CONFIG: &[u8] = include_bytes!("default_config.json");

/// Point-in-time summary for status endpoints.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RefreshStatus {
    pub fetch_count: u64,
    pub consecutive_failures: u32,
    /// Unix seconds of the last applied change, if any.
    pub last_applied_at: Option<u64>,
    pub config_bytes: usize,
}

pub struct RefreshState {
    current: ArcSwap<Vec<u8>>,
    fetch_count: AtomicU64,
    consecutive_failures: AtomicU32,
    last_applied_at: AtomicU64,
}

impl RefreshState {
    /// Start from `document`, canonicalized.
    pub fn from_document(document: &[u8]) -> Result<Self, serde_json::Error> {
        let canonical = canonicalize(document)?;
        Ok(Self {
            current: ArcSwap::from_pointee(canonical),
            fetch_count: AtomicU64::new(0),
            consecutive_failures: AtomicU32::new(0),
            last_applied_at: AtomicU64::new(0),
        })
    }

    /// Start from the embedded default document.
    pub fn embedded_default() -> Result<Self, serde_json::Error> {
        Self::from_document(DEFAULT_CONFIG)
    }

    /// Canonical bytes of the active configuration.
    pub fn current(&self) -> Arc<Vec<u8>> {
        self.current.load_full()
    }

    /// Number of changed documents applied since startup.
    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::Acquire)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> RefreshStatus {
        let last = self.last_applied_at.load(Ordering::Relaxed);
        RefreshStatus {
            fetch_count: self.fetch_count(),
            consecutive_failures: self.consecutive_failures(),
            last_applied_at: (last != 0).then_some(last),
            config_bytes: self.current.load().len(),
        }
    }

    /// Publish a newly applied document. Returns the new fetch count.
    pub(crate) fn record_applied(&self, canonical: Vec<u8>) -> u64 {
        self.current.store(Arc::new(canonical));
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.last_applied_at.store(now, Ordering::Relaxed);
        self.fetch_count.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub(crate) fn set_consecutive_failures(&self, failures: u32) {
        self.consecutive_failures.store(failures, Ordering::Relaxed);
    }
}
