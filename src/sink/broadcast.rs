//! Fan-out of provider updates to subscribers.

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::sink::providers::{ProviderRegistry, ProviderSet};
use crate::sink::StateNotifier;

/// Publishes the registry's active set every time it is pushed.
///
/// Slow subscribers lag and miss intermediate sets; the sender never waits.
pub struct StateBroadcaster {
    registry: Arc<ProviderRegistry>,
    tx: broadcast::Sender<Arc<ProviderSet>>,
}

impl StateBroadcaster {
    pub fn new(registry: Arc<ProviderRegistry>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { registry, tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<ProviderSet>> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl StateNotifier for StateBroadcaster {
    fn push(&self) {
        let snapshot = self.registry.snapshot();
        let providers = snapshot.len();
        match self.tx.send(snapshot) {
            Ok(receivers) => tracing::debug!(receivers, providers, "Pushed provider update"),
            Err(_) => tracing::debug!(providers, "Provider update had no subscribers"),
        }
    }
}
