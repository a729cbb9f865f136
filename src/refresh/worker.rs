//! The refresh loop.
//!
//! # States
//! ```text
//! Idle → Fetching → Applying | Skipping | Failing → Sleeping → Idle
//! ```
//!
//! # Transitions
//! - Fetch or canonicalize error → Failing
//! - Canonical bytes equal to the current config → Skipping
//! - Otherwise → Applying; sink error → Failing
//! - Skipping / Applying → sleep the success interval, reset backoff
//! - Failing → sleep the next backoff delay
//!
//! Nothing here is fatal. The loop runs until the shutdown signal fires.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::config::ScheduleConfig;
use crate::observability::metrics;
use crate::refresh::canonical::canonicalize;
use crate::refresh::error::RefreshError;
use crate::refresh::fetcher::ConfigFetcher;
use crate::refresh::state::RefreshState;
use crate::resilience::BackoffScheduler;
use crate::sink::{ConfigSink, StateNotifier};

/// What one cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// A changed document was loaded; carries the new fetch count.
    Applied { fetch_count: u64 },
    /// The fetched document matched the active one.
    Unchanged,
    Failed(RefreshError),
}

impl CycleOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CycleOutcome::Applied { .. } => "applied",
            CycleOutcome::Unchanged => "unchanged",
            CycleOutcome::Failed(_) => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, CycleOutcome::Failed(_))
    }
}

/// Result of [`RefreshLoop::run_cycle`]: what happened and how long to wait.
#[derive(Debug)]
pub struct Cycle {
    pub outcome: CycleOutcome,
    pub delay: Duration,
}

/// Keeps the host's configuration in sync with the remote document.
pub struct RefreshLoop<F, S, N> {
    fetcher: F,
    sink: S,
    notifier: N,
    state: Arc<RefreshState>,
    backoff: BackoffScheduler,
    success_interval: Duration,
}

impl<F, S, N> RefreshLoop<F, S, N>
where
    F: ConfigFetcher,
    S: ConfigSink,
    N: StateNotifier,
{
    pub fn new(
        fetcher: F,
        sink: S,
        notifier: N,
        state: Arc<RefreshState>,
        schedule: &ScheduleConfig,
    ) -> Self {
        Self {
            fetcher,
            sink,
            notifier,
            state,
            backoff: BackoffScheduler::from_config(schedule),
            success_interval: schedule.success_interval(),
        }
    }

    /// Replace the backoff policy.
    pub fn with_backoff(mut self, backoff: BackoffScheduler) -> Self {
        self.backoff = backoff;
        self
    }

    /// Shared state for readers outside the loop.
    pub fn state(&self) -> Arc<RefreshState> {
        self.state.clone()
    }

    /// Run one fetch/compare/apply cycle without sleeping.
    pub async fn run_cycle(&mut self) -> Cycle {
        let outcome = match self.refresh().await {
            Ok(outcome) => outcome,
            Err(e) => CycleOutcome::Failed(e),
        };
        metrics::record_cycle(outcome.label());

        let delay = match &outcome {
            CycleOutcome::Failed(e) => {
                let delay = self.backoff.next();
                self.state.set_consecutive_failures(self.backoff.attempts());
                metrics::record_failure(e.kind());
                tracing::warn!(
                    source = self.fetcher.source(),
                    error = %e,
                    kind = e.kind(),
                    attempt = self.backoff.attempts(),
                    delay = ?delay,
                    "Config refresh failed, backing off"
                );
                delay
            }
            CycleOutcome::Applied { fetch_count } => {
                self.backoff.reset();
                self.state.set_consecutive_failures(0);
                metrics::record_fetch_count(*fetch_count);
                tracing::info!(fetch_count, "Loaded new search providers");
                self.success_interval
            }
            CycleOutcome::Unchanged => {
                self.backoff.reset();
                self.state.set_consecutive_failures(0);
                tracing::debug!("Remote config unchanged");
                self.success_interval
            }
        };
        metrics::record_backoff(delay);

        Cycle { outcome, delay }
    }

    async fn refresh(&self) -> Result<CycleOutcome, RefreshError> {
        let raw = self.fetcher.fetch().await?;
        let canonical = canonicalize(&raw)?;

        if canonical.as_slice() == self.state.current().as_slice() {
            return Ok(CycleOutcome::Unchanged);
        }

        self.sink.load(&canonical)?;
        let fetch_count = self.state.record_applied(canonical);
        self.notifier.push();

        Ok(CycleOutcome::Applied { fetch_count })
    }

    /// Cycle forever, sleeping between cycles, until `shutdown` fires.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            source = self.fetcher.source(),
            success_interval = ?self.success_interval,
            max_backoff = ?self.backoff.max(),
            "Config refresh loop starting"
        );

        loop {
            let cycle = tokio::select! {
                cycle = self.run_cycle() => cycle,
                _ = shutdown.recv() => break,
            };

            tokio::select! {
                _ = sleep(cycle.delay) => {}
                _ = shutdown.recv() => break,
            }
        }

        tracing::info!("Config refresh loop received shutdown signal, exiting");
    }
}
