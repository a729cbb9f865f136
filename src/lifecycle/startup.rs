//! Startup orchestration.
//!
//! # Responsibilities
//! - Seed the refresh state and provider registry from the embedded default
//! - Build the HTTP fetcher and state broadcaster
//! - Start background tasks (refresh loop, admin server, metrics exporter)
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The embedded default is activated before the first fetch, so the host
//!   always has a usable provider set

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::admin::{self, AdminState};
use crate::config::SyncConfig;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::refresh::{HttpFetcher, RefreshError, RefreshLoop, RefreshState, DEFAULT_CONFIG};
use crate::sink::{ConfigSink, ProviderRegistry, SinkError, StateBroadcaster};

/// Subscriber queue depth for provider updates.
const BROADCAST_CAPACITY: usize = 16;

pub type HttpRefreshLoop = RefreshLoop<HttpFetcher, Arc<ProviderRegistry>, Arc<StateBroadcaster>>;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("embedded default config is not valid JSON: {0}")]
    DefaultDocument(#[from] serde_json::Error),

    #[error("embedded default config was rejected: {0}")]
    DefaultProviders(#[from] SinkError),

    #[error("failed to build fetcher: {0}")]
    Fetcher(#[from] RefreshError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(String),
}

/// Everything the refresh loop needs, wired but not yet running.
pub struct Components {
    pub refresh_loop: HttpRefreshLoop,
    pub state: Arc<RefreshState>,
    pub providers: Arc<ProviderRegistry>,
    pub broadcaster: Arc<StateBroadcaster>,
}

/// Wire the refresh loop and its collaborators from `config`.
pub fn build(config: &SyncConfig) -> Result<Components, StartupError> {
    let state = Arc::new(RefreshState::embedded_default()?);

    let providers = Arc::new(ProviderRegistry::new());
    providers.load(&state.current())?;

    let broadcaster = Arc::new(StateBroadcaster::new(providers.clone(), BROADCAST_CAPACITY));
    let fetcher = HttpFetcher::new(&config.source)?;

    let refresh_loop = RefreshLoop::new(
        fetcher,
        providers.clone(),
        broadcaster.clone(),
        state.clone(),
        &config.schedule,
    );

    Ok(Components {
        refresh_loop,
        state,
        providers,
        broadcaster,
    })
}

/// A running service.
pub struct Service {
    pub state: Arc<RefreshState>,
    pub providers: Arc<ProviderRegistry>,
    pub broadcaster: Arc<StateBroadcaster>,
    /// Bound admin address, when the admin surface is enabled.
    pub admin_addr: Option<SocketAddr>,
    tasks: Vec<JoinHandle<()>>,
}

impl Service {
    /// Wait for every background task to finish.
    pub async fn join(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Background task panicked");
            }
        }
    }
}

/// Build and spawn all background tasks.
pub async fn start(config: &SyncConfig, shutdown: &Shutdown) -> Result<Service, StartupError> {
    if let Some(addr) = &config.observability.metrics_address {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| StartupError::Metrics(format!("invalid address '{}': {}", addr, e)))?;
        metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    let components = build(config)?;
    let mut tasks = Vec::new();

    let admin_addr = if config.admin.enabled {
        let listener = TcpListener::bind(&config.admin.bind_address)
            .await
            .map_err(|source| StartupError::Bind {
                addr: config.admin.bind_address.clone(),
                source,
            })?;
        let addr = listener.local_addr().ok();

        let admin_state = AdminState {
            refresh: components.state.clone(),
            providers: components.providers.clone(),
        };
        let admin_shutdown = shutdown.subscribe();
        tasks.push(tokio::spawn(async move {
            if let Err(e) = admin::serve(listener, admin_state, admin_shutdown).await {
                tracing::error!(error = %e, "Admin server failed");
            }
        }));
        addr
    } else {
        tracing::info!("Admin server disabled");
        None
    };

    tasks.push(tokio::spawn(components.refresh_loop.run(shutdown.subscribe())));

    tracing::info!(
        source = %config.source.url,
        providers = components.providers.len(),
        "Service started"
    );

    Ok(Service {
        state: components.state,
        providers: components.providers,
        broadcaster: components.broadcaster,
        admin_addr,
        tasks,
    })
}
