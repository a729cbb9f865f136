//! Read-only admin HTTP surface.
//!
//! - `GET /status`: sync health, fetch count, consecutive failures
//! - `GET /config`: the active canonical document
//! - `GET /providers`: active provider ids, names and URLs

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::refresh::RefreshState;
use crate::sink::ProviderRegistry;
use self::handlers::*;

#[derive(Clone)]
pub struct AdminState {
    pub refresh: Arc<RefreshState>,
    pub providers: Arc<ProviderRegistry>,
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/config", get(get_config))
        .route("/providers", get(get_providers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the admin router until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    state: AdminState,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "Admin server starting");

    axum::serve(listener, setup_admin_router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    tracing::info!("Admin server stopped");
    Ok(())
}
