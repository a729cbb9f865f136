use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::admin::AdminState;
use crate::refresh::RefreshStatus;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    /// "synced" while the last cycle succeeded, "degraded" while retrying.
    pub status: &'static str,
    pub providers: usize,
    #[serde(flatten)]
    pub refresh: RefreshStatus,
}

#[derive(Serialize)]
pub struct ProviderSummary {
    pub id: String,
    pub name: String,
    pub url: String,
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    let refresh = state.refresh.status();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: if refresh.consecutive_failures == 0 { "synced" } else { "degraded" },
        providers: state.providers.len(),
        refresh,
    })
}

/// The active canonical document, byte for byte.
pub async fn get_config(State(state): State<AdminState>) -> impl IntoResponse {
    let current = state.refresh.current();
    (
        [(header::CONTENT_TYPE, "application/json")],
        current.as_ref().clone(),
    )
}

pub async fn get_providers(State(state): State<AdminState>) -> Json<Vec<ProviderSummary>> {
    let set = state.providers.snapshot();
    Json(
        set.iter()
            .map(|(id, p)| ProviderSummary {
                id: id.clone(),
                name: p.name.clone(),
                url: p.url.clone(),
            })
            .collect(),
    )
}
