//! Liveness and data summary endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{AppState, SERVICE_NAME, SERVICE_VERSION};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Domains in the base summary list
    pub domains: usize,
    /// Overridden questions across all domains
    pub overrides: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        domains: state.dataset.domains.len(),
        overrides: state.overrides.get_all().await.len(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
