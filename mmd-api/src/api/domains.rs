//! Read-only assessment views
//!
//! Each request recomputes its view from the base data and a snapshot of
//! the current overrides.

use axum::{
    extract::{Path, State},
    Json,
};
use mmd_common::model::{DomainDetail, DomainSummary, OverviewMatrix};
use mmd_common::projector::{domains_with_overrides, overview_with_overrides};
use tracing::debug;

use super::ApiError;
use crate::AppState;

/// GET /api/domains
///
/// Summary scores for all domains.
pub async fn list_domains(State(state): State<AppState>) -> Json<Vec<DomainSummary>> {
    let overrides = state.overrides.get_all().await;
    Json(domains_with_overrides(&state.dataset, &overrides))
}

/// GET /api/domain/:name
///
/// Detailed scores for a single domain, 404 when unknown.
pub async fn get_domain(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DomainDetail>, ApiError> {
    let overrides = state.overrides.get_all().await;
    match state.dataset.detail(&name, &overrides) {
        Some(detail) => Ok(Json(detail)),
        None => {
            debug!("Unknown domain requested: {}", name);
            Err(ApiError::NotFound(format!("Domain '{}' not found", name)))
        }
    }
}

/// GET /api/overview
///
/// Cross-domain comparison matrix.
pub async fn get_overview(State(state): State<AppState>) -> Json<OverviewMatrix> {
    let overrides = state.overrides.get_all().await;
    Json(overview_with_overrides(&state.dataset, &overrides))
}
