//! mmd-api library - Maturity Dashboard HTTP service
//!
//! Serves the precomputed assessment views with manual overrides applied,
//! and accepts override changes.

use axum::Router;
use mmd_common::config::ScoringConfig;
use mmd_common::{Dataset, OverrideStore};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;

/// Name reported in logs and by `/health`
pub const SERVICE_NAME: &str = "mmd-api";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Base datasets (read-only after startup)
    pub dataset: Arc<Dataset>,
    /// Durable override storage
    pub overrides: Arc<OverrideStore>,
    /// Accepted range for submitted scores
    pub scoring: ScoringConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(dataset: Dataset, overrides: OverrideStore, scoring: ScoringConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            overrides: Arc::new(overrides),
            scoring,
        }
    }
}

/// Build application router
///
/// When `static_dir` is set, the dashboard front end is served from it
/// at `/` (index.html) and `/static/*`.
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    use axum::routing::{delete, get, post};

    let api = Router::new()
        .route("/api/domains", get(api::list_domains))
        .route("/api/domain/:name", get(api::get_domain))
        .route("/api/overview", get(api::get_overview))
        .route("/api/overrides", get(api::list_overrides))
        .route("/api/overrides/:domain", delete(api::clear_domain_overrides))
        .route("/api/override", post(api::save_override))
        .merge(api::health_routes());

    let mut app = api.with_state(state);

    if let Some(dir) = static_dir {
        app = app.merge(api::static_routes(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
