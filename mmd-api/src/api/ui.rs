//! Dashboard front-end serving
//!
//! The HTML/JS dashboard is not embedded; it is served from a directory
//! named in the configuration.

use axum::Router;
use std::path::PathBuf;
use tower_http::services::{ServeDir, ServeFile};

/// Routes for `/` (index.html) and `/static/*` under `dir`
pub fn static_routes(dir: PathBuf) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(dir.join("index.html")))
        .nest_service("/static", ServeDir::new(dir.join("static")))
}
