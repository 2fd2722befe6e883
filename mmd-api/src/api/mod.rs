//! HTTP API handlers for mmd-api

pub mod domains;
pub mod error;
pub mod health;
pub mod overrides;
pub mod ui;

pub use domains::{get_domain, get_overview, list_domains};
pub use error::ApiError;
pub use health::health_routes;
pub use overrides::{clear_domain_overrides, list_overrides, save_override};
pub use ui::static_routes;
