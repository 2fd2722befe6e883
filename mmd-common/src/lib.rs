//! # Maturity Dashboard Common Library
//!
//! Shared code for the maturity dashboard service:
//! - Band classification of maturity scores
//! - Assessment data model (domains, pillars, questions)
//! - Override application and score aggregation
//! - Summary view projection
//! - Durable override storage
//! - Base dataset loading and configuration

pub mod aggregate;
pub mod band;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod overrides;
pub mod projector;

pub use band::Band;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use overrides::{OverrideSet, OverrideStore};
