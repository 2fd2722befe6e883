//! Manual score override endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use mmd_common::overrides::DomainOverrides;
use mmd_common::OverrideSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiError;
use crate::AppState;

/// Body of POST /api/override
///
/// All fields are optional at the parsing level so missing values are
/// reported as a 400 with a clear message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRequest {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub question_id: Option<String>,
    /// `null` or absent removes the override
    #[serde(default)]
    pub score: Option<f64>,
}

/// Response of POST /api/override
#[derive(Debug, Serialize)]
pub struct OverrideResponse {
    pub ok: bool,
    /// The domain's overrides after the change
    pub overrides: DomainOverrides,
}

/// Response of DELETE /api/overrides/:domain
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub ok: bool,
    pub removed: bool,
}

/// GET /api/overrides
///
/// All persisted overrides.
pub async fn list_overrides(State(state): State<AppState>) -> Json<OverrideSet> {
    Json(state.overrides.get_all().await)
}

/// POST /api/override
///
/// Save or remove a single override.
pub async fn save_override(
    State(state): State<AppState>,
    payload: Result<Json<OverrideRequest>, JsonRejection>,
) -> Result<Json<OverrideResponse>, ApiError> {
    let Json(req) = payload?;

    let domain = required(req.domain, "domain")?;
    let question_id = required(req.question_id, "questionId")?;

    if let Some(score) = req.score {
        if !state.scoring.accepts(score) {
            return Err(ApiError::BadRequest(format!(
                "score must be between {} and {}",
                state.scoring.min_score, state.scoring.max_score
            )));
        }
    }

    let overrides = state
        .overrides
        .set(&domain, &question_id, req.score)
        .await?;

    match req.score {
        Some(score) => info!("Override saved: {}/{} = {}", domain, question_id, score),
        None => info!("Override removed: {}/{}", domain, question_id),
    }

    Ok(Json(OverrideResponse {
        ok: true,
        overrides,
    }))
}

/// DELETE /api/overrides/:domain
///
/// Remove every override of one domain.
pub async fn clear_domain_overrides(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<ClearResponse>, ApiError> {
    let removed = state.overrides.clear_domain(&domain).await?;
    Ok(Json(ClearResponse { ok: true, removed }))
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("{} is required", field))),
    }
}
