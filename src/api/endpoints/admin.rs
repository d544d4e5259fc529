//! Admin dashboard endpoints. Read-only, unauthenticated.

use axum::extract::State;
use axum::Json;

use super::run_blocking;
use crate::admin::{self, AdminStats};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::DiagnosisRecord;

/// `GET /api/admin/diagnoses`: newest first, capped.
pub async fn diagnoses(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<DiagnosisRecord>>, ApiError> {
    let store = ctx.core.store.clone();
    let records = run_blocking(move || admin::recent_diagnoses(store.as_ref())).await?;
    Ok(Json(records))
}

/// `GET /api/admin/stats`
pub async fn stats(State(ctx): State<ApiContext>) -> Result<Json<AdminStats>, ApiError> {
    let store = ctx.core.store.clone();
    let stats = run_blocking(move || admin::collect_stats(store.as_ref())).await?;
    Ok(Json(stats))
}
