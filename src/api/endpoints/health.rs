//! Liveness and readiness endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::run_blocking;
use crate::api::types::ApiContext;

pub const ROOT_BANNER: &str = "AarogyaLink Backend is running...";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
    pub ai_configured: bool,
    pub places_configured: bool,
}

/// `GET /`
pub async fn root() -> &'static str {
    ROOT_BANNER
}

/// `GET /api/health`. Always 200; a failed database ping shows as `"degraded"`.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let store = ctx.core.store.clone();
    let database = match run_blocking(move || store.ping()).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        version: crate::config::APP_VERSION,
        database,
        ai_configured: ctx.core.genai.is_configured(),
        places_configured: ctx.core.places.is_configured(),
    })
}
