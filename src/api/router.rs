//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! API routes are nested under `/api/`; `GET /` answers a plain-text banner.
//!
//! Middleware stack (outermost to innermost):
//! 1. CORS, 2. Access logger, 3. Body size limit

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::config::MAX_BODY_BYTES;
use crate::core_state::CoreState;

/// Build the full HTTP router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/diagnosis", post(endpoints::diagnosis::diagnose))
        .route("/hospitals/search", post(endpoints::hospitals::search))
        .route("/admin/diagnoses", get(endpoints::admin::diagnoses))
        .route("/admin/stats", get(endpoints::admin::stats))
        .with_state(ctx);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(endpoints::health::root))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(cors)
}
