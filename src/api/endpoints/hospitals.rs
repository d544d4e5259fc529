//! `POST /api/hospitals/search`: nearby hospital lookup.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::hospitals::{self, HospitalResult, HospitalSearchRequest};

#[derive(Debug, Serialize)]
pub struct HospitalSearchResponse {
    pub success: bool,
    pub hospitals: Vec<HospitalResult>,
}

pub async fn search(
    State(ctx): State<ApiContext>,
    payload: Result<Json<HospitalSearchRequest>, JsonRejection>,
) -> Result<Json<HospitalSearchResponse>, ApiError> {
    let Json(req) = payload?;
    let mut rng = StdRng::from_entropy();
    let hospitals = hospitals::search_hospitals(ctx.core.places.as_ref(), req, &mut rng).await?;
    Ok(Json(HospitalSearchResponse {
        success: true,
        hospitals,
    }))
}
