use rand::Rng;

use super::types::{
    HospitalResult, HospitalSearchRequest, DEFAULT_RADIUS_M, DEFAULT_SPECIALTY,
    GOVT_SCHEME_ACCEPT_P, INSURANCE_ACCEPT_P,
};
use super::HospitalSearchError;
use crate::models::SchemeFilter;
use crate::places::{NearbySearchQuery, Place, PlacesClient, STATUS_OK, STATUS_ZERO_RESULTS};

/// Search for hospitals near a point.
///
/// `rng` drives the synthetic acceptance flags. Coordinates are validated
/// before anything else; no upstream call is made for a bad request.
pub async fn search_hospitals<R: Rng + Send>(
    client: &dyn PlacesClient,
    request: HospitalSearchRequest,
    rng: &mut R,
) -> Result<Vec<HospitalResult>, HospitalSearchError> {
    let query = build_query(&request)?;

    if !client.is_configured() {
        return Err(HospitalSearchError::NotConfigured);
    }

    let response = client.nearby_hospitals(&query).await?;

    if response.status != STATUS_OK && response.status != STATUS_ZERO_RESULTS {
        let message = response.error_message.unwrap_or_default();
        tracing::error!(status = %response.status, %message, "Places API error");
        return Err(HospitalSearchError::UpstreamStatus {
            status: response.status,
            message,
        });
    }

    let scheme = SchemeFilter::from_request(request.scheme.as_deref());
    let hospitals = rank_hospitals(response.results, scheme, rng);

    tracing::info!(
        found = hospitals.len(),
        keyword = %query.keyword,
        radius_m = query.radius_m,
        "Hospital search complete"
    );
    Ok(hospitals)
}

/// Validate the request and derive the upstream query.
pub fn build_query(request: &HospitalSearchRequest) -> Result<NearbySearchQuery, HospitalSearchError> {
    let (lat, lng) = match (request.lat, request.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(HospitalSearchError::MissingCoordinates),
    };
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(HospitalSearchError::InvalidCoordinates(format!("lat {lat}")));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(HospitalSearchError::InvalidCoordinates(format!("lng {lng}")));
    }

    let specialty = request
        .specialty
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SPECIALTY);
    let keyword = if specialty == DEFAULT_SPECIALTY {
        String::new()
    } else {
        specialty.to_string()
    };

    Ok(NearbySearchQuery {
        lat,
        lng,
        radius_m: request.radius.unwrap_or(DEFAULT_RADIUS_M),
        keyword,
    })
}

/// Annotate, filter by scheme, and sort by rating (highest first, stable).
pub fn rank_hospitals<R: Rng>(
    places: Vec<Place>,
    scheme: Option<SchemeFilter>,
    rng: &mut R,
) -> Vec<HospitalResult> {
    let mut hospitals: Vec<HospitalResult> = places
        .into_iter()
        .map(|place| {
            let govt = rng.gen_bool(GOVT_SCHEME_ACCEPT_P);
            let insurance = rng.gen_bool(INSURANCE_ACCEPT_P);
            HospitalResult::from_place(place, govt, insurance)
        })
        .collect();

    match scheme {
        Some(SchemeFilter::Government) => hospitals.retain(|h| h.accepts_govt_schemes),
        Some(SchemeFilter::Insurance) => hospitals.retain(|h| h.accepts_insurance),
        None => {}
    }

    hospitals.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    hospitals
}
