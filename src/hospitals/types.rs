use serde::{Deserialize, Serialize};

use crate::places::Place;

pub const DEFAULT_SPECIALTY: &str = "hospital";
pub const DEFAULT_RADIUS_M: u32 = 5000;

/// Probability that a hospital is flagged as accepting government schemes.
pub const GOVT_SCHEME_ACCEPT_P: f64 = 0.6;
/// Probability that a hospital is flagged as accepting private insurance.
pub const INSURANCE_ACCEPT_P: f64 = 0.8;

/// Body of `POST /api/hospitals/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HospitalSearchRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub specialty: Option<String>,
    pub radius: Option<u32>,
    pub scheme: Option<String>,
}

/// One hospital as returned to the browser. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalResult {
    pub place_id: String,
    pub name: String,
    pub vicinity: Option<String>,
    pub rating: f64,
    pub user_ratings_total: u64,
    /// Upstream geometry, unmodified.
    pub geometry: Option<serde_json::Value>,
    pub open_now: bool,
    /// Synthetic, see module docs.
    pub accepts_govt_schemes: bool,
    /// Synthetic, see module docs.
    pub accepts_insurance: bool,
}

impl HospitalResult {
    pub fn from_place(place: Place, accepts_govt_schemes: bool, accepts_insurance: bool) -> Self {
        Self {
            place_id: place.place_id,
            name: place.name,
            vicinity: place.vicinity,
            rating: place.rating.unwrap_or(0.0),
            user_ratings_total: place.user_ratings_total.unwrap_or(0),
            geometry: place.geometry,
            open_now: place
                .opening_hours
                .and_then(|h| h.open_now)
                .unwrap_or(false),
            accepts_govt_schemes,
            accepts_insurance,
        }
    }
}
