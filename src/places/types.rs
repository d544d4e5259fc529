use async_trait::async_trait;
use serde::Deserialize;

use super::PlacesError;

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Parameters of one nearby search. `type` is always `hospital`.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearchQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: u32,
    /// Empty means "any hospital".
    pub keyword: String,
}

/// Nearby Search response body. `status` is checked by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Place>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    /// Passed to the browser as received (`location`, `viewport`, ...).
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

/// Places search abstraction (allows mocking)
#[async_trait]
pub trait PlacesClient: Send + Sync {
    async fn nearby_hospitals(
        &self,
        query: &NearbySearchQuery,
    ) -> Result<NearbySearchResponse, PlacesError>;

    /// Whether credentials are present. Checked before any network call.
    fn is_configured(&self) -> bool;
}
