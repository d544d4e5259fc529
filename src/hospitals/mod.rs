//! Nearby hospital search with synthetic scheme/insurance acceptance.
//!
//! The acceptance flags are random placeholders, not eligibility data.
//! They exist so the dashboard's scheme filter has something to filter on
//! until a real eligibility source is wired in.

pub mod search;
pub mod types;

pub use search::*;
pub use types::*;

use thiserror::Error;

use crate::places::PlacesError;

#[derive(Error, Debug)]
pub enum HospitalSearchError {
    #[error("Latitude and Longitude are required")]
    MissingCoordinates,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Places API key is not configured")]
    NotConfigured,

    #[error("Places search returned status {status}: {message}")]
    UpstreamStatus { status: String, message: String },

    #[error("Places search failed: {0}")]
    Upstream(PlacesError),
}

impl From<PlacesError> for HospitalSearchError {
    fn from(err: PlacesError) -> Self {
        match err {
            PlacesError::NotConfigured => HospitalSearchError::NotConfigured,
            other => HospitalSearchError::Upstream(other),
        }
    }
}
