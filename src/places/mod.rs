//! Nearby-places search service (Google Places Nearby Search).

pub mod google;
pub mod mock;
pub mod types;

pub use google::*;
pub use mock::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Places API key is not configured")]
    NotConfigured,

    #[error("Cannot reach places service at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Places service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}
