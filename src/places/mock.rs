use std::sync::Mutex;

use async_trait::async_trait;

use super::types::{NearbySearchQuery, NearbySearchResponse, PlacesClient};
use super::PlacesError;

/// Mock places client for testing. Replays a canned response body.
pub struct MockPlacesClient {
    body: String,
    configured: bool,
    queries: Mutex<Vec<NearbySearchQuery>>,
}

impl MockPlacesClient {
    /// `body` is a raw Nearby Search JSON document.
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            configured: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn queries(&self) -> Vec<NearbySearchQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait]
impl PlacesClient for MockPlacesClient {
    async fn nearby_hospitals(
        &self,
        query: &NearbySearchQuery,
    ) -> Result<NearbySearchResponse, PlacesError> {
        if !self.configured {
            return Err(PlacesError::NotConfigured);
        }
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
        serde_json::from_str(&self.body).map_err(|e| PlacesError::ResponseParsing(e.to_string()))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
