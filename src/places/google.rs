use async_trait::async_trait;

use super::types::{NearbySearchQuery, NearbySearchResponse, PlacesClient};
use super::PlacesError;

/// Google Places Nearby Search client.
pub struct GooglePlacesClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GooglePlacesClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, PlacesError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PlacesError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/maps/api/place/nearbysearch/json", self.base_url)
    }
}

/// Query string for a nearby search, without the key.
fn query_params(query: &NearbySearchQuery) -> Vec<(&'static str, String)> {
    vec![
        ("location", format!("{},{}", query.lat, query.lng)),
        ("radius", query.radius_m.to_string()),
        ("type", "hospital".to_string()),
        ("keyword", query.keyword.clone()),
    ]
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    async fn nearby_hospitals(
        &self,
        query: &NearbySearchQuery,
    ) -> Result<NearbySearchResponse, PlacesError> {
        let api_key = self.api_key.as_deref().ok_or(PlacesError::NotConfigured)?;

        let mut params = query_params(query);
        params.push(("key", api_key.to_string()));

        let response = self
            .client
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    PlacesError::Connection(self.base_url.clone())
                } else {
                    PlacesError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PlacesError::ResponseParsing(e.to_string()))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
