//! Shared application state.
//!
//! `CoreState` holds the long-lived handles every request needs: the
//! diagnosis store and the two upstream clients. It carries no per-request
//! or per-user data; handlers receive it wrapped in `Arc`.

use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::db::{DatabaseError, DiagnosisStore, SqliteDiagnosisStore};
use crate::genai::{GeminiClient, GenAiError, GenerativeClient};
use crate::places::{GooglePlacesClient, PlacesClient, PlacesError};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Generative AI client error: {0}")]
    GenAi(#[from] GenAiError),

    #[error("Places client error: {0}")]
    Places(#[from] PlacesError),
}

pub struct CoreState {
    pub config: AppConfig,
    pub store: Arc<dyn DiagnosisStore>,
    pub genai: Arc<dyn GenerativeClient>,
    pub places: Arc<dyn PlacesClient>,
}

impl CoreState {
    /// Open the database and build the HTTP clients from configuration.
    ///
    /// Missing API keys are not an error here: the affected endpoints report
    /// a configuration error per request, the rest of the API keeps working.
    pub fn from_config(config: AppConfig) -> Result<Self, CoreError> {
        let store = SqliteDiagnosisStore::open(&config.database_path)?;
        tracing::info!(path = %config.database_path.display(), "Diagnosis store opened");

        let genai = GeminiClient::new(
            &config.gemini_base_url,
            &config.gemini_model,
            config.gemini_api_key.clone(),
            config.upstream_timeout_secs,
        )?;
        if !genai.is_configured() {
            tracing::warn!("GEMINI_API_KEY not set, diagnosis requests will fail");
        }

        let places = GooglePlacesClient::new(
            &config.places_base_url,
            config.places_api_key.clone(),
            config.upstream_timeout_secs,
        )?;
        if !places.is_configured() {
            tracing::warn!("GOOGLE_PLACES_API_KEY not set, hospital search will fail");
        }

        Ok(Self::with_components(
            config,
            Arc::new(store),
            Arc::new(genai),
            Arc::new(places),
        ))
    }

    /// Assemble from explicit parts (tests swap in mocks here).
    pub fn with_components(
        config: AppConfig,
        store: Arc<dyn DiagnosisStore>,
        genai: Arc<dyn GenerativeClient>,
        places: Arc<dyn PlacesClient>,
    ) -> Self {
        Self {
            config,
            store,
            genai,
            places,
        }
    }
}
