pub mod admin; // Dashboard views over the diagnosis log
pub mod api; // HTTP router, handlers and server lifecycle
pub mod config;
pub mod core_state;
pub mod db;
pub mod diagnosis; // Symptom analysis via the generative model
pub mod genai; // Gemini client
pub mod hospitals; // Nearby hospital search and ranking
pub mod models;
pub mod places; // Google Places client

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ServerError;
use crate::config::AppConfig;
use crate::core_state::CoreState;

/// Run the backend until Ctrl-C.
pub async fn run() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr();
    let core = Arc::new(CoreState::from_config(config)?);

    let mut server = api::start_api_server_on(core, bind_addr).await?;
    tracing::info!(addr = %server.addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.stopped().await
}
