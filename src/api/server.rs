//! HTTP server lifecycle.
//!
//! Bind, spawn the axum server in a background task, and return a handle
//! carrying the bound address and a shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::api_router;
use crate::config::ConfigError;
use crate::core_state::{CoreError, CoreState};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Startup error: {0}")]
    Core(#[from] CoreError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server task failed: {0}")]
    Task(String),
}

/// Handle to a running API server.
pub struct ApiServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ApiServer {
    /// Signal graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish serving in-flight requests.
    pub async fn stopped(mut self) -> Result<(), ServerError> {
        match self.task.take() {
            Some(task) => task.await.map_err(|e| ServerError::Task(e.to_string())),
            None => Ok(()),
        }
    }
}

/// Start the API server on `addr`. Port 0 binds an ephemeral port.
pub async fn start_api_server_on(
    core: Arc<CoreState>,
    addr: SocketAddr,
) -> Result<ApiServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let addr = listener
        .local_addr()
        .map_err(|source| ServerError::Bind { addr, source })?;

    let app = api_router(core);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    use crate::config::AppConfig;

    fn test_core() -> Arc<CoreState> {
        let config = AppConfig::from_lookup(|key| {
            (key == "DATABASE_PATH").then(|| ":memory:".to_string())
        })
        .unwrap();
        Arc::new(CoreState::from_config(config).unwrap())
    }

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    #[tokio::test]
    async fn start_serve_and_stop() {
        let mut server = start_api_server_on(test_core(), localhost())
            .await
            .expect("server should start");
        assert!(server.addr.port() > 0);

        let url = format!("http://{}/api/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["ai_configured"], false);

        server.shutdown();
        server.stopped().await.unwrap();
    }

    #[tokio::test]
    async fn unconfigured_places_over_http() {
        let mut server = start_api_server_on(test_core(), localhost())
            .await
            .expect("server should start");

        let resp = reqwest::Client::new()
            .post(format!("http://{}/api/hospitals/search", server.addr))
            .json(&serde_json::json!({"lat": 17.6868, "lng": 83.2185}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["error"]["code"], "CONFIGURATION");

        server.shutdown();
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let mut first = start_api_server_on(test_core(), localhost())
            .await
            .unwrap();
        let result = start_api_server_on(test_core(), first.addr).await;
        assert!(matches!(result, Err(ServerError::Bind { .. })));
        first.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_api_server_on(test_core(), localhost())
            .await
            .unwrap();
        server.shutdown();
        server.shutdown();
        server.stopped().await.unwrap();
    }
}
