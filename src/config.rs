use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "AarogyaLink";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_PATH: &str = "aarogyalink.db";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 120;

/// Maximum accepted request body. Attachments arrive base64-encoded inline.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Value shipped in the `.env` template; treated as "not configured".
pub const PLACES_KEY_PLACEHOLDER: &str = "your_google_places_api_key_here";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "aarogyalink_lib=info,aarogyalink=info,tower_http=warn"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration, read from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub upstream_timeout_secs: u64,
}

impl AppConfig {
    /// Load from the environment, honouring an optional `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = match get("HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "HOST",
                value: v,
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match get("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };

        let upstream_timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "UPSTREAM_TIMEOUT_SECS",
                value: v,
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            host,
            port,
            database_path: get("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
            places_api_key: get("GOOGLE_PLACES_API_KEY")
                .filter(|k| k != PLACES_KEY_PLACEHOLDER),
            places_base_url: get("PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.into()),
            upstream_timeout_secs,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
