//! Client configuration loaded from environment variables.
//!
//! All values have sensible defaults so the client can run against the
//! hosted Pet Manager API without any environment at all.

use std::env;
use std::path::PathBuf;

/// Default base URL of the Pet Manager API.
pub const DEFAULT_BASE_URL: &str = "https://pet-manager-api.geia.vip";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend REST API.
    pub api_base_url: String,
    /// Request timeout in milliseconds.
    pub api_timeout_ms: u64,
    /// Username for the auto-login / reauthentication flow.
    pub username: String,
    /// Password for the auto-login / reauthentication flow.
    pub password: String,
    /// Bound on the wait for reauthentication, in milliseconds.
    pub reauth_timeout_ms: u64,
    /// Optional path for durable session persistence. `None` keeps the
    /// session in memory only.
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_timeout_ms: 30_000,
            username: "admin".to_string(),
            password: "admin".to_string(),
            reauth_timeout_ms: 10_000,
            session_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("PET_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_timeout_ms: parse_ms("PET_API_TIMEOUT_MS", 30_000)?,
            username: env::var("PET_API_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            password: env::var("PET_API_PASSWORD").unwrap_or_else(|_| "admin".to_string()),
            reauth_timeout_ms: parse_ms("PET_REAUTH_TIMEOUT_MS", 10_000)?,
            session_file: env::var("PET_SESSION_FILE").ok().map(PathBuf::from),
        })
    }
}

fn parse_ms(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(var)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
