//! Client configuration loaded from environment variables.
//!
//! The base API address is supplied once here and shared by the client and
//! the CLI; nothing else about the backend is configurable client-side.

use std::env;
use std::path::PathBuf;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Vault REST API (e.g. `https://api.vault.example`)
    pub api_url: String,
    /// Where the CLI persists session tokens between invocations
    pub session_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `VAULT_API_URL` is required; `VAULT_SESSION_FILE` defaults to
    /// `.vault-session.json` in the working directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_url: env::var("VAULT_API_URL").map_err(|_| ConfigError::Missing("VAULT_API_URL"))?,
            session_file: env::var("VAULT_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".vault-session.json")),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            session_file: PathBuf::from(".vault-session.json"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
