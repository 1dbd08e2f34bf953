// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Backend used when `CALAI_BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Per-request timeout used when `CALAI_REQUEST_TIMEOUT_SECS` is not set.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the nutrition backend, without a trailing slash
    pub backend_url: String,
    /// Directory holding the persisted session and profile cache
    pub data_dir: PathBuf,
    /// Fixed client-side timeout applied to every request
    pub request_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            data_dir: PathBuf::from(".calai"),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local
    /// development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let backend_url = env::var("CALAI_BACKEND_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let data_dir = env::var("CALAI_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let request_timeout = match env::var("CALAI_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("CALAI_REQUEST_TIMEOUT_SECS", raw.clone()))?;
                if secs == 0 {
                    return Err(ConfigError::Invalid("CALAI_REQUEST_TIMEOUT_SECS", raw));
                }
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self::new(backend_url, data_dir, request_timeout))
    }

    /// Build a config, normalizing the backend URL.
    pub fn new(backend_url: impl Into<String>, data_dir: PathBuf, request_timeout: Duration) -> Self {
        Self {
            backend_url: normalize_base_url(&backend_url.into()),
            data_dir,
            request_timeout,
        }
    }
}

/// Strip trailing slashes so paths can be appended with `format!("{}{}")`.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("calai"))
        .unwrap_or_else(|| PathBuf::from(".calai"))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
