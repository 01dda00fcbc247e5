use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cache::{CacheError, DraftCache};
use crate::gateway::{GatewayError, HttpGateway};

/// Deployment configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway_base_url: String,
    pub gateway_token: Option<String>,
    pub draft_dir: Option<PathBuf>,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gateway_base_url: require_env("GATEWAY_BASE_URL")?,
            gateway_token: optional_env("GATEWAY_TOKEN"),
            draft_dir: optional_env("DRAFT_DIR").map(PathBuf::from),
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Builds the gateway client this configuration describes.
    pub fn gateway(&self) -> Result<HttpGateway, GatewayError> {
        HttpGateway::new(
            self.gateway_base_url.clone(),
            self.gateway_token.clone(),
            self.request_timeout,
        )
    }

    /// Opens the draft cache at the configured directory, falling back to
    /// the platform default location.
    pub fn draft_cache(&self) -> Result<DraftCache, CacheError> {
        match &self.draft_dir {
            Some(dir) => Ok(DraftCache::new(dir.clone())),
            None => DraftCache::open_default(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
