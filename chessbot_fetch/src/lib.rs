#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use anyhow::{Context, Result};
use async_trait::async_trait;
use chessbot_core::{FetchError, Fetcher};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// HTTP fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout (seconds)
    #[serde(default = "FetchConfig::default_timeout")]
    pub timeout: u64,

    /// User-Agent header
    #[serde(default = "FetchConfig::default_user_agent")]
    pub user_agent: String,

    /// Maximum response size (bytes)
    #[serde(default = "FetchConfig::default_max_size")]
    pub max_size: usize,
}

impl FetchConfig {
    const fn default_timeout() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        "Mozilla/5.0 (compatible; chessbot/1.0)".to_string()
    }

    const fn default_max_size() -> usize {
        5_000_000 // 5MB
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Self::default_timeout(),
            user_agent: Self::default_user_agent(),
            max_size: Self::default_max_size(),
        }
    }
}

/// Fetches pages over HTTP(S). No retries, no caching.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        // Only support HTTP/HTTPS
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: "only http and https URLs are supported".to_string(),
            });
        }

        let response = self
            .client
            .get(parsed)
            .header("User-Agent", &self.config.user_agent)
            .header("Accept", "text/html")
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Request(format!("Failed to read response: {e}")))?;

        if bytes.len() > self.config.max_size {
            return Err(FetchError::TooLarge {
                size: bytes.len(),
                max: self.config.max_size,
            });
        }

        debug!(url, bytes = bytes.len(), "Fetched page");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
