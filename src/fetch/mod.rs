//! HTTP fetching of raw stats and ranking history.
//!
//! Any non-success status or unparseable body is an error; nothing is
//! substituted for a failed fetch.

mod store;

pub use store::*;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::models::{RankingRecord, RawSnapshot, StatId};
use crate::stats::StatsError;

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Rate limited by {host}, retry after {retry_after_secs}s")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Content too large: {size} bytes (max {max_size})")]
    ContentTooLarge { size: usize, max_size: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stats payload: {0}")]
    Stats(#[from] StatsError),
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Maximum content size to fetch (default 50MB)
    pub max_content_size: usize,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_content_size: 50 * 1024 * 1024, // 50MB
            timeout: Duration::from_secs(30),
            user_agent: format!("ladder-stats/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// JSON over HTTP.
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("ladder-stats")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a fetcher with default configuration.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(FetcherConfig::default())
    }

    /// GET a URL and parse the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        info!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(FetchError::RateLimited {
                host: url.host_str().unwrap_or("unknown").to_string(),
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content = response.bytes().await?;

        if content.len() > self.config.max_content_size {
            return Err(FetchError::ContentTooLarge {
                size: content.len(),
                max_size: self.config.max_content_size,
            });
        }

        debug!("Fetched {} bytes from {}", content.len(), url);
        Ok(serde_json::from_slice(&content)?)
    }
}

/// Where raw snapshots and ranking histories come from.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Source identifier for logging.
    fn name(&self) -> &'static str;

    /// All raw snapshots of a mode, oldest first.
    async fn fetch_mode(&self, mode_id: StatId) -> Result<Vec<RawSnapshot>, FetchError>;

    /// Ranking history of a team, oldest first.
    async fn fetch_ranking_history(&self, team_id: i64) -> Result<Vec<RankingRecord>, FetchError>;
}

/// Fetches from the site's dynamic endpoints.
pub struct HttpSource {
    fetcher: Fetcher,
    dynamic_url: Url,
}

impl HttpSource {
    pub fn new(fetcher: Fetcher, dynamic_url: Url) -> Self {
        Self {
            fetcher,
            dynamic_url,
        }
    }

    fn join(&self, path: &str) -> Result<Url, FetchError> {
        self.dynamic_url
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{}{}: {}", self.dynamic_url, path, e)))
    }

    pub fn mode_url(&self, mode_id: StatId) -> Result<Url, FetchError> {
        self.join(&format!("stats/raw/{}/", mode_id))
    }

    pub fn ranking_history_url(&self, team_id: i64) -> Result<Url, FetchError> {
        self.join(&format!("team/{}/rankings/", team_id))
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_mode(&self, mode_id: StatId) -> Result<Vec<RawSnapshot>, FetchError> {
        let url = self.mode_url(mode_id)?;
        self.fetcher.get_json(&url).await
    }

    async fn fetch_ranking_history(&self, team_id: i64) -> Result<Vec<RankingRecord>, FetchError> {
        let url = self.ranking_history_url(team_id)?;
        self.fetcher.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpSource {
        HttpSource::new(Fetcher::with_defaults().unwrap(), Url::parse(base).unwrap())
    }

    #[test]
    fn test_mode_url() {
        let source = source("https://www.rankedftw.com/");
        assert_eq!(
            source.mode_url(11).unwrap().as_str(),
            "https://www.rankedftw.com/stats/raw/11/"
        );
    }

    #[test]
    fn test_ranking_history_url_under_prefix() {
        let source = source("https://example.com/site/");
        assert_eq!(
            source.ranking_history_url(4711).unwrap().as_str(),
            "https://example.com/site/team/4711/rankings/"
        );
    }

    #[test]
    fn test_fetcher_config_default() {
        let config = FetcherConfig::default();

        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_content_size, 50 * 1024 * 1024);
        assert!(config.user_agent.starts_with("ladder-stats/"));
    }

    #[test]
    fn test_stats_error_converts() {
        let err: FetchError = StatsError::UnknownStatVersion(9).into();
        assert_eq!(err.to_string(), "Invalid stats payload: No layout for stat version 9");
    }
}
