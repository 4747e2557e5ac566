//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::fetch::FetcherConfig;
use crate::graph::Edges;
use crate::models::StatId;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Site the stats are served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base of the raw stats and ranking endpoints
    #[serde(default = "default_dynamic_url")]
    pub dynamic_url: String,

    /// Base of images (league, race and region icons)
    #[serde(default = "default_static_url")]
    pub static_url: String,

    /// Version selected before any control change (2 = LotV)
    #[serde(default = "default_version")]
    pub default_version: StatId,
}

fn default_dynamic_url() -> String {
    "https://www.rankedftw.com/".to_string()
}

fn default_static_url() -> String {
    "https://www.rankedftw.com/static/".to_string()
}

fn default_version() -> StatId {
    2
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            dynamic_url: default_dynamic_url(),
            static_url: default_static_url(),
            default_version: default_version(),
        }
    }
}

impl SiteConfig {
    pub fn dynamic_url(&self) -> Result<Url, ConfigError> {
        parse_url("site.dynamic_url", &self.dynamic_url)
    }
}

/// HTTP fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Largest accepted response body in bytes
    #[serde(default = "default_max_content_size")]
    pub max_content_size: usize,
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("ladder-stats/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_content_size() -> usize {
    50 * 1024 * 1024
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            max_content_size: default_max_content_size(),
        }
    }
}

impl FetchConfig {
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            max_content_size: self.max_content_size,
            timeout: Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Graph layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Spacing from the canvas border to the graph area
    #[serde(default)]
    pub edges: Edges,

    /// Extra x spacing inside the y axis and the right edge
    #[serde(default = "default_x_margin")]
    pub x_margin: f64,

    #[serde(default = "default_min_height")]
    pub min_height: f64,

    /// Canvas height as a fraction of its width
    #[serde(default = "default_aspect")]
    pub aspect: f64,

    /// Pixel distance within which a point reacts to the mouse
    #[serde(default = "default_hover_radius")]
    pub hover_radius: f64,
}

fn default_x_margin() -> f64 {
    20.0
}

fn default_min_height() -> f64 {
    280.0
}

fn default_aspect() -> f64 {
    0.30
}

fn default_hover_radius() -> f64 {
    16.0
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            edges: Edges::default(),
            x_margin: default_x_margin(),
            min_height: default_min_height(),
            aspect: default_aspect(),
            hover_radius: default_hover_radius(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `enums.json` and `seasons.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub graph: GraphConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            site: SiteConfig::default(),
            fetch: FetchConfig::default(),
            graph: GraphConfig::default(),
        }
    }
}

fn parse_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::ValidationError(format!("{name} '{value}': {e}")))
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn enums_path(&self) -> PathBuf {
        self.data_dir.join("enums.json")
    }

    pub fn seasons_path(&self) -> PathBuf {
        self.data_dir.join("seasons.json")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_url("site.dynamic_url", &self.site.dynamic_url)?;
        parse_url("site.static_url", &self.site.static_url)?;

        if self.fetch.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Fetch timeout must be greater than 0".to_string(),
            ));
        }

        if self.graph.aspect <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Graph aspect must be greater than 0".to_string(),
            ));
        }

        if self.graph.min_height <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Graph min height must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
