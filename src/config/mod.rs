//! Configuration management for the wariai pipeline
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::harvest::google_books::VOLUMES_ENDPOINT;
use crate::harvest::ndl::SRU_ENDPOINT;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Harvester configuration
    pub harvest: HarvestConfig,

    /// Output path configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Harvester-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// NDL SRU endpoint URL
    pub sru_endpoint: String,

    /// Google Books volumes endpoint URL
    pub google_books_endpoint: String,

    /// Google Books API key (optional)
    pub google_api_key: Option<String>,

    /// Rate limit against the SRU endpoint (requests per second)
    pub rate_limit: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Records per SRU page
    pub per_page: u32,

    /// Page ceiling per query
    pub max_pages: u32,

    /// Result ceiling per Google Books query
    pub max_google_results: u32,

    /// User agent string
    pub user_agent: String,
}

/// Output path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory all sink files are written under
    pub output_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let sru_endpoint =
            std::env::var("WARIAI_SRU_ENDPOINT").unwrap_or_else(|_| SRU_ENDPOINT.to_string());

        let google_books_endpoint = std::env::var("WARIAI_GOOGLE_BOOKS_ENDPOINT")
            .unwrap_or_else(|_| VOLUMES_ENDPOINT.to_string());

        let google_api_key = std::env::var("GOOGLE_API_KEY").ok();

        let rate_limit = std::env::var("WARIAI_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(4);

        let request_timeout_secs = std::env::var("WARIAI_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let per_page = std::env::var("WARIAI_PER_PAGE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(50);

        let max_pages = std::env::var("WARIAI_MAX_PAGES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(20);

        let max_google_results = std::env::var("WARIAI_MAX_GOOGLE_RESULTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(300);

        let user_agent = std::env::var("WARIAI_USER_AGENT")
            .unwrap_or_else(|_| format!("wariai/{}", env!("CARGO_PKG_VERSION")));

        let output_dir = std::env::var("WARIAI_OUTPUT_DIR")
            .unwrap_or_else(|_| String::from("local"))
            .into();

        let log_level = std::env::var("WARIAI_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("WARIAI_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            harvest: HarvestConfig {
                sru_endpoint,
                google_books_endpoint,
                google_api_key,
                rate_limit,
                request_timeout_secs,
                per_page,
                max_pages,
                max_google_results,
                user_agent,
            },
            storage: StorageConfig { output_dir },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.harvest.sru_endpoint)
            .with_context(|| format!("Invalid SRU endpoint: {}", self.harvest.sru_endpoint))?;
        url::Url::parse(&self.harvest.google_books_endpoint).with_context(|| {
            format!(
                "Invalid Google Books endpoint: {}",
                self.harvest.google_books_endpoint
            )
        })?;

        if self.harvest.rate_limit == 0 {
            anyhow::bail!("rate_limit must be greater than 0");
        }

        if self.harvest.per_page == 0 || self.harvest.per_page > 500 {
            anyhow::bail!("per_page must be between 1 and 500");
        }

        if self.harvest.max_pages == 0 {
            anyhow::bail!("max_pages must be greater than 0");
        }

        if self.harvest.max_google_results == 0 || self.harvest.max_google_results > 1000 {
            anyhow::bail!("max_google_results must be between 1 and 1000");
        }

        Ok(())
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.harvest.request_timeout_secs)
    }
}
