//! Configuration management for the MSDN catalog crawler.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with defaults matching the live catalog site for all settings.

use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Remote catalog endpoints and request headers
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Traversal behaviour
    #[serde(default)]
    pub crawl: CrawlConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Remote catalog configuration.
///
/// The root page is fetched with a plain GET; every other endpoint receives
/// a form-encoded POST carrying `headers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog root page, scraped for categories
    pub root_url: String,

    /// Items of a category
    pub items_url: String,

    /// Language variants of an item
    pub languages_url: String,

    /// Downloadable files of an item in one language
    pub listing_url: String,

    /// File detail of a listing entry
    pub detail_url: String,

    /// Headers sent with every POST. Only the first value of each list is used.
    pub headers: BTreeMap<String, Vec<String>>,
}

/// How categories are pulled out of the root page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeMode {
    /// Parse the page and select anchors carrying `data-menuid`
    #[default]
    Dom,
    /// Match the raw bytes against the anchor pattern
    Pattern,
}

impl ScrapeMode {
    pub fn as_str(&self) -> &str {
        match self {
            ScrapeMode::Dom => "dom",
            ScrapeMode::Pattern => "pattern",
        }
    }
}

impl std::str::FromStr for ScrapeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dom" => Ok(ScrapeMode::Dom),
            "pattern" => Ok(ScrapeMode::Pattern),
            other => Err(anyhow::anyhow!("Unknown scrape mode: {}", other)),
        }
    }
}

/// Crawl configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Category extraction strategy
    #[serde(default)]
    pub scrape_mode: ScrapeMode,

    /// Treat `"Status": false` envelopes as failed fetches
    #[serde(default)]
    pub reject_false_status: bool,

    /// User-Agent header for the HTTP client (client default when unset)
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Origin".to_string(),
            vec!["https://msdn.itellyou.cn".to_string()],
        );
        headers.insert(
            "Referer".to_string(),
            vec!["https://msdn.itellyou.cn/".to_string()],
        );
        headers.insert(
            "Content-Type".to_string(),
            vec!["application/x-www-form-urlencoded; charset=UTF-8".to_string()],
        );

        Self {
            root_url: "https://msdn.itellyou.cn/".to_string(),
            items_url: "https://msdn.itellyou.cn/Category/Index".to_string(),
            languages_url: "https://msdn.itellyou.cn/Category/GetLang".to_string(),
            listing_url: "https://msdn.itellyou.cn/Category/GetList".to_string(),
            detail_url: "https://msdn.itellyou.cn/Category/GetProduct".to_string(),
            headers,
        }
    }
}

impl CatalogConfig {
    /// Point every endpoint at `base` (no trailing slash), keeping the paths
    /// used by the live site. Headers are left untouched.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            root_url: format!("{}/", base),
            items_url: format!("{}/Category/Index", base),
            languages_url: format!("{}/Category/GetLang", base),
            listing_url: format!("{}/Category/GetList", base),
            detail_url: format!("{}/Category/GetProduct", base),
            ..Default::default()
        }
    }
}

/// Where a loaded [`Config`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the file on disk
    File,
    /// The file was missing; built-in defaults are in use
    Defaults,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path).map(|(config, _)| config)
    }

    /// Load configuration and report whether the file existed.
    ///
    /// Emits no log events, so it can run before logging is initialized.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, ConfigSource)> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok((config, ConfigSource::File))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }
}
