//! Shared library for the MSDN catalog crawler.
//!
//! This crate provides common functionality used by the crawler crate:
//! - Configuration management
//! - Catalog tree models
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::{CatalogConfig, Config, ConfigSource, CrawlConfig, ScrapeMode};
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
