//! MSDN catalog crawler CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use msdn_crawler::{write_tree, CatalogClient, Crawler, HttpTransport, OutputFormat};
use shared::{Config, ConfigSource, ScrapeMode};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Format of the final tree dump
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Override how categories are extracted from the root page (dom, pattern)
    #[arg(long)]
    scrape_mode: Option<ScrapeMode>,

    /// Treat `Status: false` responses as failed fetches
    #[arg(long)]
    strict_status: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration; its outcome is logged once the subscriber exists
    let (mut config, source) = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if let Some(mode) = args.scrape_mode {
        config.crawl.scrape_mode = mode;
    }
    if args.strict_status {
        config.crawl.reject_false_status = true;
    }

    // Initialize logging
    let mut log_config = shared::LogConfig::from_settings(&config.logging, "msdn-crawler");
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    if source == ConfigSource::Defaults {
        warn!(
            path = %args.config.display(),
            "Config file not found, using defaults"
        );
    }

    info!("Crawling itellyou.cn...");
    info!(
        config_file = %args.config.display(),
        root_url = %config.catalog.root_url,
        scrape_mode = config.crawl.scrape_mode.as_str(),
        reject_false_status = config.crawl.reject_false_status,
        "Loaded configuration"
    );

    let transport = HttpTransport::new(config.crawl.user_agent.as_deref())?;
    let client = CatalogClient::new(transport, config.catalog.clone(), &config.crawl);
    let outcome = Crawler::new(client).run().await?;

    info!("=== Crawl Complete ===");
    info!("Categories: {}", outcome.stats.categories);
    info!("Items: {}", outcome.stats.items);
    info!("Languages: {}", outcome.stats.languages);
    info!("Listing entries: {}", outcome.stats.entries);
    info!("File details: {}", outcome.stats.details);
    info!("Failed fetches: {}", outcome.stats.failures);
    info!("Status=false responses: {}", outcome.stats.false_statuses);
    info!("Requests: {}", outcome.stats.requests);

    let counts = shared::count_nodes(&outcome.categories);
    debug!(
        categories = counts.categories,
        items = counts.items,
        languages = counts.languages,
        entries = counts.entries,
        details = counts.details,
        "Assembled tree"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_tree(&mut out, &outcome.categories, args.format)?;

    Ok(())
}
