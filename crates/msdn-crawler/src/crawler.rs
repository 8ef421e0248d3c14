//! Catalog traversal driver.
//!
//! Walks the tree top-down: categories from the root page, then items,
//! language variants, listing entries and file details, one request per
//! node, strictly in order. Only the root fetch is fatal; any other failure
//! leaves that node's subtree empty and the walk moves on to the next
//! sibling.

use crate::api::{CatalogClient, Transport};
use anyhow::{Context, Result};
use shared::{Category, FileDetail, Item, LanguageVariant, ListingEntry};
use std::io::Write;
use tracing::{error, info, warn};

/// Statistics for one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub categories: usize,
    pub items: usize,
    pub languages: usize,
    pub entries: usize,
    pub details: usize,
    /// Fetches that failed and left a subtree incomplete
    pub failures: usize,
    /// Envelopes accepted or rejected with `Status: false`
    pub false_statuses: usize,
    /// HTTP requests issued, root page included
    pub requests: usize,
}

/// The assembled tree and its statistics
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub categories: Vec<Category>,
    pub stats: CrawlStats,
}

/// Sequential catalog crawler
pub struct Crawler<T> {
    client: CatalogClient<T>,
    progress: Box<dyn Write + Send>,
    stats: CrawlStats,
}

impl<T: Transport> Crawler<T> {
    /// Create a crawler that prints progress lines to stdout
    pub fn new(client: CatalogClient<T>) -> Self {
        Self::with_progress(client, Box::new(std::io::stdout()))
    }

    /// Create a crawler that prints progress lines to `progress`
    pub fn with_progress(client: CatalogClient<T>, progress: Box<dyn Write + Send>) -> Self {
        Self {
            client,
            progress,
            stats: CrawlStats::default(),
        }
    }

    fn report(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.progress, "{}", line) {
            warn!(error = %e, "Failed to write progress line");
        }
    }

    /// Run the complete crawl
    ///
    /// Fails only when the root page cannot be fetched; in that case no
    /// further request is made.
    pub async fn run(mut self) -> Result<CrawlOutcome> {
        info!("Crawling catalog");

        let links = self
            .client
            .fetch_categories()
            .await
            .context("Failed to fetch category root page")?;

        if links.is_empty() {
            warn!("Root page yielded no categories");
        }

        let mut categories: Vec<Category> = links
            .into_iter()
            .map(|link| Category::new(link.id, link.name))
            .collect();
        self.stats.categories = categories.len();

        for (idx, category) in categories.iter_mut().enumerate() {
            info!(
                progress = format!("{}/{}", idx + 1, self.stats.categories),
                category = %category.name,
                "Processing category"
            );
            self.crawl_category(category).await;
        }

        self.stats.requests = self.client.request_count();
        self.stats.false_statuses = self.client.false_status_count();

        info!(
            categories = self.stats.categories,
            items = self.stats.items,
            languages = self.stats.languages,
            entries = self.stats.entries,
            details = self.stats.details,
            failures = self.stats.failures,
            requests = self.stats.requests,
            "Crawl finished"
        );

        Ok(CrawlOutcome {
            categories,
            stats: self.stats,
        })
    }

    async fn crawl_category(&mut self, category: &mut Category) {
        self.report(format_args!("Fetching {} items url...", category.name));

        match self.client.fetch_items(&category.id).await {
            Ok(records) => {
                category.items = records.into_iter().map(Item::from).collect();
                self.stats.items += category.items.len();
            }
            Err(e) => {
                error!(
                    category = %category.name,
                    id = %category.id,
                    error = %e,
                    "Failed to fetch items, skipping category"
                );
                self.stats.failures += 1;
                return;
            }
        }

        for item in category.items.iter_mut() {
            self.crawl_item(item).await;
        }
    }

    async fn crawl_item(&mut self, item: &mut Item) {
        self.report(format_args!("Fetching item {} language", item.name));

        match self.client.fetch_languages(&item.id).await {
            Ok(records) => {
                item.languages = records.into_iter().map(LanguageVariant::from).collect();
                self.stats.languages += item.languages.len();
            }
            Err(e) => {
                error!(
                    item = %item.name,
                    id = %item.id,
                    error = %e,
                    "Failed to fetch languages, skipping item"
                );
                self.stats.failures += 1;
                return;
            }
        }

        for language in item.languages.iter_mut() {
            self.crawl_language(&item.id, language).await;
        }
    }

    async fn crawl_language(&mut self, item_id: &str, language: &mut LanguageVariant) {
        self.report(format_args!("Fetching item {} list", language.lang));

        match self.client.fetch_listing(item_id, &language.id).await {
            Ok(records) => {
                language.entries = records.into_iter().map(ListingEntry::from).collect();
                self.stats.entries += language.entries.len();
            }
            Err(e) => {
                error!(
                    item_id = %item_id,
                    lang = %language.lang,
                    id = %language.id,
                    error = %e,
                    "Failed to fetch listing, skipping language"
                );
                self.stats.failures += 1;
                return;
            }
        }

        for entry in language.entries.iter_mut() {
            self.crawl_entry(entry).await;
        }
    }

    async fn crawl_entry(&mut self, entry: &mut ListingEntry) {
        self.report(format_args!("Fetching item detail {} list", entry.name));

        match self.client.fetch_detail(&entry.id).await {
            Ok(record) => {
                entry.detail = Some(FileDetail::from(record));
                self.stats.details += 1;
            }
            Err(e) => {
                error!(
                    entry = %entry.name,
                    id = %entry.id,
                    error = %e,
                    "Failed to fetch file detail, keeping entry without it"
                );
                self.stats.failures += 1;
            }
        }
    }
}
