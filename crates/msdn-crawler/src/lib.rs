//! MSDN catalog crawler library.
//!
//! Enumerates the catalog site's taxonomy (categories, items, language
//! variants, listing entries and file details) and assembles it into a tree.

pub mod api;
pub mod crawler;
pub mod page;
pub mod report;

pub use api::{CatalogClient, FetchError, HttpTransport, Transport};
pub use crawler::{CrawlOutcome, CrawlStats, Crawler};
pub use page::{extract_categories, CategoryLink};
pub use report::{write_tree, OutputFormat};
