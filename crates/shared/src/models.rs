//! Catalog tree models.
//!
//! The tree is built once per run, top-down: categories scraped from the
//! root page own their items, items own their language variants, variants
//! own their listing entries, and each entry may carry a file detail.
//! Identifiers are opaque strings assigned by the remote service.

use serde::{Deserialize, Serialize};

/// Top-level taxonomy node scraped from the catalog root page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub id: String,
    pub items: Vec<Item>,
}

/// A named product or release under a category (e.g. one OS version)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub id: String,
    pub languages: Vec<LanguageVariant>,
}

/// A localization offered for an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageVariant {
    pub lang: String,
    pub id: String,
    pub entries: Vec<ListingEntry>,
}

/// One downloadable release under a language variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub id: String,
    pub post: String,
    pub url: String,
    /// Absent until the detail fetch succeeds
    pub detail: Option<FileDetail>,
}

/// File-level metadata for a listing entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDetail {
    pub file_name: String,
    pub sha1: String,
    pub size: String,
    pub published: String,
    pub download_url: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            items: Vec::new(),
        }
    }
}

/// Node counts over a whole tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCounts {
    pub categories: usize,
    pub items: usize,
    pub languages: usize,
    pub entries: usize,
    pub details: usize,
}

/// Count every node in a category forest
pub fn count_nodes(categories: &[Category]) -> TreeCounts {
    let mut counts = TreeCounts {
        categories: categories.len(),
        ..Default::default()
    };

    for item in categories.iter().flat_map(|c| &c.items) {
        counts.items += 1;
        for lang in &item.languages {
            counts.languages += 1;
            counts.entries += lang.entries.len();
            counts.details += lang.entries.iter().filter(|e| e.detail.is_some()).count();
        }
    }

    counts
}
