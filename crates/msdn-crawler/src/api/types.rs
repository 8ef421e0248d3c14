//! Catalog API response types.
//!
//! Field names follow the remote service's PascalCase JSON. Missing fields
//! decode as empty strings and unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use shared::{FileDetail, Item, LanguageVariant, ListingEntry};

/// `{"Status": bool, "Result": ...}` wrapper used by the language,
/// listing and detail endpoints. A null or missing `Result` decodes as the
/// empty value, the way the service sends it alongside `Status: false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Envelope<T> {
    #[serde(rename = "Status", alias = "status", default)]
    pub status: bool,
    #[serde(
        rename = "Result",
        alias = "result",
        default,
        deserialize_with = "null_as_default"
    )]
    pub result: T,
}

/// Deserialize `null` as `T::default()`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Item under a category (bare array element, no envelope)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Id")]
    pub id: String,
}

/// Language offered for an item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageRecord {
    #[serde(rename = "Lang")]
    pub lang: String,
    #[serde(rename = "Id")]
    pub id: String,
}

/// Downloadable file summary for an item in one language
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Post")]
    pub post: String,
    #[serde(rename = "URL")]
    pub url: String,
}

/// File detail for one listing entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailRecord {
    #[serde(rename = "FileName")]
    pub file_name: String,
    #[serde(rename = "SHA1")]
    pub sha1: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "PostDateString")]
    pub post_date: String,
    #[serde(rename = "DownLoad")]
    pub download: String,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Item {
            name: record.name,
            id: record.id,
            languages: Vec::new(),
        }
    }
}

impl From<LanguageRecord> for LanguageVariant {
    fn from(record: LanguageRecord) -> Self {
        LanguageVariant {
            lang: record.lang,
            id: record.id,
            entries: Vec::new(),
        }
    }
}

impl From<ListingRecord> for ListingEntry {
    fn from(record: ListingRecord) -> Self {
        ListingEntry {
            name: record.name,
            id: record.id,
            post: record.post,
            url: record.url,
            detail: None,
        }
    }
}

impl From<DetailRecord> for FileDetail {
    fn from(record: DetailRecord) -> Self {
        FileDetail {
            file_name: record.file_name,
            sha1: record.sha1,
            size: record.size,
            published: record.post_date,
            download_url: record.download,
        }
    }
}
