//! Catalog API client: one method per tree level.

use super::decode::{decode_detail, decode_items, decode_languages, decode_listing};
use super::error::{FetchError, Resource};
use super::transport::{Request, Transport};
use super::types::{DetailRecord, Envelope, ItemRecord, LanguageRecord, ListingRecord};
use crate::page::{extract_categories, CategoryLink};
use bytes::Bytes;
use shared::{CatalogConfig, CrawlConfig, ScrapeMode};
use tracing::{debug, warn};

/// Form body for the items, languages and detail endpoints
pub fn id_form(id: &str) -> String {
    format!("id={}", id)
}

/// Form body for the listing endpoint
pub fn listing_form(item_id: &str, lang_id: &str) -> String {
    format!("id={}&lang={}&filter=true", item_id, lang_id)
}

/// Catalog client over any [`Transport`]
pub struct CatalogClient<T> {
    transport: T,
    catalog: CatalogConfig,
    scrape_mode: ScrapeMode,
    reject_false_status: bool,
    /// Requests issued so far
    requests: usize,
    /// Envelopes seen with `Status: false`
    false_statuses: usize,
}

impl<T: Transport> CatalogClient<T> {
    /// Create a new catalog client
    pub fn new(transport: T, catalog: CatalogConfig, crawl: &CrawlConfig) -> Self {
        Self {
            transport,
            catalog,
            scrape_mode: crawl.scrape_mode,
            reject_false_status: crawl.reject_false_status,
            requests: 0,
            false_statuses: 0,
        }
    }

    async fn send(&mut self, request: Request) -> Result<Bytes, FetchError> {
        self.requests += 1;
        let body = self.transport.send(&request).await?;
        debug!(url = %request.url, body = %String::from_utf8_lossy(&body), "Response body");
        Ok(body)
    }

    async fn post(&mut self, url: String, form: String) -> Result<Bytes, FetchError> {
        let request = Request::form(url, &self.catalog.headers, form);
        self.send(request).await
    }

    /// Apply the status policy to a decoded envelope
    fn open<R>(&mut self, resource: Resource, envelope: Envelope<R>) -> Result<R, FetchError> {
        if !envelope.status {
            self.false_statuses += 1;
            if self.reject_false_status {
                return Err(FetchError::Rejected { resource });
            }
            warn!(resource = resource.as_str(), "Response carried Status=false, accepting result");
        }
        Ok(envelope.result)
    }

    /// Fetch the root page and scrape its category links
    pub async fn fetch_categories(&mut self) -> Result<Vec<CategoryLink>, FetchError> {
        let request = Request::get(self.catalog.root_url.clone());
        let body = self.send(request).await?;
        Ok(extract_categories(&body, self.scrape_mode))
    }

    /// Fetch the items of a category
    pub async fn fetch_items(&mut self, category_id: &str) -> Result<Vec<ItemRecord>, FetchError> {
        let body = self
            .post(self.catalog.items_url.clone(), id_form(category_id))
            .await?;
        decode_items(&body)
    }

    /// Fetch the language variants of an item
    pub async fn fetch_languages(&mut self, item_id: &str) -> Result<Vec<LanguageRecord>, FetchError> {
        let body = self
            .post(self.catalog.languages_url.clone(), id_form(item_id))
            .await?;
        let envelope = decode_languages(&body)?;
        self.open(Resource::Languages, envelope)
    }

    /// Fetch the downloadable files of an item in one language
    pub async fn fetch_listing(
        &mut self,
        item_id: &str,
        lang_id: &str,
    ) -> Result<Vec<ListingRecord>, FetchError> {
        let body = self
            .post(self.catalog.listing_url.clone(), listing_form(item_id, lang_id))
            .await?;
        let envelope = decode_listing(&body)?;
        self.open(Resource::Listing, envelope)
    }

    /// Fetch the file detail of a listing entry
    pub async fn fetch_detail(&mut self, entry_id: &str) -> Result<DetailRecord, FetchError> {
        let body = self
            .post(self.catalog.detail_url.clone(), id_form(entry_id))
            .await?;
        let envelope = decode_detail(&body)?;
        self.open(Resource::Detail, envelope)
    }

    /// Number of requests issued so far
    pub fn request_count(&self) -> usize {
        self.requests
    }

    /// Number of `Status: false` envelopes seen so far
    pub fn false_status_count(&self) -> usize {
        self.false_statuses
    }
}
