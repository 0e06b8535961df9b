//! Capability interfaces between the host and a site adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::media::{DetailOutcome, ImageRef, MediaRecord};
use crate::domain::titles::BlacklistHit;
use crate::infrastructure::parsing_error::{ScrapeError, ScrapeResult};

/// Fetches raw documents by site-relative path
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, path: &str) -> ScrapeResult<String>;
}

/// Everything a host needs from one site
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Stable adapter id stamped on every record
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Two-letter locale codes the site publishes in
    fn locales(&self) -> &[String];

    /// How often the host should poll the listing for changes
    fn monitor_interval(&self) -> Duration;

    /// Scrape one listing page and every item on it
    async fn scrape_listing_page(&self, page: u32) -> ScrapeResult<ListingScrape>;

    async fn scrape_detail(&self, source_id: &str) -> ScrapeResult<DetailOutcome>;

    async fn get_images(&self, source_media_id: &str, chapter_id: &str) -> ScrapeResult<Vec<ImageRef>>;

    /// Compare a cached listing snapshot with a fresh one
    fn should_monitor_change(&self, old_snapshot: &str, new_snapshot: &str) -> bool;
}

/// One item that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    /// None when the identifier itself could not be derived
    pub source_id: Option<String>,
    #[serde(serialize_with = "serialize_error")]
    pub error: ScrapeError,
}

fn serialize_error<S: serde::Serializer>(error: &ScrapeError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Aggregated result of one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingScrape {
    pub page: u32,
    /// Successfully parsed records, in listing order
    pub records: Vec<MediaRecord>,
    /// Items excluded by the blacklist
    pub filtered: Vec<FilteredItem>,
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredItem {
    pub source_id: String,
    pub hit: BlacklistHit,
}

impl ListingScrape {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of item blocks seen on the page
    pub fn item_count(&self) -> usize {
        self.records.len() + self.filtered.len() + self.failures.len()
    }

    pub fn into_records(self) -> Vec<MediaRecord> {
        self.records
    }
}
