//! truyentranhlh adapter
//!
//! Wires the page fetcher to the parsers. Every document is parsed inside a
//! synchronous helper once its fetch has completed, so no parsed document
//! ever lives across an `.await` and the adapter's futures stay `Send`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::media::{DetailOutcome, ImageRef};
use crate::domain::services::{FilteredItem, ItemFailure, ListingScrape, PageFetcher, SiteAdapter};
use crate::domain::titles::TitleRules;
use crate::infrastructure::config::{AppConfig, SiteConfig, truyentranhlh, utils};
use crate::infrastructure::gather::gather_settled;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parsing::{
    ChangeDetector, ChapterParseContext, ContextualParser, DetailParseContext, DetailParser, Document, ImageParser,
    ListingEntry, ListingParser, ParseContext,
};
use crate::infrastructure::parsing_error::ScrapeResult;

pub struct LhAdapter<F> {
    fetcher: F,
    site: SiteConfig,
    listing_parser: ListingParser,
    detail_parser: DetailParser,
    image_parser: ImageParser,
    change_detector: ChangeDetector,
}

impl LhAdapter<HttpClient> {
    /// Adapter backed by the rate-limited HTTP client
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new(&config.site.base_url, config.http.clone())?;
        debug!("HTTP client bound to {}", client.base_url());
        Ok(Self::new(client, config.site.clone())?)
    }
}

impl<F: PageFetcher> LhAdapter<F> {
    /// Compile the configured selectors and title rules
    pub fn new(fetcher: F, site: SiteConfig) -> ScrapeResult<Self> {
        let title_rules = TitleRules::new(&site.alt_title_delimiter, &site.blacklist_keys)?;

        Ok(Self {
            listing_parser: ListingParser::with_config(&site.selectors.listing)?,
            detail_parser: DetailParser::with_config(&site.selectors.detail, title_rules)?,
            image_parser: ImageParser::with_config(&site.selectors.chapter)?,
            change_detector: ChangeDetector::with_config(&site.selectors.listing)?,
            fetcher,
            site,
        })
    }

    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub const fn site_config(&self) -> &SiteConfig {
        &self.site
    }

    /// Item entries of one listing document
    pub fn parse_listing(&self, html: &str, page: u32) -> ScrapeResult<Vec<ListingEntry>> {
        let doc = Document::parse(html);
        self.listing_parser.parse_with_context(&doc, &ParseContext::new(page))
    }

    /// Outcome of one detail document
    pub fn parse_detail(&self, html: &str, source_id: &str) -> ScrapeResult<DetailOutcome> {
        let doc = Document::parse(html);
        self.detail_parser
            .parse_with_context(&doc, &DetailParseContext::new(truyentranhlh::SOURCE_ID, source_id))
    }

    /// Image references of one chapter document
    pub fn compose_images(&self, html: &str, source_media_id: &str, chapter_id: &str) -> ScrapeResult<Vec<ImageRef>> {
        let doc = Document::parse(html);
        self.image_parser
            .parse_with_context(&doc, &ChapterParseContext::new(source_media_id, chapter_id))
    }

    async fn fetch_detail(&self, source_id: &str) -> ScrapeResult<DetailOutcome> {
        let html = self.fetcher.fetch_text(&utils::detail_page_path(source_id)).await?;
        self.parse_detail(&html, source_id)
    }

    async fn scrape_entry(&self, entry: ListingEntry) -> Result<(String, DetailOutcome), ItemFailure> {
        let ListingEntry {
            position,
            title,
            source_id,
        } = entry;
        let source_id = source_id.map_err(|error| {
            warn!(
                "Listing item #{} ({}) skipped: {}",
                position,
                title.as_deref().unwrap_or("untitled"),
                error
            );
            ItemFailure { source_id: None, error }
        })?;

        match self.fetch_detail(&source_id).await {
            Ok(outcome) => Ok((source_id, outcome)),
            Err(error) => {
                warn!("Failed to scrape {}: {}", source_id, error);
                Err(ItemFailure {
                    source_id: Some(source_id),
                    error,
                })
            }
        }
    }
}

#[async_trait]
impl<F: PageFetcher> SiteAdapter for LhAdapter<F> {
    fn id(&self) -> &str {
        truyentranhlh::SOURCE_ID
    }

    fn name(&self) -> &str {
        truyentranhlh::SOURCE_NAME
    }

    fn locales(&self) -> &[String] {
        &self.site.locales
    }

    fn monitor_interval(&self) -> Duration {
        self.site.monitor_interval()
    }

    async fn scrape_listing_page(&self, page: u32) -> ScrapeResult<ListingScrape> {
        let html = self.fetcher.fetch_text(&utils::listing_page_path(page)).await?;
        let entries = self.parse_listing(&html, page)?;

        info!(
            "Listing page {}: {} items, detail concurrency {}",
            page,
            entries.len(),
            self.site
                .detail_concurrency
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
        );

        let settled = gather_settled(
            entries.into_iter().map(|entry| self.scrape_entry(entry)),
            self.site.detail_concurrency,
        )
        .await;

        let mut scrape = ListingScrape {
            page,
            failures: settled.failed,
            ..ListingScrape::default()
        };
        for (source_id, outcome) in settled.succeeded {
            match outcome {
                DetailOutcome::Record(record) => scrape.records.push(record),
                DetailOutcome::Filtered(hit) => {
                    debug!("Skipping {} (blacklisted '{}')", source_id, hit.key);
                    scrape.filtered.push(FilteredItem { source_id, hit });
                }
            }
        }

        info!(
            "Listing page {} completed: {} records, {} filtered, {} failed",
            page,
            scrape.records.len(),
            scrape.filtered.len(),
            scrape.failure_count()
        );

        Ok(scrape)
    }

    async fn scrape_detail(&self, source_id: &str) -> ScrapeResult<DetailOutcome> {
        self.fetch_detail(source_id).await
    }

    async fn get_images(&self, source_media_id: &str, chapter_id: &str) -> ScrapeResult<Vec<ImageRef>> {
        let html = self
            .fetcher
            .fetch_text(&utils::chapter_page_path(source_media_id, chapter_id))
            .await?;
        self.compose_images(&html, source_media_id, chapter_id)
    }

    fn should_monitor_change(&self, old_snapshot: &str, new_snapshot: &str) -> bool {
        self.change_detector.should_monitor_change(old_snapshot, new_snapshot)
    }
}
