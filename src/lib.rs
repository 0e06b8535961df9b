//! lh-scraper - site adapter for the truyentranhlh comic site
//!
//! Lists recently updated series, scrapes their detail pages into media
//! records, extracts chapter image sequences and detects listing changes.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::LhAdapter;
pub use domain::{DetailOutcome, ImageRef, ListingScrape, MediaRecord, PageFetcher, SiteAdapter};
pub use infrastructure::{AppConfig, ConfigManager, HttpClient, ScrapeError, ScrapeResult};
