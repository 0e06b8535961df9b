//! Domain module - records, identity rules and title policy
//!
//! Each module is its own file in the domain/ directory; public exports
//! are defined here for convenience.

pub mod identifiers;
pub mod media;
pub mod services;
pub mod titles;

pub use identifiers::{url_to_source_chapter_id, url_to_source_id};
pub use media::{ChapterEntry, ChapterRecord, DetailOutcome, ImageRef, MediaRecord};
pub use services::{ItemFailure, ListingScrape, PageFetcher, SiteAdapter};
pub use titles::{filter_titles, find_blacklisted, is_blacklisted, BlacklistHit, TitleRules, TitleSet};
