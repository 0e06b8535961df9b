//! HTML parsing for truyentranhlh pages
//!
//! One parser per page kind, all driven by the selectors in [`config`] and
//! all operating on an already loaded [`Document`].

pub mod change_detector;
pub mod config;
pub mod context;
pub mod detail_parser;
pub mod document;
pub mod image_parser;
pub mod listing_parser;

pub use change_detector::ChangeDetector;
pub use config::{ChapterSelectors, DetailSelectors, ListingSelectors, SiteSelectors};
pub use context::{ChapterParseContext, DetailParseContext, ParseContext};
pub use detail_parser::DetailParser;
pub use document::{CompiledSelector, Document, Node};
pub use image_parser::ImageParser;
pub use listing_parser::{ListingEntry, ListingParser};

use crate::infrastructure::parsing_error::ScrapeResult;

/// Parser that needs to know which page it is looking at
pub trait ContextualParser {
    type Output;
    type Context;

    fn parse_with_context(&self, doc: &Document, context: &Self::Context) -> ScrapeResult<Self::Output>;
}
