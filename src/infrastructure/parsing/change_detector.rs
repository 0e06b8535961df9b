//! Listing change detection
//!
//! The site lists most recently updated series first, so the title of the
//! first item block is enough to tell whether anything moved.

use super::config::ListingSelectors;
use super::document::{CompiledSelector, Document};
use crate::infrastructure::parsing_error::ScrapeResult;

pub struct ChangeDetector {
    item_selector: CompiledSelector,
    title_selector: CompiledSelector,
}

impl ChangeDetector {
    pub fn new() -> ScrapeResult<Self> {
        Self::with_config(&ListingSelectors::default())
    }

    pub fn with_config(selectors: &ListingSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            item_selector: CompiledSelector::parse(&selectors.item)?,
            title_selector: CompiledSelector::parse(&selectors.title)?,
        })
    }

    /// Title text of the first item block; None when the snapshot has no
    /// item or the title is blank
    pub fn top_title(&self, html: &str) -> Option<String> {
        if html.trim().is_empty() {
            return None;
        }

        let doc = Document::parse(html);
        doc.select_first(&self.item_selector)
            .and_then(|item| item.select_first(&self.title_selector))
            .map(|title| title.text())
            .filter(|text| !text.is_empty())
    }

    /// True only when both snapshots carry a top title and the titles differ
    pub fn should_monitor_change(&self, old_snapshot: &str, new_snapshot: &str) -> bool {
        match (self.top_title(old_snapshot), self.top_title(new_snapshot)) {
            (Some(old), Some(new)) => old != new,
            _ => false,
        }
    }
}
