//! Listing page parser
//!
//! Finds every item block on a `/danh-sach` page and derives the item's
//! identifier from its title link. A bad item never fails the page: its
//! identifier error is carried in the entry for the caller to report.
//! The container selectors only decide whether a page without items is an
//! empty grid or broken markup.

use tracing::debug;

use super::config::ListingSelectors;
use super::document::{CompiledSelector, Document};
use super::{ContextualParser, ParseContext};
use crate::domain::identifiers::url_to_source_id;
use crate::infrastructure::parsing_error::{ScrapeError, ScrapeResult};

/// One item block found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Zero-based position on the page
    pub position: usize,
    pub title: Option<String>,
    pub source_id: ScrapeResult<String>,
}

pub struct ListingParser {
    container_selectors: Vec<CompiledSelector>,
    item_selector: CompiledSelector,
    title_link_selector: CompiledSelector,
}

impl ListingParser {
    pub fn new() -> ScrapeResult<Self> {
        Self::with_config(&ListingSelectors::default())
    }

    pub fn with_config(selectors: &ListingSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            container_selectors: CompiledSelector::compile_all(&selectors.container)?,
            item_selector: CompiledSelector::parse(&selectors.item)?,
            title_link_selector: CompiledSelector::parse(&selectors.title_link)?,
        })
    }
}

impl ContextualParser for ListingParser {
    type Output = Vec<ListingEntry>;
    type Context = ParseContext;

    fn parse_with_context(&self, doc: &Document, context: &Self::Context) -> ScrapeResult<Self::Output> {
        debug!("Parsing listing page {}", context.page);

        let entries: Vec<ListingEntry> = doc
            .select(&self.item_selector)
            .enumerate()
            .map(|(position, item)| {
                let link = item.select_first(&self.title_link_selector);
                let title = link.map(|l| l.text()).filter(|t| !t.is_empty());
                let source_id = link
                    .and_then(|l| l.non_empty_attr("href"))
                    .ok_or_else(|| {
                        ScrapeError::required_field_missing(
                            "item.href",
                            Some(&format!("page {} item #{}", context.page, position)),
                        )
                    })
                    .and_then(url_to_source_id);

                if let Err(e) = &source_id {
                    debug!("Listing page {} item #{} has no usable link: {}", context.page, position, e);
                }

                ListingEntry {
                    position,
                    title,
                    source_id,
                }
            })
            .collect();

        // No items is only a valid page when the grid itself is present
        if entries.is_empty() {
            let Some(container) = doc.first_matching(&self.container_selectors) else {
                let tried: Vec<&str> = self.container_selectors.iter().map(CompiledSelector::as_str).collect();
                return Err(ScrapeError::required_field_missing(
                    "listing container",
                    Some(&format!("page {} (tried: {})", context.page, tried.join(", "))),
                ));
            };
            debug!("Listing page {} is empty ('{}' matched)", context.page, container.as_str());
        }

        debug!("Found {} item blocks on listing page {}", entries.len(), context.page);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> ScrapeResult<Vec<ListingEntry>> {
        let parser = ListingParser::new().unwrap();
        parser.parse_with_context(&Document::parse(html), &ParseContext::new(1))
    }

    #[test]
    fn test_parser_creation() {
        assert!(ListingParser::new().is_ok());
    }

    #[test]
    fn test_entries_in_listing_order() {
        let html = r#"
            <div class="card-body"><div class="row">
                <div class="thumb-item-flow"><div class="series-title"><a href="/truyen-tranh/one">One</a></div></div>
                <div class="thumb-item-flow"><div class="series-title"><a href="https://www.truyentranhlh.net/truyen-tranh/two/">Two</a></div></div>
            </div></div>
        "#;

        let entries = parse(html).unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.source_id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["one", "two"]);
        assert_eq!(entries[1].position, 1);
        assert_eq!(entries[1].title.as_deref(), Some("Two"));
    }

    #[test]
    fn test_items_outside_known_containers_are_found() {
        let html = r#"
            <section class="grid">
                <div class="thumb-item-flow"><div class="series-title"><a href="/truyen-tranh/abc">Abc</a></div></div>
            </section>
        "#;

        let entries = parse(html).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source_id.as_deref(), Ok("abc"));
    }

    #[test]
    fn test_missing_link_is_per_item_error() {
        let html = r#"
            <div class="card-body">
                <div class="thumb-item-flow"><div class="series-title"><a>No href</a></div></div>
                <div class="thumb-item-flow"><div class="series-title"><a href="/">Root</a></div></div>
                <div class="thumb-item-flow"><div class="series-title"><a href="/truyen-tranh/ok">Ok</a></div></div>
            </div>
        "#;

        let entries = parse(html).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(matches!(entries[0].source_id, Err(ScrapeError::Parse { .. })));
        assert!(matches!(entries[1].source_id, Err(ScrapeError::MalformedUrl { .. })));
        assert_eq!(entries[2].source_id.as_deref(), Ok("ok"));
    }

    #[test]
    fn test_empty_grid_is_valid() {
        let entries = parse(r#"<div class="card-body"><div class="row"></div></div>"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_missing_container_is_structural_error() {
        let result = parse("<html><body><p>maintenance</p></body></html>");
        assert!(matches!(result, Err(ScrapeError::Parse { ref field, .. }) if field == "listing container"));
    }
}
