//! Parsed-document capability
//!
//! The parsers only need to load a document, select by CSS path, and read
//! attributes or text. This module is the single place that knows those
//! operations are backed by `scraper`.
//!
//! `Document` is not `Send`: parse it inside a synchronous function after the
//! fetch completes and never hold it across an `.await`.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::infrastructure::parsing_error::{ScrapeError, ScrapeResult};

/// A CSS selector compiled once and reused for every document
#[derive(Debug, Clone)]
pub struct CompiledSelector {
    source: String,
    selector: Selector,
}

impl CompiledSelector {
    pub fn parse(selector: &str) -> ScrapeResult<Self> {
        let compiled = Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: selector.to_string(),
            selector: compiled,
        })
    }

    /// Compile a fallback list, keeping every selector that parses
    pub fn compile_all(selector_strings: &[String]) -> ScrapeResult<Vec<Self>> {
        let mut selectors = Vec::new();
        let mut errors = Vec::new();

        for selector_str in selector_strings {
            match Self::parse(selector_str) {
                Ok(selector) => selectors.push(selector),
                Err(e) => {
                    warn!("Failed to compile selector '{}': {}", selector_str, e);
                    errors.push(e.to_string());
                }
            }
        }

        if selectors.is_empty() {
            return Err(ScrapeError::InvalidSelector {
                selector: selector_strings.join(", "),
                reason: if errors.is_empty() {
                    "no selectors configured".to_string()
                } else {
                    errors.join("; ")
                },
            });
        }

        if !errors.is_empty() {
            debug!("Some selectors failed to compile: {}", errors.join(", "));
        }

        Ok(selectors)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// A loaded HTML document
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn select<'a>(&'a self, selector: &'a CompiledSelector) -> impl Iterator<Item = Node<'a>> + 'a {
        self.html.select(&selector.selector).map(Node::from)
    }

    pub fn select_first<'a>(&'a self, selector: &'a CompiledSelector) -> Option<Node<'a>> {
        self.select(selector).next()
    }

    /// First selector in the list that matches anything
    pub fn first_matching<'s>(&self, selectors: &'s [CompiledSelector]) -> Option<&'s CompiledSelector> {
        selectors
            .iter()
            .find(|selector| self.html.select(&selector.selector).next().is_some())
    }
}

/// An element inside a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Node<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl<'a> Node<'a> {
    pub fn select<'b>(self, selector: &'b CompiledSelector) -> impl Iterator<Item = Node<'a>> + use<'a, 'b> {
        self.element.select(&selector.selector).map(Node::from)
    }

    pub fn select_first(self, selector: &CompiledSelector) -> Option<Node<'a>> {
        self.element.select(&selector.selector).next().map(Node::from)
    }

    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Attribute value, trimmed; None when absent or blank
    pub fn non_empty_attr(self, name: &str) -> Option<&'a str> {
        self.attr(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Concatenated descendant text, trimmed
    pub fn text(self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <div class="list">
            <a class="item" href="/a" title=" First ">One <b>bold</b></a>
            <a class="item" title="">Two</a>
        </div>
    "#;

    #[test]
    fn test_select_reads_attributes_and_text() {
        let doc = Document::parse(HTML);
        let item = CompiledSelector::parse(".list a.item").unwrap();
        let nodes: Vec<_> = doc.select(&item).collect();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].attr("href"), Some("/a"));
        assert_eq!(nodes[0].non_empty_attr("title"), Some("First"));
        assert_eq!(nodes[0].text(), "One bold");
        assert_eq!(nodes[1].attr("href"), None);
        assert_eq!(nodes[1].non_empty_attr("title"), None);
    }

    #[test]
    fn test_nested_select() {
        let doc = Document::parse(HTML);
        let list = CompiledSelector::parse(".list").unwrap();
        let bold = CompiledSelector::parse("b").unwrap();
        let node = doc.select_first(&list).unwrap();
        assert_eq!(node.select_first(&bold).map(Node::text), Some("bold".to_string()));
    }

    #[test]
    fn test_compile_all_keeps_valid_selectors() {
        let selectors = CompiledSelector::compile_all(&["div[".to_string(), ".ok".to_string()]).unwrap();
        assert_eq!(selectors.len(), 1);
        assert_eq!(selectors[0].as_str(), ".ok");

        assert!(CompiledSelector::compile_all(&["div[".to_string()]).is_err());
        assert!(CompiledSelector::compile_all(&[]).is_err());
    }

    #[test]
    fn test_first_matching() {
        let doc = Document::parse(HTML);
        let selectors =
            CompiledSelector::compile_all(&[".missing".to_string(), ".list".to_string()]).unwrap();
        assert_eq!(doc.first_matching(&selectors).map(CompiledSelector::as_str), Some(".list"));
    }
}
