//! Chapter page parser

use tracing::debug;

use super::config::ChapterSelectors;
use super::context::ChapterParseContext;
use super::document::{CompiledSelector, Document};
use super::ContextualParser;
use crate::domain::media::ImageRef;
use crate::infrastructure::parsing_error::ScrapeResult;

pub struct ImageParser {
    image_selector: CompiledSelector,
    image_attr: String,
}

impl ImageParser {
    pub fn new() -> ScrapeResult<Self> {
        Self::with_config(&ChapterSelectors::default())
    }

    pub fn with_config(selectors: &ChapterSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            image_selector: CompiledSelector::parse(&selectors.image)?,
            image_attr: selectors.image_attr.clone(),
        })
    }

    /// Image URLs in page order. Elements without the lazy-load attribute
    /// are placeholders and are skipped.
    pub fn compose_images(&self, doc: &Document) -> (Vec<ImageRef>, usize) {
        let mut skipped = 0;
        let images = doc
            .select(&self.image_selector)
            .filter_map(|img| {
                let url = img.non_empty_attr(&self.image_attr);
                if url.is_none() {
                    skipped += 1;
                }
                url
            })
            .map(|url| ImageRef { image: url.to_string() })
            .collect();
        (images, skipped)
    }
}

impl ContextualParser for ImageParser {
    type Output = Vec<ImageRef>;
    type Context = ChapterParseContext;

    fn parse_with_context(&self, doc: &Document, context: &Self::Context) -> ScrapeResult<Self::Output> {
        let (images, skipped) = self.compose_images(doc);

        if skipped > 0 {
            debug!(
                "Skipped {} image elements without '{}' in {}/{}",
                skipped, self.image_attr, context.source_media_id, context.chapter_id
            );
        }
        debug!(
            "Found {} images in {}/{}",
            images.len(),
            context.source_media_id,
            context.chapter_id
        );

        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Vec<ImageRef> {
        ImageParser::new()
            .unwrap()
            .parse_with_context(&Document::parse(html), &ChapterParseContext::new("abc-123", "chap-1"))
            .unwrap()
    }

    #[test]
    fn test_images_in_document_order() {
        let html = r#"
            <div id="chapter-content">
                <img data-src="https://cdn.example/1.jpg" src="loading.gif">
                <img src="ad.gif">
                <img data-src="https://cdn.example/2.jpg">
            </div>
        "#;

        let images = parse(html);
        assert_eq!(
            images,
            vec![
                ImageRef { image: "https://cdn.example/1.jpg".to_string() },
                ImageRef { image: "https://cdn.example/2.jpg".to_string() },
            ]
        );
    }

    #[test]
    fn test_images_outside_content_are_ignored() {
        let html = r#"
            <img data-src="https://cdn.example/logo.png">
            <div id="chapter-content"><img data-src=" "></div>
        "#;
        assert!(parse(html).is_empty());
    }

    #[test]
    fn test_skipped_count() {
        let doc = Document::parse(r#"<div id="chapter-content"><img><img data-src="a.jpg"><img data-src=""></div>"#);
        let (images, skipped) = ImageParser::new().unwrap().compose_images(&doc);
        assert_eq!(images.len(), 1);
        assert_eq!(skipped, 2);
    }
}
