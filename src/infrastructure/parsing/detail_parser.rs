//! Detail page parser
//!
//! Builds a [`MediaRecord`] from a `/truyen-tranh/{id}` page: primary title,
//! alternate titles and the chapter list. Items whose titles hit the
//! blacklist come back as [`DetailOutcome::Filtered`] before any chapter is
//! read.

use tracing::debug;

use super::config::DetailSelectors;
use super::context::DetailParseContext;
use super::document::{CompiledSelector, Document, Node};
use super::ContextualParser;
use crate::domain::identifiers::url_to_source_chapter_id;
use crate::domain::media::{ChapterEntry, DetailOutcome, MediaRecord};
use crate::domain::titles::{filter_titles, TitleRules};
use crate::infrastructure::parsing_error::{ScrapeError, ScrapeResult};

pub struct DetailParser {
    title_selector: CompiledSelector,
    alt_title_selector: CompiledSelector,
    chapter_link_selector: CompiledSelector,
    chapter_time_selector: CompiledSelector,
    title_rules: TitleRules,
}

impl DetailParser {
    pub fn with_config(selectors: &DetailSelectors, title_rules: TitleRules) -> ScrapeResult<Self> {
        Ok(Self {
            title_selector: CompiledSelector::parse(&selectors.title)?,
            alt_title_selector: CompiledSelector::parse(&selectors.alt_title)?,
            chapter_link_selector: CompiledSelector::parse(&selectors.chapter_link)?,
            chapter_time_selector: CompiledSelector::parse(&selectors.chapter_time)?,
            title_rules,
        })
    }

    fn extract_titles(&self, doc: &Document, source_id: &str) -> ScrapeResult<Vec<String>> {
        let primary = doc
            .select_first(&self.title_selector)
            .map(Node::text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ScrapeError::required_field_missing("title", Some(source_id)))?;

        let raw_alt = doc
            .select_first(&self.alt_title_selector)
            .map(Node::text)
            .unwrap_or_default();

        let mut titles = vec![primary];
        titles.extend(self.title_rules.parse_title(&raw_alt));
        Ok(titles)
    }

    fn extract_chapters(&self, doc: &Document, source_id: &str) -> ScrapeResult<Vec<ChapterEntry>> {
        doc.select(&self.chapter_link_selector)
            .enumerate()
            .map(|(index, link)| -> ScrapeResult<ChapterEntry> {
                let position = format!("{source_id} chapter #{index}");

                let name = link
                    .non_empty_attr("title")
                    .ok_or_else(|| ScrapeError::required_field_missing("chapter.title", Some(&position)))?;
                let href = link
                    .non_empty_attr("href")
                    .ok_or_else(|| ScrapeError::required_field_missing("chapter.href", Some(&position)))?;

                Ok(ChapterEntry {
                    name: name.to_string(),
                    source_chapter_id: url_to_source_chapter_id(href)?,
                    chapter_time: link
                        .select_first(&self.chapter_time_selector)
                        .map(Node::text)
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}

impl ContextualParser for DetailParser {
    type Output = DetailOutcome;
    type Context = DetailParseContext;

    fn parse_with_context(&self, doc: &Document, context: &Self::Context) -> ScrapeResult<Self::Output> {
        debug!("Parsing detail page for {}", context.source_id);

        let all_titles = self.extract_titles(doc, &context.source_id)?;

        if let Some(hit) = self.title_rules.find_blacklisted(&all_titles) {
            debug!(
                "Filtered {}: title '{}' contains '{}'",
                context.source_id, hit.title, hit.key
            );
            return Ok(DetailOutcome::Filtered(hit));
        }

        let chapters = self.extract_chapters(doc, &context.source_id)?;
        debug!("Parsed {} chapters for {}", chapters.len(), context.source_id);

        Ok(DetailOutcome::Record(MediaRecord::new(
            &context.source,
            context.source_id.clone(),
            filter_titles(all_titles),
            chapters,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> DetailParser {
        let rules = TitleRules::new("[;,]", &["truyện chữ".to_string()]).unwrap();
        DetailParser::with_config(&DetailSelectors::default(), rules).unwrap()
    }

    fn parse(html: &str) -> ScrapeResult<DetailOutcome> {
        parser().parse_with_context(&Document::parse(html), &DetailParseContext::new("lh", "abc-123"))
    }

    fn detail_page(title: &str, alt: &str, chapters: &str) -> String {
        format!(
            r#"<div class="series-name"><a href="/truyen-tranh/abc-123">{title}</a></div>
               <div class="series-information">
                 <div class="info-item"><span class="info-name">Tên khác:</span><span class="info-value">{alt}</span></div>
                 <div class="info-item"><span class="info-name">Tác giả:</span><span class="info-value">Someone</span></div>
               </div>
               <ul class="list-chapters">{chapters}</ul>"#
        )
    }

    #[test]
    fn test_full_record() {
        let html = detail_page(
            "Abc",
            "Abc Alt; Abc",
            r#"<a title="Chapter 2" href="https://www.truyentranhlh.net/truyen-tranh/abc-123/chap-2"><div class="chapter-time">20/05/2024</div></a>
               <a title=" Chapter 1 " href="/truyen-tranh/abc-123/chap-1"></a>"#,
        );

        let record = parse(&html).unwrap().into_record().unwrap();
        assert_eq!(record.source, "lh");
        assert_eq!(record.source_id, "abc-123");
        assert_eq!(record.titles, vec!["Abc", "Abc Alt"]);
        assert_eq!(record.chapters.len(), 2);
        assert_eq!(record.chapters[0].source_chapter_id, "chap-2");
        assert_eq!(record.chapters[0].chapter_time, "20/05/2024");
        assert_eq!(record.chapters[1].name, "Chapter 1");
        assert_eq!(record.chapters[1].chapter_time, "");
        assert!(record.chapters.iter().all(|c| c.source_media_id == "abc-123"));
    }

    #[test]
    fn test_no_chapters_is_valid() {
        let record = parse(&detail_page("Abc", "", "")).unwrap().into_record().unwrap();
        assert!(record.chapters.is_empty());
        assert_eq!(record.titles, vec!["Abc"]);
    }

    #[test]
    fn test_blacklisted_primary_title_is_filtered() {
        let outcome = parse(&detail_page("Truyện Chữ Something", "", "")).unwrap();
        assert!(outcome.is_filtered());
    }

    #[test]
    fn test_blacklisted_alt_title_is_filtered_before_chapters() {
        // the broken chapter would be a parse error if it were read
        let outcome = parse(&detail_page("Clean", "x; TRUYỆN CHỮ", r#"<a href="/c">no title</a>"#)).unwrap();
        assert!(outcome.is_filtered());
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let result = parse("<html><body><ul class=\"list-chapters\"></ul></body></html>");
        assert!(matches!(result, Err(ScrapeError::Parse { ref field, .. }) if field == "title"));
    }

    #[test]
    fn test_chapter_without_href_is_parse_error() {
        let result = parse(&detail_page("Abc", "", r#"<a title="Chapter 1"></a>"#));
        assert!(matches!(result, Err(ScrapeError::Parse { ref field, .. }) if field == "chapter.href"));
    }

    #[test]
    fn test_chapter_without_title_is_parse_error() {
        let result = parse(&detail_page("Abc", "", r#"<a href="/truyen-tranh/abc-123/chap-1"></a>"#));
        assert!(matches!(result, Err(ScrapeError::Parse { ref field, .. }) if field == "chapter.title"));
    }
}
