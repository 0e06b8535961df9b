//! Media, chapter and image records produced by the adapter

use serde::{Deserialize, Serialize};

use super::titles::{BlacklistHit, TitleSet};

/// One comic series as scraped from its detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    /// Adapter id the record came from (e.g. "lh")
    pub source: String,
    pub source_id: String,
    pub titles: Vec<String>,
    pub chapters: Vec<ChapterRecord>,
}

impl MediaRecord {
    /// Build a record, stamping every chapter with the owning media id
    pub fn new(source: &str, source_id: String, titles: TitleSet, chapters: Vec<ChapterEntry>) -> Self {
        let chapters = chapters
            .into_iter()
            .map(|entry| ChapterRecord {
                name: entry.name,
                source_chapter_id: entry.source_chapter_id,
                source_media_id: source_id.clone(),
                chapter_time: entry.chapter_time,
            })
            .collect();

        Self {
            source: source.to_string(),
            source_id,
            titles: titles.into_vec(),
            chapters,
        }
    }

    pub fn primary_title(&self) -> Option<&str> {
        self.titles.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRecord {
    pub name: String,
    pub source_chapter_id: String,
    pub source_media_id: String,
    /// Site-provided text, never parsed
    pub chapter_time: String,
}

/// A chapter link as read from the page, before it is attached to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    pub name: String,
    pub source_chapter_id: String,
    pub chapter_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub image: String,
}

/// Result of scraping one detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DetailOutcome {
    Record(MediaRecord),
    /// Excluded by the blacklist; the host skips it silently
    Filtered(BlacklistHit),
}

impl DetailOutcome {
    pub fn into_record(self) -> Option<MediaRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Filtered(_) => None,
        }
    }

    pub const fn is_filtered(&self) -> bool {
        matches!(self, Self::Filtered(_))
    }
}
