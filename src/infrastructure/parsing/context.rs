//! Parsing context passed alongside a document

/// Context for listing pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    /// Listing page number being parsed
    pub page: u32,
}

impl ParseContext {
    pub const fn new(page: u32) -> Self {
        Self { page }
    }
}

/// Context for a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailParseContext {
    /// Identifier the page was requested with; becomes the record's id
    pub source_id: String,

    /// Adapter id stamped on the record
    pub source: String,
}

impl DetailParseContext {
    pub fn new(source: &str, source_id: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            source: source.to_string(),
        }
    }
}

/// Context for a chapter page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterParseContext {
    pub source_media_id: String,
    pub chapter_id: String,
}

impl ChapterParseContext {
    pub fn new(source_media_id: &str, chapter_id: &str) -> Self {
        Self {
            source_media_id: source_media_id.to_string(),
            chapter_id: chapter_id.to_string(),
        }
    }
}
