//! CSS selectors for the site's listing, detail and chapter pages
//!
//! Any change to the site's markup is absorbed here, not in the parsers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSelectors {
    pub listing: ListingSelectors,
    pub detail: DetailSelectors,
    pub chapter: ChapterSelectors,
}

/// Selectors for `/danh-sach` listing pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Container holding the item grid - multiple fallbacks.
    /// Only consulted when a page has no item blocks: a page matching none
    /// of them is treated as broken markup.
    pub container: Vec<String>,

    /// One block per listed series
    pub item: String,

    /// Title element inside an item block (change monitoring reads its text)
    pub title: String,

    /// Link to the detail page inside an item block
    pub title_link: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            container: vec![
                ".card-body .row".to_string(),
                ".card-body".to_string(),
                "main".to_string(),
            ],
            item: ".thumb-item-flow".to_string(),
            title: ".series-title".to_string(),
            title_link: ".series-title a".to_string(),
        }
    }
}

/// Selectors for `/truyen-tranh/{id}` detail pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailSelectors {
    pub title: String,

    /// Block whose text lists the alternate titles
    pub alt_title: String,

    /// Chapter links carrying `title` and `href` attributes
    pub chapter_link: String,

    /// Optional time element inside a chapter link
    pub chapter_time: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            title: ".series-name a".to_string(),
            alt_title: ".info-item:first-child .info-value".to_string(),
            chapter_link: ".list-chapters a".to_string(),
            chapter_time: ".chapter-time".to_string(),
        }
    }
}

/// Selectors for `/truyen-tranh/{id}/{chapter}` pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSelectors {
    pub image: String,

    /// Lazy-load attribute holding the real image URL (`src` is a placeholder)
    pub image_attr: String,
}

impl Default for ChapterSelectors {
    fn default() -> Self {
        Self {
            image: "#chapter-content img".to_string(),
            image_attr: "data-src".to_string(),
        }
    }
}
