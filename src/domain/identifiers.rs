//! Identifier derivation from item and chapter URLs
//!
//! The identifier of a media item or chapter is the final non-empty path
//! segment of its URL, kept byte-for-byte (no percent decoding, no slug
//! rewriting) so that it can be sent back to the site unchanged.

use crate::infrastructure::parsing_error::{ScrapeError, ScrapeResult};

/// Derive a media identifier (`/truyen-tranh/{id}`) from an item URL
pub fn url_to_source_id(url: &str) -> ScrapeResult<String> {
    last_path_segment(url)
}

/// Derive a chapter identifier (`/truyen-tranh/{media}/{id}`) from a chapter URL
pub fn url_to_source_chapter_id(url: &str) -> ScrapeResult<String> {
    last_path_segment(url)
}

fn last_path_segment(url: &str) -> ScrapeResult<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ScrapeError::malformed_url(url, "empty URL"));
    }

    // Query and fragment never belong to the identifier
    let without_fragment = trimmed.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();

    let path = match without_query.split_once("://") {
        // Absolute URL: the authority is not a path segment
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None if without_query.starts_with("//") => without_query[2..]
            .split_once('/')
            .map_or("", |(_, path)| path),
        None => without_query,
    };

    path.split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| ScrapeError::malformed_url(url, "no non-empty path segment"))
}
