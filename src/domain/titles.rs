//! Title normalization and blacklist filtering
//!
//! Alternate titles arrive as one free-form string per item; how that string
//! is split is a per-site rule carried by [`TitleRules`].

use regex::Regex;
use serde::Serialize;

use crate::infrastructure::parsing_error::{ScrapeError, ScrapeResult};

/// Deduplicated, ordered set of titles for one item (primary first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TitleSet {
    pub titles: Vec<String>,
}

impl TitleSet {
    pub fn into_vec(self) -> Vec<String> {
        self.titles
    }
}

/// Which title tripped which blacklist key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlacklistHit {
    pub title: String,
    pub key: String,
}

/// Site-specific title rules
#[derive(Debug, Clone)]
pub struct TitleRules {
    alt_title_delimiter: Regex,
    blacklist_keys: Vec<String>,
}

impl TitleRules {
    pub fn new(alt_title_delimiter: &str, blacklist_keys: &[String]) -> ScrapeResult<Self> {
        let alt_title_delimiter =
            Regex::new(alt_title_delimiter).map_err(|e| ScrapeError::Configuration {
                message: format!("Invalid alternate title delimiter '{alt_title_delimiter}': {e}"),
            })?;

        Ok(Self {
            alt_title_delimiter,
            blacklist_keys: blacklist_keys.iter().map(|k| k.to_lowercase()).collect(),
        })
    }

    pub fn blacklist_keys(&self) -> &[String] {
        &self.blacklist_keys
    }

    /// Split the raw alternate-title text into candidate titles
    pub fn parse_title(&self, raw: &str) -> Vec<String> {
        self.alt_title_delimiter
            .split(raw)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    pub fn find_blacklisted(&self, titles: &[String]) -> Option<BlacklistHit> {
        find_blacklisted(titles, &self.blacklist_keys)
    }
}

/// Remove exact duplicates while keeping first-seen order
pub fn filter_titles<I, S>(titles: I) -> TitleSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut unique: Vec<String> = Vec::new();
    for title in titles {
        let title = title.into();
        if !unique.contains(&title) {
            unique.push(title);
        }
    }
    TitleSet { titles: unique }
}

/// True if any title contains any blacklist key, compared case-insensitively
pub fn is_blacklisted<S: AsRef<str>>(titles: &[S], blacklist_keys: &[String]) -> bool {
    find_blacklisted(titles, blacklist_keys).is_some()
}

pub fn find_blacklisted<S: AsRef<str>>(titles: &[S], blacklist_keys: &[String]) -> Option<BlacklistHit> {
    titles.iter().find_map(|title| {
        let lowered = title.as_ref().to_lowercase();
        blacklist_keys
            .iter()
            .find(|key| lowered.contains(key.to_lowercase().as_str()))
            .map(|key| BlacklistHit {
                title: title.as_ref().to_string(),
                key: key.clone(),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rules() -> TitleRules {
        TitleRules::new("[;,]", &["truyện chữ".to_string()]).unwrap()
    }

    #[test]
    fn test_filter_titles_dedupes_in_order() {
        let set = filter_titles(["A", "B", "A"]);
        assert_eq!(set.titles, vec!["A", "B"]);
    }

    #[test]
    fn test_filter_titles_is_case_sensitive() {
        let set = filter_titles(["Abc", "abc"]);
        assert_eq!(set.titles.len(), 2);
    }

    #[rstest]
    #[case("Abc Alt", vec!["Abc Alt"])]
    #[case(" One ; Two;Three ", vec!["One", "Two", "Three"])]
    #[case("Một, Hai", vec!["Một", "Hai"])]
    #[case(" ; ,", vec![])]
    #[case("", vec![])]
    fn test_parse_title(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(rules().parse_title(raw), expected);
    }

    #[rstest]
    #[case("Truyện Chữ Something")]
    #[case("TRUYỆN CHỮ hay")]
    #[case("đây là truyện chữ")]
    fn test_blacklist_is_case_insensitive(#[case] title: &str) {
        let titles = vec!["Clean".to_string(), title.to_string()];
        let hit = rules().find_blacklisted(&titles).unwrap();
        assert_eq!(hit.title, title);
        assert_eq!(hit.key, "truyện chữ");
    }

    #[test]
    fn test_clean_titles_pass() {
        assert!(!is_blacklisted(&["Truyện tranh", "Chữ"], &["truyện chữ".to_string()]));
        assert!(!is_blacklisted::<&str>(&[], &["truyện chữ".to_string()]));
    }

    #[test]
    fn test_invalid_delimiter_is_configuration_error() {
        assert!(matches!(
            TitleRules::new("[", &[]),
            Err(ScrapeError::Configuration { .. })
        ));
    }
}
