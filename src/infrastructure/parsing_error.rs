//! Error types for scraping operations
//!
//! Every failure the adapter can surface to its caller is one of these
//! variants. A blacklisted item is not an error; see
//! [`crate::domain::media::DetailOutcome`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("Malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("Required field '{field}' not found in HTML")]
    Parse {
        field: String,
        context: Option<String>,
    },

    #[error("Network error for {url}: {message}")]
    Network {
        status: Option<u16>,
        url: String,
        message: String,
    },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ScrapeError {
    /// Create a malformed URL error
    pub fn malformed_url(url: &str, reason: &str) -> Self {
        Self::MalformedUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a missing field error with optional context
    pub fn required_field_missing(field: &str, context: Option<&str>) -> Self {
        Self::Parse {
            field: field.to_string(),
            context: context.map(ToString::to_string),
        }
    }

    /// Create a network error without an HTTP status (connect, timeout, body read)
    pub fn network(url: &str, message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Create a network error for a non-success HTTP status
    pub fn http_status(status: u16, url: &str) -> Self {
        Self::Network {
            status: Some(status),
            url: url.to_string(),
            message: format!("HTTP error {status}"),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Check if retrying the same request could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { status, .. } => status.is_none_or(|s| s >= 500 || s == 408 || s == 429),
            // Same markup, same missing element
            Self::Parse { .. }
            | Self::MalformedUrl { .. }
            | Self::InvalidSelector { .. }
            | Self::Configuration { .. } => false,
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_field() {
        let err = ScrapeError::required_field_missing("chapter.href", Some("detail page"));
        assert_eq!(err.to_string(), "Required field 'chapter.href' not found in HTML");
    }

    #[test]
    fn test_recoverability() {
        assert!(ScrapeError::http_status(503, "/x").is_recoverable());
        assert!(ScrapeError::http_status(429, "/x").is_recoverable());
        assert!(!ScrapeError::http_status(404, "/x").is_recoverable());
        assert!(ScrapeError::network("/x", "timed out").is_recoverable());
        assert!(!ScrapeError::malformed_url("/", "no path segment").is_recoverable());
        assert!(!ScrapeError::required_field_missing("title", None).is_recoverable());
    }

    #[test]
    fn test_is_network() {
        assert!(ScrapeError::http_status(500, "/x").is_network());
        assert!(!ScrapeError::required_field_missing("title", None).is_network());
    }
}
