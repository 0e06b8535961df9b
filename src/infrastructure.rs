//! Infrastructure layer: HTTP access, HTML parsing, configuration and logging

pub mod config;
pub mod gather;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod parsing_error;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, LoggingConfig, SiteConfig, truyentranhlh};
pub use gather::{Settled, gather_settled};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{ChangeDetector, ContextualParser, DetailParser, Document, ImageParser, ListingParser};
pub use parsing_error::{ScrapeError, ScrapeResult};
