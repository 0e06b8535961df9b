//! Configuration infrastructure
//!
//! Configuration is layered, later sources winning:
//! 1. Built-in defaults (`AppConfig::default()`)
//! 2. Optional config file (TOML/JSON/YAML, chosen by extension)
//! 3. Environment variables prefixed `LH_SCRAPER__` (e.g. `LH_SCRAPER__SITE__BASE_URL`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use crate::infrastructure::http_client::HttpClientConfig;
pub use crate::infrastructure::parsing::config::SiteSelectors;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub http: HttpClientConfig,
    pub logging: LoggingConfig,
}

/// Per-site scraping policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,

    /// Two-letter locale codes served by the site
    pub locales: Vec<String>,

    /// Poll interval the host uses for change monitoring
    pub monitor_interval_secs: u64,

    /// Substrings (case-insensitive) that exclude an item entirely
    pub blacklist_keys: Vec<String>,

    /// Regex splitting the alternate-title field into titles
    pub alt_title_delimiter: String,

    /// Cap on concurrent detail requests per listing page; None issues all at once
    pub detail_concurrency: Option<usize>,

    pub selectors: SiteSelectors,
}

impl SiteConfig {
    pub const fn monitor_interval(&self) -> Duration {
        Duration::from_secs(self.monitor_interval_secs)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: truyentranhlh::BASE_URL.to_string(),
            locales: truyentranhlh::LOCALES.iter().map(ToString::to_string).collect(),
            monitor_interval_secs: truyentranhlh::MONITOR_INTERVAL_SECS,
            blacklist_keys: truyentranhlh::BLACKLIST_KEYS.iter().map(ToString::to_string).collect(),
            alt_title_delimiter: truyentranhlh::ALT_TITLE_DELIMITER.to_string(),
            detail_concurrency: None,
            selectors: SiteSelectors::default(),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    pub console_output: bool,

    pub file_output: bool,

    /// Directory for log files; defaults to `<data_local_dir>/lh-scraper/logs`
    pub log_dir: Option<PathBuf>,

    /// Daily log files kept before the oldest is removed
    pub max_log_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            max_log_files: defaults::LOG_MAX_FILES,
        }
    }
}

impl AppConfig {
    /// Reject values the adapter cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.site.base_url.trim().is_empty() {
            bail!("site.base_url must not be empty");
        }
        url::Url::parse(&self.site.base_url)
            .with_context(|| format!("site.base_url is not a valid URL: {}", self.site.base_url))?;

        if self.site.monitor_interval_secs == 0 {
            bail!("site.monitor_interval_secs must be greater than 0");
        }
        if self.site.detail_concurrency == Some(0) {
            bail!("site.detail_concurrency must be greater than 0 when set");
        }
        Regex::new(&self.site.alt_title_delimiter).with_context(|| {
            format!("site.alt_title_delimiter is not a valid regex: {}", self.site.alt_title_delimiter)
        })?;

        if self.http.max_requests_per_second == 0 {
            bail!("http.max_requests_per_second must be greater than 0");
        }
        if self.http.max_retries == 0 {
            bail!("http.max_retries must be at least 1");
        }
        if self.http.max_retry_after_seconds == 0 {
            bail!("http.max_retry_after_seconds must be greater than 0");
        }
        if self.http.timeout_seconds == 0 {
            bail!("http.timeout_seconds must be greater than 0");
        }
        Ok(())
    }
}

/// Locates and loads the configuration file
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Get application data directory
    pub fn get_app_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .context("Failed to get user data directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(data_dir)
    }

    /// Manager for the default config location
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load defaults, then the file if it exists, then environment overrides
    pub fn load_config(&self) -> Result<AppConfig> {
        let default_source = config::Config::try_from(&AppConfig::default())
            .context("Failed to serialize default configuration")?;

        if self.config_path.exists() {
            info!("Loading configuration from: {:?}", self.config_path);
        } else {
            debug!("No configuration file at {:?}, using defaults", self.config_path);
        }

        let settings = config::Config::builder()
            .add_source(default_source)
            .add_source(config::File::from(self.config_path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app_config.validate()?;
        Ok(app_config)
    }
}

/// truyentranhlh website constants
pub mod truyentranhlh {
    pub const BASE_URL: &str = "https://www.truyentranhlh.net";

    /// Adapter id stamped on every record
    pub const SOURCE_ID: &str = "lh";

    pub const SOURCE_NAME: &str = "lh";

    pub const LOCALES: &[&str] = &["vi"];

    /// 20 minutes
    pub const MONITOR_INTERVAL_SECS: u64 = 20 * 60;

    /// Text novels share the site but are not comics
    pub const BLACKLIST_KEYS: &[&str] = &["truyện chữ"];

    pub const ALT_TITLE_DELIMITER: &str = "[;,]";

    pub const LISTING_PATH: &str = "/danh-sach";

    pub const MEDIA_PATH: &str = "/truyen-tranh";
}

/// Default configuration values
pub mod defaults {
    pub const APP_DIR_NAME: &str = "lh-scraper";

    pub const CONFIG_FILE_NAME: &str = "config.toml";

    pub const ENV_PREFIX: &str = "LH_SCRAPER";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const MAX_REQUESTS_PER_SECOND: u32 = 5;

    pub const MAX_RETRIES: u32 = 3;

    /// Longest `Retry-After` wait honoured before the next attempt
    pub const MAX_RETRY_AFTER_SECONDS: u64 = 60;

    pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

    pub const LOG_LEVEL: &str = "info";

    pub const LOG_JSON_FORMAT: bool = false;

    pub const LOG_CONSOLE_OUTPUT: bool = true;

    pub const LOG_FILE_OUTPUT: bool = false;

    pub const LOG_MAX_FILES: usize = 7;
}

/// Site-relative request paths
pub mod utils {
    use super::truyentranhlh::{LISTING_PATH, MEDIA_PATH};

    /// Listing sorted by last update
    pub fn listing_page_path(page: u32) -> String {
        format!("{LISTING_PATH}?sort=update&page={page}")
    }

    pub fn detail_page_path(source_id: &str) -> String {
        format!("{MEDIA_PATH}/{source_id}")
    }

    pub fn chapter_page_path(source_media_id: &str, chapter_id: &str) -> String {
        format!("{MEDIA_PATH}/{source_media_id}/{chapter_id}")
    }
}
