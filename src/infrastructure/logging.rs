//! Logging system configuration and initialization
//!
//! - Console output on stderr, so stdout stays clean for command output
//! - Optional daily-rotated log file
//! - Optional structured JSON format
//! - `RUST_LOG` overrides the configured level and directives

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use lazy_static::lazy_static;
use tracing::info;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Rotation, RollingFileAppender};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;
use crate::infrastructure::config::ConfigManager;

const LOG_FILE_PREFIX: &str = "lh-scraper";
const LOG_FILE_SUFFIX: &str = "log";

// Keeps the non-blocking file writer alive for the life of the process
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());
}

/// Local time with millisecond precision
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f %:z"))
    }
}

/// Directory log files are written to
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.log_dir {
        return dir.clone();
    }

    ConfigManager::get_app_data_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_default().join("logs"))
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Filter used when `RUST_LOG` is not set
///
/// HTTP client internals stay quiet unless TRACE is requested; this
/// crate's own targets follow the configured level.
pub fn build_env_filter(level: &str) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {level}"))?;

    if !level.to_lowercase().contains("trace") {
        for directive in ["reqwest=info", "hyper=warn", "hyper_util=warn", "h2=warn", "html5ever=warn", "selectors=warn"] {
            filter = filter.add_directive(directive.parse()?);
        }
        filter = filter.add_directive(format!("lh_scraper_lib={level}").parse()?);
        filter = filter.add_directive(format!("lh_scraper={level}").parse()?);
    }

    Ok(filter)
}

/// Initialize logging with custom configuration
///
/// # Environment Variable Override
/// ```bash
/// # Show HTTP client details while debugging the adapter
/// RUST_LOG="debug,reqwest=debug" lh-scraper listing --page 1
/// ```
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    if !config.file_output && !config.console_output {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_env_filter(&config.level)?,
    };

    let log_dir = get_log_directory(config);
    let file_writer = if config.file_output {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(config.max_log_files.max(1))
            .build(&log_dir)
            .context("Failed to create rolling log file")?;
        let (writer, guard) = non_blocking(appender);

        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry poisoned"))?
            .push(guard);
        Some(writer)
    } else {
        None
    };

    // File layers never carry ANSI codes; JSON keeps the full location info
    let (file_json, file_plain) = match (file_writer, config.json_format) {
        (Some(writer), true) => (
            Some(
                fmt::Layer::new()
                    .json()
                    .with_writer(writer)
                    .with_timer(LocalTimeFormatter)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false),
            ),
            None,
        ),
        (Some(writer), false) => (
            None,
            Some(
                fmt::Layer::new()
                    .with_writer(writer)
                    .with_timer(LocalTimeFormatter)
                    .with_target(false)
                    .with_ansi(false),
            ),
        ),
        (None, _) => (None, None),
    };

    let console_layer = config.console_output.then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_timer(LocalTimeFormatter)
            .with_target(false)
    });

    Registry::default()
        .with(env_filter)
        .with(file_json)
        .with(file_plain)
        .with(console_layer)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    info!("JSON format: {}", config.json_format);
    info!("Console output: {}", config.console_output);
    info!("File output: {}", config.file_output);
    if config.file_output {
        info!("Log directory: {:?}", log_dir);
    }

    Ok(())
}
