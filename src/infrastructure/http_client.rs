//! HTTP client for site requests with rate limiting and retry policy
//!
//! Paths are resolved against the configured base URL. Transient failures
//! (network errors, 408/429/5xx) are retried with exponential backoff;
//! anything else is returned to the caller as [`ScrapeError::Network`].

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, direct::NotKeyed},
};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, RETRY_AFTER},
};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::services::PageFetcher;
use crate::infrastructure::config::defaults;
use crate::infrastructure::parsing_error::{ScrapeError, ScrapeResult};

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    /// Total attempts per request, including the first
    pub max_retries: u32,
    pub follow_redirects: bool,
    /// Upper bound on a server-requested `Retry-After` wait
    pub max_retry_after_seconds: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            max_retries: defaults::MAX_RETRIES,
            follow_redirects: true,
            max_retry_after_seconds: defaults::MAX_RETRY_AFTER_SECONDS,
        }
    }
}

/// Rate-limited client bound to one site
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    base_url: Url,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client for the given site base URL
    pub fn new(base_url: &str, config: HttpClientConfig) -> Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("vi,en;q=0.8"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second).context("Rate limit must be greater than 0")?,
        );
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
            base_url,
            config,
        })
    }

    pub const fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a site-relative path (with optional query) to an absolute URL
    pub fn resolve(&self, path: &str) -> ScrapeResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ScrapeError::malformed_url(path, &format!("cannot join onto {}: {e}", self.base_url)))
    }

    /// Fetch a page body, retrying transient failures
    pub async fn get_text(&self, url: &Url) -> ScrapeResult<String> {
        let attempts = self.config.max_retries.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            self.rate_limiter.until_ready().await;
            debug!("HTTP GET (attempt {}/{}): {}", attempt, attempts, url);

            let delay = match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response
                            .text()
                            .await
                            .map_err(|e| ScrapeError::network(url.as_str(), format!("Failed to read response body: {e}")))?;
                        if body.is_empty() {
                            return Err(ScrapeError::network(url.as_str(), "Empty response body"));
                        }
                        debug!("Fetched {} ({} bytes)", url, body.len());
                        return Ok(body);
                    }

                    let error = ScrapeError::http_status(status.as_u16(), url.as_str());
                    if !is_retryable_status(status) {
                        return Err(error);
                    }
                    warn!("HTTP {} on attempt {} for {}", status, attempt, url);
                    let retry_after = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok());
                    last_error = Some(error);
                    retry_delay(attempt, retry_after, self.config.max_retry_after_seconds)
                }
                Err(e) => {
                    warn!("Network error on attempt {} for {}: {}", attempt, url, e);
                    last_error = Some(ScrapeError::network(url.as_str(), e.to_string()));
                    backoff_delay(attempt)
                }
            };

            if attempt < attempts {
                sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| ScrapeError::network(url.as_str(), "No attempt was made")))
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_text(&self, path: &str) -> ScrapeResult<String> {
        let url = self.resolve(path)?;
        info!("Fetching {}", url);
        self.get_text(&url).await
    }
}

const fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2_u64.saturating_pow(attempt.saturating_sub(1)))
}

/// Backoff, stretched to a server's `Retry-After` up to `cap_seconds`
fn retry_delay(attempt: u32, retry_after: Option<u64>, cap_seconds: u64) -> Duration {
    let requested = retry_after.map_or(Duration::ZERO, |secs| Duration::from_secs(secs.min(cap_seconds)));
    backoff_delay(attempt).max(requested)
}
