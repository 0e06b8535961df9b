//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lh_scraper_lib::infrastructure::SiteConfig;
use lh_scraper_lib::{LhAdapter, PageFetcher, ScrapeError, ScrapeResult};

/// In-memory fetcher serving canned pages by path
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, ScrapeResult<String>>,
    requests: Mutex<Vec<String>>,
    delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, path: &str, html: impl Into<String>) -> Self {
        self.pages.insert(path.to_string(), Ok(html.into()));
        self
    }

    pub fn failing(mut self, path: &str, status: u16) -> Self {
        self.pages
            .insert(path.to_string(), Err(ScrapeError::http_status(status, path)));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_text(&self, path: &str) -> ScrapeResult<String> {
        self.requests.lock().unwrap().push(path.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ScrapeError::http_status(404, path)))
    }
}

pub fn adapter(fetcher: StaticFetcher) -> LhAdapter<StaticFetcher> {
    LhAdapter::new(fetcher, SiteConfig::default()).unwrap()
}

pub fn adapter_with(fetcher: StaticFetcher, site: SiteConfig) -> LhAdapter<StaticFetcher> {
    LhAdapter::new(fetcher, site).unwrap()
}

pub fn listing_path(page: u32) -> String {
    format!("/danh-sach?sort=update&page={page}")
}

/// Listing page with one item block per href
pub fn listing_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(
                r#"<div class="thumb-item-flow col-6 col-md-3">
                     <div class="series-title"><a href="{href}">Series {i}</a></div>
                   </div>"#
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html><html><body><main><div class="card-body"><div class="row">{items}</div></div></main></body></html>"#
    )
}

/// Detail page; `chapters` are `(title, href, time)`
pub fn detail_page(title: &str, alt: &str, chapters: &[(&str, &str, Option<&str>)]) -> String {
    let links: String = chapters
        .iter()
        .map(|(name, href, time)| {
            let time = time
                .map(|t| format!(r#"<div class="chapter-time">{t}</div>"#))
                .unwrap_or_default();
            format!(r#"<li><a title="{name}" href="{href}"><div class="chapter-name">{name}</div>{time}</a></li>"#)
        })
        .collect();

    format!(
        r#"<!DOCTYPE html><html><body>
           <div class="series-name-group"><span class="series-name"><a href="/truyen-tranh/series">{title}</a></span></div>
           <div class="series-information">
             <div class="info-item"><span class="info-name">Tên khác:</span><span class="info-value">{alt}</span></div>
             <div class="info-item"><span class="info-name">Thể loại:</span><span class="info-value">Action</span></div>
           </div>
           <ul class="list-chapters at-series">{links}</ul>
           </body></html>"#
    )
}

pub fn chapter_page(images: &[Option<&str>]) -> String {
    let imgs: String = images
        .iter()
        .map(|src| match src {
            Some(url) => format!(r#"<img class="lazyload" src="/img/loading.gif" data-src="{url}">"#),
            None => r#"<img src="/img/ads.gif">"#.to_string(),
        })
        .collect();
    format!(r#"<html><body><div id="chapter-content">{imgs}</div></body></html>"#)
}
