//! Page fetcher.
//!
//! Returns the page HTML once a ready marker is present, or fails with
//! [`AppError::FetchTimeout`] when the marker does not show up in time.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{FetcherConfig, parse_selector};

/// Source of rendered bus-location pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its HTML once the page is ready.
    async fn fetch_rendered(&self, url: &str) -> Result<String>;
}

/// Fetcher that re-requests the page until the ready marker appears.
pub struct HttpPageFetcher {
    client: Client,
    marker: Selector,
    marker_source: String,
    ready_timeout: Duration,
    poll_interval: Duration,
}

impl HttpPageFetcher {
    pub fn new(client: Client, config: &FetcherConfig) -> Result<Self> {
        Ok(Self {
            client,
            marker: parse_selector(&config.ready_marker)?,
            marker_source: config.ready_marker.clone(),
            ready_timeout: config.ready_timeout(),
            poll_interval: config.poll_interval(),
        })
    }

    fn has_marker(&self, html: &str) -> bool {
        Html::parse_document(html)
            .select(&self.marker)
            .next()
            .is_some()
    }

    async fn wait_for_marker(&self, url: &str) -> Result<String> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let html = self
                .client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;

            if self.has_marker(&html) {
                log::debug!("Page ready after {} attempt(s): {}", attempt, url);
                return Ok(html);
            }

            log::debug!("Marker '{}' not yet on {}", self.marker_source, url);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_rendered(&self, url: &str) -> Result<String> {
        log::info!("Fetching {}", url);
        tokio::time::timeout(self.ready_timeout, self.wait_for_marker(url))
            .await
            .map_err(|_| {
                AppError::fetch_timeout(url, &self.marker_source, self.ready_timeout.as_secs())
            })?
    }
}
