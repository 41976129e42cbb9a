// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Network download of result pages

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::fetcher::FetchError;
use crate::config::CrawlConfig;

/// Performs the single network GET behind a cache miss
#[async_trait]
pub trait PageDownloader: Send + Sync {
    /// Download the body of `url` as text
    async fn download(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed downloader
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Build the HTTP client from crawl settings
    pub fn new(config: &CrawlConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageDownloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<String, FetchError> {
        debug!("Downloading URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            // Error pages are kept; the dataset filter drops them if they lack content.
            warn!("HTTP {} for {}, keeping response body", status.as_u16(), url);
        }

        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn map_reqwest_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
