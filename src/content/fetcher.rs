// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cache-or-download page fetching
//!
//! A URL whose slug already has a cache entry is served from the cached
//! record's `html`; anything else costs exactly one network GET.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::downloader::PageDownloader;
use crate::cache::{CacheError, ResultCache};
use crate::record::slugify;

/// Content fetch error types
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request exceeded the per-page timeout
    #[error("Timeout fetching: {url}")]
    Timeout { url: String },

    /// Transport or protocol failure
    #[error("HTTP error for {url}: {message}")]
    Http { url: String, message: String },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Cache lookup failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl FetchError {
    /// Timeouts are the only fetch failures a crawl may skip over
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchStats {
    pub hits: usize,
    pub misses: usize,
}

/// Page fetcher backed by the result cache
pub struct ContentFetcher {
    cache: Arc<ResultCache>,
    downloader: Arc<dyn PageDownloader>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ContentFetcher {
    pub fn new(cache: Arc<ResultCache>, downloader: Arc<dyn PageDownloader>) -> Self {
        Self {
            cache,
            downloader,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Fetch the raw page text for `url`
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let slug = slugify(url);

        if self.cache.exists(&slug).await? {
            debug!("Content cache hit for: {}", url);
            self.hits.fetch_add(1, Ordering::Relaxed);
            let cached = self.cache.read(&slug).await?;
            return Ok(cached.html);
        }

        debug!("Content cache miss for: {}", url);
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.downloader.download(url).await
    }

    /// Check if a URL can be fetched at all: an absolute http(s) URL with a host
    pub fn is_fetchable_url(url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => {
                ["http", "https"].contains(&parsed.scheme()) && parsed.host_str().is_some()
            }
            Err(_) => false,
        }
    }

    /// Get cache hit/miss statistics
    pub fn stats(&self) -> FetchStats {
        FetchStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
