// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bounded, paginated crawl over search results
//!
//! [`SearchDriver::crawl`] returns a [`Crawl`] cursor. Each call to
//! [`Crawl::next`] advances through the engine's result pages one hit at a
//! time, fetching, parsing and caching the page behind it, until the result
//! limit is hit or the engine runs dry. Nothing runs ahead of the caller:
//! dropping the cursor stops the crawl.

use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::provider::SearchProvider;
use super::types::{SearchError, SearchHit};
use crate::cache::{CacheError, ResultCache};
use crate::content::{
    ArticleExtractor, ContentFetcher, ExtractError, FetchError, FetchStats, PageDownloader,
};
use crate::record::{RecordBuilder, SearchRecord};

/// Conditions that end a crawl, by stage
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Search failed on page {page}: {source}")]
    Search {
        page: usize,
        #[source]
        source: SearchError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl CrawlError {
    /// Only a page fetch timeout is skippable
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_timeout())
    }
}

/// Drives search → fetch → build → cache for each result
pub struct SearchDriver {
    provider: Arc<dyn SearchProvider>,
    fetcher: ContentFetcher,
    builder: RecordBuilder,
    cache: Arc<ResultCache>,
}

impl SearchDriver {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        cache: Arc<ResultCache>,
        downloader: Arc<dyn PageDownloader>,
        extractor: Arc<dyn ArticleExtractor>,
    ) -> Self {
        Self {
            provider,
            fetcher: ContentFetcher::new(cache.clone(), downloader),
            builder: RecordBuilder::new(extractor),
            cache,
        }
    }

    /// Start a crawl for `term` that emits at most `limit` records
    ///
    /// Every emitted record is labeled with `label` and already persisted in
    /// the cache by the time it is returned.
    pub fn crawl(&self, term: &str, limit: usize, label: bool) -> Crawl<'_> {
        info!(
            "Searching '{}' via {} (limit {}, negative: {})",
            term,
            self.provider.name(),
            limit,
            label
        );
        Crawl {
            driver: self,
            term: term.to_string(),
            limit,
            label,
            page: 0,
            pending: VecDeque::new(),
            seen: 0,
            emitted: 0,
            skipped: 0,
            finished: false,
        }
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn fetch_stats(&self) -> FetchStats {
        self.fetcher.stats()
    }

    /// Fetch → build → cache one hit
    async fn process(&self, hit: &SearchHit, label: bool) -> Result<SearchRecord, CrawlError> {
        let html = self.fetcher.fetch(&hit.link).await?;
        let record = self.builder.build(hit, html, label)?;
        let path = self.cache.write(&record).await?;
        debug!("Cached {} at {:?}", record.url, path);
        Ok(record)
    }
}

/// Forward-only cursor over the records of one crawl
pub struct Crawl<'a> {
    driver: &'a SearchDriver,
    term: String,
    limit: usize,
    label: bool,
    /// Next page to request
    page: usize,
    pending: VecDeque<SearchHit>,
    seen: usize,
    emitted: usize,
    skipped: usize,
    finished: bool,
}

impl<'a> Crawl<'a> {
    /// Produce the next record, or `None` once the crawl is over
    ///
    /// A fetch timeout skips that result. Any other error ends the crawl: it is
    /// returned once and later calls yield `Ok(None)`.
    pub async fn next(&mut self) -> Result<Option<SearchRecord>, CrawlError> {
        while !self.finished {
            if self.seen >= self.limit {
                info!("Result limit {} reached", self.limit);
                self.finish();
                break;
            }

            let Some(hit) = self.next_hit().await? else {
                break;
            };
            self.seen += 1;

            if hit.link.is_empty() {
                debug!("Dropping result without URL: '{}'", hit.title);
                self.skipped += 1;
                continue;
            }
            if !ContentFetcher::is_fetchable_url(&hit.link) {
                warn!("Dropping unfetchable URL: {}", hit.link);
                self.skipped += 1;
                continue;
            }

            match self.driver.process(&hit, self.label).await {
                Ok(record) => {
                    self.emitted += 1;
                    return Ok(Some(record));
                }
                Err(e) if e.is_timeout() => {
                    warn!("Skipping {}: {}", hit.link, e);
                    self.skipped += 1;
                }
                Err(e) => {
                    self.finish();
                    return Err(e);
                }
            }
        }

        Ok(None)
    }

    /// Pop the next pending hit, requesting a new page when none are left
    async fn next_hit(&mut self) -> Result<Option<SearchHit>, CrawlError> {
        if self.pending.is_empty() {
            let page = self.page;
            let hits = match self.driver.provider.query(&self.term, page).await {
                Ok(hits) => hits,
                Err(source) => {
                    self.finish();
                    return Err(CrawlError::Search { page, source });
                }
            };
            self.page += 1;

            if hits.is_empty() {
                info!("No results on page {} for '{}'", page, self.term);
                self.finish();
                return Ok(None);
            }
            debug!("Page {} returned {} results", page, hits.len());
            self.pending.extend(hits);
        }

        Ok(self.pending.pop_front())
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.pending.clear();
        info!(
            "Search '{}' finished: {} saved, {} skipped, {} pages requested",
            self.term, self.emitted, self.skipped, self.page
        );
    }

    /// Adapt the cursor into a stream of records
    pub fn into_stream(self) -> impl Stream<Item = Result<SearchRecord, CrawlError>> + 'a {
        stream::try_unfold(self, |mut crawl| async move {
            let next = crawl.next().await?;
            Ok::<_, CrawlError>(next.map(|record| (record, crawl)))
        })
    }

    /// Results consumed so far, counted against the limit
    pub fn seen(&self) -> usize {
        self.seen
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of result pages requested from the provider
    pub fn pages_requested(&self) -> usize {
        self.page
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
