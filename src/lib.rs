// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Labeled text-classification datasets from web search
//!
//! `search` queries an engine for a term, downloads each result page (or
//! reuses the cached copy), extracts the article and caches one JSON record
//! per URL. `export` turns every complete cached record into a CSV row.

pub mod cache;
pub mod cli;
pub mod config;
pub mod content;
pub mod dataset;
pub mod record;
pub mod search;

// Re-export main types
pub use cache::{CacheError, ResultCache};
pub use config::{AppConfig, CrawlConfig, ExportConfig, PathsConfig};
pub use content::{ArticleExtractor, ContentFetcher, FetchError, PageDownloader};
pub use dataset::{DatasetAssembler, DatasetError, DatasetRow, ExportReport};
pub use record::{slugify, RecordBuilder, SearchRecord};
pub use search::{Crawl, CrawlError, SearchDriver, SearchHit, SearchProvider};
