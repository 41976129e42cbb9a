// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;
use tracing::info;

use crate::cache::ResultCache;
use crate::config::AppConfig;
use crate::content::{HtmlArticleExtractor, HttpDownloader};
use crate::search::{DuckDuckGoProvider, SearchDriver};

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Term to search for
    pub term: String,

    /// Maximum number of results to consider
    #[arg(default_value_t = 10)]
    pub limit: usize,

    /// Label every result as a negative example
    #[arg(long)]
    pub negative: bool,
}

/// Crawl `args.term` and cache each result page
pub async fn run_search(args: SearchArgs, config: &AppConfig) -> Result<()> {
    let cache = Arc::new(ResultCache::new(&config.paths.cache_dir));
    let provider = Arc::new(DuckDuckGoProvider::new(&config.crawl)?);
    let downloader = Arc::new(
        HttpDownloader::new(&config.crawl).context("Failed to create HTTP client")?,
    );
    let extractor = Arc::new(HtmlArticleExtractor::from_config(&config.crawl));

    let driver = SearchDriver::new(provider, cache, downloader, extractor);
    let mut crawl = driver.crawl(&args.term, args.limit, args.negative);

    while let Some(record) = crawl
        .next()
        .await
        .with_context(|| format!("Search for '{}' failed", args.term))?
    {
        println!("Saved: {}", driver.cache().path_for(&record.slug).display());
    }

    let stats = driver.fetch_stats();
    info!(
        "Fetched {} pages ({} from cache)",
        stats.hits + stats.misses,
        stats.hits
    );
    println!("No more search results.");
    Ok(())
}
