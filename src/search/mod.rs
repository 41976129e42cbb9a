// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search and the crawl that turns results into cached records
//!
//! Key features:
//! - Paged queries through a pluggable [`SearchProvider`] (DuckDuckGo by default)
//! - A result limit counted across pages
//! - Page fetch timeouts skipped, every other failure surfaced to the caller
//! - A lazy, pull-based [`Crawl`] cursor

pub mod driver;
pub mod duckduckgo;
pub mod provider;
pub mod types;

// Re-export commonly used types
pub use driver::{Crawl, CrawlError, SearchDriver};
pub use duckduckgo::DuckDuckGoProvider;
pub use provider::SearchProvider;
pub use types::{SearchError, SearchHit};
