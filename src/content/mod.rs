// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page fetching and article extraction
//!
//! ## Architecture
//!
//! ```text
//! Search hit (URL) → ContentFetcher ─ hit ─→ ResultCache (cached html)
//!                         │
//!                         └─ miss ─→ PageDownloader (one GET) → html
//!
//! html → ArticleExtractor → Article (title, text, authors, images, ...)
//! ```

pub mod downloader;
pub mod extractor;
pub mod fetcher;
pub mod nlp;

pub use downloader::{HttpDownloader, PageDownloader};
pub use extractor::{Article, ArticleExtractor, ExtractError, HtmlArticleExtractor};
pub use fetcher::{ContentFetcher, FetchError, FetchStats};
