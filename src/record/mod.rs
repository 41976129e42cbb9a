// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search records
//!
//! A [`SearchRecord`] is one web result merged with the article fields
//! extracted from its page. It is persisted once in the result cache and read
//! back when a dataset is exported.

pub mod builder;
pub mod slug;

use serde::{Deserialize, Serialize};

pub use builder::RecordBuilder;
pub use slug::slugify;

/// One fetched and parsed web result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Title reported by the search engine
    pub title: String,
    /// Snippet reported by the search engine
    pub description: String,
    pub url: String,
    /// Cache key, always `slugify(url)`
    pub slug: String,
    /// Raw page body as downloaded
    pub html: String,
    /// Marks a deliberately negative training example
    #[serde(rename = "negative", default)]
    pub label: bool,
    pub text: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    /// Primary image URL, empty when the page has none
    pub images: String,
    pub movies: Vec<String>,
    /// RFC 3339 timestamp when the page declares one
    pub publish_date: Option<String>,
}
