// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search hit + page html → [`SearchRecord`]

use std::sync::Arc;
use tracing::debug;

use super::{slugify, SearchRecord};
use crate::content::{ArticleExtractor, ExtractError};
use crate::search::SearchHit;

/// Merges search metadata with the article fields extracted from the page
pub struct RecordBuilder {
    extractor: Arc<dyn ArticleExtractor>,
}

impl RecordBuilder {
    pub fn new(extractor: Arc<dyn ArticleExtractor>) -> Self {
        Self { extractor }
    }

    /// Build the record for `hit` from its downloaded `html`
    ///
    /// The engine's title is kept; the page title only fills in when the engine
    /// returned none.
    pub fn build(
        &self,
        hit: &SearchHit,
        html: String,
        label: bool,
    ) -> Result<SearchRecord, ExtractError> {
        debug!("Parsing URL: {}", hit.link);
        let article = self.extractor.parse(&hit.link, &html)?;

        let title = if hit.title.is_empty() {
            article.title
        } else {
            hit.title.clone()
        };

        Ok(SearchRecord {
            title,
            description: hit.description.clone(),
            url: hit.link.clone(),
            slug: slugify(&hit.link),
            html,
            label,
            text: article.text,
            summary: article.summary,
            keywords: article.keywords,
            authors: article.authors,
            images: article.top_image,
            movies: article.movies,
            publish_date: article.publish_date,
        })
    }
}
