// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;

use super::types::{SearchError, SearchHit};

/// Trait for implementing search providers
///
/// A provider returns one page of ranked results per call. Page numbering
/// starts at 0 and its meaning (offset, page size) is up to the provider.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch result page `page` for `term`
    ///
    /// An empty vector means the engine has nothing more for this term.
    async fn query(&self, term: &str, page: usize) -> Result<Vec<SearchHit>, SearchError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;
}
