// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single ranked result returned by a search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Title of the search result
    pub title: String,
    /// Snippet/description of the search result
    pub description: String,
    /// Target URL, may be empty when the engine gave none
    pub link: String,
}

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Search request timed out
    #[error("Search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// API error from the search provider
    #[error("Search API error: {status} - {message}")]
    ApiError {
        /// HTTP status code, 0 when no response was received
        status: u16,
        /// Error message
        message: String,
    },

    /// Provider could not be set up
    #[error("Provider unavailable: {provider}: {reason}")]
    ProviderUnavailable { provider: String, reason: String },
}
