// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DuckDuckGo search provider
//!
//! Implements paged web search using DuckDuckGo's HTML interface.
//! No API key required.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use super::provider::SearchProvider;
use super::types::{SearchError, SearchHit};
use crate::config::CrawlConfig;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// Results DuckDuckGo's HTML interface serves per page
const RESULTS_PER_PAGE: usize = 30;

/// DuckDuckGo search provider (no API key required)
pub struct DuckDuckGoProvider {
    client: Client,
    timeout_ms: u64,
}

impl DuckDuckGoProvider {
    /// Create a new DuckDuckGo provider
    pub fn new(config: &CrawlConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SearchError::ProviderUnavailable {
                provider: "duckduckgo".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            timeout_ms: config.timeout_secs * 1000,
        })
    }

    /// Form fields for `term` at `page`
    fn form(term: &str, page: usize) -> Vec<(&'static str, String)> {
        let mut form = vec![("q", term.to_string())];
        if page > 0 {
            let offset = page * RESULTS_PER_PAGE;
            form.push(("s", offset.to_string()));
            form.push(("dc", (offset + 1).to_string()));
        }
        form
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn query(&self, term: &str, page: usize) -> Result<Vec<SearchHit>, SearchError> {
        debug!("DuckDuckGo query '{}' page {}", term, page);

        let response = self
            .client
            .post(DDG_HTML_URL)
            .form(&Self::form(term, page))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    SearchError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: "DuckDuckGo request failed".to_string(),
            });
        }

        let html = response.text().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: e.to_string(),
        })?;

        let hits = parse_ddg_html(&html);
        debug!("DuckDuckGo page {} returned {} results", page, hits.len());
        Ok(hits)
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Parse a DuckDuckGo HTML result page
///
/// Organic results are `div.result` blocks holding an `a.result__a` link and a
/// `.result__snippet`. Ads are skipped. A result whose link cannot be decoded is
/// kept with an empty link.
fn parse_ddg_html(html: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let (Ok(result_sel), Ok(link_sel), Ok(snippet_sel)) = (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    document
        .select(&result_sel)
        .filter(|result| !result.value().classes().any(|c| c == "result--ad"))
        .filter_map(|result| {
            let anchor = result.select(&link_sel).next()?;
            let link = anchor
                .value()
                .attr("href")
                .map(extract_ddg_url)
                .unwrap_or_default();
            let title = collapse(anchor.text());
            let description = result
                .select(&snippet_sel)
                .next()
                .map(|s| collapse(s.text()))
                .unwrap_or_default();

            Some(SearchHit {
                title,
                description,
                link,
            })
        })
        .collect()
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract actual URL from DuckDuckGo's redirect URL
fn extract_ddg_url(redirect_url: &str) -> String {
    // DDG URLs look like: //duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&...
    if let Some((_, query)) = redirect_url.split_once('?') {
        if let Some((_, target)) =
            url::form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == "uddg")
        {
            return target.into_owned();
        }
    }

    if redirect_url.starts_with("http") {
        redirect_url.to_string()
    } else {
        String::new()
    }
}
