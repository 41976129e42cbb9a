// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML article extraction
//!
//! Turns a raw page into the article fields stored in a search record:
//! title, main text, authors, top image, embedded movies, publish date,
//! summary and keywords.

use chrono::{DateTime, NaiveDate, Utc};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

use super::nlp;
use crate::config::CrawlConfig;

/// Article fields extracted from one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub title: String,
    pub text: String,
    pub authors: Vec<String>,
    pub top_image: String,
    pub movies: Vec<String>,
    pub summary: String,
    pub keywords: Vec<String>,
    pub publish_date: Option<String>,
}

/// Errors raised while extracting an article
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page URL cannot be used to resolve relative links
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),
}

/// Content-extraction seam used by the record builder
pub trait ArticleExtractor: Send + Sync {
    /// Parse `html` fetched from `url`
    fn parse(&self, url: &str, html: &str) -> Result<Article, ExtractError>;
}

/// Selectors tried in order for the main content block
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".story-body",    // BBC
    ".article__body", // News sites
    ".content-body",
    "#article-body",
    "#content",
    ".prose", // Tailwind
];

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];
const CHROME_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside",
];

const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com", "dailymotion.com"];

const DATE_SELECTORS: &[(&str, &str)] = &[
    ("meta[property='article:published_time']", "content"),
    ("meta[name='pubdate']", "content"),
    ("meta[name='publishdate']", "content"),
    ("meta[itemprop='datePublished']", "content"),
    ("meta[name='date']", "content"),
    ("time[datetime]", "datetime"),
];

/// `scraper`-based extractor
#[derive(Debug, Clone)]
pub struct HtmlArticleExtractor {
    max_chars: usize,
    summary_sentences: usize,
    keyword_count: usize,
}

impl HtmlArticleExtractor {
    pub fn new(max_chars: usize, summary_sentences: usize, keyword_count: usize) -> Self {
        Self {
            max_chars,
            summary_sentences,
            keyword_count,
        }
    }

    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(
            config.max_text_chars,
            config.summary_sentences,
            config.keyword_count,
        )
    }
}

impl Default for HtmlArticleExtractor {
    fn default() -> Self {
        Self::from_config(&CrawlConfig::default())
    }
}

impl ArticleExtractor for HtmlArticleExtractor {
    fn parse(&self, url: &str, html: &str) -> Result<Article, ExtractError> {
        let base = Url::parse(url).map_err(|_| ExtractError::InvalidUrl(url.to_string()))?;
        let document = Html::parse_document(html);

        let title = first_attr(&document, "meta[property='og:title']", "content")
            .or_else(|| first_text(&document, "title"))
            .unwrap_or_default();
        let text = extract_main_content(&document, self.max_chars);
        let keywords = nlp::keywords(&text, self.keyword_count);
        let summary = nlp::summarize(&text, &keywords, self.summary_sentences);

        Ok(Article {
            title,
            authors: extract_authors(&document),
            top_image: extract_top_image(&document, &base).unwrap_or_default(),
            movies: extract_movies(&document, &base),
            publish_date: extract_publish_date(&document),
            text,
            summary,
            keywords,
        })
    }
}

/// Extract main content from a parsed page
///
/// Tries the content selectors in priority order and falls back to `<body>`
/// with navigation chrome removed.
fn extract_main_content(document: &Html, max_chars: usize) -> String {
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let cleaned = clean_text(&visible_text(element, HIDDEN_TAGS));
                if cleaned.len() > 200 {
                    return truncate_content(&cleaned, max_chars);
                }
            }
        }
    }

    match Selector::parse("body") {
        Ok(body) => document
            .select(&body)
            .next()
            .map(|el| truncate_content(&clean_text(&visible_text(el, CHROME_TAGS)), max_chars))
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Text nodes under `element` that are not inside any of `skip`
fn visible_text(element: ElementRef, skip: &[&str]) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| skip.contains(&el.value().name()));
            (!hidden).then(|| &**text)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize whitespace to single spaces
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, preserving word boundaries
fn truncate_content(text: &str, max_chars: usize) -> String {
    let cut = match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => byte_index,
        None => return text.to_string(),
    };

    let truncated = &text[..cut];
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &text[..last_space]),
        None => format!("{}...", truncated),
    }
}

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .map(|el| clean_text(&el.text().collect::<String>()))
        .find(|t| !t.is_empty())
}

fn extract_authors(document: &Html) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();
    let mut push = |candidate: &str| {
        let name = clean_text(candidate);
        if name.is_empty() || name.starts_with("http") || authors.contains(&name) {
            return;
        }
        authors.push(name);
    };

    for (selector, attr) in [
        ("meta[name='author']", "content"),
        ("meta[property='article:author']", "content"),
    ] {
        if let Ok(selector) = Selector::parse(selector) {
            for el in document.select(&selector) {
                if let Some(value) = el.value().attr(attr) {
                    push(value);
                }
            }
        }
    }

    for selector in ["[rel='author']", "[itemprop='author']"] {
        if let Ok(selector) = Selector::parse(selector) {
            for el in document.select(&selector) {
                if el.value().name() == "meta" || el.value().name() == "link" {
                    continue;
                }
                push(&el.text().collect::<Vec<_>>().join(" "));
            }
        }
    }

    authors
}

fn extract_top_image(document: &Html, base: &Url) -> Option<String> {
    first_attr(document, "meta[property='og:image']", "content")
        .or_else(|| first_attr(document, "img[src]", "src"))
        .and_then(|src| resolve(base, &src))
}

fn extract_movies(document: &Html, base: &Url) -> Vec<String> {
    let mut movies = Vec::new();
    let sources = ["video[src]", "video source[src]", "iframe[src]"];

    for selector_str in sources {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for el in document.select(&selector) {
            let Some(src) = el.value().attr("src").and_then(|s| resolve(base, s)) else {
                continue;
            };
            if el.value().name() == "iframe" && !is_video_host(&src) {
                continue;
            }
            if !movies.contains(&src) {
                movies.push(src);
            }
        }
    }

    movies
}

fn is_video_host(src: &str) -> bool {
    Url::parse(src)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .map(|host| {
            VIDEO_HOSTS
                .iter()
                .any(|h| host == *h || host.ends_with(&format!(".{}", h)))
        })
        .unwrap_or(false)
}

fn extract_publish_date(document: &Html) -> Option<String> {
    DATE_SELECTORS
        .iter()
        .filter_map(|(selector, attr)| first_attr(document, selector, attr))
        .find_map(|raw| parse_date(&raw))
}

/// Normalize a declared date to RFC 3339 UTC
fn parse_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).to_rfc3339());
    }
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().to_rfc3339())
}

fn resolve(base: &Url, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }
    base.join(src).ok().map(String::from)
}
