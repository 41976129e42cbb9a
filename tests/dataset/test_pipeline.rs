// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use async_trait::async_trait;
use std::sync::Arc;
use tempfile::TempDir;
use websift::content::HtmlArticleExtractor;
use websift::search::SearchError;
use websift::{
    DatasetAssembler, FetchError, PageDownloader, ResultCache, SearchDriver, SearchHit,
    SearchProvider,
};

struct OnePageProvider(Vec<&'static str>);

#[async_trait]
impl SearchProvider for OnePageProvider {
    async fn query(&self, term: &str, page: usize) -> Result<Vec<SearchHit>, SearchError> {
        if page > 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .0
            .iter()
            .map(|link| SearchHit {
                title: format!("{} result", term),
                description: format!("About {}", link),
                link: link.to_string(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "one-page"
    }
}

/// Article pages, except `/thin` which has no usable text
struct SiteDownloader;

#[async_trait]
impl PageDownloader for SiteDownloader {
    async fn download(&self, url: &str) -> Result<String, FetchError> {
        if url.ends_with("/thin") {
            return Ok("<html><body><script>var x = 1;</script></body></html>".to_string());
        }
        Ok(format!(
            "<html><body><article><h1>{url}</h1><p>Tokio schedules async tasks on a pool of \
             worker threads. Each task runs until it yields at an await point. The scheduler \
             then picks another task from the queue. Tokio tasks are cheap to spawn and many \
             thousands can run at once.</p></article></body></html>"
        ))
    }
}

#[tokio::test]
async fn test_crawl_then_export() {
    let dir = TempDir::new().unwrap();
    let cache = ResultCache::new(dir.path().join("search"));
    let driver = SearchDriver::new(
        Arc::new(OnePageProvider(vec![
            "https://example.com/one",
            "https://example.com/thin",
            "https://example.com/two",
        ])),
        Arc::new(cache.clone()),
        Arc::new(SiteDownloader),
        Arc::new(HtmlArticleExtractor::default()),
    );

    let mut crawl = driver.crawl("tokio", 10, false);
    let mut saved = 0;
    while crawl.next().await.unwrap().is_some() {
        saved += 1;
    }
    assert_eq!(saved, 3);

    let assembler = DatasetAssembler::new(cache, dir.path().join("datasets"), 50);
    let report = tokio::task::spawn_blocking(move || assembler.build("tokio"))
        .await
        .unwrap()
        .unwrap();

    // the thin page has no text, summary or keywords
    assert_eq!(report.written, 2);
    assert_eq!(report.dropped, 1);

    let mut reader = csv::Reader::from_path(&report.path).unwrap();
    let mut urls: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();
    urls.sort();
    assert_eq!(urls, vec!["https://example.com/one", "https://example.com/two"]);
}
