// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;
use tempfile::TempDir;
use websift::CrawlError;

use super::mocks::{driver, RecordingDownloader, ScriptedProvider};

/// Emits no more than `limit` records for any per-page distribution
#[tokio::test]
async fn test_limit_is_never_exceeded() {
    let layouts: Vec<Vec<Vec<String>>> = vec![
        vec![vec!["a"], vec!["b", "c"], vec!["d", "e", "f"]],
        vec![vec!["a", "b", "c", "d", "e", "f"]],
        vec![vec!["a"], vec!["b"], vec!["c"], vec!["d"], vec!["e"], vec!["f"]],
        vec![vec!["a", "b", "c", "d", "e"], vec!["f"]],
    ]
    .into_iter()
    .map(|pages| {
        pages
            .into_iter()
            .map(|links| {
                links
                    .into_iter()
                    .map(|l| format!("https://example.com/{}", l))
                    .collect()
            })
            .collect()
    })
    .collect();

    for layout in &layouts {
        let pages: Vec<Vec<&str>> = layout
            .iter()
            .map(|links| links.iter().map(String::as_str).collect())
            .collect();
        let pages: Vec<&[&str]> = pages.iter().map(Vec::as_slice).collect();

        for limit in 0..=8 {
            let dir = TempDir::new().unwrap();
            let downloader = Arc::new(RecordingDownloader::new());
            let driver = driver(
                &dir,
                Arc::new(ScriptedProvider::with_links(&pages)),
                downloader.clone(),
            );

            let mut crawl = driver.crawl("t", limit, false);
            let mut emitted = 0;
            while crawl.next().await.unwrap().is_some() {
                emitted += 1;
            }

            assert!(emitted <= limit, "limit {} emitted {}", limit, emitted);
            assert_eq!(emitted, limit.min(6), "layout {:?} limit {}", layout, limit);
            assert!(downloader.calls().len() <= limit);
        }
    }
}

#[tokio::test]
async fn test_empty_links_count_against_limit() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::with_links(&[&[
        "",
        "https://example.com/a",
        "https://example.com/b",
    ]]));
    let downloader = Arc::new(RecordingDownloader::new());
    let driver = driver(&dir, provider, downloader.clone());

    let mut crawl = driver.crawl("t", 2, false);
    let mut urls = Vec::new();
    while let Some(record) = crawl.next().await.unwrap() {
        urls.push(record.url);
    }

    assert_eq!(urls, vec!["https://example.com/a"]);
    assert_eq!(downloader.calls(), vec!["https://example.com/a"]);
}

#[tokio::test]
async fn test_engine_exhaustion_ends_crawl() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::with_links(&[&["https://example.com/a"]]));
    let driver = driver(&dir, provider.clone(), Arc::new(RecordingDownloader::new()));

    let mut crawl = driver.crawl("t", 100, false);
    assert!(crawl.next().await.unwrap().is_some());
    assert!(crawl.next().await.unwrap().is_none());
    assert!(crawl.is_finished());
    assert_eq!(crawl.pages_requested(), 2);
    assert_eq!(*provider.queried.lock().unwrap(), vec![0, 1]);
}

#[tokio::test]
async fn test_full_page_at_limit_does_not_touch_next_page() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::rate_limited(&[&[
        "https://example.com/u1",
        "https://example.com/u2",
    ]]));
    let driver = driver(&dir, provider.clone(), Arc::new(RecordingDownloader::new()));

    let mut crawl = driver.crawl("t", 2, false);
    let mut emitted = 0;
    while crawl.next().await.unwrap().is_some() {
        emitted += 1;
    }

    assert_eq!(emitted, 2);
    assert_eq!(*provider.queried.lock().unwrap(), vec![0]);
}

#[tokio::test]
async fn test_refused_page_ends_crawl_with_error() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::rate_limited(&[&["https://example.com/u1"]]));
    let driver = driver(&dir, provider, Arc::new(RecordingDownloader::new()));

    let mut crawl = driver.crawl("t", 5, false);
    assert!(crawl.next().await.unwrap().is_some());

    let err = crawl.next().await.unwrap_err();
    assert!(matches!(err, CrawlError::Search { page: 1, .. }));
    assert!(crawl.next().await.unwrap().is_none());
}
