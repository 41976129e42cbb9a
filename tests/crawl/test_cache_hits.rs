// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;
use tempfile::TempDir;
use websift::SearchRecord;

use super::mocks::{driver, RecordingDownloader, ScriptedProvider};

async fn run(driver: &websift::SearchDriver, limit: usize, label: bool) -> Vec<SearchRecord> {
    let mut crawl = driver.crawl("t", limit, label);
    let mut records = Vec::new();
    while let Some(record) = crawl.next().await.unwrap() {
        records.push(record);
    }
    records
}

#[tokio::test]
async fn test_second_fetch_is_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::with_links(&[&[
        "https://example.com/a",
        "https://example.com/b",
    ]]));
    let downloader = Arc::new(RecordingDownloader::new());
    let driver = driver(&dir, provider, downloader.clone());

    let first = run(&driver, 5, false).await;
    let second = run(&driver, 5, false).await;

    assert_eq!(first, second);
    assert_eq!(downloader.calls().len(), 2);

    let stats = driver.fetch_stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 2);
}

#[tokio::test]
async fn test_cache_survives_a_new_driver() {
    let dir = TempDir::new().unwrap();
    let links: &[&[&str]] = &[&["https://example.com/a"]];

    let first_downloader = Arc::new(RecordingDownloader::new());
    let first = driver(
        &dir,
        Arc::new(ScriptedProvider::with_links(links)),
        first_downloader.clone(),
    );
    let before = run(&first, 1, false).await;

    let second_downloader = Arc::new(RecordingDownloader::new());
    let second = driver(
        &dir,
        Arc::new(ScriptedProvider::with_links(links)),
        second_downloader.clone(),
    );
    let after = run(&second, 1, false).await;

    assert_eq!(before, after);
    assert_eq!(first_downloader.calls().len(), 1);
    assert!(second_downloader.calls().is_empty());
}

#[tokio::test]
async fn test_rerun_relabels_cached_entry() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::with_links(&[&["https://example.com/a"]]));
    let driver = driver(&dir, provider, Arc::new(RecordingDownloader::new()));

    let positive = run(&driver, 1, false).await;
    let negative = run(&driver, 1, true).await;

    assert!(!positive[0].label);
    assert!(negative[0].label);
    assert_eq!(positive[0].html, negative[0].html);

    let cached = driver.cache().read(&negative[0].slug).await.unwrap();
    assert!(cached.label);
}
