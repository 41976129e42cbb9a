// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;
use tempfile::TempDir;
use websift::slugify;

use super::mocks::{driver, RecordingDownloader, ScriptedProvider};

#[tokio::test]
async fn test_limit_two_of_three_results() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::with_links(&[&[
        "https://example.com/u1",
        "https://example.com/u2",
        "https://example.com/u3",
    ]]));
    let downloader = Arc::new(RecordingDownloader::new());
    let driver = driver(&dir, provider.clone(), downloader.clone());

    let mut crawl = driver.crawl("t", 2, false);
    let mut records = Vec::new();
    while let Some(record) = crawl.next().await.unwrap() {
        records.push(record);
    }

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, "https://example.com/u1");
    assert_eq!(records[1].url, "https://example.com/u2");

    // u3 is never attempted and no second page is requested
    assert_eq!(
        downloader.calls(),
        vec!["https://example.com/u1", "https://example.com/u2"]
    );
    assert_eq!(*provider.queried.lock().unwrap(), vec![0]);

    let entries = driver.cache().entries().unwrap();
    assert_eq!(entries.len(), 2);
    for record in &records {
        assert!(driver.cache().path_for(&record.slug).exists());
    }
}

#[tokio::test]
async fn test_records_carry_extracted_fields() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::with_links(&[&["https://example.com/story"]]));
    let driver = driver(&dir, provider, Arc::new(RecordingDownloader::new()));

    let record = driver
        .crawl("rust", 1, false)
        .next()
        .await
        .unwrap()
        .expect("one record");

    assert_eq!(record.title, "Title of https://example.com/story");
    assert_eq!(record.description, "Snippet for https://example.com/story");
    assert_eq!(record.slug, slugify("https://example.com/story"));
    assert!(record.html.contains("<article>"));
    assert!(record.text.contains("Ownership keeps Rust programs memory safe."));
    assert!(!record.text.contains("Contact"));
    assert_eq!(record.authors, vec!["Ann Author"]);
    assert!(record.keywords.contains(&"ownership".to_string()));
    assert!(!record.summary.is_empty());
    assert!(!record.label);

    let cached = driver.cache().read(&record.slug).await.unwrap();
    assert_eq!(cached, record);
}

#[tokio::test]
async fn test_timeout_is_skipped_and_crawl_continues() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::with_links(&[
        &["https://example.com/a", "https://example.com/b"],
        &["https://example.com/c"],
    ]));
    let downloader = Arc::new(RecordingDownloader::with_timeouts(&["https://example.com/a"]));
    let driver = driver(&dir, provider.clone(), downloader.clone());

    let mut crawl = driver.crawl("t", 10, false);
    let mut urls = Vec::new();
    while let Some(record) = crawl.next().await.unwrap() {
        urls.push(record.url);
    }

    assert_eq!(urls, vec!["https://example.com/b", "https://example.com/c"]);
    assert_eq!(crawl.skipped(), 1);
    assert_eq!(*provider.queried.lock().unwrap(), vec![0, 1, 2]);
    assert!(!driver
        .cache()
        .path_for(&slugify("https://example.com/a"))
        .exists());
}

#[tokio::test]
async fn test_dropping_the_cursor_stops_work() {
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(ScriptedProvider::with_links(&[
        &["https://example.com/1", "https://example.com/2"],
        &["https://example.com/3"],
    ]));
    let downloader = Arc::new(RecordingDownloader::new());
    let driver = driver(&dir, provider.clone(), downloader.clone());

    {
        let mut crawl = driver.crawl("t", 10, false);
        assert!(crawl.next().await.unwrap().is_some());
    }

    assert_eq!(downloader.calls().len(), 1);
    assert_eq!(*provider.queried.lock().unwrap(), vec![0]);
}
