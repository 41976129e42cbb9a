// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Persistent result cache
//!
//! One JSON file per slug under the cache directory. Entries are permanent and
//! act as the record of which URLs have already been fetched. Writes go to a
//! temporary sibling and are renamed into place, so a reader never sees a
//! partially written entry.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::record::SearchRecord;

/// Result cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Storage medium unavailable or unreadable
    #[error("Cache I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Entry exists but is not a valid record
    #[error("Corrupt cache entry {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Record could not be encoded
    #[error("Failed to encode record {slug}: {source}")]
    Encode {
        slug: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// File-backed cache of search records keyed by slug
#[derive(Debug, Clone)]
pub struct ResultCache {
    dir: PathBuf,
}

impl ResultCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `slug`
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slug))
    }

    /// Check whether an entry exists for `slug`
    pub async fn exists(&self, slug: &str) -> Result<bool, CacheError> {
        let path = self.path_for(slug);
        fs::try_exists(&path)
            .await
            .map_err(|e| CacheError::io(path, e))
    }

    /// Read the raw JSON text of an entry
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub async fn read_raw(&self, slug: &str) -> Result<String, CacheError> {
        let path = self.path_for(slug);
        let bytes = fs::read(&path)
            .await
            .map_err(|e| CacheError::io(&path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read and decode an entry
    pub async fn read(&self, slug: &str) -> Result<SearchRecord, CacheError> {
        let raw = self.read_raw(slug).await?;
        decode(self.path_for(slug), &raw)
    }

    /// Persist `record` under its slug, replacing any existing entry
    pub async fn write(&self, record: &SearchRecord) -> Result<PathBuf, CacheError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .await
                .map_err(|e| CacheError::io(&self.dir, e))?;
        }

        let path = self.path_for(&record.slug);
        let json = serde_json::to_vec(record).map_err(|source| CacheError::Encode {
            slug: record.slug.clone(),
            source,
        })?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| CacheError::io(&temp_path, e))?;
        file.write_all(&json)
            .await
            .map_err(|e| CacheError::io(&temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| CacheError::io(&temp_path, e))?;

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| CacheError::io(&path, e))?;

        debug!("Saved result {} to {:?}", record.url, path);
        Ok(path)
    }

    /// All entry paths in directory enumeration order
    ///
    /// A missing cache directory yields no entries.
    pub fn entries(&self) -> Result<Vec<PathBuf>, CacheError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let listing = std::fs::read_dir(&self.dir).map_err(|e| CacheError::io(&self.dir, e))?;
        for entry in listing {
            let path = entry.map_err(|e| CacheError::io(&self.dir, e))?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                entries.push(path);
            }
        }
        Ok(entries)
    }

    /// Blocking read of the entry at `path`
    pub fn load(&self, path: &Path) -> Result<SearchRecord, CacheError> {
        let bytes = std::fs::read(path).map_err(|e| CacheError::io(path, e))?;
        decode(path, &String::from_utf8_lossy(&bytes))
    }
}

fn decode(path: impl Into<PathBuf>, raw: &str) -> Result<SearchRecord, CacheError> {
    serde_json::from_str(raw).map_err(|source| CacheError::Corrupt {
        path: path.into(),
        source,
    })
}
