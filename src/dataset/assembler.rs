// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cache → CSV export

use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::row::DatasetRow;
use super::schema;
use crate::cache::{CacheError, ResultCache};
use crate::config::AppConfig;

/// Dataset export errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cache enumeration failed or an entry could not be decoded
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Name would place the dataset outside the datasets directory
    #[error("Invalid dataset name: {0:?}")]
    InvalidName(String),
}

/// Outcome of one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    /// Rows written after the header
    pub written: usize,
    /// Cached records dropped for missing required fields
    pub dropped: usize,
}

/// Builds CSV datasets from every cached record
pub struct DatasetAssembler {
    cache: ResultCache,
    datasets_dir: PathBuf,
    progress_every: usize,
}

impl DatasetAssembler {
    pub fn new(cache: ResultCache, datasets_dir: impl Into<PathBuf>, progress_every: usize) -> Self {
        Self {
            cache,
            datasets_dir: datasets_dir.into(),
            progress_every: progress_every.max(1),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            ResultCache::new(&config.paths.cache_dir),
            &config.paths.datasets_dir,
            config.export.progress_every,
        )
    }

    /// Where the dataset called `name` is written
    ///
    /// The name must be a bare file name: no path separators and not `.` or `..`.
    pub fn dataset_path(&self, name: &str) -> Result<PathBuf, DatasetError> {
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(DatasetError::InvalidName(name.to_string()));
        }

        Ok(if name.ends_with(".csv") {
            self.datasets_dir.join(name)
        } else {
            self.datasets_dir.join(format!("{}.csv", name))
        })
    }

    /// Export every valid cached record into the dataset `name`
    ///
    /// An empty name picks a random one. Records are written in cache
    /// enumeration order. A corrupt cache entry aborts the export.
    pub fn build(&self, name: &str) -> Result<ExportReport, DatasetError> {
        let name = if name.is_empty() {
            Uuid::new_v4().simple().to_string()
        } else {
            name.to_string()
        };
        let path = self.dataset_path(&name)?;
        info!("Exporting dataset to {:?}", path);

        std::fs::create_dir_all(&self.datasets_dir).map_err(|source| DatasetError::Io {
            path: self.datasets_dir.clone(),
            source,
        })?;

        let entries = self.cache.entries()?;
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(schema::header())?;

        let mut written = 0;
        let mut dropped = 0;
        for entry in entries {
            let record = self.cache.load(&entry)?;
            let row = DatasetRow::from_record(&record);
            if !row.is_valid() {
                debug!("Dropping incomplete row: {:?}", entry);
                dropped += 1;
                continue;
            }

            writer.write_record(row.to_cells())?;
            written += 1;
            if written % self.progress_every == 0 {
                info!("Exported {} rows", written);
            }
        }

        writer.flush().map_err(|source| DatasetError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "Dataset {:?} saved: {} rows written, {} dropped",
            path, written, dropped
        );
        Ok(ExportReport {
            path,
            written,
            dropped,
        })
    }
}
