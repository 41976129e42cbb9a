// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Runtime configuration
//!
//! All on-disk locations and crawl tunables live here and are handed to each
//! component at construction. Values come from environment variables (a `.env`
//! file is honoured by the binary) with defaults for everything.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Top-level configuration for the crawl and export commands
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub crawl: CrawlConfig,
    pub export: ExportConfig,
}

/// Directories used by the cache and the dataset writer
#[derive(Debug, Clone)]
pub struct PathsConfig {
    /// Root data directory (default: ./data)
    pub data_dir: PathBuf,
    /// One JSON file per fetched result (default: <data_dir>/search)
    pub cache_dir: PathBuf,
    /// Exported CSV files (default: <data_dir>/datasets)
    pub datasets_dir: PathBuf,
}

/// Network and extraction settings for a crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Timeout per page fetch in seconds (default: 10)
    pub timeout_secs: u64,
    /// User-Agent header sent with search and page requests
    pub user_agent: String,
    /// Maximum redirects followed per fetch (default: 5)
    pub max_redirects: usize,
    /// Maximum characters of extracted article text (default: 20000)
    pub max_text_chars: usize,
    /// Sentences kept in the generated summary (default: 5)
    pub summary_sentences: usize,
    /// Keywords kept per article (default: 10)
    pub keyword_count: usize,
}

/// Dataset export settings
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Emit a progress event every N written rows (default: 50)
    pub progress_every: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            paths: PathsConfig::from_env(),
            crawl: CrawlConfig::from_env(),
            export: ExportConfig::from_env(),
        }
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<(), String> {
        self.crawl.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

impl PathsConfig {
    /// Lay out the cache and dataset directories under `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            cache_dir: data_dir.join("search"),
            datasets_dir: data_dir.join("datasets"),
            data_dir,
        }
    }

    pub fn from_env() -> Self {
        let data_dir = env::var("WEBSIFT_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        Self::with_data_dir(data_dir)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::with_data_dir("./data")
    }
}

impl CrawlConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env::var("WEBSIFT_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: env::var("WEBSIFT_USER_AGENT").unwrap_or(defaults.user_agent),
            max_redirects: defaults.max_redirects,
            max_text_chars: env::var("WEBSIFT_MAX_TEXT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_text_chars),
            summary_sentences: defaults.summary_sentences,
            keyword_count: defaults.keyword_count,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if self.max_text_chars < 100 {
            return Err("max_text_chars must be at least 100".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 5,
            max_text_chars: 20_000,
            summary_sentences: 5,
            keyword_count: 10,
        }
    }
}

impl ExportConfig {
    pub fn from_env() -> Self {
        Self {
            progress_every: env::var("WEBSIFT_PROGRESS_EVERY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.progress_every == 0 {
            return Err("progress_every must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { progress_every: 50 }
    }
}
