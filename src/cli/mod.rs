// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod export;
pub mod search;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{AppConfig, PathsConfig};

/// websift CLI
#[derive(Parser, Debug)]
#[command(name = "websift")]
#[command(version)]
#[command(about = "Build labeled text-classification datasets from web search results", long_about = None)]
pub struct Cli {
    /// Root data directory holding the result cache and datasets
    #[arg(long, global = true, env = "WEBSIFT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a term and cache every result page
    Search(search::SearchArgs),

    /// Export cached results as a CSV dataset
    Export(export::ExportArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.paths = PathsConfig::with_data_dir(data_dir);
    }
    config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    match cli.command {
        Commands::Search(args) => search::run_search(args, &config).await,
        Commands::Export(args) => export::run_export(args, &config).await,
    }
}
