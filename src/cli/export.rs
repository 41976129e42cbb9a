// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Args;

use crate::config::AppConfig;
use crate::dataset::{DatasetAssembler, ExportReport};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dataset name, `.csv` is appended if missing (default: random)
    pub name: Option<String>,
}

/// Write every valid cached record to a CSV dataset
pub async fn run_export(args: ExportArgs, config: &AppConfig) -> Result<()> {
    let assembler = DatasetAssembler::from_config(config);
    let name = args.name.unwrap_or_default();

    let report = tokio::task::spawn_blocking(move || assembler.build(&name))
        .await
        .context("Export task failed")?
        .context("Failed to export dataset")?;

    println!("{}", saved_message(&report));
    Ok(())
}

fn saved_message(report: &ExportReport) -> String {
    format!("Dataset saved: {}", report.path.display())
}
