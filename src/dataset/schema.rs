// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Dataset column schema
//!
//! The column order is declared once here and is the CSV header order.

use serde_json::{json, Value};

use crate::record::SearchRecord;

/// Placeholder written to every output column of a negative row
pub const REJECTED: &str = "REJECTED";

/// Role of a column in the training set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Row identity
    Id,
    /// Raw model input
    Input,
    /// Derived fields the model learns to produce
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Url,
    Slug,
    Html,
    Title,
    Description,
    Images,
    Movies,
    Text,
    Authors,
    PublishDate,
    Summary,
    Keywords,
}

impl Column {
    /// Every column, ID then INPUT then OUTPUT
    pub const ALL: [Column; 12] = [
        Column::Url,
        Column::Slug,
        Column::Html,
        Column::Title,
        Column::Description,
        Column::Images,
        Column::Movies,
        Column::Text,
        Column::Authors,
        Column::PublishDate,
        Column::Summary,
        Column::Keywords,
    ];

    /// Columns that must be non-empty for a row to be usable
    pub const REQUIRED: [Column; 5] = [
        Column::Title,
        Column::Description,
        Column::Text,
        Column::Summary,
        Column::Keywords,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Url => "url",
            Column::Slug => "slug",
            Column::Html => "html",
            Column::Title => "title",
            Column::Description => "description",
            Column::Images => "images",
            Column::Movies => "movies",
            Column::Text => "text",
            Column::Authors => "authors",
            Column::PublishDate => "publish_date",
            Column::Summary => "summary",
            Column::Keywords => "keywords",
        }
    }

    pub fn partition(self) -> Partition {
        match self {
            Column::Url | Column::Slug => Partition::Id,
            Column::Html => Partition::Input,
            _ => Partition::Output,
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// This column's value in `record`, before flattening
    pub fn value(self, record: &SearchRecord) -> Value {
        match self {
            Column::Url => json!(record.url),
            Column::Slug => json!(record.slug),
            Column::Html => json!(record.html),
            Column::Title => json!(record.title),
            Column::Description => json!(record.description),
            Column::Images => json!(record.images),
            Column::Movies => json!(record.movies),
            Column::Text => json!(record.text),
            Column::Authors => json!(record.authors),
            Column::PublishDate => json!(record.publish_date),
            Column::Summary => json!(record.summary),
            Column::Keywords => json!(record.keywords),
        }
    }
}

/// CSV header row
pub fn header() -> Vec<&'static str> {
    Column::ALL.iter().map(|c| c.name()).collect()
}
