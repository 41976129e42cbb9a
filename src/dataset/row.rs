// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Dataset rows: validation, labeling and string flattening

use serde_json::Value;

use super::schema::{Column, Partition, REJECTED};
use crate::record::SearchRecord;

/// Schema-restricted view of one cached record
#[derive(Debug, Clone)]
pub struct DatasetRow {
    cells: Vec<(Column, Value)>,
    negative: bool,
}

impl DatasetRow {
    pub fn from_record(record: &SearchRecord) -> Self {
        Self {
            cells: Column::ALL
                .iter()
                .map(|&column| (column, column.value(record)))
                .collect(),
            negative: record.label,
        }
    }

    /// Columns whose value is empty
    pub fn empty_columns(&self) -> Vec<Column> {
        self.cells
            .iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(column, _)| *column)
            .collect()
    }

    /// A row is valid when no required column is empty
    pub fn is_valid(&self) -> bool {
        !self.empty_columns().iter().any(|c| c.is_required())
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Flattened cells in schema order, with outputs replaced by
    /// [`REJECTED`] for negative rows
    pub fn to_cells(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|(column, value)| {
                if self.negative && column.partition() == Partition::Output {
                    REJECTED.to_string()
                } else {
                    flatten(value)
                }
            })
            .collect()
    }
}

/// Empty string, empty list, empty mapping or null
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Render any value as a single-line CSV cell
///
/// Strings are emitted as text; lists and mappings as JSON; null as an empty
/// cell.
pub fn flatten(value: &Value) -> String {
    match scrub(value) {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
    }
}

/// Clean every string inside `value`
fn scrub(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(clean_string(s)),
        Value::Array(items) => Value::Array(items.iter().map(scrub).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), scrub(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Newlines become spaces; carriage returns and replacement characters
/// left by undecodable bytes are dropped
fn clean_string(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\n' => Some(' '),
            '\r' | char::REPLACEMENT_CHARACTER => None,
            other => Some(other),
        })
        .collect()
}
