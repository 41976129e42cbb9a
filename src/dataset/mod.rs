// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! CSV dataset export from the result cache

pub mod assembler;
pub mod row;
pub mod schema;

pub use assembler::{DatasetAssembler, DatasetError, ExportReport};
pub use row::{flatten, DatasetRow};
pub use schema::{Column, Partition, REJECTED};
