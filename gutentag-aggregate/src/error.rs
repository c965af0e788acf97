// GutenTAG Aggregate - Multi-series dataset aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Aggregation error types.

use gutentag::GenerationError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Aggregation error types.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Missing column {column} in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Invalid seed: {seed} followed by series index {index} does not fit in u64")]
    InvalidSeed { seed: u64, index: usize },

    #[error("Group config {0} defines no timeseries")]
    EmptyGroupConfig(PathBuf),
}
