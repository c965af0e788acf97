// GutenTAG Aggregate - Multi-series dataset aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Per-series CSV tables.
//!
//! Layout: `timestamp`, one `value-<c>` column per channel, `is_anomaly`.

use crate::error::{AggregateError, Result};
use gutentag::GeneratedSeries;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const FIRST_VALUE_COLUMN: &str = "value-0";
pub const LABEL_COLUMN: &str = "is_anomaly";

/// Columns read back from a per-series table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesColumns {
    pub timestamps: Vec<u64>,
    /// First channel.
    pub values: Vec<f64>,
    pub labels: Vec<u8>,
}

impl SeriesColumns {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct SeriesRow {
    timestamp: u64,
    #[serde(rename = "value-0")]
    value: f64,
    is_anomaly: u8,
}

/// Write `generated` to `path`, creating parent directories.
pub fn write_series(path: impl AsRef<Path>, generated: &GeneratedSeries) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![TIMESTAMP_COLUMN.to_string()];
    header.extend((0..generated.channels()).map(|c| format!("value-{}", c)));
    header.push(LABEL_COLUMN.to_string());
    writer.write_record(&header)?;

    for (i, (row, label)) in generated
        .series
        .rows()
        .into_iter()
        .zip(generated.labels.iter())
        .enumerate()
    {
        let mut record = Vec::with_capacity(row.len() + 2);
        record.push(i.to_string());
        record.extend(row.iter().map(|v| v.to_string()));
        record.push(label.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Read the timestamp, first channel and label columns of a per-series table.
pub fn read_series(path: impl AsRef<Path>) -> Result<SeriesColumns> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in [TIMESTAMP_COLUMN, FIRST_VALUE_COLUMN, LABEL_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(AggregateError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    let mut columns = SeriesColumns::default();
    for result in reader.deserialize() {
        let row: SeriesRow = result?;
        columns.timestamps.push(row.timestamp);
        columns.values.push(row.value);
        columns.labels.push(row.is_anomaly);
    }
    Ok(columns)
}
