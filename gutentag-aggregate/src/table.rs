// GutenTAG Aggregate - Multi-series dataset aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Wide tables indexed by timestamp.
//!
//! Columns are outer-joined on the timestamp: a row exists for every
//! timestamp any column has, and cells a column lacks are written empty.

use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

/// Column-oriented table keyed by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable<T> {
    index_name: String,
    columns: Vec<String>,
    rows: BTreeMap<u64, BTreeMap<usize, T>>,
}

impl<T: Display> WideTable<T> {
    /// Create an empty table whose index column is named `index_name`.
    pub fn new(index_name: &str) -> Self {
        Self {
            index_name: index_name.to_string(),
            columns: Vec::new(),
            rows: BTreeMap::new(),
        }
    }

    /// Append a column.
    pub fn add_column(&mut self, name: &str, cells: impl IntoIterator<Item = (u64, T)>) {
        let column = self.columns.len();
        self.columns.push(name.to_string());
        for (timestamp, value) in cells {
            self.rows.entry(timestamp).or_default().insert(column, value);
        }
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `timestamp` in column `name`.
    pub fn get(&self, timestamp: u64, name: &str) -> Option<&T> {
        let column = self.columns.iter().position(|c| c == name)?;
        self.rows.get(&timestamp)?.get(&column)
    }

    /// Write the table as CSV, rows in ascending timestamp order.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push(self.index_name.as_str());
        header.extend(self.columns.iter().map(String::as_str));
        writer.write_record(&header)?;

        for (timestamp, cells) in &self.rows {
            let mut record = Vec::with_capacity(self.columns.len() + 1);
            record.push(timestamp.to_string());
            record.extend(
                (0..self.columns.len())
                    .map(|c| cells.get(&c).map(ToString::to_string).unwrap_or_default()),
            );
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}
