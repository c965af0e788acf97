// GutenTAG Aggregate - Multi-series dataset aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Instruction and group configuration files.
//!
//! The instructions file names the output tables and lists the groups in
//! the order they are visited. Each group points at a config file holding
//! the series definition used for every series of that group.
//!
//! Both files are JSON. Groups are an ordered `groups` list, not
//! `group_<n>` keys holding lists of single-key maps, so older YAML
//! instruction files have to be converted:
//!
//! ```text
//! group_1:                         "groups": [
//!   - number_of_series: 3     =>     {"name": "group_1", "number_of_series": 3,
//!   - config_file: sine.yaml          "config_file": "sine.json"}
//!                                  ]
//! ```
//!
//! Group config files keep their `timeseries` layout, written as JSON.

use crate::error::{AggregateError, Result};
use gutentag::{AnomalyConfig, SignalConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Top-level generation instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructions {
    /// Total number of series to generate across all groups.
    pub num_series: usize,
    /// File name of the aggregated data table.
    pub output_series_file: String,
    /// File name of the aggregated label table.
    pub output_labels_file: String,
    /// Groups in visiting order.
    pub groups: Vec<GroupInstruction>,
}

/// One group entry of the instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInstruction {
    /// Label used in log output.
    pub name: String,
    /// Maximum number of series this group contributes.
    pub number_of_series: usize,
    /// Config file, relative to the `configs/` directory.
    pub config_file: String,
}

/// Contents of a group config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub timeseries: Vec<TimeseriesDefinition>,
}

/// A named series definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeseriesDefinition {
    /// Name of the series; also the per-series output directory.
    pub name: String,
    /// Signal configuration.
    pub base_oscillation: SignalConfig,
    /// Anomalies, in attachment order.
    #[serde(default)]
    pub anomalies: Vec<AnomalyConfig>,
}

impl Instructions {
    /// Load instructions from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }
}

impl GroupConfig {
    /// Load a group config from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: GroupConfig = read_json(path)?;
        if config.timeseries.is_empty() {
            return Err(AggregateError::EmptyGroupConfig(path.to_path_buf()));
        }
        Ok(config)
    }

    /// Definition used for every series of the group.
    pub fn definition(&self) -> Option<&TimeseriesDefinition> {
        self.timeseries.first()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| AggregateError::Json {
        path: path.to_path_buf(),
        source,
    })
}
