// GutenTAG Aggregate - Multi-series dataset aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Multi-series dataset generation.
//!
//! Series are generated one at a time. Each one is written to its own
//! table under `outputs/`, read back, and appended as a column to the
//! aggregated data and label tables in `output_dataset/`. Both aggregated
//! tables are rewritten after every series.

use crate::error::{AggregateError, Result};
use crate::instructions::{GroupConfig, Instructions, TimeseriesDefinition};
use crate::series_output::{read_series, write_series, TIMESTAMP_COLUMN};
use crate::table::WideTable;
use gutentag::{Anomaly, RandomSource, Signal};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory layout under a dataset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Group config files.
    pub fn configs(&self) -> PathBuf {
        self.root.join("configs")
    }

    /// Per-series tables.
    pub fn outputs(&self) -> PathBuf {
        self.root.join("outputs")
    }

    /// Aggregated tables.
    pub fn output_dataset(&self) -> PathBuf {
        self.root.join("output_dataset")
    }

    /// Table of the `n`-th series (1-based).
    pub fn series_file(&self, n: usize, name: &str) -> PathBuf {
        self.outputs()
            .join(format!("out_{}", n))
            .join(name)
            .join("test.csv")
    }
}

/// Outcome of a dataset run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Series generated.
    pub series: usize,
    /// Rows of the aggregated tables.
    pub rows: usize,
}

/// Seed for the series at `index` within its group: the decimal digits of
/// `seed` followed by those of `index`.
pub fn derive_seed(seed: u64, index: usize) -> Result<u64> {
    format!("{}{}", seed, index)
        .parse()
        .map_err(|_| AggregateError::InvalidSeed { seed, index })
}

/// Generator for a multi-series dataset.
#[derive(Debug)]
pub struct MultiDimDataset {
    layout: DatasetLayout,
    instructions: Instructions,
    seed: u64,
    series_count: usize,
    data: WideTable<f64>,
    labels: WideTable<u8>,
}

impl MultiDimDataset {
    pub fn new(layout: DatasetLayout, instructions: Instructions, seed: u64) -> Self {
        Self {
            layout,
            instructions,
            seed,
            series_count: 0,
            data: WideTable::new(TIMESTAMP_COLUMN),
            labels: WideTable::new(TIMESTAMP_COLUMN),
        }
    }

    /// Load instructions from `instructions_file`, resolved against `root`
    /// when relative.
    pub fn from_instructions_file(
        root: impl Into<PathBuf>,
        instructions_file: impl AsRef<Path>,
        seed: u64,
    ) -> Result<Self> {
        let layout = DatasetLayout::new(root);
        let path = layout.root().join(instructions_file);
        let instructions = Instructions::from_path(&path)?;
        info!(
            "loaded instructions from {}: {} series in {} group(s)",
            path.display(),
            instructions.num_series,
            instructions.groups.len()
        );
        Ok(Self::new(layout, instructions, seed))
    }

    pub fn layout(&self) -> &DatasetLayout {
        &self.layout
    }

    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }

    /// Series generated so far.
    pub fn series_count(&self) -> usize {
        self.series_count
    }

    /// Aggregated data table, columns `s1..sN`.
    pub fn data(&self) -> &WideTable<f64> {
        &self.data
    }

    /// Aggregated label table, columns `l1..lN`.
    pub fn labels(&self) -> &WideTable<u8> {
        &self.labels
    }

    /// Remove everything inside `outputs/` and `output_dataset/`, creating
    /// the directories if needed.
    pub fn clean(&self) -> Result<()> {
        for dir in [self.layout.outputs(), self.layout.output_dataset()] {
            fs::create_dir_all(&dir)?;
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    fs::remove_dir_all(entry.path())?;
                } else {
                    fs::remove_file(entry.path())?;
                }
            }
            debug!("cleaned {}", dir.display());
        }
        Ok(())
    }

    /// Visit the groups in order until the requested number of series exist.
    pub fn generate(&mut self) -> Result<DatasetSummary> {
        fs::create_dir_all(self.layout.output_dataset())?;

        let num_series = self.instructions.num_series;
        let groups = self.instructions.groups.clone();
        let mut created = 0;

        for group in &groups {
            if created >= num_series {
                break;
            }

            let config_path = self.layout.configs().join(&group.config_file);
            let config = GroupConfig::from_path(&config_path)?;
            let definition = config
                .definition()
                .ok_or_else(|| AggregateError::EmptyGroupConfig(config_path.clone()))?;

            let to_create = group.number_of_series.min(num_series - created);
            info!(
                "group {}: {} of {} series from {} ({})",
                group.name,
                to_create,
                group.number_of_series,
                group.config_file,
                definition.name
            );

            for i in 0..to_create {
                self.add_one_series(definition, i)?;
            }
            created += to_create;
        }

        let summary = DatasetSummary {
            series: created,
            rows: self.data.len(),
        };
        info!(
            "generated {} series, {} aggregated rows",
            summary.series, summary.rows
        );
        Ok(summary)
    }

    /// Generate one series as the `index`-th of its group, append it to the
    /// aggregated tables and rewrite them. Returns the per-series table path.
    pub fn add_one_series(
        &mut self,
        definition: &TimeseriesDefinition,
        index: usize,
    ) -> Result<PathBuf> {
        self.series_count += 1;
        let n = self.series_count;
        let seed = derive_seed(self.seed, index)?;

        let mut rng = RandomSource::seeded(seed);
        let mut signal = Signal::new(definition.base_oscillation.clone(), &mut rng)?
            .inject_anomalies(definition.anomalies.iter().cloned().map(Anomaly::from_config));
        let generated = signal.generate(&mut rng)?;

        let path = self.layout.series_file(n, &definition.name);
        write_series(&path, &generated)?;
        debug!("series {} (seed {}) written to {}", n, seed, path.display());

        let columns = read_series(&path)?;
        self.data.add_column(
            &format!("s{}", n),
            columns.timestamps.iter().copied().zip(columns.values.iter().copied()),
        );
        self.labels.add_column(
            &format!("l{}", n),
            columns.timestamps.iter().copied().zip(columns.labels.iter().copied()),
        );

        self.write_tables()?;
        Ok(path)
    }

    fn write_tables(&self) -> Result<()> {
        let dir = self.layout.output_dataset();
        self.data
            .write_csv(dir.join(&self.instructions.output_series_file))?;
        self.labels
            .write_csv(dir.join(&self.instructions.output_labels_file))?;
        Ok(())
    }
}
