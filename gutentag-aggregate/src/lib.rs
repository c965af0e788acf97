// GutenTAG Aggregate - Multi-series dataset aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # GutenTAG Aggregate
//!
//! Builds a multi-series dataset from grouped series definitions.
//!
//! A dataset root holds:
//!
//! ```text
//! <root>/
//! ├── instructions.json   # num_series, output file names, groups
//! ├── configs/            # one JSON definition per group
//! ├── outputs/            # out_<n>/<name>/test.csv per series
//! └── output_dataset/     # aggregated data and label tables
//! ```
//!
//! Instructions and group configs are JSON; see [`instructions`] for the
//! layout and how it maps from YAML `group_<n>` instruction files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gutentag_aggregate::MultiDimDataset;
//!
//! let mut dataset = MultiDimDataset::from_instructions_file("./dataset", "instructions.json", 42)?;
//! dataset.clean()?;
//! let summary = dataset.generate()?;
//! println!("{} series", summary.series);
//! # Ok::<(), gutentag_aggregate::AggregateError>(())
//! ```

pub mod dataset;
pub mod error;
pub mod instructions;
pub mod logging;
pub mod series_output;
pub mod table;

pub use dataset::{derive_seed, DatasetLayout, DatasetSummary, MultiDimDataset};
pub use error::{AggregateError, Result};
pub use instructions::{GroupConfig, GroupInstruction, Instructions, TimeseriesDefinition};
pub use series_output::{read_series, write_series, SeriesColumns};
pub use table::WideTable;
