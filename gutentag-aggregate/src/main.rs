// GutenTAG Aggregate - Multi-series dataset aggregation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # gutentag-aggregate
//!
//! ## Usage
//!
//! ```bash
//! gutentag-aggregate --root ./dataset --instructions instructions.json --seed 42 -v
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use gutentag_aggregate::{logging, MultiDimDataset};
use std::path::PathBuf;
use std::process;
use tracing::info;

/// Generate a labeled multi-series dataset.
#[derive(Parser, Debug)]
#[command(name = "gutentag-aggregate", version, about, long_about = None)]
struct Args {
    /// Dataset root holding configs/, outputs/ and output_dataset/
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Instructions file, relative to the root
    #[arg(short, long, default_value = "instructions.json")]
    instructions: PathBuf,

    /// Base seed; series i of a group uses the seed digits followed by i
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    info!("gutentag-aggregate v{}", env!("CARGO_PKG_VERSION"));

    let mut dataset = MultiDimDataset::from_instructions_file(&args.root, &args.instructions, args.seed)
        .with_context(|| {
            format!(
                "failed to load instructions {} under {}",
                args.instructions.display(),
                args.root.display()
            )
        })?;

    dataset
        .clean()
        .context("failed to clean previous outputs")?;

    let summary = dataset.generate().context("dataset generation failed")?;

    let out = dataset.layout().output_dataset();
    info!(
        "wrote {} series ({} rows) to {}",
        summary.series,
        summary.rows,
        out.display()
    );
    Ok(())
}
