// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # GutenTAG - Labeled synthetic time series
//!
//! Generates multivariate time series with injected anomalies and a
//! per-point binary label mask, for benchmarking anomaly detectors.
//!
//! ## Key Features
//!
//! - **Base oscillations**: sine, cosine, square, sawtooth, random walk,
//!   cylinder-bell-funnel and polynomial
//! - **Trends**: any signal can carry a nested signal as additive background
//! - **Pluggable anomalies**: strategies report where and what to overlay
//! - **Reproducible**: every draw goes through an explicit seeded [`RandomSource`]
//!
//! ## Quick Start
//!
//! ```rust
//! use gutentag::{Anomaly, AnomalyConfig, AnomalyKind, RandomSource, Signal, SignalConfig};
//!
//! let mut rng = RandomSource::seeded(42);
//! let config = SignalConfig::default().with_length(1000).with_frequency(2.0);
//! let anomaly = Anomaly::from_config(
//!     AnomalyConfig::new(AnomalyKind::platform(0.0)).with_length(20),
//! );
//!
//! let mut signal = Signal::new(config, &mut rng)
//!     .unwrap()
//!     .inject_anomalies([anomaly]);
//! let generated = signal.generate(&mut rng).unwrap();
//!
//! assert_eq!(generated.series.dim(), (1000, 1));
//! assert_eq!(generated.anomalous_count(), 20);
//! ```
//!
//! ## Modules
//!
//! - [`signal`]: Signal engine and generation pipeline
//! - [`oscillation`]: Base oscillation kinds and the signal contract
//! - [`anomaly`]: Anomaly strategies, kinds and placement
//! - [`compositor`]: Two-pass anomaly overlay
//! - [`labels`]: Label ranges and masks
//! - [`trend`]: Trend background resolution
//! - [`random`]: Seeded random source

// Modules
pub mod anomaly;
pub mod compositor;
pub mod config;
pub mod error;
pub mod labels;
pub mod oscillation;
pub mod random;
pub mod signal;
pub mod trend;

// Re-exports for convenient access
pub use anomaly::{
    Anomaly, AnomalyConfig, AnomalyContext, AnomalyKind, AnomalyProtocol, AnomalyStrategy,
    Position, PositionedAnomaly,
};
pub use compositor::CompositePlan;
pub use config::{SignalConfig, MAX_TREND_DEPTH};
pub use error::{GenerationError, Result};
pub use labels::{LabelMask, LabelRange};
pub use oscillation::{BaseOscillation, BaseOscillationKind, BaseParams};
pub use random::RandomSource;
pub use signal::{GeneratedSeries, Signal, SignalState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
