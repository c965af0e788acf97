// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Anomaly strategies.
//!
//! An [`Anomaly`] pairs a target channel with a pluggable
//! [`AnomalyStrategy`]. During generation the strategy receives an
//! [`AnomalyContext`] describing the signal and the ranges claimed by
//! earlier anomalies, and answers with an [`AnomalyProtocol`]: where to
//! overlay, what to overlay, and which positions to label.
//!
//! The subsequences of a protocol are summed and then *replace* the target
//! channel over `[start, end)`, so together they must describe the final
//! segment, base oscillation included.

pub mod kinds;
pub mod positioned;

use crate::error::Result;
use crate::labels::LabelRange;
use crate::oscillation::BaseOscillationKind;
use crate::random::RandomSource;
use crate::signal::Signal;
use ndarray::{Array1, ArrayView1, ArrayView2};
use std::fmt;

pub use kinds::AnomalyKind;
pub use positioned::{AnomalyConfig, Position, PositionedAnomaly};

/// Outcome of one strategy invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyProtocol {
    /// First overlaid position.
    pub start: usize,
    /// Exclusive end of the overlay.
    pub end: usize,
    /// Target channel.
    pub channel: usize,
    /// Arrays summed element-wise into the final segment.
    pub subsequences: Vec<Array1<f64>>,
    /// Positions to mark anomalous.
    pub labels: LabelRange,
}

impl AnomalyProtocol {
    /// Create a protocol that labels exactly its overlay range.
    pub fn new(start: usize, end: usize, channel: usize) -> Self {
        Self {
            start,
            end,
            channel,
            subsequences: Vec::new(),
            labels: LabelRange::new(start, end.saturating_sub(start)),
        }
    }

    /// Append a subsequence.
    pub fn with_subsequence(mut self, subsequence: Array1<f64>) -> Self {
        self.subsequences.push(subsequence);
        self
    }

    /// Override the label range.
    pub fn with_labels(mut self, labels: LabelRange) -> Self {
        self.labels = labels;
        self
    }

    /// Overlay length.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the overlay range is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a strategy may consult when placing an anomaly.
pub struct AnomalyContext<'a> {
    /// Signal being generated.
    pub signal: &'a Signal,
    /// Base oscillation before any overlay, shape `(length, channels)`.
    pub base: ArrayView2<'a, f64>,
    /// Number of periods, `None` for non-periodic kinds.
    pub periods: Option<usize>,
    /// Kind tag of the base oscillation.
    pub kind: BaseOscillationKind,
    /// Ranges claimed by earlier anomalies in this run.
    pub positions: &'a [(usize, usize)],
    /// Channel of the anomaly being placed.
    pub channel: usize,
}

impl<'a> AnomalyContext<'a> {
    /// Series length.
    pub fn length(&self) -> usize {
        self.base.nrows()
    }

    /// Channel count.
    pub fn channels(&self) -> usize {
        self.base.ncols()
    }

    /// Signal amplitude.
    pub fn amplitude(&self) -> f64 {
        self.signal.config().amplitude
    }

    /// Length of one period, `None` for non-periodic kinds.
    pub fn period_length(&self) -> Option<usize> {
        self.periods
            .filter(|p| *p > 0)
            .map(|p| (self.length() / p).max(1))
    }

    /// Base values of the anomaly's channel.
    pub fn base_channel(&self) -> ArrayView1<'_, f64> {
        self.base.column(self.channel)
    }

    /// Check whether `[start, end)` intersects any earlier range.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.positions.iter().any(|&(s, e)| start < e && s < end)
    }
}

impl fmt::Debug for AnomalyContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnomalyContext")
            .field("shape", &self.base.dim())
            .field("periods", &self.periods)
            .field("kind", &self.kind)
            .field("positions", &self.positions)
            .field("channel", &self.channel)
            .finish()
    }
}

/// Pluggable anomaly generation logic.
pub trait AnomalyStrategy: fmt::Debug {
    /// Choose a placement and produce the overlay for it.
    fn generate(&self, ctx: &AnomalyContext<'_>, rng: &mut RandomSource)
        -> Result<AnomalyProtocol>;
}

/// An anomaly attached to a signal.
#[derive(Debug)]
pub struct Anomaly {
    channel: usize,
    strategy: Box<dyn AnomalyStrategy>,
}

impl Anomaly {
    /// Attach a strategy to a channel.
    pub fn new(channel: usize, strategy: impl AnomalyStrategy + 'static) -> Self {
        Self {
            channel,
            strategy: Box::new(strategy),
        }
    }

    /// Build the positioned anomaly described by `config`.
    pub fn from_config(config: AnomalyConfig) -> Self {
        let channel = config.channel;
        Self::new(channel, PositionedAnomaly::new(config))
    }

    /// Target channel.
    pub fn channel(&self) -> usize {
        self.channel
    }

    /// Strategy driving this anomaly.
    pub fn strategy(&self) -> &dyn AnomalyStrategy {
        self.strategy.as_ref()
    }
}
