// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Anomaly compositing.
//!
//! Compositing runs in two passes:
//!
//! 1. Every anomaly strategy is invoked in attachment order against the
//!    untouched base series. Each reported `(start, end)` range is appended
//!    to the position list seen by the following strategies.
//! 2. The protocols are applied in the same order. The summed subsequences
//!    overwrite the target channel, so a later overlay wins where ranges
//!    intersect.
//!
//! Overlaps are not rejected: strategies are trusted to honor the position
//! list. Protocols whose shape does not fit the series are rejected.

use crate::anomaly::{Anomaly, AnomalyContext, AnomalyProtocol};
use crate::error::{GenerationError, Result};
use crate::labels::LabelRange;
use crate::random::RandomSource;
use crate::signal::Signal;
use log::debug;
use ndarray::{s, Array1, Array2};

/// Protocols collected in the first pass, paired with their target channel.
#[derive(Debug, Clone, Default)]
pub struct CompositePlan {
    protocols: Vec<(AnomalyProtocol, usize)>,
}

impl CompositePlan {
    /// Run every strategy against `base` and collect their protocols.
    pub fn collect(
        signal: &Signal,
        anomalies: &[Anomaly],
        base: &Array2<f64>,
        rng: &mut RandomSource,
    ) -> Result<Self> {
        let periods = signal.timeseries_periods();
        let kind = signal.base_oscillation_kind();
        let channels = base.ncols();

        let mut positions: Vec<(usize, usize)> = Vec::with_capacity(anomalies.len());
        let mut protocols = Vec::with_capacity(anomalies.len());

        for anomaly in anomalies {
            let channel = anomaly.channel();
            if channel >= channels {
                return Err(GenerationError::ChannelOutOfRange { channel, channels });
            }

            let ctx = AnomalyContext {
                signal,
                base: base.view(),
                periods,
                kind,
                positions: &positions,
                channel,
            };
            let protocol = anomaly.strategy().generate(&ctx, rng)?;
            positions.push((protocol.start, protocol.end));
            protocols.push((protocol, channel));
        }

        Ok(Self { protocols })
    }

    /// Number of collected protocols.
    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    /// Check if no protocols were collected.
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    /// `(start, end)` ranges in attachment order.
    pub fn positions(&self) -> Vec<(usize, usize)> {
        self.protocols.iter().map(|(p, _)| (p.start, p.end)).collect()
    }

    /// Overlay every protocol onto `series` in attachment order and return
    /// the label ranges.
    pub fn apply(self, series: &mut Array2<f64>) -> Result<Vec<LabelRange>> {
        let mut label_ranges = Vec::with_capacity(self.protocols.len());

        for (protocol, channel) in self.protocols {
            if !protocol.subsequences.is_empty() {
                let overlay = sum_subsequences(&protocol, series.nrows())?;
                series
                    .slice_mut(s![protocol.start..protocol.end, channel])
                    .assign(&overlay);
                debug!(
                    "overlaid [{}, {}) on channel {}",
                    protocol.start, protocol.end, channel
                );
            }
            label_ranges.push(protocol.labels);
        }

        Ok(label_ranges)
    }
}

/// Element-wise sum of a protocol's subsequences after checking that each
/// one covers exactly `[start, end)` inside a series of `length` points.
fn sum_subsequences(protocol: &AnomalyProtocol, length: usize) -> Result<Array1<f64>> {
    let (start, end) = (protocol.start, protocol.end);
    if start > end || end > length {
        return Err(GenerationError::RangeOutOfBounds { start, end, length });
    }

    let expected = end - start;
    let mut sum = Array1::zeros(expected);
    for subsequence in &protocol.subsequences {
        if subsequence.len() != expected {
            return Err(GenerationError::SubsequenceLength {
                expected,
                actual: subsequence.len(),
            });
        }
        sum += subsequence;
    }
    Ok(sum)
}
