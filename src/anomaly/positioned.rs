// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Positioned anomalies.
//!
//! A [`PositionedAnomaly`] places a fixed-length segment in one third of the
//! series (beginning, middle or end), avoiding ranges claimed by earlier
//! anomalies and preferring period boundaries on periodic signals.

use super::kinds::AnomalyKind;
use super::{AnomalyContext, AnomalyProtocol, AnomalyStrategy};
use crate::error::{GenerationError, Result};
use crate::random::RandomSource;
use log::{debug, warn};
use ndarray::s;
use serde::{Deserialize, Serialize};

/// Region of the series an anomaly is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// First third.
    Beginning,
    /// Second third.
    #[default]
    Middle,
    /// Last third.
    End,
}

impl Position {
    /// Half-open index region `[lo, hi)` for a series of `length` points.
    pub fn region(&self, length: usize) -> (usize, usize) {
        let third = length / 3;
        match self {
            Position::Beginning => (0, third),
            Position::Middle => (third, 2 * third),
            Position::End => (2 * third, length),
        }
    }
}

/// Anomaly injection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnomalyConfig {
    /// Region to place the anomaly in.
    pub position: Position,
    /// Fixed start index, bypassing placement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_position: Option<usize>,
    /// Number of affected points.
    pub length: usize,
    /// Target channel.
    pub channel: usize,
    /// Kinds combined into this anomaly.
    pub kinds: Vec<AnomalyKind>,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            position: Position::Middle,
            exact_position: None,
            length: 10,
            channel: 0,
            kinds: Vec::new(),
        }
    }
}

impl AnomalyConfig {
    /// Create a configuration with a single kind.
    pub fn new(kind: AnomalyKind) -> Self {
        Self {
            kinds: vec![kind],
            ..Self::default()
        }
    }

    /// Set the region.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Pin the start index.
    pub fn at(mut self, start: usize) -> Self {
        self.exact_position = Some(start);
        self
    }

    /// Set length in points.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set target channel.
    pub fn with_channel(mut self, channel: usize) -> Self {
        self.channel = channel;
        self
    }

    /// Add a kind.
    pub fn with_kind(mut self, kind: AnomalyKind) -> Self {
        self.kinds.push(kind);
        self
    }
}

/// Strategy placing an [`AnomalyConfig`] on the signal.
#[derive(Debug, Clone)]
pub struct PositionedAnomaly {
    config: AnomalyConfig,
}

impl PositionedAnomaly {
    /// Create the strategy.
    pub fn new(config: AnomalyConfig) -> Self {
        Self { config }
    }

    /// Configuration driving this strategy.
    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }

    /// Pick a start index for a segment of `len` points.
    fn choose_start(&self, ctx: &AnomalyContext<'_>, len: usize, rng: &mut RandomSource) -> usize {
        let length = ctx.length();
        let latest = length - len;
        let (lo, hi) = self.config.position.region(length);

        let free: Vec<usize> = (lo..hi)
            .take_while(|s| *s <= latest)
            .filter(|s| !ctx.overlaps(*s, s + len))
            .collect();

        let candidates = match ctx.period_length() {
            Some(period) => {
                let aligned: Vec<usize> = free.iter().copied().filter(|s| s % period == 0).collect();
                if aligned.is_empty() {
                    free
                } else {
                    aligned
                }
            }
            None => free,
        };

        if candidates.is_empty() {
            let fallback = lo.min(latest);
            warn!(
                "no free position for anomaly of length {} in {:?} region, using {}",
                len, self.config.position, fallback
            );
            return fallback;
        }
        candidates[rng.index(candidates.len())]
    }
}

impl AnomalyStrategy for PositionedAnomaly {
    fn generate(
        &self,
        ctx: &AnomalyContext<'_>,
        rng: &mut RandomSource,
    ) -> Result<AnomalyProtocol> {
        let length = ctx.length();
        let len = self.config.length.min(length);

        let start = match self.config.exact_position {
            Some(start) => start,
            None => self.choose_start(ctx, len, rng),
        };
        let end = match start.checked_add(len).filter(|end| *end <= length) {
            Some(end) => end,
            None => {
                return Err(GenerationError::RangeOutOfBounds {
                    start,
                    end: start.saturating_add(len),
                    length,
                })
            }
        };

        let base = ctx.base_channel().slice(s![start..end]).to_owned();
        let mut protocol = AnomalyProtocol::new(start, end, ctx.channel);
        for kind in &self.config.kinds {
            let deviation = kind.deviation(base.view(), ctx.kind, ctx.amplitude(), rng)?;
            protocol.subsequences.push(deviation);
        }
        protocol.subsequences.insert(0, base);

        debug!(
            "placed anomaly [{}, {}) on channel {} with {} kind(s)",
            start,
            end,
            ctx.channel,
            self.config.kinds.len()
        );
        Ok(protocol)
    }
}
