// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Cylinder-bell-funnel patterns.
//!
//! Each channel is a sequence of back-to-back patterns. A pattern's length
//! is drawn from `N(avg_pattern_length, variance_pattern_length)` and its
//! height from `N(amplitude, variance_amplitude)`:
//!
//! - cylinder: flat at `height`
//! - bell: linear rise from 0 to `height`
//! - funnel: linear fall from `height` to 0

use super::BaseParams;
use crate::error::Result;
use crate::random::RandomSource;
use ndarray::Array2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Cylinder,
    Bell,
    Funnel,
}

impl Pattern {
    const ALL: [Pattern; 3] = [Pattern::Cylinder, Pattern::Bell, Pattern::Funnel];

    fn value(&self, height: f64, progress: f64) -> f64 {
        match self {
            Pattern::Cylinder => height,
            Pattern::Bell => height * progress,
            Pattern::Funnel => height * (1.0 - progress),
        }
    }
}

/// Generate one independent pattern sequence per channel.
pub fn generate(params: &BaseParams, rng: &mut RandomSource) -> Result<Array2<f64>> {
    let mut base = Array2::zeros((params.length, params.channels));

    for channel in 0..params.channels {
        let mut position = 0;
        while position < params.length {
            let drawn = rng.sample_normal(
                params.avg_pattern_length as f64,
                params.variance_pattern_length,
            )?;
            let pattern_length = (drawn.round().max(1.0)) as usize;
            let height = rng.sample_normal(params.amplitude, params.variance_amplitude)?;
            let pattern = Pattern::ALL[rng.index(Pattern::ALL.len())];

            let end = (position + pattern_length).min(params.length);
            for i in position..end {
                let progress = (i - position) as f64 / pattern_length as f64;
                base[[i, channel]] = pattern.value(height, progress);
            }
            position = end;
        }
    }

    Ok(base)
}
