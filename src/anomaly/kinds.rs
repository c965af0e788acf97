// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Anomaly kinds.
//!
//! Each kind turns a clean base segment into a deviation. A positioned
//! anomaly sums the base segment with the deviations of all its kinds.

use crate::error::Result;
use crate::oscillation::BaseOscillationKind;
use crate::random::RandomSource;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Kind of anomaly to inject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnomalyKind {
    /// Segment held at a constant level.
    Platform {
        /// Level of the platform.
        value: f64,
    },

    /// Single-point spike at the start of the segment.
    Extremum {
        /// Spike height relative to the signal amplitude.
        magnitude: f64,
    },

    /// Constant offset over the segment.
    MeanShift {
        /// Offset to add.
        offset: f64,
    },

    /// Scaled oscillation.
    ///
    /// Periodic kinds are scaled around zero, non-periodic kinds around the
    /// segment mean.
    Amplitude {
        /// Scale factor (>1 amplifies).
        factor: f64,
    },

    /// Additional Gaussian noise.
    Variance {
        /// Noise standard deviation relative to the signal amplitude.
        std: f64,
    },
}

impl AnomalyKind {
    /// Create a platform anomaly.
    pub fn platform(value: f64) -> Self {
        AnomalyKind::Platform { value }
    }

    /// Create a spike anomaly.
    pub fn extremum(magnitude: f64) -> Self {
        AnomalyKind::Extremum { magnitude }
    }

    /// Create a mean shift anomaly.
    pub fn mean_shift(offset: f64) -> Self {
        AnomalyKind::MeanShift { offset }
    }

    /// Deviation from `base` produced by this kind.
    pub fn deviation(
        &self,
        base: ArrayView1<'_, f64>,
        oscillation: BaseOscillationKind,
        amplitude: f64,
        rng: &mut RandomSource,
    ) -> Result<Array1<f64>> {
        let len = base.len();
        let deviation = match self {
            AnomalyKind::Platform { value } => base.mapv(|b| value - b),

            AnomalyKind::Extremum { magnitude } => {
                let mut spike = Array1::zeros(len);
                if let Some(first) = spike.first_mut() {
                    *first = magnitude * amplitude;
                }
                spike
            }

            AnomalyKind::MeanShift { offset } => Array1::from_elem(len, *offset),

            AnomalyKind::Amplitude { factor } => {
                let center = if oscillation.is_periodic() {
                    0.0
                } else {
                    base.mean().unwrap_or(0.0)
                };
                base.mapv(|b| (factor - 1.0) * (b - center))
            }

            AnomalyKind::Variance { std } => rng.normal_vector(std * amplitude, len)?,
        };
        Ok(deviation)
    }
}
