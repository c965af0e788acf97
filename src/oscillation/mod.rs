// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Base oscillations.
//!
//! The set of kinds is closed: [`BaseOscillationKind`] dispatches to the
//! generator of each kind. Anything that acts as a signal implements
//! [`BaseOscillation`], which anomaly strategies use to query periodicity,
//! specialize on the kind, and request clean reference segments.

pub mod cylinder_bell_funnel;
pub mod periodic;
pub mod polynomial;
pub mod random_walk;

use crate::config::SignalConfig;
use crate::error::Result;
use crate::random::RandomSource;
use crate::signal::GeneratedSeries;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use periodic::Waveform;

/// Kind of base oscillation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseOscillationKind {
    /// `sin` wave.
    #[default]
    Sine,
    /// `cos` wave.
    Cosine,
    /// Square wave switching between `+amplitude` and `-amplitude`.
    Square,
    /// Rising ramp from `-amplitude` to `+amplitude`, then reset.
    Sawtooth,
    /// Smoothed Gaussian random walk.
    RandomWalk,
    /// Concatenated cylinder, bell and funnel patterns.
    CylinderBellFunnel,
    /// Polynomial over the point index.
    Polynomial,
}

impl BaseOscillationKind {
    /// Periodic kinds repeat with a fixed period derived from `frequency`.
    pub fn is_periodic(&self) -> bool {
        self.waveform().is_some()
    }

    fn waveform(&self) -> Option<Waveform> {
        match self {
            BaseOscillationKind::Sine => Some(Waveform::Sine),
            BaseOscillationKind::Cosine => Some(Waveform::Cosine),
            BaseOscillationKind::Square => Some(Waveform::Square),
            BaseOscillationKind::Sawtooth => Some(Waveform::Sawtooth),
            _ => None,
        }
    }

    /// Number of equal-length periods for the given parameters, `None` for
    /// non-periodic kinds.
    pub fn periods(&self, params: &BaseParams) -> Option<usize> {
        self.waveform()
            .and_then(|_| periodic::periods(params.length, params.frequency))
    }

    /// Generate the undecorated base oscillation of shape
    /// `(params.length, params.channels)`.
    pub fn generate_base(&self, params: &BaseParams, rng: &mut RandomSource) -> Result<Array2<f64>> {
        match self.waveform() {
            Some(waveform) => Ok(periodic::generate(waveform, params)),
            None => match self {
                BaseOscillationKind::RandomWalk => random_walk::generate(params, rng),
                BaseOscillationKind::CylinderBellFunnel => {
                    cylinder_bell_funnel::generate(params, rng)
                }
                _ => Ok(polynomial::generate(params)),
            },
        }
    }
}

/// Parameters consumed by base oscillation generators.
///
/// Built from a [`SignalConfig`]; anomaly strategies adjust single fields
/// (usually the length) to request reference segments.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseParams {
    pub length: usize,
    pub channels: usize,
    pub frequency: f64,
    pub amplitude: f64,
    pub avg_pattern_length: usize,
    pub variance_pattern_length: f64,
    pub variance_amplitude: f64,
    pub polynomial: Vec<f64>,
    pub smoothing: f64,
}

impl BaseParams {
    /// Override the length.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Override the channel count.
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }
}

impl From<&SignalConfig> for BaseParams {
    fn from(config: &SignalConfig) -> Self {
        Self {
            length: config.length,
            channels: config.channels,
            frequency: config.frequency,
            amplitude: config.amplitude,
            avg_pattern_length: config.avg_pattern_length,
            variance_pattern_length: config.variance_pattern_length,
            variance_amplitude: config.variance_amplitude,
            polynomial: config.polynomial.clone(),
            smoothing: config.smoothing,
        }
    }
}

/// The signal contract.
pub trait BaseOscillation {
    /// Run the full pipeline and return the final series and labels.
    fn generate(&mut self, rng: &mut RandomSource) -> Result<GeneratedSeries>;

    /// Number of equal-length periods in the series, `None` if non-periodic.
    fn timeseries_periods(&self) -> Option<usize>;

    /// Kind tag of the base oscillation.
    fn base_oscillation_kind(&self) -> BaseOscillationKind;

    /// Undecorated base oscillation for the given parameters.
    fn generate_only_base(&self, params: &BaseParams, rng: &mut RandomSource)
        -> Result<Array2<f64>>;
}
