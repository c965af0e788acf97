// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Periodic waveforms.
//!
//! `frequency` counts full waves per 100 points:
//! `value(i) = amplitude * wave(2*PI*frequency*i/100)`.

use super::BaseParams;
use ndarray::{Array1, Array2};
use std::f64::consts::PI;

/// Points per frequency unit.
const POINTS_PER_UNIT: f64 = 100.0;

/// Shape of one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Cosine,
    Square,
    Sawtooth,
}

impl Waveform {
    /// Evaluate at phase `x` (radians), unit amplitude.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Waveform::Sine => x.sin(),
            Waveform::Cosine => x.cos(),
            Waveform::Square => {
                if (x / (2.0 * PI)).rem_euclid(1.0) < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * (x / (2.0 * PI)).rem_euclid(1.0) - 1.0,
        }
    }
}

/// Number of full periods in `length` points.
pub fn periods(length: usize, frequency: f64) -> Option<usize> {
    if frequency <= 0.0 {
        return None;
    }
    let periods = (length as f64 / POINTS_PER_UNIT * frequency).floor() as usize;
    (periods > 0).then_some(periods)
}

/// Generate the waveform; every channel receives the same wave.
pub fn generate(waveform: Waveform, params: &BaseParams) -> Array2<f64> {
    let step = 2.0 * PI * params.frequency / POINTS_PER_UNIT;
    let column: Array1<f64> =
        Array1::from_shape_fn(params.length, |i| params.amplitude * waveform.evaluate(step * i as f64));

    Array2::from_shape_fn((params.length, params.channels), |(i, _)| column[i])
}
