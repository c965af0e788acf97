// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Smoothed random walk.

use super::BaseParams;
use crate::error::Result;
use crate::random::RandomSource;
use ndarray::{Array1, Array2};

/// Generate one independent walk per channel, scaled to
/// `[-amplitude, amplitude]`.
pub fn generate(params: &BaseParams, rng: &mut RandomSource) -> Result<Array2<f64>> {
    let window = ((params.smoothing * params.length as f64).round() as usize).max(1);
    let mut base = Array2::zeros((params.length, params.channels));

    for mut column in base.columns_mut() {
        let mut position = 0.0;
        let mut walk = Array1::zeros(params.length);
        for value in walk.iter_mut() {
            position += rng.sample_normal(0.0, 1.0)?;
            *value = position;
        }
        let smoothed = moving_average(&walk, window);
        column.assign(&scale(&smoothed, params.amplitude));
    }

    Ok(base)
}

/// Centered moving average; the window shrinks at the edges.
fn moving_average(values: &Array1<f64>, window: usize) -> Array1<f64> {
    if window <= 1 {
        return values.clone();
    }
    let n = values.len();
    let half = window / 2;
    Array1::from_shape_fn(n, |i| {
        let lo = i.saturating_sub(half);
        let hi = (i + window - half).min(n);
        values.slice(ndarray::s![lo..hi]).mean().unwrap_or(0.0)
    })
}

/// Min-max scale to `[-amplitude, amplitude]`; a flat walk maps to zeros.
fn scale(values: &Array1<f64>, amplitude: f64) -> Array1<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range.is_nan() || range <= 0.0 {
        return Array1::zeros(values.len());
    }
    values.mapv(|v| amplitude * (2.0 * (v - min) / range - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignalConfig;
    use crate::oscillation::BaseOscillationKind;

    #[test]
    fn test_scaled_to_amplitude() {
        let params = BaseParams::from(
            &SignalConfig::new(BaseOscillationKind::RandomWalk)
                .with_length(500)
                .with_amplitude(4.0),
        );
        let mut rng = RandomSource::seeded(42);
        let base = generate(&params, &mut rng).unwrap();

        let min = base.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = base.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((min + 4.0).abs() < 1e-9);
        assert!((max - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_channels_are_independent() {
        let params = BaseParams::from(
            &SignalConfig::new(BaseOscillationKind::RandomWalk)
                .with_length(200)
                .with_channels(2),
        );
        let mut rng = RandomSource::seeded(3);
        let base = generate(&params, &mut rng).unwrap();
        assert_ne!(base.column(0), base.column(1));
    }

    #[test]
    fn test_moving_average_flattens() {
        let values = Array1::from(vec![0.0, 10.0, 0.0, 10.0, 0.0]);
        let smoothed = moving_average(&values, 3);
        assert_eq!(smoothed[0], 5.0);
        assert!((smoothed[2] - 20.0 / 3.0).abs() < 1e-12);
        assert_eq!(moving_average(&values, 1), values);
    }

    #[test]
    fn test_single_point_walk_is_flat() {
        let params = BaseParams::from(
            &SignalConfig::new(BaseOscillationKind::RandomWalk).with_length(1),
        );
        let mut rng = RandomSource::seeded(9);
        let base = generate(&params, &mut rng).unwrap();
        assert_eq!(base[[0, 0]], 0.0);
    }
}
