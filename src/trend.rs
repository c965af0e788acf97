// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Trend resolution.
//!
//! A trend is a complete nested [`Signal`]: it runs its own pipeline
//! (anomalies and noise included) and its series becomes an additive
//! background of the parent. Its labels are discarded.

use crate::error::{GenerationError, Result};
use crate::random::RandomSource;
use crate::signal::Signal;
use log::debug;
use ndarray::Array2;

/// Materialize the background of shape `shape`; all zeros without a trend.
pub fn resolve_trend(
    trend: Option<&mut Signal>,
    shape: (usize, usize),
    rng: &mut RandomSource,
) -> Result<Array2<f64>> {
    let Some(trend) = trend else {
        return Ok(Array2::zeros(shape));
    };

    debug!("resolving {:?} trend", trend.base_oscillation_kind());
    let generated = trend.generate(rng)?;
    if generated.series.dim() != shape {
        return Err(GenerationError::TrendShape {
            expected: shape,
            actual: generated.series.dim(),
        });
    }
    Ok(generated.series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignalConfig;
    use crate::oscillation::BaseOscillationKind;

    #[test]
    fn test_absent_trend_is_zero() {
        let mut rng = RandomSource::seeded(1);
        let background = resolve_trend(None, (20, 2), &mut rng).unwrap();
        assert_eq!(background.dim(), (20, 2));
        assert!(background.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_trend_series_is_nested_output() {
        let mut rng = RandomSource::seeded(1);
        let config = SignalConfig::new(BaseOscillationKind::Polynomial)
            .with_length(5)
            .with_polynomial(vec![0.0, 2.0])
            .with_offset(1.0);
        let mut trend = Signal::new(config, &mut rng).unwrap();

        let background = resolve_trend(Some(&mut trend), (5, 1), &mut rng).unwrap();
        assert_eq!(background.column(0).to_vec(), vec![1.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut rng = RandomSource::seeded(1);
        let config = SignalConfig::default().with_length(10);
        let mut trend = Signal::new(config, &mut rng).unwrap();

        let err = resolve_trend(Some(&mut trend), (20, 1), &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::TrendShape { .. }));
    }
}
