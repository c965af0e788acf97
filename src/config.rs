// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Signal configuration.
//!
//! [`SignalConfig`] is the full configuration surface of one signal. It
//! deserializes from kebab-case keys (`avg-pattern-length`, `heart-rate`,
//! ...), falls back to the documented default for every missing key, and
//! ignores keys it does not recognize.

use crate::error::{GenerationError, Result};
use crate::oscillation::BaseOscillationKind;
use serde::{Deserialize, Serialize};

/// Maximum nesting depth of trend signals.
pub const MAX_TREND_DEPTH: usize = 8;

/// Configuration of a single signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SignalConfig {
    /// Base oscillation kind.
    pub kind: BaseOscillationKind,
    /// Number of points.
    pub length: usize,
    /// Waves per 100 points for periodic kinds.
    pub frequency: f64,
    /// Peak amplitude of the base oscillation.
    pub amplitude: f64,
    /// Number of parallel channels.
    pub channels: usize,
    /// Noise standard deviation, relative to the amplitude.
    pub variance: f64,
    /// Mean pattern length for pattern-based kinds.
    pub avg_pattern_length: usize,
    /// Standard deviation of the pattern length.
    pub variance_pattern_length: f64,
    /// Standard deviation of the pattern height.
    pub variance_amplitude: f64,
    /// Beats per minute for heartbeat-like kinds.
    pub heart_rate: f64,
    /// Frequency modulation switch for heartbeat-like kinds.
    pub freq_mod: bool,
    /// Polynomial coefficients, lowest order first.
    pub polynomial: Vec<f64>,
    /// Nested signal added as a background trend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Box<SignalConfig>>,
    /// Constant added to every point.
    pub offset: f64,
    /// Moving-average window as a fraction of the length.
    pub smoothing: f64,
    /// Free-form title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            kind: BaseOscillationKind::Sine,
            length: 10_000,
            frequency: 10.0,
            amplitude: 1.0,
            channels: 1,
            variance: 0.0,
            avg_pattern_length: 10,
            variance_pattern_length: 0.0,
            variance_amplitude: 2.0,
            heart_rate: 60.0,
            freq_mod: true,
            polynomial: vec![1.0, 1.0],
            trend: None,
            offset: 0.0,
            smoothing: 0.01,
            title: None,
        }
    }
}

impl SignalConfig {
    /// Create a default configuration for the given kind.
    pub fn new(kind: BaseOscillationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Set length.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set channel count.
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Set frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set noise variance.
    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }

    /// Set offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set polynomial coefficients.
    pub fn with_polynomial(mut self, coefficients: Vec<f64>) -> Self {
        self.polynomial = coefficients;
        self
    }

    /// Set smoothing.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set pattern statistics for pattern-based kinds.
    pub fn with_pattern_length(mut self, avg: usize, variance: f64) -> Self {
        self.avg_pattern_length = avg;
        self.variance_pattern_length = variance;
        self
    }

    /// Set trend signal.
    pub fn with_trend(mut self, trend: SignalConfig) -> Self {
        self.trend = Some(Box::new(trend));
        self
    }

    /// Set title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Number of nested trend levels below this configuration.
    pub fn trend_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.trend.as_deref();
        while let Some(trend) = current {
            depth += 1;
            current = trend.trend.as_deref();
        }
        depth
    }

    /// Check that the configuration can produce a signal.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(GenerationError::InvalidConfig(
                "length must be at least 1".to_string(),
            ));
        }
        if self.channels == 0 {
            return Err(GenerationError::InvalidConfig(
                "channels must be at least 1".to_string(),
            ));
        }
        let scalars = [
            ("frequency", self.frequency),
            ("amplitude", self.amplitude),
            ("variance", self.variance),
            ("offset", self.offset),
            ("smoothing", self.smoothing),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GenerationError::InvalidConfig(format!(
                "{} must be finite",
                name
            )));
        }
        if self.variance < 0.0 {
            return Err(GenerationError::InvalidConfig(
                "variance must not be negative".to_string(),
            ));
        }
        if self.kind == BaseOscillationKind::Polynomial && self.polynomial.is_empty() {
            return Err(GenerationError::InvalidConfig(
                "polynomial needs at least one coefficient".to_string(),
            ));
        }

        let depth = self.trend_depth();
        if depth > MAX_TREND_DEPTH {
            return Err(GenerationError::TrendTooDeep {
                depth,
                max: MAX_TREND_DEPTH,
            });
        }
        Ok(())
    }
}
