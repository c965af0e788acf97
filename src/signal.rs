// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Signal engine.
//!
//! A [`Signal`] owns one generation run. The pipeline is linear and runs
//! exactly once:
//!
//! ```text
//! Configured -> TrendResolved -> AnomaliesComposited -> LabelsAccumulated -> Finalized
//! ```
//!
//! The finalized series is `composited + noise + trend + offset`.

use crate::anomaly::Anomaly;
use crate::compositor::CompositePlan;
use crate::config::SignalConfig;
use crate::error::{GenerationError, Result};
use crate::labels::LabelMask;
use crate::oscillation::{BaseOscillation, BaseOscillationKind, BaseParams};
use crate::random::RandomSource;
use crate::trend::resolve_trend;
use log::debug;
use ndarray::{Array1, Array2};

/// Pipeline stage of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignalState {
    /// Constructed, anomalies may still be attached.
    Configured,
    /// Trend background materialized.
    TrendResolved,
    /// Anomaly overlays applied.
    AnomaliesComposited,
    /// Label mask built.
    LabelsAccumulated,
    /// Noise, trend and offset added; buffers are final.
    Finalized,
}

/// Output of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSeries {
    /// Values, shape `(length, channels)`.
    pub series: Array2<f64>,
    /// Binary anomaly labels, shape `(length,)`.
    pub labels: Array1<u8>,
}

impl GeneratedSeries {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.series.nrows()
    }

    /// Check if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.series.nrows() == 0
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.series.ncols()
    }

    /// Number of anomalous points.
    pub fn anomalous_count(&self) -> usize {
        self.labels.iter().filter(|v| **v == 1).count()
    }
}

/// A single synthetic time series and its generation state.
#[derive(Debug)]
pub struct Signal {
    config: SignalConfig,
    anomalies: Vec<Anomaly>,
    trend: Option<Box<Signal>>,
    noise: Array2<f64>,
    state: SignalState,
    trend_series: Option<Array2<f64>>,
    composited: Option<Array2<f64>>,
    series: Option<Array2<f64>>,
    labels: LabelMask,
}

impl Signal {
    /// Build a signal from its configuration.
    ///
    /// Noise is drawn from `rng` immediately. A nested trend is built
    /// recursively and inherits this signal's length and channel count.
    pub fn new(config: SignalConfig, rng: &mut RandomSource) -> Result<Self> {
        config.validate()?;

        let noise = rng.noise(
            config.variance * config.amplitude,
            config.length,
            config.channels,
        )?;

        let trend = match config.trend.as_deref() {
            Some(trend_config) => {
                let mut trend_config = trend_config.clone();
                trend_config.length = config.length;
                trend_config.channels = config.channels;
                Some(Box::new(Signal::new(trend_config, rng)?))
            }
            None => None,
        };

        Ok(Self {
            labels: LabelMask::new(config.length),
            config,
            anomalies: Vec::new(),
            trend,
            noise,
            state: SignalState::Configured,
            trend_series: None,
            composited: None,
            series: None,
        })
    }

    /// Attach anomalies, keeping attachment order.
    pub fn inject_anomalies(mut self, anomalies: impl IntoIterator<Item = Anomaly>) -> Self {
        self.anomalies.extend(anomalies);
        self
    }

    /// Attach one anomaly.
    pub fn add_anomaly(&mut self, anomaly: Anomaly) {
        self.anomalies.push(anomaly);
    }

    /// Configuration.
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Attached anomalies in attachment order.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Nested trend signal.
    pub fn trend(&self) -> Option<&Signal> {
        self.trend.as_deref()
    }

    /// Nested trend signal, mutable so anomalies can be attached to it
    /// before the parent is generated.
    pub fn trend_mut(&mut self) -> Option<&mut Signal> {
        self.trend.as_deref_mut()
    }

    /// Current pipeline stage.
    pub fn state(&self) -> SignalState {
        self.state
    }

    /// Noise buffer, shape `(length, channels)`.
    pub fn noise(&self) -> &Array2<f64> {
        &self.noise
    }

    /// Resolved trend background, once generated.
    pub fn trend_series(&self) -> Option<&Array2<f64>> {
        self.trend_series.as_ref()
    }

    /// Base series with anomaly overlays, before noise, trend and offset.
    pub fn composited_series(&self) -> Option<&Array2<f64>> {
        self.composited.as_ref()
    }

    /// Final series, once generated.
    pub fn series(&self) -> Option<&Array2<f64>> {
        self.series.as_ref()
    }

    /// Label mask; all zero until generated.
    pub fn labels(&self) -> &LabelMask {
        &self.labels
    }

    /// Number of equal-length periods, `None` for non-periodic kinds.
    pub fn timeseries_periods(&self) -> Option<usize> {
        self.config.kind.periods(&BaseParams::from(&self.config))
    }

    /// Kind tag of the base oscillation.
    pub fn base_oscillation_kind(&self) -> BaseOscillationKind {
        self.config.kind
    }

    /// Undecorated base oscillation for `params`.
    pub fn generate_only_base(
        &self,
        params: &BaseParams,
        rng: &mut RandomSource,
    ) -> Result<Array2<f64>> {
        self.config.kind.generate_base(params, rng)
    }

    /// Base parameters derived from this signal's configuration.
    pub fn base_params(&self) -> BaseParams {
        BaseParams::from(&self.config)
    }

    /// Run the pipeline. Fails with [`GenerationError::AlreadyGenerated`]
    /// when called a second time.
    pub fn generate(&mut self, rng: &mut RandomSource) -> Result<GeneratedSeries> {
        if self.state != SignalState::Configured {
            return Err(GenerationError::AlreadyGenerated);
        }

        let mut series = self.generate_only_base(&self.base_params(), rng)?;
        let trend_series = resolve_trend(self.trend.as_deref_mut(), series.dim(), rng)?;
        self.advance(SignalState::TrendResolved);

        let plan = CompositePlan::collect(self, &self.anomalies, &series, rng)?;
        let label_ranges = plan.apply(&mut series)?;
        self.advance(SignalState::AnomaliesComposited);

        self.labels = LabelMask::from_ranges(self.config.length, &label_ranges);
        self.advance(SignalState::LabelsAccumulated);

        let composited = series.clone();
        series += &self.noise;
        series += &trend_series;
        series += self.config.offset;
        self.advance(SignalState::Finalized);

        let generated = GeneratedSeries {
            series: series.clone(),
            labels: self.labels.as_array().clone(),
        };
        debug!(
            "generated {:?} signal: {} points, {} channel(s), {} anomalous",
            self.config.kind,
            generated.len(),
            generated.channels(),
            generated.anomalous_count()
        );

        self.trend_series = Some(trend_series);
        self.composited = Some(composited);
        self.series = Some(series);
        Ok(generated)
    }

    fn advance(&mut self, next: SignalState) {
        debug!("signal state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl BaseOscillation for Signal {
    fn generate(&mut self, rng: &mut RandomSource) -> Result<GeneratedSeries> {
        Signal::generate(self, rng)
    }

    fn timeseries_periods(&self) -> Option<usize> {
        Signal::timeseries_periods(self)
    }

    fn base_oscillation_kind(&self) -> BaseOscillationKind {
        Signal::base_oscillation_kind(self)
    }

    fn generate_only_base(
        &self,
        params: &BaseParams,
        rng: &mut RandomSource,
    ) -> Result<Array2<f64>> {
        Signal::generate_only_base(self, params, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::{AnomalyConfig, AnomalyKind};

    fn sine(length: usize) -> SignalConfig {
        SignalConfig::default().with_length(length).with_frequency(2.0)
    }

    #[test]
    fn test_state_progression() {
        let mut rng = RandomSource::seeded(42);
        let mut signal = Signal::new(sine(100), &mut rng).unwrap();
        assert_eq!(signal.state(), SignalState::Configured);
        assert!(signal.series().is_none());

        signal.generate(&mut rng).unwrap();
        assert_eq!(signal.state(), SignalState::Finalized);
        assert!(signal.series().is_some());
        assert!(signal.composited_series().is_some());
        assert!(signal.trend_series().is_some());
    }

    #[test]
    fn test_generate_twice_fails() {
        let mut rng = RandomSource::seeded(42);
        let mut signal = Signal::new(sine(100), &mut rng).unwrap();
        signal.generate(&mut rng).unwrap();
        assert_eq!(
            signal.generate(&mut rng),
            Err(GenerationError::AlreadyGenerated)
        );
    }

    #[test]
    fn test_noise_sized_at_construction() {
        let mut rng = RandomSource::seeded(42);
        let signal = Signal::new(sine(80).with_channels(3).with_variance(0.5), &mut rng).unwrap();
        assert_eq!(signal.noise().dim(), (80, 3));
        assert!(signal.noise().iter().any(|v| *v != 0.0));
    }

    #[test]
    fn test_trend_inherits_shape() {
        let mut rng = RandomSource::seeded(42);
        let trend = SignalConfig::new(BaseOscillationKind::Polynomial)
            .with_length(5)
            .with_channels(1);
        let config = sine(60).with_channels(2).with_trend(trend);
        let signal = Signal::new(config, &mut rng).unwrap();

        let nested = signal.trend().unwrap();
        assert_eq!(nested.config().length, 60);
        assert_eq!(nested.config().channels, 2);
    }

    #[test]
    fn test_channel_out_of_range() {
        let mut rng = RandomSource::seeded(42);
        let anomaly = Anomaly::from_config(
            AnomalyConfig::new(AnomalyKind::platform(0.0)).with_channel(4),
        );
        let mut signal = Signal::new(sine(100), &mut rng)
            .unwrap()
            .inject_anomalies([anomaly]);

        assert_eq!(
            signal.generate(&mut rng),
            Err(GenerationError::ChannelOutOfRange {
                channel: 4,
                channels: 1
            })
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut rng = RandomSource::seeded(42);
        let err = Signal::new(sine(0), &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidConfig(_)));
    }

    #[test]
    fn test_contract_through_trait_object() {
        let mut rng = RandomSource::seeded(42);
        let mut signal = Signal::new(sine(300), &mut rng).unwrap();
        let contract: &mut dyn BaseOscillation = &mut signal;

        assert_eq!(contract.base_oscillation_kind(), BaseOscillationKind::Sine);
        assert_eq!(contract.timeseries_periods(), Some(6));
        let generated = contract.generate(&mut rng).unwrap();
        assert_eq!(generated.series.dim(), (300, 1));
    }

    #[test]
    fn test_trend_anomalies_shape_background_but_not_labels() {
        let mut rng = RandomSource::seeded(42);
        let trend = SignalConfig::new(BaseOscillationKind::Polynomial).with_polynomial(vec![0.0]);
        let mut signal = Signal::new(sine(50).with_trend(trend), &mut rng).unwrap();
        signal.trend_mut().unwrap().add_anomaly(Anomaly::from_config(
            AnomalyConfig::new(AnomalyKind::platform(3.0))
                .with_length(5)
                .at(10),
        ));

        let generated = signal.generate(&mut rng).unwrap();

        assert_eq!(generated.anomalous_count(), 0);
        let background = signal.trend_series().unwrap();
        for i in 0..50 {
            let expected = if (10..15).contains(&i) { 3.0 } else { 0.0 };
            assert_eq!(background[[i, 0]], expected, "index {}", i);
        }
        let nested = signal.trend().unwrap();
        assert_eq!(nested.state(), SignalState::Finalized);
        assert_eq!(nested.labels().count_anomalous(), 5);
    }
}
