//! End-to-end tests for the signal engine

use approx::assert_abs_diff_eq;
use gutentag::*;
use ndarray::{s, Array2};

fn generate(config: SignalConfig, anomalies: Vec<AnomalyConfig>, seed: u64) -> (Signal, GeneratedSeries) {
    let mut rng = RandomSource::seeded(seed);
    let mut signal = Signal::new(config, &mut rng)
        .unwrap()
        .inject_anomalies(anomalies.into_iter().map(Anomaly::from_config));
    let generated = signal.generate(&mut rng).unwrap();
    (signal, generated)
}

fn clean_base(config: &SignalConfig, seed: u64) -> Array2<f64> {
    let mut rng = RandomSource::seeded(seed);
    let signal = Signal::new(config.clone(), &mut rng).unwrap();
    signal.generate_only_base(&signal.base_params(), &mut rng).unwrap()
}

fn run_starts(labels: &[u8]) -> Vec<usize> {
    (0..labels.len())
        .filter(|&i| labels[i] == 1 && (i == 0 || labels[i - 1] == 0))
        .collect()
}

#[test]
fn test_output_shapes_for_every_kind() {
    let kinds = [
        BaseOscillationKind::Sine,
        BaseOscillationKind::Cosine,
        BaseOscillationKind::Square,
        BaseOscillationKind::Sawtooth,
        BaseOscillationKind::RandomWalk,
        BaseOscillationKind::CylinderBellFunnel,
        BaseOscillationKind::Polynomial,
    ];

    for kind in kinds {
        let config = SignalConfig::new(kind)
            .with_length(500)
            .with_channels(3)
            .with_variance(0.1);
        let anomaly = AnomalyConfig::new(AnomalyKind::mean_shift(2.0)).with_channel(2);
        let (_, generated) = generate(config, vec![anomaly], 11);

        assert_eq!(generated.series.dim(), (500, 3), "{:?}", kind);
        assert_eq!(generated.labels.len(), 500, "{:?}", kind);
        assert!(generated.labels.iter().all(|v| *v <= 1));
        assert_eq!(generated.anomalous_count(), 10, "{:?}", kind);
    }
}

#[test]
fn test_offset_only_signal() {
    let config = SignalConfig::default()
        .with_length(100)
        .with_frequency(5.0)
        .with_offset(5.0);
    let base = clean_base(&config, 3);
    let (_, generated) = generate(config, Vec::new(), 3);

    assert_eq!(generated.anomalous_count(), 0);
    for (value, expected) in generated.series.iter().zip(base.iter()) {
        assert_abs_diff_eq!(*value, expected + 5.0, epsilon = 1e-12);
    }
}

#[test]
fn test_plain_signal_equals_base() {
    for kind in [BaseOscillationKind::Sine, BaseOscillationKind::RandomWalk] {
        let config = SignalConfig::new(kind).with_length(300).with_channels(2);
        let base = clean_base(&config, 21);
        let (_, generated) = generate(config, Vec::new(), 21);
        assert_eq!(generated.series, base, "{:?}", kind);
    }
}

#[test]
fn test_exact_ranges_are_labeled() {
    let config = SignalConfig::default().with_length(100);
    let anomalies = vec![
        AnomalyConfig::new(AnomalyKind::platform(0.0)).with_length(5).at(10),
        AnomalyConfig::new(AnomalyKind::extremum(3.0)).with_length(3).at(50),
    ];
    let (_, generated) = generate(config, anomalies, 1);

    assert_eq!(generated.anomalous_count(), 8);
    for i in 0..100 {
        let expected = (10..15).contains(&i) || (50..53).contains(&i);
        assert_eq!(generated.labels[i] == 1, expected, "index {}", i);
    }
}

#[test]
fn test_platform_overwrites_segment() {
    let config = SignalConfig::default().with_length(200).with_frequency(3.0);
    let anomaly = AnomalyConfig::new(AnomalyKind::platform(0.7)).with_length(20).at(40);
    let (signal, _) = generate(config, vec![anomaly], 9);

    let composited = signal.composited_series().unwrap();
    for value in composited.slice(s![40..60, 0]) {
        assert_abs_diff_eq!(*value, 0.7, epsilon = 1e-12);
    }
}

#[test]
fn test_later_overlay_wins() {
    let config = SignalConfig::default().with_length(100);
    let anomalies = vec![
        AnomalyConfig::new(AnomalyKind::platform(1.0)).with_length(10).at(10),
        AnomalyConfig::new(AnomalyKind::platform(2.0)).with_length(10).at(15),
    ];
    let (signal, generated) = generate(config, anomalies, 4);

    let composited = signal.composited_series().unwrap();
    for i in 10..15 {
        assert_abs_diff_eq!(composited[[i, 0]], 1.0, epsilon = 1e-12);
    }
    for i in 15..25 {
        assert_abs_diff_eq!(composited[[i, 0]], 2.0, epsilon = 1e-12);
    }
    assert_eq!(generated.anomalous_count(), 15);
}

#[test]
fn test_decomposition() {
    let trend = SignalConfig::new(BaseOscillationKind::Polynomial).with_polynomial(vec![0.5, 0.01]);
    let config = SignalConfig::default()
        .with_length(400)
        .with_channels(2)
        .with_variance(0.3)
        .with_offset(-1.5)
        .with_trend(trend);
    let anomaly = AnomalyConfig::new(AnomalyKind::Variance { std: 0.5 }).with_channel(1);
    let (signal, generated) = generate(config, vec![anomaly], 77);

    let mut recovered = generated.series.clone();
    recovered -= signal.noise();
    recovered -= signal.trend_series().unwrap();
    recovered -= -1.5;

    let composited = signal.composited_series().unwrap();
    for (a, b) in recovered.iter().zip(composited.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
    }
}

#[test]
fn test_trend_is_additive_background() {
    let trend = SignalConfig::new(BaseOscillationKind::Polynomial).with_polynomial(vec![1.0, 0.5]);
    let config = SignalConfig::default().with_length(50).with_trend(trend);
    let (signal, _) = generate(config, Vec::new(), 2);

    let background = signal.trend_series().unwrap();
    assert_eq!(background.dim(), (50, 1));
    for i in 0..50 {
        assert_abs_diff_eq!(background[[i, 0]], 1.0 + 0.5 * i as f64, epsilon = 1e-12);
    }
}

#[test]
fn test_trend_depth_limit() {
    let mut config = SignalConfig::new(BaseOscillationKind::Polynomial);
    for _ in 0..=MAX_TREND_DEPTH {
        config = SignalConfig::new(BaseOscillationKind::Polynomial).with_trend(config);
    }
    let mut rng = RandomSource::seeded(0);
    let err = Signal::new(config, &mut rng).unwrap_err();
    assert_eq!(
        err,
        GenerationError::TrendTooDeep {
            depth: MAX_TREND_DEPTH + 1,
            max: MAX_TREND_DEPTH
        }
    );
}

#[test]
fn test_same_seed_same_output() {
    let config = SignalConfig::new(BaseOscillationKind::CylinderBellFunnel)
        .with_length(600)
        .with_variance(0.2);
    let anomalies = vec![
        AnomalyConfig::new(AnomalyKind::Variance { std: 1.0 }).with_position(Position::Beginning),
        AnomalyConfig::new(AnomalyKind::platform(0.0)).with_position(Position::End),
    ];

    let (_, first) = generate(config.clone(), anomalies.clone(), 1234);
    let (_, second) = generate(config.clone(), anomalies.clone(), 1234);
    let (_, other) = generate(config, anomalies, 4321);

    assert_eq!(first, second);
    assert_ne!(first.series, other.series);
}

#[test]
fn test_anomaly_touches_only_its_channel() {
    let config = SignalConfig::default().with_length(300).with_channels(2);
    let base = clean_base(&config, 8);
    let anomaly = AnomalyConfig::new(AnomalyKind::mean_shift(4.0)).with_channel(1);
    let (signal, _) = generate(config, vec![anomaly], 8);

    let composited = signal.composited_series().unwrap();
    assert_eq!(composited.column(0), base.column(0));
    assert_ne!(composited.column(1), base.column(1));
}

#[test]
fn test_positioned_anomalies_are_aligned_and_disjoint() {
    // 30 periods of 100 points
    let config = SignalConfig::default().with_length(3000).with_frequency(1.0);
    let anomalies = vec![AnomalyConfig::new(AnomalyKind::platform(0.0)); 3];
    let (_, generated) = generate(config, anomalies, 99);

    let labels = generated.labels.to_vec();
    let starts = run_starts(&labels);
    assert_eq!(generated.anomalous_count(), 30);
    assert_eq!(starts.len(), 3);
    for start in starts {
        assert_eq!(start % 100, 0);
        assert!((1000..2000).contains(&start));
    }
}

#[test]
fn test_positions_respect_region() {
    let config = SignalConfig::new(BaseOscillationKind::RandomWalk).with_length(900);
    let anomalies = vec![
        AnomalyConfig::new(AnomalyKind::platform(0.0)).with_position(Position::Beginning),
        AnomalyConfig::new(AnomalyKind::platform(0.0)).with_position(Position::End),
    ];
    let (_, generated) = generate(config, anomalies, 5);

    let starts = run_starts(&generated.labels.to_vec());
    assert_eq!(starts.len(), 2);
    assert!(starts[0] < 300);
    assert!(starts[1] >= 600);
}

#[derive(Debug)]
struct LabelOnly {
    start: usize,
    length: usize,
}

impl AnomalyStrategy for LabelOnly {
    fn generate(&self, ctx: &AnomalyContext<'_>, _rng: &mut RandomSource) -> Result<AnomalyProtocol> {
        Ok(AnomalyProtocol::new(self.start, self.start + self.length, ctx.channel))
    }
}

#[test]
fn test_custom_strategy_label_only() {
    let config = SignalConfig::default().with_length(100);
    let base = clean_base(&config, 6);

    let mut rng = RandomSource::seeded(6);
    let mut signal = Signal::new(config, &mut rng).unwrap();
    signal.add_anomaly(Anomaly::new(0, LabelOnly { start: 20, length: 4 }));
    let generated = signal.generate(&mut rng).unwrap();

    assert_eq!(generated.series, base);
    assert_eq!(run_starts(&generated.labels.to_vec()), vec![20]);
    assert_eq!(generated.anomalous_count(), 4);
}

#[test]
fn test_exact_position_past_end_fails() {
    let config = SignalConfig::default().with_length(50);
    let anomaly = AnomalyConfig::new(AnomalyKind::platform(0.0)).with_length(10).at(45);

    let mut rng = RandomSource::seeded(0);
    let mut signal = Signal::new(config, &mut rng)
        .unwrap()
        .inject_anomalies([Anomaly::from_config(anomaly)]);
    assert_eq!(
        signal.generate(&mut rng),
        Err(GenerationError::RangeOutOfBounds {
            start: 45,
            end: 55,
            length: 50
        })
    );
}

#[test]
fn test_signal_from_json() {
    let json = r#"{
        "kind": "square",
        "length": 200,
        "frequency": 4.0,
        "amplitude": 2.0,
        "heart-rate": 72.0,
        "unknown-option": "ignored",
        "trend": { "kind": "polynomial", "polynomial": [0.0, 0.1] }
    }"#;
    let config: SignalConfig = serde_json::from_str(json).unwrap();
    let (signal, generated) = generate(config, Vec::new(), 0);

    assert_eq!(signal.timeseries_periods(), Some(8));
    assert_eq!(generated.series.dim(), (200, 1));
    assert!(signal.trend().is_some());
}
