// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Seeded random source.
//!
//! Every component that consumes randomness receives a `&mut RandomSource`
//! explicitly, so output only depends on the seed and never on a hidden
//! process-wide generator.

use crate::error::{GenerationError, Result};
use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

/// Random number source shared along one generation call chain.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomSource {
    /// Create a reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seed this source was created with, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Gaussian noise of shape `(length, channels)` with the given standard
    /// deviation.
    ///
    /// A zero deviation yields an all-zero buffer and consumes no random
    /// numbers.
    pub fn noise(&mut self, std_dev: f64, length: usize, channels: usize) -> Result<Array2<f64>> {
        if std_dev == 0.0 {
            return Ok(Array2::zeros((length, channels)));
        }
        let normal = self.normal(0.0, std_dev)?;
        Ok(Array2::from_shape_simple_fn((length, channels), || {
            normal.sample(&mut self.rng)
        }))
    }

    /// Gaussian vector of `length` samples with the given standard deviation.
    pub fn normal_vector(&mut self, std_dev: f64, length: usize) -> Result<Array1<f64>> {
        if std_dev == 0.0 {
            return Ok(Array1::zeros(length));
        }
        let normal = self.normal(0.0, std_dev)?;
        Ok(Array1::from_shape_simple_fn(length, || {
            normal.sample(&mut self.rng)
        }))
    }

    /// Build a normal distribution, mapping invalid parameters to a
    /// configuration error.
    pub fn normal(&self, mean: f64, std_dev: f64) -> Result<Normal<f64>> {
        Normal::new(mean, std_dev.abs()).map_err(|e| {
            GenerationError::InvalidConfig(format!(
                "normal distribution N({}, {}): {}",
                mean, std_dev, e
            ))
        })
    }

    /// Draw one sample from a normal distribution.
    pub fn sample_normal(&mut self, mean: f64, std_dev: f64) -> Result<f64> {
        let normal = self.normal(mean, std_dev)?;
        Ok(normal.sample(&mut self.rng))
    }

    /// Uniform index in `0..upper`. `upper` must be non-zero.
    pub fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Direct access to the underlying generator.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
