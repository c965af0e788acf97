// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Polynomial over the point index.

use super::BaseParams;
use ndarray::Array2;

/// `value(i) = sum(c_k * i^k)`, coefficients lowest order first. Every
/// channel receives the same curve.
pub fn generate(params: &BaseParams) -> Array2<f64> {
    Array2::from_shape_fn((params.length, params.channels), |(i, _)| {
        evaluate(&params.polynomial, i as f64)
    })
}

/// Horner evaluation.
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
