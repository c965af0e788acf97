// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Error types for GutenTAG
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Main error type for signal generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// `generate()` was called on a signal that already ran its pipeline
    #[error("Signal already generated: a signal can only be generated once")]
    AlreadyGenerated,

    /// Trend signals are nested deeper than allowed
    #[error("Trend nesting too deep: depth {depth} exceeds maximum {max}")]
    TrendTooDeep { depth: usize, max: usize },

    /// An anomaly targets a channel the signal does not have
    #[error("Channel out of range: channel {channel}, signal has {channels}")]
    ChannelOutOfRange { channel: usize, channels: usize },

    /// An anomaly protocol reports a range outside the series
    #[error("Range out of bounds: [{start}, {end}) for series of length {length}")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        length: usize,
    },

    /// A subsequence does not match the length of its declared range
    #[error("Subsequence length mismatch: expected {expected}, got {actual}")]
    SubsequenceLength { expected: usize, actual: usize },

    /// A resolved trend does not have the shape of its parent signal
    #[error("Trend shape mismatch: expected {expected:?}, got {actual:?}")]
    TrendShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Configuration cannot produce a signal
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
