// GutenTAG - Synthetic anomaly time series generation
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Anomaly label accumulation.
//!
//! All channels of a signal share one binary mask. Marking is a union:
//! overlapping or repeated ranges never conflict.

use ndarray::{s, Array1};
use serde::{Deserialize, Serialize};

/// A contiguous run of anomalous positions `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelRange {
    /// First anomalous position.
    pub start: usize,
    /// Number of anomalous positions.
    pub length: usize,
}

impl LabelRange {
    /// Create a label range.
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Exclusive end position.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }
}

/// Binary anomaly mask.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMask {
    mask: Array1<u8>,
}

impl LabelMask {
    /// All-zero mask of the given length.
    pub fn new(length: usize) -> Self {
        Self {
            mask: Array1::zeros(length),
        }
    }

    /// Mask with every range in `ranges` marked.
    pub fn from_ranges<'a>(length: usize, ranges: impl IntoIterator<Item = &'a LabelRange>) -> Self {
        let mut mask = Self::new(length);
        for range in ranges {
            mask.mark(range);
        }
        mask
    }

    /// Mark a range as anomalous. Positions past the end are ignored.
    pub fn mark(&mut self, range: &LabelRange) {
        let len = self.mask.len();
        let start = range.start.min(len);
        let end = range.end().min(len);
        self.mask.slice_mut(s![start..end]).fill(1);
    }

    /// Length of the mask.
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    /// Check if the mask has no positions.
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Number of positions marked anomalous.
    pub fn count_anomalous(&self) -> usize {
        self.mask.iter().filter(|v| **v == 1).count()
    }

    /// Check whether position `i` is anomalous.
    pub fn is_anomalous(&self, i: usize) -> bool {
        self.mask.get(i).is_some_and(|v| *v == 1)
    }

    /// Borrow the mask values.
    pub fn as_array(&self) -> &Array1<u8> {
        &self.mask
    }

    /// Consume into the mask values.
    pub fn into_array(self) -> Array1<u8> {
        self.mask
    }
}
