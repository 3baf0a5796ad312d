//! Tick mark generation.
//!
//! ## Usage
//!
//! Iterate [`Ticks`] to place one mark per representable value. The iterator
//! is lazy and `Clone`, so a renderer can restart it every frame.

use std::iter::FusedIterator;

use super::ValueModel;

/// Lazy sequence of every representable value, from `min` upward.
///
/// Values are computed as `min + i * step` rather than accumulated, so no
/// rounding drift builds up along long tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    min: f64,
    max: f64,
    step: f64,
    front: usize,
    back: usize,
}

impl Ticks {
    /// Ticks for the bounds of `model`.
    pub fn new(model: &ValueModel) -> Self {
        Self {
            min: model.min(),
            max: model.max(),
            step: model.step(),
            front: 0,
            back: model.value_count(),
        }
    }

    /// Same sequence mapped onto `[0, 1]` track fractions.
    pub fn fractions(self) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + Clone {
        let (min, span) = (self.min, self.max - self.min);
        self.map(move |value| ((value - min) / span).clamp(0.0, 1.0))
    }

    fn value_at(&self, index: usize) -> f64 {
        (index as f64).mul_add(self.step, self.min).min(self.max)
    }
}

impl Iterator for Ticks {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        let value = self.value_at(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Ticks {
    fn next_back(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.value_at(self.back))
    }
}

impl ExactSizeIterator for Ticks {}

impl FusedIterator for Ticks {}
