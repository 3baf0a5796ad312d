use thiserror::Error;

use super::SliderMode;

/// Reasons a slider refuses to initialize or accept a pushed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderConfigError {
    /// `min` is not strictly below `max`.
    #[error("slider bounds are empty or inverted: min {min} must be less than max {max}")]
    InvalidBounds {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// One of the bounds is NaN or infinite.
    #[error("slider bounds must be finite, got min {min} and max {max}")]
    NonFiniteBounds {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// `max - min` does not fit in an `f64`.
    #[error("slider span from {min} to {max} overflows")]
    SpanOverflow {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// The bounds hold more step-aligned values than can be indexed.
    #[error("step {step} splits the slider into {count} values, more than can be indexed")]
    TooManySteps {
        /// Configured step.
        step: f64,
        /// Number of step-aligned values the configuration describes.
        count: f64,
    },
    /// `step` is zero, negative or not finite.
    #[error("slider step must be positive and finite, got {step}")]
    InvalidStep {
        /// Configured step.
        step: f64,
    },
    /// PageUp/PageDown would not move the thumb.
    #[error("page multiplier must be at least 1")]
    ZeroPageMultiplier,
    /// The initial or pushed value is NaN or infinite.
    #[error("slider value must be finite, got {value}")]
    NonFiniteValue {
        /// Offending value.
        value: f64,
    },
    /// The initial range pair has `start > end`.
    #[error("range start {start} is greater than range end {end}")]
    InvertedRange {
        /// Requested start.
        start: f64,
        /// Requested end.
        end: f64,
    },
    /// A single value was given to a range slider or the other way around.
    #[error("value shape does not match slider mode {mode:?}")]
    ModeMismatch {
        /// Mode the slider was configured with.
        mode: SliderMode,
    },
}
