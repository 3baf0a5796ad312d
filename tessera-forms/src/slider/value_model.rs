//! Stored slider value plus the pure clamp/quantize/position functions.
//!
//! Every write goes through [`ValueModel::quantize`], so the stored value is
//! always step-aligned, inside `[min, max]` and, for ranges, ordered.

use super::SliderConfigError;

/// Slack used when counting how many whole steps fit between `min` and `max`.
///
/// `0.3 / 0.1` evaluates to `2.9999999999999996`; without slack the last
/// representable value would be lost.
const STEP_COUNT_SLACK: f64 = 1e-9;

/// Step indices from 2^53 up are no longer exact in an `f64`.
const MAX_EXACT_INDEX: f64 = 9_007_199_254_740_992.0;

/// Whether the slider holds one value or an ordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SliderMode {
    /// One scalar value.
    #[default]
    Single,
    /// An ordered `(start, end)` pair.
    Range,
}

/// One end of a range, or the lone thumb of a single slider.
///
/// Single sliders treat their thumb as [`Endpoint::End`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Endpoint {
    /// Lower end of a range.
    Start,
    /// Upper end of a range, or the single thumb.
    #[default]
    End,
}

impl Endpoint {
    /// The other endpoint.
    pub fn sibling(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// Current value of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum SliderValue {
    /// Value of a [`SliderMode::Single`] slider.
    Single(f64),
    /// Value of a [`SliderMode::Range`] slider, `start <= end`.
    Range {
        /// Lower end.
        start: f64,
        /// Upper end.
        end: f64,
    },
}

impl SliderValue {
    /// Mode this value belongs to.
    pub fn mode(&self) -> SliderMode {
        match self {
            Self::Single(_) => SliderMode::Single,
            Self::Range { .. } => SliderMode::Range,
        }
    }

    /// Value held by `which`. Single values answer for both endpoints.
    pub fn endpoint(&self, which: Endpoint) -> f64 {
        match (*self, which) {
            (Self::Single(v), _) => v,
            (Self::Range { start, .. }, Endpoint::Start) => start,
            (Self::Range { end, .. }, Endpoint::End) => end,
        }
    }

    fn values(&self) -> [f64; 2] {
        match *self {
            Self::Single(v) => [v, v],
            Self::Range { start, end } => [start, end],
        }
    }
}

impl Default for SliderValue {
    fn default() -> Self {
        Self::Single(0.0)
    }
}

/// How `quantize` settles a raw value that lies exactly between two steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TieRounding {
    /// Ties move up to the next step.
    #[default]
    HalfAwayFromZero,
    /// Ties go to the even step index (banker's rounding).
    HalfEven,
}

impl TieRounding {
    fn round(self, x: f64) -> f64 {
        match self {
            Self::HalfAwayFromZero => x.round(),
            Self::HalfEven => x.round_ties_even(),
        }
    }
}

/// Owner of the slider value and its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueModel {
    min: f64,
    max: f64,
    step: f64,
    last_index: f64,
    rounding: TieRounding,
    value: SliderValue,
}

impl ValueModel {
    /// Validates the configuration and stores the quantized initial value.
    pub fn new(
        min: f64,
        max: f64,
        step: f64,
        mode: SliderMode,
        rounding: TieRounding,
        initial: SliderValue,
    ) -> Result<Self, SliderConfigError> {
        validate_bounds(min, max, step)?;
        if initial.mode() != mode {
            return Err(SliderConfigError::ModeMismatch { mode });
        }
        validate_finite(initial)?;
        if let SliderValue::Range { start, end } = initial
            && start > end
        {
            return Err(SliderConfigError::InvertedRange { start, end });
        }

        let mut model = Self {
            min,
            max,
            step,
            last_index: step_count(min, max, step),
            rounding,
            value: initial,
        };
        model.value = model.normalize(initial);
        Ok(model)
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Step width.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Configured mode.
    pub fn mode(&self) -> SliderMode {
        self.value.mode()
    }

    /// Stored value.
    pub fn value(&self) -> SliderValue {
        self.value
    }

    /// Stored value of one endpoint.
    pub fn endpoint(&self, which: Endpoint) -> f64 {
        self.value.endpoint(which)
    }

    /// Largest representable value, `min + floor((max - min) / step) * step`.
    pub fn last_value(&self) -> f64 {
        self.value_at(self.last_index)
    }

    /// Number of representable values, which is also the tick count.
    pub fn value_count(&self) -> usize {
        self.last_index as usize + 1
    }

    /// Snaps `raw` to the nearest step-aligned value inside the bounds.
    ///
    /// NaN and negative infinity map to `min`; positive infinity maps to the
    /// last representable value.
    pub fn quantize(&self, raw: f64) -> f64 {
        if raw.is_nan() {
            return self.min;
        }
        let index = self
            .rounding
            .round((raw - self.min) / self.step)
            .clamp(0.0, self.last_index);
        self.value_at(index)
    }

    /// Maps a track fraction onto a quantized value.
    pub fn position_to_value(&self, fraction: f64) -> f64 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.quantize(fraction.mul_add(self.max - self.min, self.min))
    }

    /// Maps a value onto its `[0, 1]` track fraction.
    pub fn value_to_position(&self, value: f64) -> f64 {
        let fraction = (value - self.min) / (self.max - self.min);
        if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        }
    }

    /// Moves one endpoint, stopping at its sibling instead of passing it.
    ///
    /// On a single slider this sets the lone value. Returns `true` when the
    /// stored value changed.
    pub fn set_endpoint(&mut self, which: Endpoint, candidate: f64) -> bool {
        let candidate = self.quantize(candidate);
        let next = match (self.value, which) {
            (SliderValue::Single(_), _) => SliderValue::Single(candidate),
            (SliderValue::Range { end, .. }, Endpoint::Start) => SliderValue::Range {
                start: candidate.min(end),
                end,
            },
            (SliderValue::Range { start, .. }, Endpoint::End) => SliderValue::Range {
                start,
                end: candidate.max(start),
            },
        };
        self.replace(next)
    }

    /// Sets the value of a single slider. On a range it moves the end.
    pub fn set_single(&mut self, candidate: f64) -> bool {
        self.set_endpoint(Endpoint::End, candidate)
    }

    /// Replaces the whole value, as pushed in by the host.
    ///
    /// Both endpoints are quantized; an inverted pair settles with `start`
    /// clamped to `end`.
    pub fn set_value(&mut self, value: SliderValue) -> Result<bool, SliderConfigError> {
        if value.mode() != self.mode() {
            return Err(SliderConfigError::ModeMismatch { mode: self.mode() });
        }
        validate_finite(value)?;
        let next = self.normalize(value);
        Ok(self.replace(next))
    }

    /// Endpoint a track click at `candidate` should move.
    ///
    /// The closer endpoint wins and ties favor `Start`, except when both
    /// endpoints sit on the same value and the candidate lies above it, where
    /// only `End` can move toward it.
    pub fn nearest_endpoint(&self, candidate: f64) -> Endpoint {
        match self.value {
            SliderValue::Single(_) => Endpoint::End,
            SliderValue::Range { start, end } => {
                let to_start = (candidate - start).abs();
                let to_end = (candidate - end).abs();
                let tie_goes_to_start = start < end || candidate <= start;
                if to_start < to_end || (to_start == to_end && tie_goes_to_start) {
                    Endpoint::Start
                } else {
                    Endpoint::End
                }
            }
        }
    }

    fn value_at(&self, index: f64) -> f64 {
        index.mul_add(self.step, self.min).min(self.max)
    }

    fn normalize(&self, value: SliderValue) -> SliderValue {
        match value {
            SliderValue::Single(v) => SliderValue::Single(self.quantize(v)),
            SliderValue::Range { start, end } => {
                let end = self.quantize(end);
                SliderValue::Range {
                    start: self.quantize(start).min(end),
                    end,
                }
            }
        }
    }

    fn replace(&mut self, next: SliderValue) -> bool {
        if next == self.value {
            return false;
        }
        self.value = next;
        true
    }
}

fn validate_bounds(min: f64, max: f64, step: f64) -> Result<(), SliderConfigError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(SliderConfigError::NonFiniteBounds { min, max });
    }
    if min >= max {
        return Err(SliderConfigError::InvalidBounds { min, max });
    }
    if !(max - min).is_finite() {
        return Err(SliderConfigError::SpanOverflow { min, max });
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(SliderConfigError::InvalidStep { step });
    }
    let last_index = step_count(min, max, step);
    if last_index >= MAX_EXACT_INDEX || last_index >= usize::MAX as f64 {
        return Err(SliderConfigError::TooManySteps {
            step,
            count: last_index + 1.0,
        });
    }
    Ok(())
}

fn validate_finite(value: SliderValue) -> Result<(), SliderConfigError> {
    match value.values().into_iter().find(|v| !v.is_finite()) {
        Some(value) => Err(SliderConfigError::NonFiniteValue { value }),
        None => Ok(()),
    }
}

fn step_count(min: f64, max: f64, step: f64) -> f64 {
    ((max - min) / step + STEP_COUNT_SLACK).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(min: f64, max: f64, step: f64, value: f64) -> ValueModel {
        ValueModel::new(
            min,
            max,
            step,
            SliderMode::Single,
            TieRounding::default(),
            SliderValue::Single(value),
        )
        .expect("valid single slider")
    }

    fn range(min: f64, max: f64, step: f64, start: f64, end: f64) -> ValueModel {
        ValueModel::new(
            min,
            max,
            step,
            SliderMode::Range,
            TieRounding::default(),
            SliderValue::Range { start, end },
        )
        .expect("valid range slider")
    }

    #[test]
    fn rejects_bad_configuration() {
        let err = |min, max, step, value| {
            ValueModel::new(
                min,
                max,
                step,
                SliderMode::Single,
                TieRounding::default(),
                value,
            )
            .unwrap_err()
        };
        assert_eq!(
            err(5.0, 5.0, 1.0, SliderValue::Single(5.0)),
            SliderConfigError::InvalidBounds { min: 5.0, max: 5.0 }
        );
        assert_eq!(
            err(0.0, 1.0, 0.0, SliderValue::Single(0.0)),
            SliderConfigError::InvalidStep { step: 0.0 }
        );
        assert!(matches!(
            err(0.0, 1.0, f64::NAN, SliderValue::Single(0.0)),
            SliderConfigError::InvalidStep { .. }
        ));
        assert!(matches!(
            err(f64::NEG_INFINITY, 1.0, 0.1, SliderValue::Single(0.0)),
            SliderConfigError::NonFiniteBounds { .. }
        ));
        assert_eq!(
            err(0.0, 1.0, 0.1, SliderValue::Range { start: 0.0, end: 1.0 }),
            SliderConfigError::ModeMismatch {
                mode: SliderMode::Single
            }
        );
        assert!(matches!(
            err(0.0, 1.0, 0.1, SliderValue::Single(f64::NAN)),
            SliderConfigError::NonFiniteValue { .. }
        ));
    }

    #[test]
    fn rejects_spans_and_step_counts_that_cannot_be_indexed() {
        let new = |min, max, step| {
            ValueModel::new(
                min,
                max,
                step,
                SliderMode::Single,
                TieRounding::default(),
                SliderValue::Single(0.0),
            )
        };
        assert_eq!(
            new(-1e308, 1e308, 1e300).unwrap_err(),
            SliderConfigError::SpanOverflow {
                min: -1e308,
                max: 1e308
            }
        );
        assert!(matches!(
            new(0.0, 1.0, 1e-20).unwrap_err(),
            SliderConfigError::TooManySteps { step, .. } if step == 1e-20
        ));

        let wide = new(-1e307, 1e307, 1e300).expect("finite span");
        assert_eq!(wide.value_to_position(1e307), 1.0);
        assert!(wide.position_to_value(0.5).abs() <= 1e300);
        let fine = new(0.0, 1.0, 1.0 / 1024.0).expect("indexable step count");
        assert_eq!(fine.value_count(), 1025);
    }

    #[test]
    fn rejects_inverted_initial_range() {
        let err = ValueModel::new(
            0.0,
            10.0,
            1.0,
            SliderMode::Range,
            TieRounding::default(),
            SliderValue::Range { start: 7.0, end: 3.0 },
        )
        .unwrap_err();
        assert_eq!(err, SliderConfigError::InvertedRange { start: 7.0, end: 3.0 });
    }

    #[test]
    fn initial_value_is_quantized_and_clamped() {
        assert_eq!(single(0.0, 100.0, 10.0, 54.0).value(), SliderValue::Single(50.0));
        assert_eq!(single(0.0, 100.0, 10.0, 500.0).value(), SliderValue::Single(100.0));
        assert_eq!(single(0.0, 100.0, 10.0, -3.0).value(), SliderValue::Single(0.0));
    }

    #[test]
    fn quantize_snaps_to_steps_from_min() {
        let model = single(3.0, 23.0, 5.0, 3.0);
        assert_eq!(model.quantize(9.0), 8.0);
        assert_eq!(model.quantize(11.0), 13.0);
        assert_eq!(model.quantize(-40.0), 3.0);
        assert_eq!(model.quantize(99.0), 23.0);
    }

    #[test]
    fn quantize_never_exceeds_last_aligned_value() {
        let model = single(0.0, 10.0, 3.0, 0.0);
        assert_eq!(model.last_value(), 9.0);
        assert_eq!(model.quantize(10.0), 9.0);
        assert_eq!(model.quantize(f64::INFINITY), 9.0);
        assert_eq!(model.value_count(), 4);
    }

    #[test]
    fn quantize_handles_non_finite_input() {
        let model = single(-1.0, 1.0, 0.5, 0.0);
        assert_eq!(model.quantize(f64::NAN), -1.0);
        assert_eq!(model.quantize(f64::NEG_INFINITY), -1.0);
        assert_eq!(model.quantize(f64::INFINITY), 1.0);
    }

    #[test]
    fn fractional_steps_keep_the_last_value() {
        let model = single(0.0, 0.3, 0.1, 0.0);
        assert_eq!(model.value_count(), 4);
        assert_eq!(model.quantize(0.3), 0.3);
    }

    #[test]
    fn tie_rounding_modes_differ_on_exact_halves() {
        let away = single(0.0, 10.0, 1.0, 0.0);
        let mut even = away.clone();
        even.rounding = TieRounding::HalfEven;
        assert_eq!(away.quantize(2.5), 3.0);
        assert_eq!(even.quantize(2.5), 2.0);
        assert_eq!(away.quantize(3.5), 4.0);
        assert_eq!(even.quantize(3.5), 4.0);
    }

    #[test]
    fn positions_map_linearly() {
        let model = single(-50.0, 50.0, 1.0, 0.0);
        assert_eq!(model.position_to_value(0.0), -50.0);
        assert_eq!(model.position_to_value(1.0), 50.0);
        assert_eq!(model.position_to_value(0.5), 0.0);
        assert_eq!(model.position_to_value(7.0), 50.0);
        assert_eq!(model.position_to_value(f64::NAN), -50.0);
        assert_eq!(model.value_to_position(25.0), 0.75);
        assert_eq!(model.value_to_position(-500.0), 0.0);
    }

    #[test]
    fn start_stops_at_end_instead_of_swapping() {
        let mut model = range(0.0, 100.0, 1.0, 30.0, 70.0);
        assert!(model.set_endpoint(Endpoint::Start, 90.0));
        assert_eq!(model.value(), SliderValue::Range { start: 70.0, end: 70.0 });
        assert!(!model.set_endpoint(Endpoint::Start, 95.0));
    }

    #[test]
    fn end_stops_at_start_instead_of_swapping() {
        let mut model = range(0.0, 100.0, 1.0, 30.0, 70.0);
        assert!(model.set_endpoint(Endpoint::End, 10.0));
        assert_eq!(model.value(), SliderValue::Range { start: 30.0, end: 30.0 });
    }

    #[test]
    fn set_single_reports_changes_only() {
        let mut model = single(0.0, 10.0, 1.0, 5.0);
        assert!(!model.set_single(5.2));
        assert!(model.set_single(6.0));
        assert_eq!(model.value(), SliderValue::Single(6.0));
    }

    #[test]
    fn pushed_values_go_through_quantize() {
        let mut model = range(0.0, 100.0, 5.0, 10.0, 20.0);
        assert_eq!(
            model.set_value(SliderValue::Range { start: 81.0, end: 42.0 }),
            Ok(true)
        );
        assert_eq!(model.value(), SliderValue::Range { start: 40.0, end: 40.0 });
        assert_eq!(
            model.set_value(SliderValue::Single(3.0)),
            Err(SliderConfigError::ModeMismatch {
                mode: SliderMode::Range
            })
        );
    }

    #[test]
    fn nearest_endpoint_prefers_start_on_ties() {
        let model = range(0.0, 100.0, 1.0, 25.0, 75.0);
        assert_eq!(model.nearest_endpoint(30.0), Endpoint::Start);
        assert_eq!(model.nearest_endpoint(50.0), Endpoint::Start);
        assert_eq!(model.nearest_endpoint(51.0), Endpoint::End);
    }

    #[test]
    fn nearest_endpoint_on_collapsed_range_follows_direction() {
        let model = range(0.0, 100.0, 1.0, 50.0, 50.0);
        assert_eq!(model.nearest_endpoint(20.0), Endpoint::Start);
        assert_eq!(model.nearest_endpoint(50.0), Endpoint::Start);
        assert_eq!(model.nearest_endpoint(80.0), Endpoint::End);
    }
}
