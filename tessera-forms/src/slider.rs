//! Value and range sliders.
//!
//! ## Usage
//!
//! Build a [`Slider`] from [`SliderArgs`], report the track geometry from the
//! renderer, then forward pointer, touch, click and key events:
//!
//! ```
//! use tessera_forms::slider::{
//!     Endpoint, PointerEvent, PointerId, Slider, SliderArgs, SliderEvent, SliderKey,
//!     SliderValue, TrackBounds,
//! };
//!
//! let mut slider = Slider::new(
//!     SliderArgs::range(0.0, 100.0, 1.0, 25.0, 75.0).coalesce_moves(false),
//! )?;
//! slider.set_track_bounds(TrackBounds::new(0.0, 200.0));
//!
//! // A click at x = 60 is 30% along the track, closest to the start thumb.
//! slider.handle(SliderEvent::TrackClick { client_x: 60.0 });
//! assert_eq!(slider.value(), SliderValue::Range { start: 30.0, end: 75.0 });
//!
//! // Dragging the start thumb past the end thumb stops at the end thumb.
//! let finger = PointerId(1);
//! slider.handle(PointerEvent::touch_start(finger, Endpoint::Start, 60.0));
//! slider.handle(PointerEvent::touch_move(finger, 190.0));
//! slider.handle(PointerEvent::touch_end(finger, 190.0));
//! assert_eq!(slider.value(), SliderValue::Range { start: 75.0, end: 75.0 });
//!
//! slider.handle(SliderEvent::KeyDown { thumb: Endpoint::Start, key: SliderKey::Home });
//! assert_eq!(slider.value(), SliderValue::Range { start: 0.0, end: 75.0 });
//! # Ok::<(), tessera_forms::slider::SliderConfigError>(())
//! ```
use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::prop::CallbackWith;

use interaction::SliderController;

pub use capture::{CaptureRelease, NoCapture, PointerCapture};
pub use error::SliderConfigError;
pub use event::{
    InputSource, PointerEvent, PointerId, PointerPhase, SliderEvent, SliderKey, UnknownKey,
};
pub use layout::TrackBounds;
pub use render::{SliderRenderData, ThumbAccessibility, ThumbRender};
pub use ticks::Ticks;
pub use value_model::{Endpoint, SliderMode, SliderValue, TieRounding, ValueModel};

mod capture;
mod error;
mod event;
mod interaction;
mod layout;
mod render;
mod ticks;
mod value_model;

/// Default number of steps PageUp/PageDown move.
pub const DEFAULT_PAGE_MULTIPLIER: u32 = 10;

/// Arguments for a [`Slider`].
#[derive(Debug, PartialEq, Clone, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct SliderArgs {
    /// Lowest value.
    pub min: f64,
    /// Highest value. Must be greater than `min`.
    pub max: f64,
    /// Distance between representable values. Must be positive.
    pub step: f64,
    /// Single value or ordered pair. Must match the shape of `value`.
    pub mode: SliderMode,
    /// Initial value. Quantized into the bounds on construction.
    pub value: SliderValue,
    /// Steps moved by PageUp/PageDown.
    pub page_multiplier: u32,
    /// How values exactly between two steps are rounded.
    pub tie_rounding: TieRounding,
    /// Apply at most one drag move per animation frame.
    ///
    /// When set, the host must call [`Slider::frame`] once per frame while a
    /// drag is open.
    pub coalesce_moves: bool,
    /// Ignore all input.
    pub disabled: bool,
    /// Called once per committed value change caused by interaction,
    /// including each intermediate step of a drag.
    #[setters(skip)]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_change: CallbackWith<SliderValue>,
    /// Turns a value into its display string.
    #[setters(skip)]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub format: CallbackWith<f64, String>,
}

impl SliderArgs {
    /// Arguments for a single-value slider.
    pub fn single(min: f64, max: f64, step: f64, value: f64) -> Self {
        Self {
            min,
            max,
            step,
            mode: SliderMode::Single,
            value: SliderValue::Single(value),
            ..Self::default()
        }
    }

    /// Arguments for a range slider.
    pub fn range(min: f64, max: f64, step: f64, start: f64, end: f64) -> Self {
        Self {
            min,
            max,
            step,
            mode: SliderMode::Range,
            value: SliderValue::Range { start, end },
            ..Self::default()
        }
    }

    /// Sets the change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(SliderValue) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the change handler using a shared callback.
    pub fn on_change_shared(mut self, on_change: impl Into<CallbackWith<SliderValue>>) -> Self {
        self.on_change = on_change.into();
        self
    }

    /// Sets the display formatter.
    pub fn format<F>(mut self, format: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.format = CallbackWith::new(format);
        self
    }
}

impl Default for SliderArgs {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            mode: SliderMode::Single,
            value: SliderValue::Single(0.0),
            page_multiplier: DEFAULT_PAGE_MULTIPLIER,
            tie_rounding: TieRounding::default(),
            coalesce_moves: true,
            disabled: false,
            on_change: CallbackWith::default(),
            format: CallbackWith::new(|value: f64| value.to_string()),
        }
    }
}

/// A value or range slider driven by host events.
pub struct Slider {
    model: ValueModel,
    controller: SliderController,
    deferred: Option<SliderValue>,
    on_change: CallbackWith<SliderValue>,
    format: CallbackWith<f64, String>,
}

impl Slider {
    /// Validates `args` and creates the slider.
    pub fn new(args: SliderArgs) -> Result<Self, SliderConfigError> {
        if args.page_multiplier == 0 {
            return Err(SliderConfigError::ZeroPageMultiplier);
        }
        let model = ValueModel::new(
            args.min,
            args.max,
            args.step,
            args.mode,
            args.tie_rounding,
            args.value,
        )?;
        debug!(
            min = args.min,
            max = args.max,
            step = args.step,
            mode = ?args.mode,
            value = ?model.value(),
            "slider created"
        );
        Ok(Self {
            model,
            controller: SliderController::new(
                args.page_multiplier,
                args.coalesce_moves,
                args.disabled,
            ),
            deferred: None,
            on_change: args.on_change,
            format: args.format,
        })
    }

    /// Installs the hook that attaches document-level listeners during drags.
    pub fn with_capture(mut self, capture: impl PointerCapture + 'static) -> Self {
        self.set_capture(capture);
        self
    }

    /// Replaces the capture hook. An open drag keeps its current capture.
    pub fn set_capture(&mut self, capture: impl PointerCapture + 'static) {
        self.controller.set_capture(Box::new(capture));
    }

    /// Current value.
    pub fn value(&self) -> SliderValue {
        self.model.value()
    }

    /// Bounds, step and value.
    pub fn model(&self) -> &ValueModel {
        &self.model
    }

    /// Updates the track geometry used to turn client x into fractions.
    pub fn set_track_bounds(&mut self, track: TrackBounds) {
        self.controller.set_track_bounds(track);
    }

    /// Track geometry last reported by the renderer.
    pub fn track_bounds(&self) -> TrackBounds {
        self.controller.track_bounds()
    }

    /// Handles one inbound event.
    ///
    /// Returns the new value and notifies `on_change` when the event
    /// committed a change.
    pub fn handle(&mut self, event: impl Into<SliderEvent>) -> Option<SliderValue> {
        let changed = self.controller.handle(&mut self.model, event.into());
        self.settle(changed)
    }

    /// Applies the drag move buffered since the previous frame.
    pub fn frame(&mut self) -> Option<SliderValue> {
        let changed = self.controller.frame(&mut self.model);
        self.settle(changed)
    }

    /// Resolves a click at a track fraction, moving the nearest thumb.
    pub fn click_track(&mut self, fraction: f64) -> Option<SliderValue> {
        let changed = self.controller.click_track(&mut self.model, fraction);
        self.settle(changed)
    }

    /// Pushes a value from the host.
    ///
    /// The value is quantized like any interactive update. While a drag is
    /// open the push is held back and lands when the drag ends. Pushed values
    /// are not echoed through `on_change`.
    pub fn set_value(&mut self, value: SliderValue) -> Result<(), SliderConfigError> {
        if self.controller.is_dragging() {
            // Validate now so the caller still sees shape errors synchronously.
            self.model.clone().set_value(value)?;
            debug!(?value, "deferring external value until drag ends");
            self.deferred = Some(value);
            return Ok(());
        }
        self.model.set_value(value)?;
        Ok(())
    }

    /// Enables or disables input. Disabling cancels an open drag.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.controller.set_disabled(disabled);
        self.settle(None);
    }

    /// Whether input is ignored.
    pub fn is_disabled(&self) -> bool {
        self.controller.is_disabled()
    }

    /// Cancels an open drag, keeping the last committed value.
    pub fn cancel_drag(&mut self) {
        self.controller.cancel("cancelled by host");
        self.settle(None);
    }

    /// Whether a drag session is open.
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Endpoint being dragged, if any.
    pub fn active_endpoint(&self) -> Option<Endpoint> {
        self.controller.active_endpoint()
    }

    /// Every representable value, for tick marks.
    pub fn ticks(&self) -> Ticks {
        Ticks::new(&self.model)
    }

    /// Thumb positions and labels for the renderer.
    pub fn render_data(&self) -> SliderRenderData {
        render::render_data(
            &self.model,
            &self.format,
            self.controller.active_endpoint(),
            self.controller.is_disabled(),
        )
    }

    /// Per-thumb accessibility state.
    pub fn accessibility(&self) -> SmallVec<[ThumbAccessibility; 2]> {
        render::accessibility(&self.model, &self.format, self.controller.is_disabled())
    }

    fn settle(&mut self, changed: Option<SliderValue>) -> Option<SliderValue> {
        if let Some(value) = changed {
            self.on_change.call(value);
        }
        if !self.controller.is_dragging()
            && let Some(value) = self.deferred.take()
        {
            debug!(?value, "applying deferred external value");
            if let Err(err) = self.model.set_value(value) {
                warn!(%err, "dropping deferred external value");
            }
        }
        changed
    }
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("value", &self.model.value())
            .field("active_endpoint", &self.controller.active_endpoint())
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}
