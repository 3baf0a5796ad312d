//! Outbound data for the rendering and accessibility layers.

use smallvec::SmallVec;

use crate::prop::CallbackWith;

use super::{Endpoint, SliderValue, ValueModel};

/// Position and label of one thumb.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbRender {
    /// Endpoint this thumb controls; single sliders report [`Endpoint::End`].
    pub endpoint: Endpoint,
    /// Stored value.
    pub value: f64,
    /// Position along the track, in `[0, 1]`.
    pub fraction: f64,
    /// Host-formatted display string.
    pub label: String,
    /// Whether this thumb is being dragged.
    pub dragging: bool,
}

/// Everything a renderer needs to draw the slider.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderRenderData {
    /// One entry for a single slider, start then end for a range.
    pub thumbs: SmallVec<[ThumbRender; 2]>,
    /// Highlighted part of the track as `(from, to)` fractions.
    pub active_track: (f64, f64),
    /// Whether input is currently ignored.
    pub disabled: bool,
}

/// Accessibility state of one thumb.
///
/// Range thumbs report their sibling as the effective bound, so assistive
/// technology announces the reachable range.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbAccessibility {
    /// Stable key for the node: `"value"`, `"start"` or `"end"`.
    pub key: &'static str,
    /// Endpoint this node describes.
    pub endpoint: Endpoint,
    /// Current value.
    pub value_now: f64,
    /// Lowest value this thumb can reach.
    pub value_min: f64,
    /// Highest value this thumb can reach.
    pub value_max: f64,
    /// Host-formatted value.
    pub value_text: String,
    /// Whether the thumb ignores input.
    pub disabled: bool,
}

pub(super) fn render_data(
    model: &ValueModel,
    format: &CallbackWith<f64, String>,
    dragging: Option<Endpoint>,
    disabled: bool,
) -> SliderRenderData {
    let thumb = |endpoint: Endpoint| {
        let value = model.endpoint(endpoint);
        ThumbRender {
            endpoint,
            value,
            fraction: model.value_to_position(value),
            label: format.call(value),
            dragging: dragging == Some(endpoint),
        }
    };

    match model.value() {
        SliderValue::Single(value) => SliderRenderData {
            thumbs: SmallVec::from_iter([thumb(Endpoint::End)]),
            active_track: (0.0, model.value_to_position(value)),
            disabled,
        },
        SliderValue::Range { start, end } => SliderRenderData {
            thumbs: SmallVec::from_iter([thumb(Endpoint::Start), thumb(Endpoint::End)]),
            active_track: (model.value_to_position(start), model.value_to_position(end)),
            disabled,
        },
    }
}

pub(super) fn accessibility(
    model: &ValueModel,
    format: &CallbackWith<f64, String>,
    disabled: bool,
) -> SmallVec<[ThumbAccessibility; 2]> {
    let node = |key, endpoint, value_now: f64, value_min, value_max| ThumbAccessibility {
        key,
        endpoint,
        value_now,
        value_min,
        value_max,
        value_text: format.call(value_now),
        disabled,
    };

    match model.value() {
        SliderValue::Single(value) => SmallVec::from_iter([node(
            "value",
            Endpoint::End,
            value,
            model.min(),
            model.last_value(),
        )]),
        SliderValue::Range { start, end } => SmallVec::from_iter([
            node("start", Endpoint::Start, start, model.min(), end),
            node("end", Endpoint::End, end, start, model.last_value()),
        ]),
    }
}
