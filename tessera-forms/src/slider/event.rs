//! Inbound events the rendering layer forwards to a slider.

use std::{fmt, str::FromStr};

use super::Endpoint;

/// Identifier of a mouse pointer or a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u64);

/// Device family an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputSource {
    /// Mouse, pen or any other pointer device.
    #[default]
    Mouse,
    /// Touch screen contact.
    Touch,
}

/// Phase of a pointer or touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer-down or touch-start on a thumb.
    Down {
        /// Thumb the event landed on.
        thumb: Endpoint,
    },
    /// Pointer-move or touch-move.
    Move,
    /// Pointer-up or touch-end.
    Up,
    /// Touch-cancel or pointer-cancel.
    Cancel,
}

/// A pointer or touch event with its horizontal client position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Device family.
    pub source: InputSource,
    /// Pointer or touch identifier.
    pub pointer: PointerId,
    /// Phase of the gesture.
    pub phase: PointerPhase,
    /// Client x coordinate; ignored for [`PointerPhase::Cancel`].
    pub client_x: f64,
}

impl PointerEvent {
    /// Mouse pointer-down on `thumb`.
    pub fn down(pointer: PointerId, thumb: Endpoint, client_x: f64) -> Self {
        Self::mouse(pointer, PointerPhase::Down { thumb }, client_x)
    }

    /// Mouse pointer-move.
    pub fn moved(pointer: PointerId, client_x: f64) -> Self {
        Self::mouse(pointer, PointerPhase::Move, client_x)
    }

    /// Mouse pointer-up.
    pub fn up(pointer: PointerId, client_x: f64) -> Self {
        Self::mouse(pointer, PointerPhase::Up, client_x)
    }

    /// Touch-start on `thumb`.
    pub fn touch_start(pointer: PointerId, thumb: Endpoint, client_x: f64) -> Self {
        Self::touch(pointer, PointerPhase::Down { thumb }, client_x)
    }

    /// Touch-move.
    pub fn touch_move(pointer: PointerId, client_x: f64) -> Self {
        Self::touch(pointer, PointerPhase::Move, client_x)
    }

    /// Touch-end.
    pub fn touch_end(pointer: PointerId, client_x: f64) -> Self {
        Self::touch(pointer, PointerPhase::Up, client_x)
    }

    /// Touch-cancel.
    pub fn touch_cancel(pointer: PointerId) -> Self {
        Self::touch(pointer, PointerPhase::Cancel, f64::NAN)
    }

    fn mouse(pointer: PointerId, phase: PointerPhase, client_x: f64) -> Self {
        Self {
            source: InputSource::Mouse,
            pointer,
            phase,
            client_x,
        }
    }

    fn touch(pointer: PointerId, phase: PointerPhase, client_x: f64) -> Self {
        Self {
            source: InputSource::Touch,
            pointer,
            phase,
            client_x,
        }
    }
}

/// Keys a focused thumb responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderKey {
    /// One step up.
    ArrowRight,
    /// One step up.
    ArrowUp,
    /// One step down.
    ArrowLeft,
    /// One step down.
    ArrowDown,
    /// One page up.
    PageUp,
    /// One page down.
    PageDown,
    /// Jump to the minimum.
    Home,
    /// Jump to the maximum.
    End,
}

impl SliderKey {
    /// DOM `KeyboardEvent.key` name of this key.
    pub fn name(self) -> &'static str {
        match self {
            Self::ArrowRight => "ArrowRight",
            Self::ArrowUp => "ArrowUp",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowDown => "ArrowDown",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Home => "Home",
            Self::End => "End",
        }
    }
}

impl fmt::Display for SliderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key name that no slider binding handles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported slider key `{0}`")]
pub struct UnknownKey(pub String);

impl FromStr for SliderKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Home" => Self::Home,
            "End" => Self::End,
            other => return Err(UnknownKey(other.to_string())),
        })
    }
}

/// Everything a slider reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// Pointer or touch event, on a thumb or delivered by the document-level
    /// capture listeners.
    Pointer(PointerEvent),
    /// Click on the track outside of any drag.
    TrackClick {
        /// Client x coordinate of the click.
        client_x: f64,
    },
    /// Key pressed while `thumb` holds focus.
    KeyDown {
        /// Focused thumb.
        thumb: Endpoint,
        /// Pressed key.
        key: SliderKey,
    },
    /// The slider lost focus.
    FocusLost,
}

impl From<PointerEvent> for SliderEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}
