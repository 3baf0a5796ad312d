//! Pointer capture held for the lifetime of a drag.
//!
//! While a thumb is dragged the pointer usually leaves the thumb's hit area,
//! so hosts listen for move/up events on the whole document instead. A
//! [`PointerCapture`] attaches those listeners when a drag starts and hands
//! back a [`CaptureRelease`] that detaches them. The drag session owns the
//! release, so every way out of a drag (pointer-up, touch-cancel, focus loss,
//! disabling, dropping the slider) detaches exactly once.

use std::fmt;

use super::event::{InputSource, PointerId};

/// Host hook that routes document-level pointer events to the slider.
pub trait PointerCapture: Send {
    /// Attaches move/up/cancel listeners for `pointer`.
    ///
    /// The returned release must detach them.
    fn capture(&mut self, pointer: PointerId, source: InputSource) -> CaptureRelease;
}

/// Capture for hosts that already deliver every pointer event to the slider.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn capture(&mut self, _pointer: PointerId, _source: InputSource) -> CaptureRelease {
        CaptureRelease::noop()
    }
}

impl<F> PointerCapture for F
where
    F: FnMut(PointerId, InputSource) -> CaptureRelease + Send,
{
    fn capture(&mut self, pointer: PointerId, source: InputSource) -> CaptureRelease {
        self(pointer, source)
    }
}

/// Cleanup callback for an active capture. Runs at most once.
#[must_use = "dropping a CaptureRelease detaches the capture immediately"]
pub struct CaptureRelease {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl CaptureRelease {
    /// Wraps the detach callback.
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A release with nothing to detach.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Detaches now.
    pub fn release(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for CaptureRelease {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for CaptureRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureRelease")
            .field("armed", &self.release.is_some())
            .finish()
    }
}
