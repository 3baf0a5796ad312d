//! Shared slider handle for hosts that dispatch from several listeners.
//!
//! ## Usage
//!
//! Document-level capture listeners are closures owned by the host. Give them
//! a [`WeakSlider`] so they can reach the slider without keeping it alive.
//!
//! `on_change`, `format` and capture callbacks run while the handle's lock is
//! held and must not call back into the same handle.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::slider::{Slider, SliderEvent, SliderValue};

/// Cloneable, thread-safe handle to a [`Slider`].
#[derive(Clone)]
pub struct SharedSlider {
    inner: Arc<Mutex<Slider>>,
}

impl SharedSlider {
    /// Wraps a slider.
    pub fn new(slider: Slider) -> Self {
        Self {
            inner: Arc::new(Mutex::new(slider)),
        }
    }

    /// Forwards an event to [`Slider::handle`].
    pub fn dispatch(&self, event: impl Into<SliderEvent>) -> Option<SliderValue> {
        self.inner.lock().handle(event)
    }

    /// Forwards an animation frame to [`Slider::frame`].
    pub fn frame(&self) -> Option<SliderValue> {
        self.inner.lock().frame()
    }

    /// Current value.
    pub fn value(&self) -> SliderValue {
        self.inner.lock().value()
    }

    /// Runs `f` with shared access.
    pub fn with<R>(&self, f: impl FnOnce(&Slider) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Runs `f` with exclusive access.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Slider) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Handle that does not keep the slider alive.
    pub fn downgrade(&self) -> WeakSlider {
        WeakSlider {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl From<Slider> for SharedSlider {
    fn from(slider: Slider) -> Self {
        Self::new(slider)
    }
}

/// Non-owning counterpart of [`SharedSlider`].
#[derive(Clone, Default)]
pub struct WeakSlider {
    inner: Weak<Mutex<Slider>>,
}

impl WeakSlider {
    /// Forwards an event if the slider still exists.
    pub fn dispatch(&self, event: impl Into<SliderEvent>) -> Option<SliderValue> {
        self.upgrade()?.dispatch(event)
    }

    /// Owning handle, if the slider still exists.
    pub fn upgrade(&self) -> Option<SharedSlider> {
        self.inner.upgrade().map(|inner| SharedSlider { inner })
    }
}
