//! Simulated document that owns document-level pointer listeners.

use std::sync::Arc;

use parking_lot::Mutex;
use tessera_forms::{
    WeakSlider,
    slider::{CaptureRelease, InputSource, PointerEvent, PointerId, PointerPhase},
};
use tracing::{debug, trace};

struct Listener {
    id: u64,
    pointer: PointerId,
    slider: WeakSlider,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    attached: Vec<Listener>,
}

/// Routes move/up/cancel events to whichever sliders captured the pointer.
#[derive(Clone, Default)]
pub struct Document {
    listeners: Arc<Mutex<Listeners>>,
}

impl Document {
    /// Capture hook for `slider`: attaches a listener per drag and detaches it
    /// on release.
    pub fn capture_for(
        &self,
        slider: WeakSlider,
    ) -> impl FnMut(PointerId, InputSource) -> CaptureRelease + Send + 'static {
        let listeners = Arc::clone(&self.listeners);
        move |pointer: PointerId, source: InputSource| {
            let id = {
                let mut listeners = listeners.lock();
                listeners.next_id += 1;
                let id = listeners.next_id;
                listeners.attached.push(Listener {
                    id,
                    pointer,
                    slider: slider.clone(),
                });
                id
            };
            debug!(listener = id, pointer = pointer.0, ?source, "document listeners attached");

            let listeners = Arc::clone(&listeners);
            CaptureRelease::new(move || {
                listeners.lock().attached.retain(|listener| listener.id != id);
                debug!(listener = id, "document listeners detached");
            })
        }
    }

    /// Delivers a pointer event to every listener attached for its pointer.
    ///
    /// Returns how many listeners received it.
    pub fn dispatch(&self, event: PointerEvent) -> usize {
        if matches!(event.phase, PointerPhase::Down { .. }) {
            return 0;
        }
        // Listeners detach themselves while handling up/cancel, so dispatch
        // from a snapshot with the lock released.
        let targets: Vec<WeakSlider> = self
            .listeners
            .lock()
            .attached
            .iter()
            .filter(|listener| listener.pointer == event.pointer)
            .map(|listener| listener.slider.clone())
            .collect();
        if targets.is_empty() {
            trace!(pointer = event.pointer.0, "no document listener for pointer");
        }
        for slider in &targets {
            slider.dispatch(event);
        }
        targets.len()
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().attached.len()
    }
}
