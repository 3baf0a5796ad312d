use std::mem;

use tracing::{debug, trace};

use super::{
    Endpoint, SliderMode, SliderValue, ValueModel,
    capture::{CaptureRelease, NoCapture, PointerCapture},
    event::{InputSource, PointerEvent, PointerId, PointerPhase, SliderEvent, SliderKey},
    layout::TrackBounds,
};

/// Largest distance between a drag release and the click the host delivers
/// right after it for the click to count as part of the release.
const RELEASE_CLICK_SLOP: f64 = 1.0;

/// An open drag.
///
/// Dropping the session drops its capture release, which detaches the
/// document-level listeners.
struct DragSession {
    endpoint: Endpoint,
    pointer: PointerId,
    source: InputSource,
    pending: Option<f64>,
    _capture: CaptureRelease,
}

/// Drag lifecycle. At most one session exists at a time.
#[derive(Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Turns raw input into value model updates and owns the drag session.
pub(super) struct SliderController {
    state: DragState,
    capture: Box<dyn PointerCapture>,
    track: TrackBounds,
    release_click_at: Option<f64>,
    page_multiplier: u32,
    coalesce_moves: bool,
    disabled: bool,
}

impl SliderController {
    pub(super) fn new(page_multiplier: u32, coalesce_moves: bool, disabled: bool) -> Self {
        Self {
            state: DragState::Idle,
            capture: Box::new(NoCapture),
            track: TrackBounds::default(),
            release_click_at: None,
            page_multiplier,
            coalesce_moves,
            disabled,
        }
    }

    pub(super) fn set_capture(&mut self, capture: Box<dyn PointerCapture>) {
        self.capture = capture;
    }

    pub(super) fn set_track_bounds(&mut self, track: TrackBounds) {
        self.track = track;
    }

    pub(super) fn track_bounds(&self) -> TrackBounds {
        self.track
    }

    pub(super) fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub(super) fn set_disabled(&mut self, disabled: bool) {
        if disabled {
            self.cancel("slider disabled");
        }
        self.disabled = disabled;
    }

    /// Endpoint of the open drag, if any.
    pub(super) fn active_endpoint(&self) -> Option<Endpoint> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session.endpoint),
        }
    }

    pub(super) fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Routes one event. Returns the new value when the event committed a
    /// change.
    #[tracing::instrument(level = "trace", skip(self, model))]
    pub(super) fn handle(
        &mut self,
        model: &mut ValueModel,
        event: SliderEvent,
    ) -> Option<SliderValue> {
        if self.disabled {
            trace!("ignoring event on disabled slider");
            return None;
        }
        let release_click_at = self.release_click_at.take();
        match event {
            SliderEvent::Pointer(event) => self.handle_pointer(model, event),
            SliderEvent::TrackClick { client_x } => {
                if release_click_at.is_some_and(|x| (x - client_x).abs() <= RELEASE_CLICK_SLOP) {
                    trace!("swallowing click that completes a drag release");
                    return None;
                }
                let fraction = self.track.fraction_at(client_x)?;
                self.click_track(model, fraction)
            }
            SliderEvent::KeyDown { thumb, key } => self.handle_key(model, thumb, key),
            SliderEvent::FocusLost => {
                self.cancel("focus lost");
                None
            }
        }
    }

    /// Applies the move buffered since the last animation frame.
    pub(super) fn frame(&mut self, model: &mut ValueModel) -> Option<SliderValue> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        let fraction = session.pending.take()?;
        let endpoint = session.endpoint;
        drag_to(model, endpoint, fraction)
    }

    /// Moves the endpoint nearest to the clicked fraction.
    pub(super) fn click_track(
        &mut self,
        model: &mut ValueModel,
        fraction: f64,
    ) -> Option<SliderValue> {
        if self.disabled {
            return None;
        }
        if self.is_dragging() {
            trace!("ignoring track click during drag");
            return None;
        }
        let candidate = model.position_to_value(fraction);
        let endpoint = model.nearest_endpoint(candidate);
        model
            .set_endpoint(endpoint, candidate)
            .then(|| model.value())
    }

    /// Ends any open drag without committing its pending move.
    pub(super) fn cancel(&mut self, reason: &'static str) {
        if let DragState::Dragging(session) = mem::take(&mut self.state) {
            debug!(
                endpoint = ?session.endpoint,
                pointer = session.pointer.0,
                reason,
                "drag cancelled"
            );
        }
    }

    fn handle_pointer(&mut self, model: &mut ValueModel, event: PointerEvent) -> Option<SliderValue> {
        if let PointerPhase::Down { thumb } = event.phase {
            match &self.state {
                DragState::Idle => self.start_drag(model, thumb, event.pointer, event.source),
                DragState::Dragging(session) => trace!(
                    active = session.pointer.0,
                    ignored = event.pointer.0,
                    "ignoring pointer-down during drag"
                ),
            }
            return None;
        }

        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        if session.pointer != event.pointer {
            trace!(
                active = session.pointer.0,
                ignored = event.pointer.0,
                "ignoring event from another pointer"
            );
            return None;
        }

        match event.phase {
            PointerPhase::Move => {
                let fraction = self.track.fraction_at(event.client_x)?;
                if self.coalesce_moves {
                    session.pending = Some(fraction);
                    return None;
                }
                let endpoint = session.endpoint;
                drag_to(model, endpoint, fraction)
            }
            PointerPhase::Up => self.finish_drag(model, event.client_x),
            PointerPhase::Cancel => {
                self.cancel("pointer cancelled");
                None
            }
            PointerPhase::Down { .. } => None,
        }
    }

    fn start_drag(
        &mut self,
        model: &ValueModel,
        thumb: Endpoint,
        pointer: PointerId,
        source: InputSource,
    ) {
        let endpoint = match model.mode() {
            SliderMode::Single => Endpoint::End,
            SliderMode::Range => thumb,
        };
        let capture = self.capture.capture(pointer, source);
        debug!(?endpoint, pointer = pointer.0, ?source, "drag started");
        self.state = DragState::Dragging(DragSession {
            endpoint,
            pointer,
            source,
            pending: None,
            _capture: capture,
        });
    }

    fn finish_drag(&mut self, model: &mut ValueModel, client_x: f64) -> Option<SliderValue> {
        let DragState::Dragging(session) = mem::take(&mut self.state) else {
            return None;
        };
        let fraction = self.track.fraction_at(client_x).or(session.pending);
        let endpoint = session.endpoint;
        debug!(
            ?endpoint,
            pointer = session.pointer.0,
            source = ?session.source,
            "drag finished"
        );
        drop(session);
        if client_x.is_finite() {
            self.release_click_at = Some(client_x);
        }
        drag_to(model, endpoint, fraction?)
    }

    fn handle_key(
        &mut self,
        model: &mut ValueModel,
        thumb: Endpoint,
        key: SliderKey,
    ) -> Option<SliderValue> {
        if self.is_dragging() {
            trace!(%key, "ignoring key during drag");
            return None;
        }
        let endpoint = match model.mode() {
            SliderMode::Single => Endpoint::End,
            SliderMode::Range => thumb,
        };
        let current = model.endpoint(endpoint);
        let step = model.step();
        let page = f64::from(self.page_multiplier) * step;
        let target = match key {
            SliderKey::ArrowRight | SliderKey::ArrowUp => current + step,
            SliderKey::ArrowLeft | SliderKey::ArrowDown => current - step,
            SliderKey::PageUp => current + page,
            SliderKey::PageDown => current - page,
            SliderKey::Home => model.min(),
            SliderKey::End => model.max(),
        };
        model
            .set_endpoint(endpoint, target)
            .then(|| model.value())
    }
}

fn drag_to(model: &mut ValueModel, endpoint: Endpoint, fraction: f64) -> Option<SliderValue> {
    let candidate = model.position_to_value(fraction);
    model
        .set_endpoint(endpoint, candidate)
        .then(|| model.value())
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::slider::TieRounding;

    fn range_model(start: f64, end: f64) -> ValueModel {
        ValueModel::new(
            0.0,
            100.0,
            1.0,
            SliderMode::Range,
            TieRounding::default(),
            SliderValue::Range { start, end },
        )
        .expect("valid range slider")
    }

    fn controller(coalesce: bool) -> SliderController {
        let mut controller = SliderController::new(10, coalesce, false);
        controller.set_track_bounds(TrackBounds::new(0.0, 100.0));
        controller
    }

    fn counting_capture(
        captures: &Arc<AtomicUsize>,
        releases: &Arc<AtomicUsize>,
    ) -> Box<dyn PointerCapture> {
        let captures = Arc::clone(captures);
        let releases = Arc::clone(releases);
        Box::new(move |_: PointerId, _: InputSource| {
            captures.fetch_add(1, Ordering::SeqCst);
            let releases = Arc::clone(&releases);
            CaptureRelease::new(move || {
                releases.fetch_add(1, Ordering::SeqCst);
            })
        })
    }

    fn pointer(event: PointerEvent) -> SliderEvent {
        SliderEvent::Pointer(event)
    }

    #[test]
    fn drag_moves_the_grabbed_endpoint() {
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(false);
        let id = PointerId(1);

        controller.handle(&mut model, pointer(PointerEvent::down(id, Endpoint::End, 80.0)));
        assert_eq!(controller.active_endpoint(), Some(Endpoint::End));
        let changed = controller.handle(&mut model, pointer(PointerEvent::moved(id, 64.2)));
        assert_eq!(changed, Some(SliderValue::Range { start: 20.0, end: 64.0 }));
        controller.handle(&mut model, pointer(PointerEvent::up(id, 64.2)));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn dragged_endpoint_stops_at_its_sibling() {
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(false);
        let id = PointerId(1);

        controller.handle(&mut model, pointer(PointerEvent::down(id, Endpoint::Start, 20.0)));
        controller.handle(&mut model, pointer(PointerEvent::moved(id, 95.0)));
        assert_eq!(model.value(), SliderValue::Range { start: 80.0, end: 80.0 });
        assert_eq!(controller.active_endpoint(), Some(Endpoint::Start));
    }

    #[test]
    fn coalesced_moves_apply_once_per_frame() {
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(true);
        let id = PointerId(7);

        controller.handle(&mut model, pointer(PointerEvent::down(id, Endpoint::End, 80.0)));
        assert_eq!(controller.handle(&mut model, pointer(PointerEvent::moved(id, 70.0))), None);
        assert_eq!(controller.handle(&mut model, pointer(PointerEvent::moved(id, 60.0))), None);
        assert_eq!(model.endpoint(Endpoint::End), 80.0);
        assert_eq!(
            controller.frame(&mut model),
            Some(SliderValue::Range { start: 20.0, end: 60.0 })
        );
        assert_eq!(controller.frame(&mut model), None);
    }

    #[test]
    fn release_position_wins_over_pending_move() {
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(true);
        let id = PointerId(7);

        controller.handle(&mut model, pointer(PointerEvent::down(id, Endpoint::End, 80.0)));
        controller.handle(&mut model, pointer(PointerEvent::moved(id, 60.0)));
        let changed = controller.handle(&mut model, pointer(PointerEvent::up(id, 250.0)));
        assert_eq!(changed, Some(SliderValue::Range { start: 20.0, end: 100.0 }));
    }

    #[test]
    fn cancel_discards_pending_move_and_releases_capture() {
        let captures = Arc::new(AtomicUsize::new(0));
        let releases = Arc::new(AtomicUsize::new(0));
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(true);
        controller.set_capture(counting_capture(&captures, &releases));
        let id = PointerId(3);

        controller.handle(&mut model, pointer(PointerEvent::touch_start(id, Endpoint::Start, 20.0)));
        controller.handle(&mut model, pointer(PointerEvent::touch_move(id, 50.0)));
        controller.handle(&mut model, pointer(PointerEvent::touch_cancel(id)));
        assert_eq!(controller.frame(&mut model), None);
        assert_eq!(model.endpoint(Endpoint::Start), 20.0);
        assert_eq!(captures.load(Ordering::SeqCst), 1);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn secondary_pointer_cannot_open_a_second_drag() {
        let captures = Arc::new(AtomicUsize::new(0));
        let releases = Arc::new(AtomicUsize::new(0));
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(false);
        controller.set_capture(counting_capture(&captures, &releases));

        controller.handle(&mut model, pointer(PointerEvent::down(PointerId(1), Endpoint::Start, 20.0)));
        controller.handle(&mut model, pointer(PointerEvent::touch_start(PointerId(2), Endpoint::End, 80.0)));
        controller.handle(&mut model, pointer(PointerEvent::touch_move(PointerId(2), 10.0)));
        assert_eq!(controller.active_endpoint(), Some(Endpoint::Start));
        assert_eq!(model.value(), SliderValue::Range { start: 20.0, end: 80.0 });
        assert_eq!(captures.load(Ordering::SeqCst), 1);

        controller.handle(&mut model, pointer(PointerEvent::up(PointerId(1), 30.0)));
        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert_eq!(model.endpoint(Endpoint::Start), 30.0);
    }

    #[test]
    fn focus_loss_ends_the_drag() {
        let captures = Arc::new(AtomicUsize::new(0));
        let releases = Arc::new(AtomicUsize::new(0));
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(false);
        controller.set_capture(counting_capture(&captures, &releases));

        controller.handle(&mut model, pointer(PointerEvent::down(PointerId(1), Endpoint::End, 80.0)));
        controller.handle(&mut model, SliderEvent::FocusLost);
        controller.handle(&mut model, SliderEvent::FocusLost);
        assert!(!controller.is_dragging());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn click_during_drag_is_ignored() {
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(false);

        controller.handle(&mut model, pointer(PointerEvent::down(PointerId(1), Endpoint::End, 80.0)));
        assert_eq!(
            controller.handle(&mut model, SliderEvent::TrackClick { client_x: 10.0 }),
            None
        );
        assert_eq!(model.endpoint(Endpoint::Start), 20.0);
    }

    #[test]
    fn click_right_after_release_is_swallowed_once() {
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(false);
        let id = PointerId(1);

        controller.handle(&mut model, pointer(PointerEvent::down(id, Endpoint::End, 80.0)));
        controller.handle(&mut model, pointer(PointerEvent::up(id, 70.0)));
        assert_eq!(model.endpoint(Endpoint::End), 70.0);
        assert_eq!(
            controller.handle(&mut model, SliderEvent::TrackClick { client_x: 70.0 }),
            None
        );
        assert_eq!(
            controller.handle(&mut model, SliderEvent::TrackClick { client_x: 10.0 }),
            Some(SliderValue::Range { start: 10.0, end: 70.0 })
        );
    }

    #[test]
    fn click_elsewhere_after_release_is_honored() {
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(false);
        let id = PointerId(1);

        controller.handle(&mut model, pointer(PointerEvent::down(id, Endpoint::End, 80.0)));
        controller.handle(&mut model, pointer(PointerEvent::up(id, 300.0)));
        assert_eq!(
            controller.handle(&mut model, SliderEvent::TrackClick { client_x: 5.0 }),
            Some(SliderValue::Range { start: 5.0, end: 100.0 })
        );
    }

    #[test]
    fn keys_are_ignored_during_drag() {
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(false);

        controller.handle(&mut model, pointer(PointerEvent::down(PointerId(1), Endpoint::End, 80.0)));
        let changed = controller.handle(
            &mut model,
            SliderEvent::KeyDown {
                thumb: Endpoint::Start,
                key: SliderKey::Home,
            },
        );
        assert_eq!(changed, None);
    }

    #[test]
    fn page_keys_use_the_multiplier() {
        let mut model = range_model(20.0, 80.0);
        let mut controller = SliderController::new(5, false, false);
        let changed = controller.handle(
            &mut model,
            SliderEvent::KeyDown {
                thumb: Endpoint::Start,
                key: SliderKey::PageUp,
            },
        );
        assert_eq!(changed, Some(SliderValue::Range { start: 25.0, end: 80.0 }));
    }

    #[test]
    fn disabling_cancels_and_blocks_input() {
        let captures = Arc::new(AtomicUsize::new(0));
        let releases = Arc::new(AtomicUsize::new(0));
        let mut model = range_model(20.0, 80.0);
        let mut controller = controller(false);
        controller.set_capture(counting_capture(&captures, &releases));

        controller.handle(&mut model, pointer(PointerEvent::down(PointerId(1), Endpoint::End, 80.0)));
        controller.set_disabled(true);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert_eq!(
            controller.handle(&mut model, SliderEvent::TrackClick { client_x: 5.0 }),
            None
        );
        assert_eq!(controller.click_track(&mut model, 0.05), None);
        assert_eq!(model.value(), SliderValue::Range { start: 20.0, end: 80.0 });
    }

    #[test]
    fn dropping_the_controller_releases_an_open_capture() {
        let captures = Arc::new(AtomicUsize::new(0));
        let releases = Arc::new(AtomicUsize::new(0));
        let mut model = range_model(20.0, 80.0);
        {
            let mut controller = controller(false);
            controller.set_capture(counting_capture(&captures, &releases));
            controller.handle(&mut model, pointer(PointerEvent::down(PointerId(1), Endpoint::End, 80.0)));
            assert_eq!(releases.load(Ordering::SeqCst), 0);
        }
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }
}
