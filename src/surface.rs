use log::debug;

use crate::error::DispatchError;
use crate::input::{Class, MotionAction, MotionEvent};
use crate::listener::{ListenerSlot, TouchMoveListener};
use crate::throttle::TouchThrottle;
use crate::InputStatus;

/// A gesture produced by an external gesture-classification service.
///
/// Classification itself is out of scope for this crate; a classifier
/// consumes the raw event stream and reports whichever of these it
/// recognizes.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// The user is dragging. `start` is the down event that began the
    /// gesture, `current` the latest move, and the distances are the scroll
    /// deltas since the previous `Scroll`.
    Scroll {
        start: MotionEvent,
        current: MotionEvent,
        distance_x: f32,
        distance_y: f32,
    },
    SingleTap(MotionEvent),
    DoubleTap(MotionEvent),
    LongPress(MotionEvent),
}

/// The gesture-classification boundary.
///
/// Implementations see every pointer event the surface accepts and may
/// produce at most one gesture per event. Any closure with the right shape
/// works as a classifier.
pub trait GestureClassifier {
    fn on_touch_event(&mut self, event: &MotionEvent) -> Option<GestureEvent>;
}

impl<F> GestureClassifier for F
where
    F: FnMut(&MotionEvent) -> Option<GestureEvent>,
{
    fn on_touch_event(&mut self, event: &MotionEvent) -> Option<GestureEvent> {
        self(event)
    }
}

/// Records where the user last tapped, double-tapped and long-pressed.
///
/// The object-picking service implements this and is handed to the surface
/// at construction time; the surface never reaches for it through any global
/// state.
pub trait PointerPicker {
    fn set_click_position(&mut self, x: f32, y: f32);
    fn set_double_click_position(&mut self, x: f32, y: f32);
    fn set_long_click_position(&mut self, x: f32, y: f32);
}

/// The input-facing side of an AR rendering surface.
///
/// Owns the touch-move [`ListenerSlot`], a [`TouchThrottle`] and the two
/// injected collaborators (gesture classifier and pointer picker), and turns
/// the raw pointer event stream into listener fan-outs and picker updates.
/// Everything is synchronous and non-blocking; callers drive it from their
/// input thread.
pub struct TouchSurface<C, P> {
    classifier: C,
    picker: P,
    move_listeners: ListenerSlot,
    throttle: TouchThrottle,
}

impl<C, P> TouchSurface<C, P>
where
    C: GestureClassifier,
    P: PointerPicker,
{
    pub fn new(classifier: C, picker: P) -> Self {
        Self::with_throttle(classifier, picker, TouchThrottle::default())
    }

    pub fn with_throttle(classifier: C, picker: P, throttle: TouchThrottle) -> Self {
        Self {
            classifier,
            picker,
            move_listeners: ListenerSlot::new(),
            throttle,
        }
    }

    /// Registers a listener for touch-move and release events.
    ///
    /// May be called any number of times over the surface's lifetime; every
    /// registered listener receives every subsequent move/release, in
    /// registration order.
    pub fn add_touch_move_listener(&mut self, listener: Box<dyn TouchMoveListener>) {
        debug!("Adding touch move listener");
        self.move_listeners.register(listener);
    }

    /// Feeds one raw pointer event through the surface.
    ///
    /// Events from non-pointer-class sources are returned as
    /// [`InputStatus::Unhandled`] so the caller can route them to its own
    /// trackball/navigation path. Move events arriving faster than the
    /// throttle interval are dropped (reported as handled). Everything else
    /// is offered to the classifier, any recognized gesture is routed, and a
    /// pointer-up additionally releases the move listeners.
    pub fn handle_touch(&mut self, event: &MotionEvent) -> Result<InputStatus, DispatchError> {
        if event.class() != Class::Pointer {
            return Ok(InputStatus::Unhandled);
        }
        if !self.throttle.accept(event) {
            return Ok(InputStatus::Handled);
        }

        let gesture = self.classifier.on_touch_event(event);
        let mut result = match gesture {
            Some(gesture) => self.handle_gesture(gesture),
            None => Ok(()),
        };

        if event.action == MotionAction::Up {
            // Release must reach the listeners even if the gesture fan-out
            // already failed; keep the first error.
            let release = self.move_listeners.dispatch_release();
            if result.is_ok() {
                result = release;
            }
        }

        result.map(|_| InputStatus::Handled)
    }

    /// Routes one classified gesture: scrolls fan out to the move listeners,
    /// taps update the pointer picker.
    pub fn handle_gesture(&mut self, gesture: GestureEvent) -> Result<(), DispatchError> {
        match gesture {
            GestureEvent::Scroll {
                start,
                current,
                distance_x,
                distance_y,
            } => self
                .move_listeners
                .dispatch_move(&start, &current, distance_x, distance_y),
            GestureEvent::SingleTap(e) => {
                self.picker.set_click_position(e.x, e.y);
                Ok(())
            }
            GestureEvent::DoubleTap(e) => {
                self.picker.set_double_click_position(e.x, e.y);
                Ok(())
            }
            GestureEvent::LongPress(e) => {
                self.picker.set_long_click_position(e.x, e.y);
                Ok(())
            }
        }
    }

    pub fn move_listeners(&self) -> &ListenerSlot {
        &self.move_listeners
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::error::ListenerError;
    use crate::input::Source;

    #[derive(Default)]
    struct RecordingPicker {
        clicks: Vec<(f32, f32)>,
        double_clicks: Vec<(f32, f32)>,
        long_clicks: Vec<(f32, f32)>,
    }

    impl PointerPicker for RecordingPicker {
        fn set_click_position(&mut self, x: f32, y: f32) {
            self.clicks.push((x, y));
        }
        fn set_double_click_position(&mut self, x: f32, y: f32) {
            self.double_clicks.push((x, y));
        }
        fn set_long_click_position(&mut self, x: f32, y: f32) {
            self.long_clicks.push((x, y));
        }
    }

    // Pops one scripted response per event and counts how often it was asked.
    struct ScriptedClassifier {
        responses: VecDeque<Option<GestureEvent>>,
        calls: Rc<RefCell<usize>>,
    }

    impl GestureClassifier for ScriptedClassifier {
        fn on_touch_event(&mut self, _event: &MotionEvent) -> Option<GestureEvent> {
            *self.calls.borrow_mut() += 1;
            self.responses.pop_front().flatten()
        }
    }

    struct LogListener {
        log: Rc<RefCell<Vec<String>>>,
        fail_moves: bool,
    }

    impl TouchMoveListener for LogListener {
        fn on_touch_move(
            &mut self,
            _start: &MotionEvent,
            _current: &MotionEvent,
            dx: f32,
            dy: f32,
        ) -> Result<(), ListenerError> {
            self.log.borrow_mut().push(format!("move({dx},{dy})"));
            if self.fail_moves {
                Err(ListenerError::msg("move rejected"))
            } else {
                Ok(())
            }
        }

        fn on_release_touch_move(&mut self) -> Result<(), ListenerError> {
            self.log.borrow_mut().push("release".into());
            Ok(())
        }
    }

    fn touch(action: MotionAction, x: f32, y: f32, millis: u64) -> MotionEvent {
        MotionEvent::new(
            action,
            Source::Touchscreen,
            x,
            y,
            Duration::from_millis(millis),
        )
    }

    fn scripted(
        responses: Vec<Option<GestureEvent>>,
    ) -> (ScriptedClassifier, Rc<RefCell<usize>>) {
        let calls = Rc::new(RefCell::new(0));
        (
            ScriptedClassifier {
                responses: responses.into(),
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }

    #[test]
    fn scroll_gesture_fans_out_to_move_listeners() {
        let start = touch(MotionAction::Down, 0.0, 0.0, 0);
        let current = touch(MotionAction::Move, 5.0, 7.0, 30);
        let (classifier, _) = scripted(vec![Some(GestureEvent::Scroll {
            start: start.clone(),
            current: current.clone(),
            distance_x: 5.0,
            distance_y: 7.0,
        })]);
        let mut surface = TouchSurface::new(classifier, RecordingPicker::default());

        let log = Rc::new(RefCell::new(Vec::new()));
        surface.add_touch_move_listener(Box::new(LogListener {
            log: Rc::clone(&log),
            fail_moves: false,
        }));

        let status = surface.handle_touch(&current).unwrap();
        assert_eq!(status, InputStatus::Handled);
        assert_eq!(*log.borrow(), vec!["move(5,7)"]);
    }

    #[test]
    fn pointer_up_releases_move_listeners() {
        let (classifier, _) = scripted(vec![None]);
        let mut surface = TouchSurface::new(classifier, RecordingPicker::default());

        let log = Rc::new(RefCell::new(Vec::new()));
        surface.add_touch_move_listener(Box::new(LogListener {
            log: Rc::clone(&log),
            fail_moves: false,
        }));

        surface
            .handle_touch(&touch(MotionAction::Up, 1.0, 1.0, 10))
            .unwrap();
        assert_eq!(*log.borrow(), vec!["release"]);
    }

    #[test]
    fn taps_update_the_picker() {
        let (classifier, _) = scripted(vec![
            Some(GestureEvent::SingleTap(touch(MotionAction::Up, 1.0, 2.0, 10))),
            Some(GestureEvent::DoubleTap(touch(MotionAction::Up, 3.0, 4.0, 200))),
            Some(GestureEvent::LongPress(touch(MotionAction::Down, 5.0, 6.0, 900))),
        ]);
        let mut surface = TouchSurface::new(classifier, RecordingPicker::default());

        surface
            .handle_touch(&touch(MotionAction::Up, 1.0, 2.0, 10))
            .unwrap();
        surface
            .handle_touch(&touch(MotionAction::Up, 3.0, 4.0, 200))
            .unwrap();
        surface
            .handle_touch(&touch(MotionAction::Down, 5.0, 6.0, 900))
            .unwrap();

        let picker = surface.picker();
        assert_eq!(picker.clicks, vec![(1.0, 2.0)]);
        assert_eq!(picker.double_clicks, vec![(3.0, 4.0)]);
        assert_eq!(picker.long_clicks, vec![(5.0, 6.0)]);
    }

    #[test]
    fn trackball_events_are_left_to_the_caller() {
        let (classifier, calls) = scripted(vec![]);
        let mut surface = TouchSurface::new(classifier, RecordingPicker::default());

        let trackball = MotionEvent::new(
            MotionAction::Move,
            Source::Trackball,
            0.0,
            0.0,
            Duration::from_millis(5),
        );
        let status = surface.handle_touch(&trackball).unwrap();
        assert_eq!(status, InputStatus::Unhandled);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn throttled_moves_never_reach_the_classifier() {
        let (classifier, calls) = scripted(vec![None, None]);
        let mut surface = TouchSurface::with_throttle(
            classifier,
            RecordingPicker::default(),
            TouchThrottle::new(Duration::from_millis(20)),
        );

        surface
            .handle_touch(&touch(MotionAction::Move, 0.0, 0.0, 100))
            .unwrap();
        // 5ms later: dropped, but still reported as handled.
        let status = surface
            .handle_touch(&touch(MotionAction::Move, 0.0, 1.0, 105))
            .unwrap();
        assert_eq!(status, InputStatus::Handled);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn release_still_runs_when_scroll_fan_out_fails() {
        let up = touch(MotionAction::Up, 9.0, 9.0, 50);
        let (classifier, _) = scripted(vec![Some(GestureEvent::Scroll {
            start: touch(MotionAction::Down, 0.0, 0.0, 0),
            current: up.clone(),
            distance_x: 9.0,
            distance_y: 9.0,
        })]);
        let mut surface = TouchSurface::new(classifier, RecordingPicker::default());

        let log = Rc::new(RefCell::new(Vec::new()));
        surface.add_touch_move_listener(Box::new(LogListener {
            log: Rc::clone(&log),
            fail_moves: true,
        }));

        let err = surface.handle_touch(&up).unwrap_err();
        assert_eq!(err.failures.len(), 1);
        // The failing move did not swallow the release.
        assert_eq!(*log.borrow(), vec!["move(9,9)", "release"]);
    }
}
