use log::{debug, trace};

use crate::error::{DispatchError, ListenerError};
use crate::input::MotionEvent;

/// A unit of behavior invoked when the user drags across the surface and
/// when the drag is released.
///
/// `on_touch_move` receives the event that started the gesture, the most
/// recent event, and the distance scrolled since the last call. Implementors
/// report failures instead of panicking; a failure never stops delivery to
/// other listeners registered on the same slot.
pub trait TouchMoveListener {
    fn on_touch_move(
        &mut self,
        start: &MotionEvent,
        current: &MotionEvent,
        distance_x: f32,
        distance_y: f32,
    ) -> Result<(), ListenerError>;

    fn on_release_touch_move(&mut self) -> Result<(), ListenerError>;
}

/// The single registration point for [`TouchMoveListener`]s on a surface.
///
/// Call sites register against one conceptual callback without caring whether
/// zero, one, or many listeners are attached. The representation is upgraded
/// lazily: the common single-listener case never allocates a group, and the
/// group is only created on the second registration. Once promoted the slot
/// never reverts (there is no removal operation).
#[derive(Default)]
pub enum ListenerSlot {
    #[default]
    Empty,
    One(Box<dyn TouchMoveListener>),
    Many(Vec<Box<dyn TouchMoveListener>>),
}

impl ListenerSlot {
    pub fn new() -> Self {
        Self::Empty
    }

    /// Registers a listener, preserving registration order.
    ///
    /// Registering the same logical listener twice means it will be invoked
    /// twice per dispatch; deduplication is the caller's responsibility.
    pub fn register(&mut self, listener: Box<dyn TouchMoveListener>) {
        match std::mem::take(self) {
            ListenerSlot::Empty => {
                debug!("Setting slot to its first listener");
                *self = ListenerSlot::One(listener);
            }
            ListenerSlot::One(existing) => {
                debug!("Promoting slot to a listener group");
                *self = ListenerSlot::Many(vec![existing, listener]);
            }
            ListenerSlot::Many(mut group) => {
                debug!("Adding listener to existing group of {}", group.len());
                group.push(listener);
                *self = ListenerSlot::Many(group);
            }
        }
    }

    /// How many listeners are currently registered.
    pub fn len(&self) -> usize {
        match self {
            ListenerSlot::Empty => 0,
            ListenerSlot::One(_) => 1,
            ListenerSlot::Many(group) => group.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListenerSlot::Empty)
    }

    /// Fans a move event out to every registered listener, in registration
    /// order. Dispatching against an empty slot is a no-op.
    pub fn dispatch_move(
        &mut self,
        start: &MotionEvent,
        current: &MotionEvent,
        distance_x: f32,
        distance_y: f32,
    ) -> Result<(), DispatchError> {
        self.dispatch(|listener| listener.on_touch_move(start, current, distance_x, distance_y))
    }

    /// Fans a release out to every registered listener, in registration order.
    pub fn dispatch_release(&mut self) -> Result<(), DispatchError> {
        self.dispatch(|listener| listener.on_release_touch_move())
    }

    // Fan-out runs to completion over the full sequence; per-listener failures
    // are collected and surfaced together once every listener has been
    // invoked. Dispatch never changes the slot's structure.
    fn dispatch<F>(&mut self, mut invoke: F) -> Result<(), DispatchError>
    where
        F: FnMut(&mut dyn TouchMoveListener) -> Result<(), ListenerError>,
    {
        let mut failures = Vec::new();
        let dispatched = match self {
            ListenerSlot::Empty => 0,
            ListenerSlot::One(listener) => {
                if let Err(err) = invoke(listener.as_mut()) {
                    failures.push(err);
                }
                1
            }
            ListenerSlot::Many(group) => {
                for listener in group.iter_mut() {
                    if let Err(err) = invoke(listener.as_mut()) {
                        trace!("Listener failed during fan-out: {err}");
                        failures.push(err);
                    }
                }
                group.len()
            }
        };

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError {
                failures,
                dispatched,
            })
        }
    }
}

impl std::fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerSlot::Empty => f.write_str("ListenerSlot::Empty"),
            ListenerSlot::One(_) => f.write_str("ListenerSlot::One"),
            ListenerSlot::Many(group) => write!(f, "ListenerSlot::Many({})", group.len()),
        }
    }
}
