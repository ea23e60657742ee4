//! Touch input plumbing for an AR rendering surface.
//!
//! The platform side (window/surface creation, GL configuration, gesture
//! recognition) stays outside this crate; what lives here is the glue
//! between a raw pointer-event stream and the application's event system:
//!
//! - [`listener::ListenerSlot`] — one registration point that fans
//!   touch-move/release events out to any number of
//!   [`listener::TouchMoveListener`]s, in registration order.
//! - [`surface::TouchSurface`] — owns the slot, throttles the event stream,
//!   feeds it to an injected [`surface::GestureClassifier`] and routes the
//!   resulting gestures (scrolls to the listeners, taps to an injected
//!   [`surface::PointerPicker`]).
//! - [`throttle::TouchThrottle`] — timestamp-based debouncing of move
//!   events; the input path never blocks.
//!
//! Everything is synchronous and single-threaded: drive a surface from one
//! logical input thread, or wrap it in your own synchronization.

pub mod error;
pub mod input;
pub mod listener;
pub mod surface;
pub mod throttle;

pub use error::{DispatchError, InputError, ListenerError};
pub use listener::{ListenerSlot, TouchMoveListener};
pub use surface::{GestureClassifier, GestureEvent, PointerPicker, TouchSurface};
pub use throttle::TouchThrottle;

/// Whether an event was consumed by the surface.
///
/// `Unhandled` events (e.g. trackball-class motion) should be routed to the
/// caller's own fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStatus {
    Handled,
    Unhandled,
}
