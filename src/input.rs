use std::time::Duration;

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::InputError;

/// An enum representing the masked action of a [`MotionEvent`]
///
/// The discriminants match the platform action codes so that raw events can
/// be converted fallibly via [`MotionAction::try_from`].
///
/// See [the MotionEvent docs](https://developer.android.com/reference/android/view/MotionEvent#getActionMasked())
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum MotionAction {
    Down = 0,
    Up = 1,
    Move = 2,
    Cancel = 3,
    Outside = 4,
    PointerDown = 5,
    PointerUp = 6,
    HoverMove = 7,
    Scroll = 8,
    HoverEnter = 9,
    HoverExit = 10,
}

/// An enum representing the source device of a [`MotionEvent`]
///
/// See [the InputDevice docs](https://developer.android.com/reference/android/view/InputDevice#SOURCE_ANY)
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum Source {
    BluetoothStylus = 0x0000c002,
    /// A pointing device, such as a mouse or trackpad
    Mouse = 0x00002002,
    /// A pointing device whose relative motions should be treated as navigation events
    MouseRelative = 0x00020004,
    Stylus = 0x00004002,
    Touchpad = 0x00100008,
    Touchscreen = 0x00001002,
    TouchNavigation = 0x00200000,
    Trackball = 0x00010004,

    Unknown = 0,
}

bitflags! {
    #[derive(PartialEq, Eq)]
    struct SourceFlags: u32 {
        const CLASS_MASK = 0x000000ff;

        const BUTTON = 0x00000001;
        const POINTER = 0x00000002;
        const TRACKBALL = 0x00000004;
        const POSITION = 0x00000008;
        const JOYSTICK = 0x00000010;
        const NONE = 0;
    }
}

/// An enum representing the class of a [`MotionEvent`] source
///
/// The surface only consumes pointer-class events itself; trackball-class
/// events are left to the caller's trackball path.
///
/// See [the InputDevice docs](https://developer.android.com/reference/android/view/InputDevice#SOURCE_CLASS_MASK)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    None,
    Button,
    Pointer,
    Trackball,
    Position,
    Joystick,
}

impl From<u32> for Class {
    fn from(source: u32) -> Self {
        let class = SourceFlags::from_bits_truncate(source);
        match class {
            SourceFlags::BUTTON => Class::Button,
            SourceFlags::POINTER => Class::Pointer,
            SourceFlags::TRACKBALL => Class::Trackball,
            SourceFlags::POSITION => Class::Position,
            SourceFlags::JOYSTICK => Class::Joystick,
            _ => Class::None,
        }
    }
}

impl From<Source> for Class {
    fn from(source: Source) -> Self {
        let source: u32 = source.into();
        source.into()
    }
}

/// A single pointer motion event
///
/// Unlike the platform type this is a plain owned value: just the masked
/// action, the source device, the primary pointer position and the event
/// timestamp, which is all the surface plumbing needs. The timestamp is
/// relative to an arbitrary epoch (the platform's uptime clock in practice)
/// and is only ever compared against other event timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    pub source: Source,
    pub x: f32,
    pub y: f32,
    pub event_time: Duration,
}

impl MotionEvent {
    pub fn new(action: MotionAction, source: Source, x: f32, y: f32, event_time: Duration) -> Self {
        Self {
            action,
            source,
            x,
            y,
            event_time,
        }
    }

    /// Builds an event from raw platform action and source codes.
    ///
    /// Codes this crate doesn't know about are rejected rather than mapped to
    /// a catch-all, so callers notice when a new platform code shows up.
    pub fn from_raw(
        action: u32,
        source: u32,
        x: f32,
        y: f32,
        event_time: Duration,
    ) -> crate::error::Result<Self> {
        let action = MotionAction::try_from(action).map_err(|e| InputError::UnknownAction(e.number))?;
        let source = Source::try_from(source).map_err(|e| InputError::UnknownSource(e.number))?;
        Ok(Self::new(action, source, x, y, event_time))
    }

    /// The class of this event's source device.
    #[inline]
    pub fn class(&self) -> Class {
        self.source.into()
    }
}
