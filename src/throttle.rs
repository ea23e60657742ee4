use std::time::Duration;

use log::trace;

use crate::input::{MotionAction, MotionEvent};

/// Default minimum gap between accepted move events.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(20);

/// Drops move events that arrive faster than a minimum interval.
///
/// The decision is made purely from event timestamps, so the input path
/// never blocks or sleeps. Only [`MotionAction::Move`] events are debounced:
/// down/up/cancel transitions always pass, since dropping one of those would
/// lose gesture state rather than just reduce update density.
#[derive(Debug)]
pub struct TouchThrottle {
    min_interval: Duration,
    last_accepted: Option<Duration>,
}

impl Default for TouchThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

impl TouchThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
        }
    }

    /// Returns `true` if the event should be processed, `false` if it should
    /// be dropped.
    pub fn accept(&mut self, event: &MotionEvent) -> bool {
        if event.action != MotionAction::Move {
            return true;
        }
        match self.last_accepted {
            Some(last) if event.event_time < last + self.min_interval => {
                trace!(
                    "Dropping move event at {:?}, last accepted at {:?}",
                    event.event_time,
                    last
                );
                false
            }
            _ => {
                self.last_accepted = Some(event.event_time);
                true
            }
        }
    }
}
