use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unknown motion action code: {0}")]
    UnknownAction(u32),

    #[error("Unknown input source code: {0}")]
    UnknownSource(u32),
}

pub type Result<T> = std::result::Result<T, InputError>;

/// An opaque failure raised by a [`TouchMoveListener`] during dispatch.
///
/// Listeners box whatever error they produce internally; the fan-out
/// machinery never inspects it beyond logging and aggregation.
///
/// [`TouchMoveListener`]: crate::listener::TouchMoveListener
#[derive(Error, Debug)]
#[error("Touch listener failed: {0}")]
pub struct ListenerError(pub Box<dyn std::error::Error + Send + Sync>);

impl ListenerError {
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }

    /// Wraps a plain message, for listeners without a structured error type.
    pub fn msg<M: std::fmt::Display>(msg: M) -> Self {
        Self(msg.to_string().into())
    }
}

/// One or more listeners failed while an event was fanned out.
///
/// Fan-out always runs to completion over the full listener sequence; the
/// failures collected along the way are surfaced together afterwards, so a
/// misbehaving listener can never starve the ones registered after it.
#[derive(Error, Debug)]
#[error("{} of {dispatched} touch listener(s) failed during fan-out", .failures.len())]
pub struct DispatchError {
    /// Per-listener failures, in dispatch (i.e. registration) order.
    pub failures: Vec<ListenerError>,
    /// How many listeners the event was delivered to in total.
    pub dispatched: usize,
}
