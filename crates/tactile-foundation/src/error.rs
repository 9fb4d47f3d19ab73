use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// Gesture names must be non-empty and free of whitespace, since
    /// [`GestureEngine::register`](crate::GestureEngine::register) splits on it.
    InvalidName { name: String },
    /// Recognizers cannot be added while a pointer is being tracked.
    InteractionInProgress { name: String },
    UnknownEventType { name: String },
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureError::InvalidName { name } => write!(f, "invalid gesture name {name:?}"),
            GestureError::InteractionInProgress { name } => {
                write!(f, "cannot register gesture {name:?} while an interaction is live")
            }
            GestureError::UnknownEventType { name } => write!(f, "unknown input event type {name:?}"),
        }
    }
}

impl std::error::Error for GestureError {}
