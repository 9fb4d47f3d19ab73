//! Pointer unification and gesture recognition for Tactile.
//!
//! A [`GestureEngine`] turns the host's mouse, touch and pointer events into a
//! single tracked interaction and feeds it to an ordered set of
//! [`Recognizer`]s. Recognizers report what they saw through the
//! [`GestureDispatcher`].
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tactile_core::{ManualClock, Point};
//! use tactile_foundation::prelude::*;
//!
//! let clock = ManualClock::new();
//! let mut engine = GestureProvider::new()
//!     .with_clock(Rc::new(clock.clone()))
//!     .build()
//!     .expect("built-in gestures");
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! engine
//!     .dispatcher()
//!     .subscribe(move |event| sink.borrow_mut().push(event.kind));
//!
//! engine.handle_event(&InputEvent::new(InputEventType::MouseDown, 1, Point::new(10.0, 10.0)));
//! clock.advance(80);
//! engine.handle_event(&InputEvent::new(InputEventType::MouseUp, 1, Point::new(13.0, 10.0)));
//!
//! assert_eq!(
//!     *seen.borrow(),
//!     [
//!         GestureEventKind::PressDown,
//!         GestureEventKind::Click,
//!         GestureEventKind::PressUp,
//!     ]
//! );
//! ```

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod gesture_constants;
pub mod input;
pub mod pointer;
pub mod provider;
pub mod recognizer;
pub mod recognizers;
pub mod registry;

pub use config::{ClickOptions, DragOptions, GestureConfig, HoldOptions, SwipeOptions};
pub use dispatch::{GestureDispatcher, GestureEvent, GestureEventKind, ListenerId};
pub use engine::{Disposition, GestureEngine};
pub use error::GestureError;
pub use gesture_constants::*;
pub use input::{
    EventOrigin, GuardId, InputEvent, InputEventType, InputFamily, MoveGuardRegistration,
    PointerId, PointerKind, TargetId, TouchPoint,
};
pub use pointer::{HorizontalDirection, Pointer, VerticalDirection};
pub use provider::GestureProvider;
pub use recognizer::{GestureServices, Recognizer, RecognizerFactory, RecognizerOptions};
pub use recognizers::{
    ClickRecognizer, DragRecognizer, HoldRecognizer, PressRecognizer, SwipeRecognizer,
};
pub use registry::GestureRegistry;

pub mod prelude {
    pub use crate::config::{GestureConfig, HoldOptions};
    pub use crate::dispatch::{GestureDispatcher, GestureEvent, GestureEventKind};
    pub use crate::engine::{Disposition, GestureEngine};
    pub use crate::error::GestureError;
    pub use crate::input::prelude::*;
    pub use crate::input::MoveGuardRegistration;
    pub use crate::pointer::Pointer;
    pub use crate::provider::GestureProvider;
    pub use crate::recognizer::{GestureServices, Recognizer};
}
