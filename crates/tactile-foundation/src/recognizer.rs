//! The recognizer interface and the services recognizers are built from.

use crate::config::GestureConfig;
use crate::dispatch::GestureDispatcher;
use crate::input::InputEvent;
use crate::pointer::Pointer;
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;
use tactile_core::{Clock, FrameClock};

/// Derives one high-level gesture from the unified pointer timeline.
///
/// Every hook defaults to doing nothing. The engine calls `reset` on every
/// registered recognizer before the first `on_start` of an interaction, so
/// state kept across hooks must be cleared there.
pub trait Recognizer {
    /// Tunable thresholds, for inspection.
    fn options(&self) -> RecognizerOptions {
        RecognizerOptions::new()
    }

    fn reset(&mut self) {}

    fn on_start(&mut self, _event: &InputEvent, _pointer: &Pointer) {}

    fn on_move(&mut self, _event: &InputEvent, _pointer: &Pointer) {}

    fn on_end(&mut self, _event: &InputEvent, _pointer: &Pointer) {}

    /// Whether the native move `event` should have its default action (page
    /// scrolling) prevented. Only consulted for targets registered through
    /// [`GestureEngine::register`](crate::GestureEngine::register).
    fn should_prevent_move(&mut self, _event: &InputEvent, _pointer: &Pointer) -> bool {
        false
    }

    /// True for recognizers that react to moves. Only these are armed by
    /// [`GestureEngine::register`](crate::GestureEngine::register).
    ///
    /// Overriding `on_move` or `should_prevent_move` does not imply this: a
    /// recognizer that wants move prevention must return `true` here as well,
    /// or registering it arms nothing.
    fn observes_moves(&self) -> bool {
        false
    }
}

/// Named numeric thresholds of a recognizer, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognizerOptions {
    values: SmallVec<[(&'static str, f32); 4]>,
}

impl RecognizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: f32) -> Self {
        match self.values.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Handles a recognizer factory may capture.
///
/// All fields are shared handles: cloning the services is cheap and every
/// clone talks to the same clock, frame clock and listeners as the engine.
#[derive(Clone)]
pub struct GestureServices {
    pub clock: Rc<dyn Clock>,
    pub frame_clock: FrameClock,
    pub dispatcher: GestureDispatcher,
    pub config: GestureConfig,
}

impl fmt::Debug for GestureServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureServices")
            .field("now", &self.clock.now_millis())
            .field("frame_clock", &self.frame_clock)
            .field("dispatcher", &self.dispatcher)
            .field("config", &self.config)
            .finish()
    }
}

/// Builds a recognizer once, when the engine is built or the name is registered late.
pub type RecognizerFactory = Box<dyn FnOnce(&GestureServices) -> Box<dyn Recognizer>>;
