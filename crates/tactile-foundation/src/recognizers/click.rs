//! Click recognizer.
//!
//! Native clicks are suppressed by the engine; this recognizer decides when a
//! click really happened and fires its own, engine-tagged one on the
//! interaction's target.

use crate::config::ClickOptions;
use crate::dispatch::{GestureDispatcher, GestureEventKind};
use crate::input::InputEvent;
use crate::pointer::Pointer;
use crate::recognizer::{Recognizer, RecognizerOptions};

#[derive(Debug)]
pub struct ClickRecognizer {
    options: ClickOptions,
    dispatcher: GestureDispatcher,
}

impl ClickRecognizer {
    pub fn new(options: ClickOptions, dispatcher: GestureDispatcher) -> Self {
        Self {
            options,
            dispatcher,
        }
    }
}

impl Recognizer for ClickRecognizer {
    fn options(&self) -> RecognizerOptions {
        RecognizerOptions::new().with("max_distance", self.options.max_distance)
    }

    fn on_end(&mut self, event: &InputEvent, pointer: &Pointer) {
        if pointer.distance < self.options.max_distance {
            self.dispatcher
                .dispatch(GestureEventKind::Click, event, pointer);
        }
    }
}
