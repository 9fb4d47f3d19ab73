//! Swipe recognizer: a fast horizontal flick, judged once when the contact lifts.

use crate::config::SwipeOptions;
use crate::dispatch::{GestureDispatcher, GestureEventKind};
use crate::input::InputEvent;
use crate::pointer::{HorizontalDirection, Pointer};
use crate::recognizer::{Recognizer, RecognizerOptions};

#[derive(Debug)]
pub struct SwipeRecognizer {
    options: SwipeOptions,
    dispatcher: GestureDispatcher,
}

impl SwipeRecognizer {
    pub fn new(options: SwipeOptions, dispatcher: GestureDispatcher) -> Self {
        Self {
            options,
            dispatcher,
        }
    }
}

impl Recognizer for SwipeRecognizer {
    fn options(&self) -> RecognizerOptions {
        RecognizerOptions::new()
            .with("min_velocity", self.options.min_velocity)
            .with("min_distance", self.options.min_distance)
    }

    fn on_end(&mut self, event: &InputEvent, pointer: &Pointer) {
        // NaN velocity (zero duration, no travel) fails the comparison.
        if pointer.velocity_x.abs() > self.options.min_velocity
            && pointer.distance_x.abs() > self.options.min_distance
        {
            let kind = if pointer.direction_x == HorizontalDirection::Left {
                GestureEventKind::SwipeLeft
            } else {
                GestureEventKind::SwipeRight
            };
            self.dispatcher.dispatch(kind, event, pointer);
        }
    }
}
