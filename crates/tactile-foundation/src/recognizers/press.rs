//! Press recognizer: raw contact down/up, regardless of movement.

use crate::dispatch::{GestureDispatcher, GestureEventKind};
use crate::input::InputEvent;
use crate::pointer::Pointer;
use crate::recognizer::Recognizer;

#[derive(Debug)]
pub struct PressRecognizer {
    dispatcher: GestureDispatcher,
}

impl PressRecognizer {
    pub fn new(dispatcher: GestureDispatcher) -> Self {
        Self { dispatcher }
    }
}

impl Recognizer for PressRecognizer {
    fn on_start(&mut self, event: &InputEvent, pointer: &Pointer) {
        self.dispatcher
            .dispatch(GestureEventKind::PressDown, event, pointer);
    }

    fn on_end(&mut self, event: &InputEvent, pointer: &Pointer) {
        self.dispatcher
            .dispatch(GestureEventKind::PressUp, event, pointer);
    }
}
