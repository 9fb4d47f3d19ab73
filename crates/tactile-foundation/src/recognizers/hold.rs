//! Long-press recognizer (opt-in).
//!
//! Fires `hold` once when the contact stays within `max_distance` of where the
//! hold timer was armed for `delay_ms`. Moving further re-arms the timer at the
//! new position. The timer is polled from the frame clock, so `hold` arrives on
//! the first frame after the delay has elapsed.

use crate::config::HoldOptions;
use crate::dispatch::{GestureDispatcher, GestureEventKind};
use crate::input::InputEvent;
use crate::pointer::Pointer;
use crate::recognizer::{GestureServices, Recognizer, RecognizerOptions};
use std::cell::RefCell;
use std::rc::Rc;
use tactile_core::{Clock, FrameCallbackRegistration, FrameClock, Point};

struct ArmedHold {
    since: u64,
    anchor: Point,
    pointer: Pointer,
    source: InputEvent,
}

struct HoldTimer {
    options: HoldOptions,
    clock: Rc<dyn Clock>,
    frame_clock: FrameClock,
    dispatcher: GestureDispatcher,
    armed: Option<ArmedHold>,
    triggered: bool,
    registration: Option<FrameCallbackRegistration>,
}

impl HoldTimer {
    fn clear(&mut self) {
        self.armed = None;
        self.triggered = false;
        self.registration = None;
    }
}

fn schedule(timer: &Rc<RefCell<HoldTimer>>) {
    let frame_clock = timer.borrow().frame_clock.clone();
    let weak = Rc::downgrade(timer);
    let registration = frame_clock.with_frame_millis(move |_| {
        if let Some(timer) = weak.upgrade() {
            poll(&timer);
        }
    });
    timer.borrow_mut().registration = Some(registration);
}

fn poll(timer: &Rc<RefCell<HoldTimer>>) {
    let mut state = timer.borrow_mut();
    state.registration = None;
    let Some(armed) = state.armed.take() else {
        return;
    };

    if state.clock.elapsed_millis(armed.since) < state.options.delay_ms {
        state.armed = Some(armed);
        drop(state);
        schedule(timer);
        return;
    }

    state.triggered = true;
    let dispatcher = state.dispatcher.clone();
    drop(state);
    dispatcher.dispatch(GestureEventKind::Hold, &armed.source, &armed.pointer);
}

pub struct HoldRecognizer {
    timer: Rc<RefCell<HoldTimer>>,
}

impl HoldRecognizer {
    pub fn new(options: HoldOptions, services: &GestureServices) -> Self {
        Self {
            timer: Rc::new(RefCell::new(HoldTimer {
                options,
                clock: Rc::clone(&services.clock),
                frame_clock: services.frame_clock.clone(),
                dispatcher: services.dispatcher.clone(),
                armed: None,
                triggered: false,
                registration: None,
            })),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.borrow().armed.is_some()
    }

    pub fn has_triggered(&self) -> bool {
        self.timer.borrow().triggered
    }

    fn arm(&self, event: &InputEvent, pointer: &Pointer) {
        let needs_frame = {
            let mut state = self.timer.borrow_mut();
            if state.triggered {
                return;
            }
            state.armed = Some(ArmedHold {
                since: state.clock.now_millis(),
                anchor: Point::new(pointer.x, pointer.y),
                pointer: *pointer,
                source: event.clone(),
            });
            state.registration.is_none()
        };
        if needs_frame {
            schedule(&self.timer);
        }
    }
}

impl Recognizer for HoldRecognizer {
    fn options(&self) -> RecognizerOptions {
        let options = self.timer.borrow().options;
        RecognizerOptions::new()
            .with("delay", options.delay_ms as f32)
            .with("max_distance", options.max_distance)
    }

    fn reset(&mut self) {
        self.timer.borrow_mut().clear();
    }

    fn observes_moves(&self) -> bool {
        true
    }

    fn on_start(&mut self, event: &InputEvent, pointer: &Pointer) {
        self.arm(event, pointer);
    }

    fn on_move(&mut self, event: &InputEvent, pointer: &Pointer) {
        let strayed = {
            let state = self.timer.borrow();
            match &state.armed {
                Some(armed) if !state.triggered => {
                    armed.anchor.distance_to(Point::new(pointer.x, pointer.y))
                        > state.options.max_distance
                }
                _ => false,
            }
        };
        if strayed {
            self.arm(event, pointer);
        }
    }

    fn on_end(&mut self, _event: &InputEvent, _pointer: &Pointer) {
        self.timer.borrow_mut().clear();
    }
}

impl std::fmt::Debug for HoldRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.timer.borrow();
        f.debug_struct("HoldRecognizer")
            .field("options", &state.options)
            .field("armed", &state.armed.is_some())
            .field("triggered", &state.triggered)
            .finish()
    }
}
