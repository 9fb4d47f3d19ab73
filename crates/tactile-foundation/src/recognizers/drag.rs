//! Horizontal drag recognizer.
//!
//! A drag is pending until the contact travels more than `min_distance`
//! horizontally. Vertical travel past the same distance before that cancels
//! the drag for the rest of the interaction, leaving the gesture to page
//! scrolling. Once recognized, the drag keeps its own pointer anchored where it
//! was recognized rather than where the contact went down, and `drag` events
//! are emitted at most once per frame. Like every gesture, drag events go to
//! the target the interaction started on.

use crate::config::DragOptions;
use crate::dispatch::{GestureDispatcher, GestureEventKind};
use crate::input::InputEvent;
use crate::pointer::Pointer;
use crate::recognizer::{GestureServices, Recognizer, RecognizerOptions};
use std::cell::RefCell;
use std::rc::Rc;
use tactile_core::{Clock, Throttle};

#[derive(Debug, Default)]
struct DragProgress {
    pointer: Option<Pointer>,
    cancelled: bool,
}

pub struct DragRecognizer {
    options: DragOptions,
    progress: Rc<RefCell<DragProgress>>,
    clock: Rc<dyn Clock>,
    dispatcher: GestureDispatcher,
    dispatch_move: Throttle<InputEvent>,
}

impl DragRecognizer {
    pub fn new(options: DragOptions, services: &GestureServices) -> Self {
        let progress = Rc::new(RefCell::new(DragProgress::default()));

        let dispatch_move = {
            let progress = Rc::clone(&progress);
            let clock = Rc::clone(&services.clock);
            let dispatcher = services.dispatcher.clone();
            Throttle::new(services.frame_clock.clone(), move |event: InputEvent| {
                let snapshot = {
                    let mut progress = progress.borrow_mut();
                    let Some(pointer) = progress.pointer.as_mut() else {
                        return;
                    };
                    pointer.update(&event, clock.now_millis());
                    *pointer
                };
                dispatcher.dispatch(GestureEventKind::Drag, &event, &snapshot);
            })
        };

        Self {
            options,
            progress,
            clock: Rc::clone(&services.clock),
            dispatcher: services.dispatcher.clone(),
            dispatch_move,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.progress.borrow().pointer.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.progress.borrow().cancelled
    }
}

impl Recognizer for DragRecognizer {
    fn options(&self) -> RecognizerOptions {
        RecognizerOptions::new().with("min_distance", self.options.min_distance)
    }

    fn reset(&mut self) {
        *self.progress.borrow_mut() = DragProgress::default();
        self.dispatch_move.cancel();
    }

    fn observes_moves(&self) -> bool {
        true
    }

    fn should_prevent_move(&mut self, _event: &InputEvent, pointer: &Pointer) -> bool {
        let mut progress = self.progress.borrow_mut();
        if progress.pointer.is_some() {
            return true;
        }
        if pointer.distance_y.abs() > self.options.min_distance {
            log::trace!("drag cancelled by vertical travel of {}", pointer.distance_y);
            progress.cancelled = true;
            return false;
        }
        true
    }

    fn on_move(&mut self, event: &InputEvent, pointer: &Pointer) {
        let started = {
            let mut progress = self.progress.borrow_mut();
            if progress.cancelled {
                return;
            }
            if progress.pointer.is_some() {
                None
            } else if pointer.distance_x.abs() > self.options.min_distance {
                let now = self.clock.now_millis();
                let mut drag_pointer = Pointer::start(pointer.kind, event, now);
                drag_pointer.target = pointer.target;
                drag_pointer.update(event, now);
                progress.pointer = Some(drag_pointer);
                Some(drag_pointer)
            } else {
                return;
            }
        };

        match started {
            Some(drag_pointer) => {
                self.dispatcher
                    .dispatch(GestureEventKind::DragStart, event, &drag_pointer);
            }
            None => self.dispatch_move.call(event.clone()),
        }
    }

    fn on_end(&mut self, event: &InputEvent, _pointer: &Pointer) {
        let finished = {
            let mut progress = self.progress.borrow_mut();
            if progress.cancelled {
                return;
            }
            progress.pointer.take().map(|mut drag_pointer| {
                drag_pointer.update(event, self.clock.now_millis());
                drag_pointer
            })
        };

        if let Some(drag_pointer) = finished {
            self.dispatch_move.cancel();
            self.dispatcher
                .dispatch(GestureEventKind::DragEnd, event, &drag_pointer);
        }
    }
}

impl std::fmt::Debug for DragRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragRecognizer")
            .field("options", &self.options)
            .field("progress", &*self.progress.borrow())
            .field("dispatch_move", &self.dispatch_move)
            .finish()
    }
}
