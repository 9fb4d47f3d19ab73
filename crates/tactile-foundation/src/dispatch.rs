//! Delivery of recognized gestures to listeners.
//!
//! [`GestureDispatcher::dispatch`] is the only way recognizer results leave the
//! engine. Every event is addressed to the target the interaction started on
//! and tagged [`EventOrigin::Engine`], so the engine's own click suppressor lets
//! it through.

use crate::input::{EventOrigin, InputEvent, TargetId};
use crate::pointer::Pointer;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tactile_core::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureEventKind {
    /// Re-synthesized click, positioned at the pointer's final location.
    Click,
    PressDown,
    PressUp,
    DragStart,
    Drag,
    DragEnd,
    SwipeLeft,
    SwipeRight,
    Hold,
}

impl GestureEventKind {
    pub const fn name(self) -> &'static str {
        match self {
            GestureEventKind::Click => "click",
            GestureEventKind::PressDown => "pressdown",
            GestureEventKind::PressUp => "pressup",
            GestureEventKind::DragStart => "dragstart",
            GestureEventKind::Drag => "drag",
            GestureEventKind::DragEnd => "dragend",
            GestureEventKind::SwipeLeft => "swipeleft",
            GestureEventKind::SwipeRight => "swiperight",
            GestureEventKind::Hold => "hold",
        }
    }
}

impl fmt::Display for GestureEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug)]
pub struct GestureEvent {
    pub kind: GestureEventKind,
    pub target: TargetId,
    pub origin: EventOrigin,
    pub position: Point,
    /// Pointer state at dispatch time. Drag events carry the drag's own
    /// pointer, anchored where the drag was recognized.
    pub pointer: Pointer,
    /// Native event that triggered the dispatch.
    pub source: InputEvent,
}

impl GestureEvent {
    pub fn is_engine_originated(&self) -> bool {
        self.origin == EventOrigin::Engine
    }
}

pub type ListenerId = u64;

type Listener = Rc<RefCell<dyn FnMut(&GestureEvent)>>;

#[derive(Default)]
struct DispatcherState {
    next_id: ListenerId,
    listeners: SmallVec<[(ListenerId, Listener); 4]>,
}

/// Shared fan-out point for gesture events.
///
/// Clones share their listener list. Listeners may subscribe or unsubscribe
/// while an event is being delivered; the change applies to the next event.
/// A listener may also dispatch through a clone: the nested event reaches
/// every other listener but not the one still running.
#[derive(Clone, Default)]
pub struct GestureDispatcher {
    state: Rc<RefCell<DispatcherState>>,
}

impl GestureDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl FnMut(&GestureEvent) + 'static) -> ListenerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        let listener: Listener = Rc::new(RefCell::new(listener));
        state.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(listener_id, _)| *listener_id != id);
        state.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Fires `kind` at `pointer.target` carrying `pointer` and `source`.
    pub fn dispatch(&self, kind: GestureEventKind, source: &InputEvent, pointer: &Pointer) {
        let event = GestureEvent {
            kind,
            target: pointer.target,
            origin: EventOrigin::Engine,
            position: Point::new(pointer.x, pointer.y),
            pointer: *pointer,
            source: source.clone(),
        };
        log::trace!("dispatching {kind} to target {}", event.target);

        let listeners: SmallVec<[Listener; 4]> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            // A listener that dispatches again is not re-entered.
            let Ok(mut listener) = listener.try_borrow_mut() else {
                log::trace!("skipping busy listener for nested {kind}");
                continue;
            };
            (&mut *listener)(&event);
        }
    }
}

impl fmt::Debug for GestureDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureDispatcher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEventType, PointerKind};

    fn pointer_at(target: TargetId, x: f32, y: f32) -> (InputEvent, Pointer) {
        let event = InputEvent::new(InputEventType::MouseUp, target, Point::new(x, y));
        let pointer = Pointer::start(PointerKind::Mouse, &event, 0);
        (event, pointer)
    }

    #[test]
    fn dispatch_reaches_every_listener_in_subscription_order() {
        let dispatcher = GestureDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            dispatcher.subscribe(move |event| log.borrow_mut().push((name, event.kind)));
        }

        let (event, pointer) = pointer_at(4, 1.0, 2.0);
        dispatcher.dispatch(GestureEventKind::PressUp, &event, &pointer);

        assert_eq!(
            log.borrow().as_slice(),
            &[
                ("first", GestureEventKind::PressUp),
                ("second", GestureEventKind::PressUp)
            ]
        );
    }

    #[test]
    fn events_are_engine_tagged_and_targeted() {
        let dispatcher = GestureDispatcher::new();
        let seen = Rc::new(RefCell::new(None));
        {
            let seen = Rc::clone(&seen);
            dispatcher.subscribe(move |event: &GestureEvent| {
                seen.borrow_mut().replace(event.clone());
            });
        }

        let (event, pointer) = pointer_at(9, 5.0, 6.0);
        dispatcher.dispatch(GestureEventKind::Click, &event, &pointer);

        let seen = seen.borrow();
        let delivered = seen.as_ref().expect("listener called");
        assert!(delivered.is_engine_originated());
        assert_eq!(delivered.target, 9);
        assert_eq!(delivered.position, Point::new(5.0, 6.0));
        assert_eq!(delivered.source.event_type, InputEventType::MouseUp);
    }

    #[test]
    fn unsubscribed_listener_is_skipped() {
        let dispatcher = GestureDispatcher::new();
        let count = Rc::new(RefCell::new(0));
        let id = {
            let count = Rc::clone(&count);
            dispatcher.subscribe(move |_| *count.borrow_mut() += 1)
        };

        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        assert_eq!(dispatcher.listener_count(), 0);

        let (event, pointer) = pointer_at(1, 0.0, 0.0);
        dispatcher.dispatch(GestureEventKind::Drag, &event, &pointer);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn listener_may_subscribe_during_dispatch() {
        let dispatcher = GestureDispatcher::new();
        let late_calls = Rc::new(RefCell::new(0));
        {
            let handle = dispatcher.clone();
            let late_calls = Rc::clone(&late_calls);
            let mut subscribed = false;
            dispatcher.subscribe(move |_| {
                if !subscribed {
                    subscribed = true;
                    let late_calls = Rc::clone(&late_calls);
                    handle.subscribe(move |_| *late_calls.borrow_mut() += 1);
                }
            });
        }

        let (event, pointer) = pointer_at(1, 0.0, 0.0);
        dispatcher.dispatch(GestureEventKind::PressDown, &event, &pointer);
        assert_eq!(*late_calls.borrow(), 0);

        dispatcher.dispatch(GestureEventKind::PressUp, &event, &pointer);
        assert_eq!(*late_calls.borrow(), 1);
    }

    #[test]
    fn nested_dispatch_skips_the_running_listener() {
        let dispatcher = GestureDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let handle = dispatcher.clone();
            let log = Rc::clone(&log);
            dispatcher.subscribe(move |event: &GestureEvent| {
                log.borrow_mut().push(("outer", event.kind));
                if event.kind == GestureEventKind::PressDown {
                    handle.dispatch(GestureEventKind::Hold, &event.source, &event.pointer);
                }
            });
        }
        {
            let log = Rc::clone(&log);
            dispatcher.subscribe(move |event: &GestureEvent| {
                log.borrow_mut().push(("inner", event.kind));
            });
        }

        let (event, pointer) = pointer_at(3, 0.0, 0.0);
        dispatcher.dispatch(GestureEventKind::PressDown, &event, &pointer);

        assert_eq!(
            log.borrow().as_slice(),
            &[
                ("outer", GestureEventKind::PressDown),
                ("inner", GestureEventKind::Hold),
                ("inner", GestureEventKind::PressDown),
            ]
        );
    }
}
