use crate::error::GestureError;
use smallvec::SmallVec;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tactile_core::Point;

/// Identifies the element an event was fired on. Hosts map their own node or
/// element handles onto this.
pub type TargetId = u64;

pub type PointerId = u64;

/// Input modality of an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
    /// Pointer Events (`pointerdown` and friends): pen, stylus or any device
    /// the platform reports through the unified pointer API.
    Pen,
}

impl PointerKind {
    /// Derives the kind from the first character of a native event type name
    /// (`mousedown` → mouse, `touchmove` → touch, `pointerup` → pen).
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name.as_bytes().first() {
            Some(b'm') => Some(PointerKind::Mouse),
            Some(b't') => Some(PointerKind::Touch),
            Some(b'p') => Some(PointerKind::Pen),
            _ => None,
        }
    }
}

/// Which part of the unifier an event type feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFamily {
    Start,
    Move,
    End,
    Click,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEventType {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Click,
    /// Clears all tracked pointer state. Sent by test harnesses between cases.
    GestureReset,
}

impl InputEventType {
    pub const ALL: [InputEventType; 14] = [
        InputEventType::MouseDown,
        InputEventType::MouseMove,
        InputEventType::MouseUp,
        InputEventType::MouseLeave,
        InputEventType::TouchStart,
        InputEventType::TouchMove,
        InputEventType::TouchEnd,
        InputEventType::TouchCancel,
        InputEventType::PointerDown,
        InputEventType::PointerMove,
        InputEventType::PointerUp,
        InputEventType::PointerCancel,
        InputEventType::Click,
        InputEventType::GestureReset,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            InputEventType::MouseDown => "mousedown",
            InputEventType::MouseMove => "mousemove",
            InputEventType::MouseUp => "mouseup",
            InputEventType::MouseLeave => "mouseleave",
            InputEventType::TouchStart => "touchstart",
            InputEventType::TouchMove => "touchmove",
            InputEventType::TouchEnd => "touchend",
            InputEventType::TouchCancel => "touchcancel",
            InputEventType::PointerDown => "pointerdown",
            InputEventType::PointerMove => "pointermove",
            InputEventType::PointerUp => "pointerup",
            InputEventType::PointerCancel => "pointercancel",
            InputEventType::Click => "click",
            InputEventType::GestureReset => "gesturereset",
        }
    }

    pub const fn family(self) -> InputFamily {
        match self {
            InputEventType::MouseDown | InputEventType::TouchStart | InputEventType::PointerDown => {
                InputFamily::Start
            }
            InputEventType::MouseMove | InputEventType::TouchMove | InputEventType::PointerMove => {
                InputFamily::Move
            }
            InputEventType::MouseUp
            | InputEventType::MouseLeave
            | InputEventType::TouchEnd
            | InputEventType::TouchCancel
            | InputEventType::PointerUp
            | InputEventType::PointerCancel => InputFamily::End,
            InputEventType::Click => InputFamily::Click,
            InputEventType::GestureReset => InputFamily::Reset,
        }
    }

    /// Pointer kind of start/move/end events; `None` for clicks and resets.
    pub fn pointer_kind(self) -> Option<PointerKind> {
        match self.family() {
            InputFamily::Start | InputFamily::Move | InputFamily::End => {
                PointerKind::from_event_name(self.name())
            }
            InputFamily::Click | InputFamily::Reset => None,
        }
    }
}

impl fmt::Display for InputEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputEventType {
    type Err = GestureError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        InputEventType::ALL
            .iter()
            .copied()
            .find(|event_type| event_type.name() == name)
            .ok_or_else(|| GestureError::UnknownEventType {
                name: name.to_owned(),
            })
    }
}

/// Who produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EventOrigin {
    /// Delivered by the platform.
    #[default]
    Native,
    /// Synthesized by the gesture engine.
    Engine,
}

/// One contact point of a touch event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub identifier: PointerId,
    pub page: Point,
}

impl TouchPoint {
    pub const fn new(identifier: PointerId, page: Point) -> Self {
        Self { identifier, page }
    }
}

#[derive(Debug, Default)]
struct EventFlags {
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

/// Native input event as handed to the engine by the host.
///
/// Prevention flags are shared via `Rc<Cell>` so that every clone of an event
/// (including the copies carried inside gesture events) observes the same
/// `prevent_default`/`stop_propagation` state as the host's original.
#[derive(Clone, Debug)]
pub struct InputEvent {
    pub event_type: InputEventType,
    pub target: TargetId,
    pub page: Point,
    /// Contacts currently on the surface. Empty on `touchend`.
    pub touches: SmallVec<[TouchPoint; 2]>,
    /// Contacts that changed in this event.
    pub changed_touches: SmallVec<[TouchPoint; 2]>,
    pub origin: EventOrigin,
    flags: Rc<EventFlags>,
}

impl InputEvent {
    pub fn new(event_type: InputEventType, target: TargetId, page: Point) -> Self {
        Self {
            event_type,
            target,
            page,
            touches: SmallVec::new(),
            changed_touches: SmallVec::new(),
            origin: EventOrigin::Native,
            flags: Rc::new(EventFlags::default()),
        }
    }

    /// Parses `name` as a native event type name such as `"touchstart"`.
    pub fn parse(name: &str, target: TargetId, page: Point) -> Result<Self, GestureError> {
        Ok(Self::new(name.parse()?, target, page))
    }

    /// The reset signal understood by [`GestureEngine::handle_event`](crate::GestureEngine::handle_event).
    pub fn gesture_reset() -> Self {
        Self::new(InputEventType::GestureReset, 0, Point::ZERO)
    }

    pub fn with_touches(mut self, touches: &[TouchPoint]) -> Self {
        self.touches = SmallVec::from_slice(touches);
        self
    }

    pub fn with_changed_touches(mut self, touches: &[TouchPoint]) -> Self {
        self.changed_touches = SmallVec::from_slice(touches);
        self
    }

    pub fn with_origin(mut self, origin: EventOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn family(&self) -> InputFamily {
        self.event_type.family()
    }

    pub fn pointer_kind(&self) -> Option<PointerKind> {
        self.event_type.pointer_kind()
    }

    /// Page coordinates of the contact this event describes: the first active
    /// touch, else the first changed touch, else the event's own position.
    pub fn point(&self) -> Point {
        self.touches
            .first()
            .or_else(|| self.changed_touches.first())
            .map_or(self.page, |touch| touch.page)
    }

    pub fn is_engine_originated(&self) -> bool {
        self.origin == EventOrigin::Engine
    }

    pub fn prevent_default(&self) {
        self.flags.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.flags.default_prevented.get()
    }

    pub fn stop_propagation(&self) {
        self.flags.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.flags.propagation_stopped.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_comes_from_first_letter_of_type_name() {
        assert_eq!(PointerKind::from_event_name("mousedown"), Some(PointerKind::Mouse));
        assert_eq!(PointerKind::from_event_name("mouseleave"), Some(PointerKind::Mouse));
        assert_eq!(PointerKind::from_event_name("touchcancel"), Some(PointerKind::Touch));
        assert_eq!(PointerKind::from_event_name("pointermove"), Some(PointerKind::Pen));
        assert_eq!(PointerKind::from_event_name(""), None);

        assert_eq!(InputEventType::TouchEnd.pointer_kind(), Some(PointerKind::Touch));
        assert_eq!(InputEventType::Click.pointer_kind(), None);
        assert_eq!(InputEventType::GestureReset.pointer_kind(), None);
    }

    #[test]
    fn families_cover_original_event_sets() {
        let starts: Vec<_> = InputEventType::ALL
            .iter()
            .filter(|t| t.family() == InputFamily::Start)
            .map(|t| t.name())
            .collect();
        assert_eq!(starts, ["mousedown", "touchstart", "pointerdown"]);

        let ends: Vec<_> = InputEventType::ALL
            .iter()
            .filter(|t| t.family() == InputFamily::End)
            .map(|t| t.name())
            .collect();
        assert_eq!(
            ends,
            ["mouseup", "mouseleave", "touchend", "touchcancel", "pointerup", "pointercancel"]
        );
    }

    #[test]
    fn parses_every_type_name() {
        for event_type in InputEventType::ALL {
            assert_eq!(event_type.name().parse::<InputEventType>(), Ok(event_type));
        }
        assert_eq!(
            "wheel".parse::<InputEventType>(),
            Err(GestureError::UnknownEventType {
                name: "wheel".into()
            })
        );
    }

    #[test]
    fn point_prefers_touches_then_changed_touches() {
        let page = Point::new(1.0, 1.0);
        let active = TouchPoint::new(0, Point::new(10.0, 20.0));
        let lifted = TouchPoint::new(0, Point::new(30.0, 40.0));

        let mouse = InputEvent::new(InputEventType::MouseMove, 1, page);
        assert_eq!(mouse.point(), page);

        let moving = InputEvent::new(InputEventType::TouchMove, 1, page)
            .with_touches(&[active])
            .with_changed_touches(&[lifted]);
        assert_eq!(moving.point(), active.page);

        let ended = InputEvent::new(InputEventType::TouchEnd, 1, page).with_changed_touches(&[lifted]);
        assert_eq!(ended.point(), lifted.page);
    }

    #[test]
    fn prevention_flags_are_shared_between_clones() {
        let event = InputEvent::new(InputEventType::Click, 3, Point::ZERO);
        let copy = event.clone();

        copy.prevent_default();
        copy.stop_propagation();

        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
    }
}
