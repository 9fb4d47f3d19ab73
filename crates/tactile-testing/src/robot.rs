//! Robot-style driver for gesture tests
//!
//! The robot owns a [`GestureEngine`] wired to a [`ManualClock`] and a frame
//! clock it pumps by hand, and records every gesture the engine dispatches.
//! Tests script native input with it and assert on what came out.
//!
//! # Example
//!
//! ```
//! use tactile_foundation::GestureEventKind;
//! use tactile_testing::GestureRobot;
//!
//! let mut robot = GestureRobot::new();
//! robot.mouse_down(10.0, 10.0);
//! robot.advance_time(50);
//! robot.mouse_up(12.0, 10.0);
//!
//! assert_eq!(robot.count(GestureEventKind::Click), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use tactile_core::{Clock, FrameClock, ManualClock, Point};
use tactile_foundation::{
    Disposition, EventOrigin, GestureEngine, GestureError, GestureEvent, GestureEventKind,
    GestureProvider, InputEvent, InputEventType, TargetId, TouchPoint,
};

/// Milliseconds between two simulated display frames.
pub const FRAME_MILLIS: u64 = 16;

/// Target used until [`GestureRobot::on`] picks another.
pub const DEFAULT_TARGET: TargetId = 1;

/// Clock origin, far enough from zero that nothing looks like a fresh boot.
const START_MILLIS: u64 = 10_000;

pub struct GestureRobot {
    engine: GestureEngine,
    clock: ManualClock,
    frame_clock: FrameClock,
    recorded: Rc<RefCell<Vec<GestureEvent>>>,
    target: TargetId,
}

impl GestureRobot {
    /// A robot driving an engine with the built-in gestures.
    pub fn new() -> Self {
        match Self::with_provider(GestureProvider::new()) {
            Ok(robot) => robot,
            Err(err) => panic!("built-in gestures failed to build: {err}"),
        }
    }

    /// A robot driving the engine `provider` builds. The provider's clock and
    /// frame clock are replaced by the robot's own.
    pub fn with_provider(provider: GestureProvider) -> Result<Self, GestureError> {
        let clock = ManualClock::starting_at(START_MILLIS);
        let frame_clock = FrameClock::new();
        let engine = provider
            .with_clock(Rc::new(clock.clone()))
            .with_frame_clock(frame_clock.clone())
            .build()?;

        let recorded = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&recorded);
        engine.dispatcher().subscribe(move |event: &GestureEvent| {
            log::trace!("robot recorded {} on target {}", event.kind, event.target);
            sink.borrow_mut().push(event.clone());
        });

        Ok(Self {
            engine,
            clock,
            frame_clock,
            recorded,
            target: DEFAULT_TARGET,
        })
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GestureEngine {
        &mut self.engine
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn now(&self) -> u64 {
        self.clock.now_millis()
    }

    /// Sends subsequent input to `target`.
    pub fn on(&mut self, target: TargetId) -> &mut Self {
        self.target = target;
        self
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Hands `event` to the engine.
    pub fn send(&mut self, event: &InputEvent) -> Disposition {
        self.engine.handle_event(event)
    }

    fn send_at(&mut self, event_type: InputEventType, x: f32, y: f32) -> InputEvent {
        let event = InputEvent::new(event_type, self.target, Point::new(x, y));
        self.send(&event);
        event
    }

    fn send_touch(&mut self, event_type: InputEventType, x: f32, y: f32) -> InputEvent {
        let contact = TouchPoint::new(0, Point::new(x, y));
        let event = InputEvent::new(event_type, self.target, Point::ZERO);
        // Lifted contacts are only listed in `changed_touches`.
        let event = match event_type {
            InputEventType::TouchEnd | InputEventType::TouchCancel => {
                event.with_changed_touches(&[contact])
            }
            _ => event.with_touches(&[contact]),
        };
        self.send(&event);
        event
    }

    pub fn mouse_down(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_at(InputEventType::MouseDown, x, y)
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_at(InputEventType::MouseMove, x, y)
    }

    pub fn mouse_up(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_at(InputEventType::MouseUp, x, y)
    }

    pub fn mouse_leave(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_at(InputEventType::MouseLeave, x, y)
    }

    pub fn touch_start(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_touch(InputEventType::TouchStart, x, y)
    }

    pub fn touch_move(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_touch(InputEventType::TouchMove, x, y)
    }

    pub fn touch_end(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_touch(InputEventType::TouchEnd, x, y)
    }

    pub fn touch_cancel(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_touch(InputEventType::TouchCancel, x, y)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_at(InputEventType::PointerDown, x, y)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_at(InputEventType::PointerMove, x, y)
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_at(InputEventType::PointerUp, x, y)
    }

    pub fn pointer_cancel(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_at(InputEventType::PointerCancel, x, y)
    }

    /// Delivers a platform click. The returned event shows whether the engine
    /// prevented and stopped it.
    pub fn native_click(&mut self, x: f32, y: f32) -> InputEvent {
        self.send_at(InputEventType::Click, x, y)
    }

    /// Delivers a click tagged as engine-originated, as a re-dispatched gesture
    /// click would arrive back at the document.
    pub fn engine_click(&mut self, x: f32, y: f32) -> InputEvent {
        let event = InputEvent::new(InputEventType::Click, self.target, Point::new(x, y))
            .with_origin(EventOrigin::Engine);
        self.send(&event);
        event
    }

    pub fn reset_signal(&mut self) -> Disposition {
        self.send(&InputEvent::gesture_reset())
    }

    /// Moves the clock forward by `millis` without running any frame.
    pub fn advance_clock(&mut self, millis: u64) {
        self.clock.advance(millis);
    }

    /// Moves the clock forward by `millis`, running a frame every
    /// [`FRAME_MILLIS`] along the way.
    pub fn advance_time(&mut self, millis: u64) {
        let mut remaining = millis;
        while remaining >= FRAME_MILLIS {
            self.clock.advance(FRAME_MILLIS);
            self.advance_frame();
            remaining -= FRAME_MILLIS;
        }
        self.clock.advance(remaining);
    }

    /// Runs one frame at the current time. Returns how many callbacks ran.
    pub fn advance_frame(&mut self) -> usize {
        self.frame_clock.drain_frame(self.clock.now_millis())
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame_clock.has_pending_callbacks()
    }

    /// Runs frames until no callbacks are queued, or `max_frames` have run.
    /// Time moves [`FRAME_MILLIS`] per frame.
    pub fn wait_for_idle(&mut self, max_frames: usize) {
        for _ in 0..max_frames {
            if !self.has_pending_frame() {
                break;
            }
            self.clock.advance(FRAME_MILLIS);
            self.advance_frame();
        }
    }

    pub fn events(&self) -> Vec<GestureEvent> {
        self.recorded.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<GestureEventKind> {
        self.recorded.borrow().iter().map(|event| event.kind).collect()
    }

    pub fn count(&self, kind: GestureEventKind) -> usize {
        self.recorded
            .borrow()
            .iter()
            .filter(|event| event.kind == kind)
            .count()
    }

    pub fn last_event(&self, kind: GestureEventKind) -> Option<GestureEvent> {
        self.recorded
            .borrow()
            .iter()
            .rev()
            .find(|event| event.kind == kind)
            .cloned()
    }

    pub fn clear_events(&mut self) {
        self.recorded.borrow_mut().clear();
    }

    /// Mouse press at `from`, moves in `steps` equal increments to `to` with a
    /// frame between each, and release at `to`. Total time is `duration_ms`.
    pub fn mouse_drag(&mut self, from: Point, to: Point, steps: u32, duration_ms: u64) {
        self.mouse_down(from.x, from.y);
        self.stepped_moves(from, to, steps, duration_ms, Self::mouse_move);
        self.mouse_up(to.x, to.y);
    }

    /// Touch version of [`mouse_drag`](Self::mouse_drag).
    pub fn touch_drag(&mut self, from: Point, to: Point, steps: u32, duration_ms: u64) {
        self.touch_start(from.x, from.y);
        self.stepped_moves(from, to, steps, duration_ms, Self::touch_move);
        self.touch_end(to.x, to.y);
    }

    /// Touch down and lift at the same point after `hold_ms`.
    pub fn tap(&mut self, x: f32, y: f32, hold_ms: u64) {
        self.touch_start(x, y);
        self.advance_time(hold_ms);
        self.touch_end(x, y);
    }

    fn stepped_moves(
        &mut self,
        from: Point,
        to: Point,
        steps: u32,
        duration_ms: u64,
        mut send: impl FnMut(&mut Self, f32, f32) -> InputEvent,
    ) {
        let steps = steps.max(1);
        let step_ms = duration_ms / u64::from(steps);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            self.clock.advance(step_ms);
            send(self, x, y);
            self.advance_frame();
        }
    }
}

impl Default for GestureRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GestureRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRobot")
            .field("engine", &self.engine)
            .field("now", &self.clock.now_millis())
            .field("target", &self.target)
            .field("recorded", &self.kinds())
            .finish()
    }
}
