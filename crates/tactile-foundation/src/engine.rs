//! The gesture engine: unifies mouse, touch and pointer events into a single
//! tracked interaction and runs every registered recognizer over it.
//!
//! One engine tracks at most one interaction at a time. Hosts feed it every
//! native start/move/end event, every native click and the reset signal via
//! [`GestureEngine::handle_event`], and drive its frame clock once per display
//! frame.
//!
//! Recognizer hooks run without any panic barrier: a panicking hook unwinds
//! out of `handle_event` and later recognizers in that phase do not run.

use crate::config::GestureConfig;
use crate::dispatch::GestureDispatcher;
use crate::error::GestureError;
use crate::input::move_guard::{ArmedRecognizers, MoveGuards};
use crate::input::{
    InputEvent, InputEventType, InputFamily, MoveGuardRegistration, PointerKind, TargetId,
};
use crate::pointer::Pointer;
use crate::provider::is_valid_name;
use crate::recognizer::{GestureServices, Recognizer};
use crate::registry::GestureRegistry;
use std::fmt;
use tactile_core::FrameClock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Start,
    Move,
    End,
}

/// What the engine did with an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// A new interaction started.
    Started,
    /// The live interaction was updated.
    Moved,
    /// The live interaction ended.
    Ended,
    /// A native click was prevented and stopped.
    ClickSuppressed,
    /// An engine-originated click was let through.
    ClickAllowed,
    /// Pointer state was cleared.
    Reset,
    /// A start arrived while another interaction was live.
    IgnoredBusy,
    /// A start of a different kind arrived inside the suppression window.
    IgnoredDuplicate,
    /// A move or end arrived with no live interaction or of a different kind.
    IgnoredMismatch,
}

impl Disposition {
    pub fn is_ignored(self) -> bool {
        matches!(
            self,
            Disposition::IgnoredBusy | Disposition::IgnoredDuplicate | Disposition::IgnoredMismatch
        )
    }
}

pub struct GestureEngine {
    services: GestureServices,
    registry: GestureRegistry,
    guards: MoveGuards,
    pointer: Option<Pointer>,
    last_pointer: Option<Pointer>,
}

impl GestureEngine {
    pub(crate) fn new(services: GestureServices, registry: GestureRegistry) -> Self {
        log::debug!(
            "gesture engine ready with {} recognizer(s): {:?}",
            registry.len(),
            registry
        );
        Self {
            services,
            registry,
            guards: MoveGuards::default(),
            pointer: None,
            last_pointer: None,
        }
    }

    /// Routes a native event to the start, move, end, click or reset handler.
    pub fn handle_event(&mut self, event: &InputEvent) -> Disposition {
        match event.family() {
            InputFamily::Start => self.gesture_start(event),
            InputFamily::Move => {
                self.run_move_guards(event);
                self.gesture_move(event)
            }
            InputFamily::End => self.gesture_end(event),
            InputFamily::Click => {
                if self.suppress_native_click(event) {
                    Disposition::ClickSuppressed
                } else {
                    Disposition::ClickAllowed
                }
            }
            InputFamily::Reset => {
                self.reset();
                Disposition::Reset
            }
        }
    }

    /// Prevents and stops any click the engine did not synthesize itself.
    ///
    /// Returns `true` if the click was suppressed. Hosts run this ahead of all
    /// application click handlers (for a DOM, in the capture phase on the
    /// document).
    pub fn suppress_native_click(&self, event: &InputEvent) -> bool {
        if event.event_type != InputEventType::Click || event.is_engine_originated() {
            return false;
        }
        log::trace!("suppressing native click on target {}", event.target);
        event.prevent_default();
        event.stop_propagation();
        true
    }

    /// Forgets the live and the last interaction, and resets every recognizer.
    pub fn reset(&mut self) {
        log::debug!("gesture state reset");
        self.pointer = None;
        self.last_pointer = None;
        self.registry.reset_all();
    }

    /// Arms move prevention on `target` for the space-separated `gestures`.
    ///
    /// Only recognizers that observe moves are armed; unknown names are
    /// skipped. A host namespace such as `$md.` in front of a name is ignored,
    /// so `"$md.drag"` arms `drag`. While the returned registration is alive,
    /// touch moves on `target` have their default prevented whenever an armed
    /// recognizer asks for it.
    ///
    /// Guards match the event's target exactly. The engine knows nothing of
    /// element trees: a host whose moves can land on a descendant of `target`
    /// must report them with the registered ancestor as the event target.
    pub fn register(&self, target: TargetId, gestures: &str) -> MoveGuardRegistration {
        let mut armed = ArmedRecognizers::new();
        for name in gestures.split_whitespace().map(strip_host_namespace) {
            let Some(index) = self.registry.index_of(name) else {
                log::trace!("register: no gesture named {name:?}");
                continue;
            };
            let observes_moves = self
                .registry
                .get(name)
                .is_some_and(|recognizer| recognizer.observes_moves());
            if observes_moves && !armed.contains(&index) {
                armed.push(index);
            }
        }

        if armed.is_empty() {
            return MoveGuardRegistration::inactive();
        }
        log::debug!("arming move guard on target {target} for {gestures:?}");
        self.guards.arm(target, armed)
    }

    /// Registers a recognizer after the engine was built.
    ///
    /// The factory runs immediately. An existing name is replaced in place.
    /// Fails while an interaction is being tracked. This is the only way to
    /// change the recognizers of a built engine:
    ///
    /// ```compile_fail
    /// let mut engine = tactile_foundation::GestureProvider::new().build().unwrap();
    /// engine.registry_mut();
    /// ```
    pub fn add_recognizer(
        &mut self,
        name: impl Into<String>,
        factory: impl FnOnce(&GestureServices) -> Box<dyn Recognizer>,
    ) -> Result<&mut Self, GestureError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(GestureError::InvalidName { name });
        }
        if self.pointer.is_some() {
            log::warn!("rejected late registration of {name:?} during a live interaction");
            return Err(GestureError::InteractionInProgress { name });
        }

        log::debug!("registering gesture {name:?}");
        let recognizer = factory(&self.services);
        self.registry.insert(name, recognizer);
        Ok(self)
    }

    pub fn pointer(&self) -> Option<&Pointer> {
        self.pointer.as_ref()
    }

    pub fn last_pointer(&self) -> Option<&Pointer> {
        self.last_pointer.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn registry(&self) -> &GestureRegistry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &GestureDispatcher {
        &self.services.dispatcher
    }

    pub fn frame_clock(&self) -> &FrameClock {
        &self.services.frame_clock
    }

    pub fn config(&self) -> &GestureConfig {
        &self.services.config
    }

    pub fn services(&self) -> &GestureServices {
        &self.services
    }

    pub fn armed_guards(&self) -> usize {
        self.guards.len()
    }

    fn now(&self) -> u64 {
        self.services.clock.now_millis()
    }

    fn gesture_start(&mut self, event: &InputEvent) -> Disposition {
        let Some(kind) = event.pointer_kind() else {
            return Disposition::IgnoredMismatch;
        };
        if self.pointer.is_some() {
            log::trace!("{} ignored: an interaction is already live", event.event_type);
            return Disposition::IgnoredBusy;
        }

        let now = self.now();
        if self.is_duplicate_start(kind, now) {
            log::trace!(
                "{} ignored: inside the {}ms window after a different kind",
                event.event_type,
                self.services.config.suppression_window_ms
            );
            return Disposition::IgnoredDuplicate;
        }

        log::debug!("{kind:?} interaction started on target {}", event.target);
        self.pointer = Some(Pointer::start(kind, event, now));
        self.run_callbacks(Phase::Start, event);
        Disposition::Started
    }

    fn is_duplicate_start(&self, kind: PointerKind, now: u64) -> bool {
        let Some(last) = self.last_pointer.as_ref() else {
            return false;
        };
        last.kind != kind
            && last.end_time.is_some_and(|end| {
                now.saturating_sub(end) < self.services.config.suppression_window_ms
            })
    }

    fn gesture_move(&mut self, event: &InputEvent) -> Disposition {
        let now = self.now();
        let Some(pointer) = self.live_pointer_for(event) else {
            return Disposition::IgnoredMismatch;
        };
        pointer.update(event, now);
        self.run_callbacks(Phase::Move, event);
        Disposition::Moved
    }

    fn gesture_end(&mut self, event: &InputEvent) -> Disposition {
        let now = self.now();
        let Some(pointer) = self.live_pointer_for(event) else {
            return Disposition::IgnoredMismatch;
        };
        pointer.update(event, now);
        pointer.finish(now);
        self.run_callbacks(Phase::End, event);

        self.last_pointer = self.pointer.take();
        if let Some(last) = &self.last_pointer {
            log::debug!(
                "{:?} interaction ended after {}ms, travelled {:.1}px",
                last.kind,
                last.duration,
                last.distance
            );
        }
        Disposition::Ended
    }

    fn live_pointer_for(&mut self, event: &InputEvent) -> Option<&mut Pointer> {
        let kind = event.pointer_kind();
        match self.pointer.as_mut() {
            Some(pointer) if Some(pointer.kind) == kind => Some(pointer),
            Some(_) => {
                log::trace!("{} ignored: kind differs from live interaction", event.event_type);
                None
            }
            None => None,
        }
    }

    /// Runs one lifecycle phase on every recognizer, in registration order,
    /// with the same pointer snapshot.
    fn run_callbacks(&mut self, phase: Phase, event: &InputEvent) {
        let Some(pointer) = self.pointer else {
            return;
        };
        if phase == Phase::Start {
            self.registry.reset_all();
        }
        for recognizer in self.registry.iter_mut() {
            match phase {
                Phase::Start => recognizer.on_start(event, &pointer),
                Phase::Move => recognizer.on_move(event, &pointer),
                Phase::End => recognizer.on_end(event, &pointer),
            }
        }
    }

    /// Consults the guards armed on the event's target. Runs before the move
    /// is applied, so recognizers judge the pointer as of the previous event.
    fn run_move_guards(&mut self, event: &InputEvent) {
        if event.event_type != InputEventType::TouchMove {
            return;
        }
        let Some(pointer) = self.pointer else {
            return;
        };

        let table = self.guards.table();
        let mut prevent = false;
        for armed in table.for_target(event.target) {
            let wants_prevent = armed.iter().any(|&index| {
                self.registry
                    .get_index_mut(index)
                    .is_some_and(|recognizer| recognizer.should_prevent_move(event, &pointer))
            });
            prevent |= wants_prevent;
        }
        drop(table);

        if prevent {
            event.prevent_default();
        }
    }
}

/// Drops a leading `$namespace.` from a registered gesture name.
fn strip_host_namespace(name: &str) -> &str {
    match name.strip_prefix('$').and_then(|rest| rest.split_once('.')) {
        Some((_, gesture)) if !gesture.is_empty() => gesture,
        _ => name,
    }
}

impl fmt::Debug for GestureEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureEngine")
            .field("registry", &self.registry)
            .field("pointer", &self.pointer)
            .field("last_pointer", &self.last_pointer)
            .field("armed_guards", &self.guards.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
