//! Platform abstraction traits for Tactile runtime services.
//!
//! These traits allow the engine to delegate frame scheduling and clock
//! responsibilities to the host, so the same engine runs inside a browser
//! event loop, a native window or a test harness.

use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

/// Requests display frames from the host.
///
/// The frame clock calls this once when its first callback for an upcoming
/// frame is registered. The host answers by calling
/// [`FrameClock::drain_frame`](crate::FrameClock::drain_frame) on its next
/// display refresh.
pub trait FrameScheduler {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the engine.
pub trait Clock {
    /// Returns the current time in milliseconds from a fixed, clock-specific origin.
    fn now_millis(&self) -> u64;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: u64) -> u64 {
        self.now_millis().saturating_sub(since)
    }
}

/// Monotonic wall clock. Times are measured from the moment it was created.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock whose time only moves when told to.
///
/// Clones share the same time source, so a harness can keep one handle and
/// give another to the engine. Used for trace replay and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(millis: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(millis)),
        }
    }

    pub fn set(&self, millis: u64) {
        self.now.set(millis);
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}
