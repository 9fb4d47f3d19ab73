//! Host-driven frame clock.
//!
//! Callbacks registered with [`FrameClock::with_frame_millis`] run once, on the
//! next call to [`FrameClock::drain_frame`]. The host calls `drain_frame` once
//! per display refresh (a `requestAnimationFrame` tick, a winit redraw, or a
//! test pumping frames by hand).

use crate::platform::FrameScheduler;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;

#[derive(Default)]
struct FrameClockState {
    next_id: FrameCallbackId,
    callbacks: SmallVec<[(FrameCallbackId, FrameCallback); 4]>,
    scheduler: Option<Rc<dyn FrameScheduler>>,
    frame_requested: bool,
}

#[derive(Clone, Default)]
pub struct FrameClock {
    state: Rc<RefCell<FrameClockState>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock that asks `scheduler` for a frame whenever work is queued.
    pub fn with_scheduler(scheduler: Rc<dyn FrameScheduler>) -> Self {
        let clock = Self::new();
        clock.state.borrow_mut().scheduler = Some(scheduler);
        clock
    }

    /// Registers `callback` for the next frame.
    ///
    /// The callback is cancelled when the returned registration is dropped, so
    /// callers keep it alive until the frame fires.
    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let (id, scheduler) = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.callbacks.push((id, Box::new(callback)));
            let scheduler = if state.frame_requested {
                None
            } else {
                state.frame_requested = true;
                state.scheduler.clone()
            };
            (id, scheduler)
        };

        if let Some(scheduler) = scheduler {
            scheduler.schedule_frame();
        }

        FrameCallbackRegistration::new(Rc::downgrade(&self.state), id)
    }

    pub fn has_pending_callbacks(&self) -> bool {
        !self.state.borrow().callbacks.is_empty()
    }

    pub fn pending_callbacks(&self) -> usize {
        self.state.borrow().callbacks.len()
    }

    /// Runs every callback queued before this call and returns how many ran.
    ///
    /// Callbacks registered while the frame is running wait for the next frame.
    pub fn drain_frame(&self, frame_time_millis: u64) -> usize {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            state.frame_requested = false;
            std::mem::take(&mut state.callbacks)
        };

        let count = callbacks.len();
        if count > 0 {
            log::trace!("frame at {frame_time_millis}ms runs {count} callback(s)");
        }
        for (_, callback) in callbacks {
            callback(frame_time_millis);
        }
        count
    }
}

impl fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FrameClock")
            .field("pending", &state.callbacks.len())
            .field("frame_requested", &state.frame_requested)
            .finish()
    }
}

fn cancel(state: &RefCell<FrameClockState>, id: FrameCallbackId) {
    state
        .borrow_mut()
        .callbacks
        .retain(|(callback_id, _)| *callback_id != id);
}

#[derive(Debug)]
pub struct FrameCallbackRegistration {
    state: Weak<RefCell<FrameClockState>>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(state: Weak<RefCell<FrameClockState>>, id: FrameCallbackId) -> Self {
        Self {
            state,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<FrameCallbackId> {
        self.id
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(state) = self.state.upgrade() {
                cancel(&state, id);
            }
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.release();
    }
}
