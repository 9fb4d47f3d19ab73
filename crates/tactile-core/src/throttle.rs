//! Per-frame throttling for high-frequency callbacks.
//!
//! A [`Throttle`] coalesces calls made between two display frames into a
//! single invocation that sees the arguments of the last call. Window resizes
//! or pointer moves arriving several times per frame are handled at most once
//! per frame, always with the newest input.

use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct ThrottleInner<T> {
    clock: FrameClock,
    latest: RefCell<Option<T>>,
    callback: RefCell<Box<dyn FnMut(T)>>,
    registration: RefCell<Option<FrameCallbackRegistration>>,
}

impl<T> ThrottleInner<T> {
    fn fire(&self) {
        // The clock already dropped its copy of the callback, so this cancel is a no-op.
        self.registration.borrow_mut().take();

        let Some(args) = self.latest.borrow_mut().take() else {
            return;
        };
        let mut callback = self.callback.borrow_mut();
        (&mut *callback)(args);
    }
}

/// Wraps a callback so it runs at most once per frame with the latest arguments.
pub struct Throttle<T: 'static> {
    inner: Rc<ThrottleInner<T>>,
}

impl<T: 'static> Throttle<T> {
    pub fn new(clock: FrameClock, callback: impl FnMut(T) + 'static) -> Self {
        Self {
            inner: Rc::new(ThrottleInner {
                clock,
                latest: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                registration: RefCell::new(None),
            }),
        }
    }

    /// Records `args` and makes sure a frame callback is queued.
    ///
    /// Calling again before the frame replaces the recorded arguments.
    /// Calls made from inside the callback are queued for the following frame.
    pub fn call(&self, args: T) {
        *self.inner.latest.borrow_mut() = Some(args);
        if self.inner.registration.borrow().is_some() {
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        let registration = self.inner.clock.with_frame_millis(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.fire();
            }
        });
        *self.inner.registration.borrow_mut() = Some(registration);
    }

    pub fn is_pending(&self) -> bool {
        self.inner.registration.borrow().is_some()
    }

    /// Drops the recorded arguments and the queued frame callback, if any.
    pub fn cancel(&self) {
        self.inner.registration.borrow_mut().take();
        self.inner.latest.borrow_mut().take();
    }
}

impl<T: 'static> Clone for Throttle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> fmt::Debug for Throttle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/throttle_tests.rs"]
mod tests;
