//! Core runtime services for the Tactile gesture engine.
//!
//! Everything here is single-threaded and host-driven: the host owns the event
//! loop, tells the [`FrameClock`] when a display frame happens and supplies a
//! [`Clock`] for timestamps. Nothing in this crate spawns threads or blocks.

pub mod frame_clock;
pub mod geometry;
pub mod platform;
pub mod throttle;

pub use frame_clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock};
pub use geometry::Point;
pub use platform::{Clock, FrameScheduler, ManualClock, SystemClock};
pub use throttle::Throttle;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::geometry::Point;
    pub use crate::platform::{Clock, FrameScheduler, ManualClock, SystemClock};
    pub use crate::throttle::Throttle;
}
