//! Testing utilities and harness for Tactile

pub mod robot;
pub mod robot_assertions;

pub use robot::*;
pub use tactile_core::ManualClock;

pub mod prelude {
    pub use crate::robot::*;
    pub use crate::robot_assertions;
    pub use tactile_core::{ManualClock, Point};
    pub use tactile_foundation::prelude::*;
}
