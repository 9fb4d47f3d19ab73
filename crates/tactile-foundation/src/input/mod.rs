pub mod move_guard;
pub mod types;

pub use move_guard::{GuardId, MoveGuardRegistration};
pub use types::{
    EventOrigin, InputEvent, InputEventType, InputFamily, PointerId, PointerKind, TargetId,
    TouchPoint,
};

pub mod prelude {
    pub use super::types::{
        EventOrigin, InputEvent, InputEventType, InputFamily, PointerKind, TargetId, TouchPoint,
    };
}
