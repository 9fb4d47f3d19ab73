//! Assertion utilities for robot testing
//!
//! Helpers for checking what a [`GestureRobot`](crate::GestureRobot) recorded.

use crate::robot::GestureRobot;
use tactile_foundation::{GestureEventKind, Pointer};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the robot recorded exactly `expected`, in order.
pub fn assert_kinds(robot: &GestureRobot, expected: &[GestureEventKind], msg: &str) {
    let kinds = robot.kinds();
    assert_eq!(kinds, expected, "{}: recorded gestures differ", msg);
}

/// Assert that `kind` was recorded exactly `expected` times.
pub fn assert_fired(robot: &GestureRobot, kind: GestureEventKind, expected: usize, msg: &str) {
    let count = robot.count(kind);
    assert_eq!(
        count,
        expected,
        "{}: expected {} {} event(s), got {} in {:?}",
        msg,
        expected,
        kind,
        count,
        robot.kinds()
    );
}

pub fn assert_not_fired(robot: &GestureRobot, kind: GestureEventKind, msg: &str) {
    assert_fired(robot, kind, 0, msg);
}

/// Assert that `first` was recorded, and recorded before `second`.
pub fn assert_fired_before(
    robot: &GestureRobot,
    first: GestureEventKind,
    second: GestureEventKind,
    msg: &str,
) {
    let kinds = robot.kinds();
    let first_at = kinds.iter().position(|kind| *kind == first);
    let second_at = kinds.iter().position(|kind| *kind == second);
    assert!(
        matches!((first_at, second_at), (Some(a), Some(b)) if a < b),
        "{}: expected {} before {} in {:?}",
        msg,
        first,
        second,
        kinds
    );
}

/// Assert the Euclidean identity between a pointer's distance components.
pub fn assert_distance_consistent(pointer: &Pointer, msg: &str) {
    let expected = (pointer.distance_x * pointer.distance_x
        + pointer.distance_y * pointer.distance_y)
        .sqrt();
    assert_approx_eq(pointer.distance, expected, 1e-4, msg);
}
