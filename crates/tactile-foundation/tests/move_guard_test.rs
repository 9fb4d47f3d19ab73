//! Move prevention armed per target through `GestureEngine::register`.

use tactile_foundation::GestureEventKind;
use tactile_testing::prelude::*;
use tactile_testing::robot_assertions::{assert_fired, assert_not_fired};

const LIST: TargetId = 3;
const PAGE: TargetId = 4;

#[test]
fn horizontal_drag_keeps_page_from_scrolling() {
    let mut robot = GestureRobot::new();
    let _guard = robot.engine().register(LIST, "drag");

    robot.on(LIST).touch_start(0.0, 0.0);
    let first = robot.touch_move(2.0, 0.0);
    let second = robot.touch_move(10.0, 1.0);
    let third = robot.touch_move(30.0, 40.0);

    assert!(first.is_default_prevented(), "pending drag holds the page");
    assert!(second.is_default_prevented());
    assert!(third.is_default_prevented(), "active drag always prevents");
    assert_fired(&robot, GestureEventKind::DragStart, 1, "horizontal intent");
}

#[test]
fn vertical_intent_releases_the_page_and_cancels_drag() {
    let mut robot = GestureRobot::new();
    let _guard = robot.engine().register(LIST, "drag");

    robot.on(LIST).touch_start(0.0, 0.0);
    let tentative = robot.touch_move(0.0, 8.0);
    let scrolling = robot.touch_move(0.0, 20.0);
    let sideways = robot.touch_move(30.0, 20.0);
    robot.advance_frame();
    robot.touch_end(30.0, 20.0);

    // Guards judge the pointer before the move is applied.
    assert!(tentative.is_default_prevented());
    assert!(!scrolling.is_default_prevented());
    assert!(!sideways.is_default_prevented());
    assert_not_fired(&robot, GestureEventKind::DragStart, "cancelled by scroll");
    assert_not_fired(&robot, GestureEventKind::DragEnd, "cancelled by scroll");

    robot.clear_events();
    robot.touch_start(0.0, 0.0);
    robot.touch_move(0.0, 0.0);
    robot.touch_move(12.0, 0.0);
    assert_fired(&robot, GestureEventKind::DragStart, 1, "next interaction starts clean");
}

#[test]
fn guards_only_cover_their_target() {
    let mut robot = GestureRobot::new();
    let _guard = robot.engine().register(LIST, "drag");

    robot.on(PAGE).touch_start(0.0, 0.0);
    let moved = robot.touch_move(2.0, 0.0);
    assert!(!moved.is_default_prevented());
}

#[test]
fn mouse_moves_are_never_prevented() {
    let mut robot = GestureRobot::new();
    let _guard = robot.engine().register(LIST, "drag");

    robot.on(LIST).mouse_down(0.0, 0.0);
    let moved = robot.mouse_move(20.0, 0.0);
    assert!(!moved.is_default_prevented());
    assert_fired(&robot, GestureEventKind::DragStart, 1, "drag still recognized");
}

#[test]
fn deregistering_restores_native_scrolling() {
    let mut robot = GestureRobot::new();
    let guard = robot.engine().register(LIST, "drag swipe");
    assert!(guard.is_active());
    assert_eq!(robot.engine().armed_guards(), 1);

    guard.deregister();
    assert_eq!(robot.engine().armed_guards(), 0);

    robot.on(LIST).touch_start(0.0, 0.0);
    let moved = robot.touch_move(2.0, 0.0);
    assert!(!moved.is_default_prevented());
}

#[test]
fn names_without_move_behavior_arm_nothing() {
    let robot = GestureRobot::new();
    let guard = robot.engine().register(LIST, "click press swipe pinch");

    assert!(!guard.is_active());
    assert_eq!(guard.id(), None);
    assert_eq!(robot.engine().armed_guards(), 0);
}
