//! Tunable options for the engine and its built-in recognizers.

use crate::gesture_constants::{
    CLICK_MAX_DISTANCE, DRAG_MIN_DISTANCE, SUPPRESSION_WINDOW_MS, SWIPE_MIN_DISTANCE,
    SWIPE_MIN_VELOCITY,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickOptions {
    pub max_distance: f32,
}

impl Default for ClickOptions {
    fn default() -> Self {
        Self {
            max_distance: CLICK_MAX_DISTANCE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOptions {
    pub min_distance: f32,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            min_distance: DRAG_MIN_DISTANCE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeOptions {
    pub min_velocity: f32,
    pub min_distance: f32,
}

impl Default for SwipeOptions {
    fn default() -> Self {
        Self {
            min_velocity: SWIPE_MIN_VELOCITY,
            min_distance: SWIPE_MIN_DISTANCE,
        }
    }
}

/// Options for the opt-in long-press recognizer.
///
/// There are no defaults: hosts pick the delay and slop that suit their
/// platform when they enable it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoldOptions {
    pub delay_ms: u64,
    pub max_distance: f32,
}

impl HoldOptions {
    pub const fn new(delay_ms: u64, max_distance: f32) -> Self {
        Self {
            delay_ms,
            max_distance,
        }
    }
}

/// Engine-wide configuration handed to recognizer factories.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    pub suppression_window_ms: u64,
    pub click: ClickOptions,
    pub drag: DragOptions,
    pub swipe: SwipeOptions,
}

impl GestureConfig {
    pub fn with_suppression_window(mut self, millis: u64) -> Self {
        self.suppression_window_ms = millis;
        self
    }

    pub fn with_click(mut self, click: ClickOptions) -> Self {
        self.click = click;
        self
    }

    pub fn with_drag(mut self, drag: DragOptions) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_swipe(mut self, swipe: SwipeOptions) -> Self {
        self.swipe = swipe;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            suppression_window_ms: SUPPRESSION_WINDOW_MS,
            click: ClickOptions::default(),
            drag: DragOptions::default(),
            swipe: SwipeOptions::default(),
        }
    }
}
