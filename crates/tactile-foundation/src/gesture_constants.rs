//! Default thresholds for the built-in recognizers.
//!
//! Distances are in logical pixels, velocities in pixels per millisecond and
//! times in milliseconds. Each value seeds the matching option struct in
//! [`crate::config`]; hosts override them there rather than here.

/// How long after an interaction ends a start event of a *different* pointer
/// kind is discarded.
///
/// Mobile browsers follow a touch sequence with compatibility mouse events
/// (`mousedown`, `click`) roughly 300–350 ms later. Without this window those
/// would be tracked as a second, unrelated interaction.
pub const SUPPRESSION_WINDOW_MS: u64 = 400;

/// A click is only synthesized if the pointer ended closer than this to where
/// it started.
pub const CLICK_MAX_DISTANCE: f32 = 6.0;

/// Horizontal travel that turns a contact into a drag. The same distance of
/// vertical travel before that cancels the drag and leaves the page scrolling.
pub const DRAG_MIN_DISTANCE: f32 = 6.0;

/// Minimum horizontal velocity for a swipe.
pub const SWIPE_MIN_VELOCITY: f32 = 0.65;

/// Minimum horizontal travel for a swipe.
pub const SWIPE_MIN_DISTANCE: f32 = 10.0;
