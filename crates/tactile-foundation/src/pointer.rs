//! Normalized record of one physical interaction.

use crate::input::{InputEvent, PointerKind, TargetId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HorizontalDirection {
    #[default]
    None,
    Left,
    Right,
}

impl HorizontalDirection {
    fn from_delta(delta: f32) -> Self {
        if delta > 0.0 {
            HorizontalDirection::Right
        } else if delta < 0.0 {
            HorizontalDirection::Left
        } else {
            HorizontalDirection::None
        }
    }
}

/// Vertical direction of travel.
///
/// A positive page delta reports `Up` and a negative one `Down`. Consumers that
/// need screen-space direction should read the sign of `distance_y` directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VerticalDirection {
    #[default]
    None,
    Up,
    Down,
}

impl VerticalDirection {
    fn from_delta(delta: f32) -> Self {
        if delta > 0.0 {
            VerticalDirection::Up
        } else if delta < 0.0 {
            VerticalDirection::Down
        } else {
            VerticalDirection::None
        }
    }
}

/// Position, travel and speed of one interaction.
///
/// Times are milliseconds from the engine clock. Velocities are in pixels per
/// millisecond and are not finite while `duration` is zero; check
/// [`Pointer::has_velocity`] before using them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub kind: PointerKind,
    pub target: TargetId,
    pub start_time: u64,
    pub start_x: f32,
    pub start_y: f32,
    pub x: f32,
    pub y: f32,
    pub distance_x: f32,
    pub distance_y: f32,
    pub distance: f32,
    pub direction_x: HorizontalDirection,
    pub direction_y: VerticalDirection,
    pub duration: u64,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub end_time: Option<u64>,
}

impl Pointer {
    /// Starts a pointer at the event's position.
    pub fn start(kind: PointerKind, event: &InputEvent, now: u64) -> Self {
        let point = event.point();
        Self {
            kind,
            target: event.target,
            start_time: now,
            start_x: point.x,
            start_y: point.y,
            x: point.x,
            y: point.y,
            distance_x: 0.0,
            distance_y: 0.0,
            distance: 0.0,
            direction_x: HorizontalDirection::None,
            direction_y: VerticalDirection::None,
            duration: 0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            end_time: None,
        }
    }

    /// Recomputes every derived field from the event's current position.
    pub fn update(&mut self, event: &InputEvent, now: u64) {
        let point = event.point();
        self.x = point.x;
        self.y = point.y;

        self.distance_x = self.x - self.start_x;
        self.distance_y = self.y - self.start_y;
        self.distance =
            (self.distance_x * self.distance_x + self.distance_y * self.distance_y).sqrt();

        self.direction_x = HorizontalDirection::from_delta(self.distance_x);
        self.direction_y = VerticalDirection::from_delta(self.distance_y);

        self.duration = now.saturating_sub(self.start_time);
        let duration = self.duration as f32;
        self.velocity_x = self.distance_x / duration;
        self.velocity_y = self.distance_y / duration;
    }

    pub(crate) fn finish(&mut self, now: u64) {
        self.end_time = Some(now);
    }

    pub fn is_ended(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn has_velocity(&self) -> bool {
        self.velocity_x.is_finite() && self.velocity_y.is_finite()
    }
}
