//! Swipe gestures to gravity flips
//!
//! Pointer positions are screen coordinates (y grows downward). A swipe is
//! the straight line from press to release; its angle picks the direction.
//! Swiping down on screen pulls gravity down, and so on.

use glam::Vec2;

use crate::sim::GravityDirection;

/// Shortest drag that counts as a swipe (pixels)
pub const MIN_SWIPE_DISTANCE: f32 = 50.0;

/// Half-width of each direction's angular sector (degrees)
const DIAGONAL_THRESHOLD: f32 = 45.0;

/// Tracks the primary pointer between press and release
#[derive(Debug, Clone, Default)]
pub struct SwipeInput {
    start: Option<Vec2>,
}

impl SwipeInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the primary pointer is currently down
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Pointer pressed. Only pointer 0 is tracked.
    pub fn pointer_down(&mut self, x: f32, y: f32, pointer: u32) {
        if pointer == 0 {
            self.start = Some(Vec2::new(x, y));
        }
    }

    /// Pointer released; returns the swipe's direction if it was long enough
    pub fn pointer_up(&mut self, x: f32, y: f32, pointer: u32) -> Option<GravityDirection> {
        if pointer != 0 {
            return None;
        }
        let start = self.start.take()?;
        let swipe = Vec2::new(x, y) - start;
        if swipe.length() < MIN_SWIPE_DISTANCE {
            return None;
        }
        Some(direction_for_swipe(swipe))
    }

    /// Forget a press without emitting anything (e.g. on focus loss)
    pub fn cancel(&mut self) {
        self.start = None;
    }
}

/// Map a screen-space swipe vector to a gravity direction.
///
/// Sector boundaries at exactly 45° and 135° belong to Down, 225° to Left,
/// 315° to Right.
pub fn direction_for_swipe(swipe: Vec2) -> GravityDirection {
    let mut angle = swipe.y.atan2(swipe.x).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }

    if angle < DIAGONAL_THRESHOLD || angle >= 360.0 - DIAGONAL_THRESHOLD {
        GravityDirection::Right
    } else if angle <= 180.0 - DIAGONAL_THRESHOLD {
        GravityDirection::Down
    } else if angle <= 180.0 + DIAGONAL_THRESHOLD {
        GravityDirection::Left
    } else {
        GravityDirection::Up
    }
}
