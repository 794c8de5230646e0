//! Gravity direction and the flip cooldown state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FLIP_COOLDOWN, GRAVITY};

/// Which way gravity pulls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityDirection {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

/// Per-direction data: pull vector, cube display rotation, HUD colour
#[derive(Debug, Clone, Copy)]
struct DirectionInfo {
    vector: Vec2,
    rotation: f32,
    color: u32,
}

/// Indexed by `GravityDirection as usize`
const DIRECTION_TABLE: [DirectionInfo; 4] = [
    // Down - cyan
    DirectionInfo {
        vector: Vec2::new(0.0, -1.0),
        rotation: 0.0,
        color: 0x00FF_FFFF,
    },
    // Up - magenta
    DirectionInfo {
        vector: Vec2::new(0.0, 1.0),
        rotation: 180.0,
        color: 0xFF00_FFFF,
    },
    // Left - yellow
    DirectionInfo {
        vector: Vec2::new(-1.0, 0.0),
        rotation: 90.0,
        color: 0xFFFF_00FF,
    },
    // Right - green
    DirectionInfo {
        vector: Vec2::new(1.0, 0.0),
        rotation: -90.0,
        color: 0x00FF_00FF,
    },
];

impl GravityDirection {
    pub const ALL: [GravityDirection; 4] = [
        GravityDirection::Down,
        GravityDirection::Up,
        GravityDirection::Left,
        GravityDirection::Right,
    ];

    #[inline]
    fn info(self) -> &'static DirectionInfo {
        &DIRECTION_TABLE[self as usize]
    }

    /// Unit vector gravity pulls along (world space, y-up)
    pub fn vector(self) -> Vec2 {
        self.info().vector
    }

    /// Cube rotation in degrees while this direction is active
    pub fn rotation(self) -> f32 {
        self.info().rotation
    }

    /// Indicator colour as RGBA
    pub fn color(self) -> u32 {
        self.info().color
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GravityDirection::Down => "Down",
            GravityDirection::Up => "Up",
            GravityDirection::Left => "Left",
            GravityDirection::Right => "Right",
        }
    }
}

impl std::fmt::Display for GravityDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the active gravity direction.
///
/// A flip puts the controller into a short cooldown during which further
/// flips are refused. The cooldown only gates new requests; the force for
/// the current direction applies the whole time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityController {
    direction: GravityDirection,
    flipping: bool,
    timer: f32,
    strength: f32,
    cooldown: f32,
}

impl Default for GravityController {
    fn default() -> Self {
        Self::new(GRAVITY, FLIP_COOLDOWN)
    }
}

impl GravityController {
    pub fn new(strength: f32, cooldown: f32) -> Self {
        Self {
            direction: GravityDirection::Down,
            flipping: false,
            timer: 0.0,
            strength,
            cooldown,
        }
    }

    pub fn direction(&self) -> GravityDirection {
        self.direction
    }

    pub fn is_flipping(&self) -> bool {
        self.flipping
    }

    /// Seconds left on the flip cooldown (0 when stable)
    pub fn cooldown_remaining(&self) -> f32 {
        self.timer.max(0.0)
    }

    /// Try to point gravity in a new direction.
    ///
    /// Returns `false` without changing anything while a flip is cooling down
    /// or when `direction` is already active.
    pub fn request_flip(&mut self, direction: GravityDirection) -> bool {
        if self.flipping || direction == self.direction {
            return false;
        }
        self.direction = direction;
        self.flipping = true;
        self.timer = self.cooldown;
        true
    }

    /// Advance the cooldown
    pub fn tick(&mut self, dt: f32) {
        if self.flipping {
            self.timer -= dt;
            if self.timer <= 0.0 {
                self.flipping = false;
            }
        }
    }

    /// Acceleration applied to the player
    pub fn force(&self) -> Vec2 {
        self.direction.vector() * self.strength
    }

    pub fn reset(&mut self) {
        self.direction = GravityDirection::Down;
        self.flipping = false;
        self.timer = 0.0;
    }
}
