//! Gravity Flip - a cube platformer where gravity can point any of four ways
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, gravity, player body, collisions, level loop)
//! - `levels`: Built-in hand-authored levels
//! - `input`: Swipe gesture recognition for gravity flips
//! - `settings`: Data-driven physics tuning

pub mod input;
pub mod levels;
pub mod settings;
pub mod sim;

pub use input::SwipeInput;
pub use levels::BuiltinLevels;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Virtual screen size; the out-of-bounds check is measured against it
    pub const VIEWPORT_WIDTH: f32 = 1024.0;
    pub const VIEWPORT_HEIGHT: f32 = 768.0;

    /// Tile grid
    pub const TILE_SIZE: f32 = 32.0;
    pub const GRID_WIDTH: i32 = 32; // 1024 / 32
    pub const GRID_HEIGHT: i32 = 24; // 768 / 32

    /// Gravity acceleration (units/s²)
    pub const GRAVITY: f32 = 800.0;
    /// Per-axis velocity cap
    pub const MAX_VELOCITY: f32 = 600.0;
    /// Minimum time between gravity flips (seconds)
    pub const FLIP_COOLDOWN: f32 = 0.2;

    /// Player cube is a little smaller than a tile
    pub const PLAYER_INSET: f32 = 4.0;
    pub const PLAYER_SIZE: f32 = TILE_SIZE - PLAYER_INSET;
    /// Cosmetic rotation speed (degrees/s)
    pub const PLAYER_ROTATION_SPEED: f32 = 720.0;

    /// Largest step a single frame may integrate (~60 Hz)
    pub const MAX_FRAME_DT: f32 = 0.016;
    /// Pause after touching the goal before the next level loads (seconds)
    pub const LEVEL_COMPLETE_DELAY: f32 = 1.5;
    /// How far past the viewport the player may drift before a forced respawn
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 100.0;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}
