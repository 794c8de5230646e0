//! Physics tuning
//!
//! Every field defaults to the reference value in [`crate::consts`]. A JSON
//! file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("setting `{name}` must be positive and finite, got {value}")]
    Invalid { name: &'static str, value: f32 },
}

/// Simulation tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gravity acceleration (units/s²)
    pub gravity: f32,
    /// Per-axis velocity cap
    pub max_velocity: f32,
    /// Seconds a flip blocks further flips
    pub flip_cooldown: f32,
    /// Largest frame time integrated in one tick
    pub max_frame_dt: f32,
    /// Seconds between touching the goal and loading the next level
    pub level_complete_delay: f32,
    /// Distance past the viewport that triggers a respawn
    pub out_of_bounds_margin: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Cosmetic cube rotation speed (degrees/s)
    pub rotation_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_velocity: MAX_VELOCITY,
            flip_cooldown: FLIP_COOLDOWN,
            max_frame_dt: MAX_FRAME_DT,
            level_complete_delay: LEVEL_COMPLETE_DELAY,
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            rotation_speed: PLAYER_ROTATION_SPEED,
        }
    }
}

impl Settings {
    /// Parse and validate settings; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Like [`Settings::load`], but logs the problem and falls back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.as_ref().display(), e);
                Self::default()
            }
        }
    }

    /// Every value must be positive and finite. Cooldown and delay may be zero.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("gravity", self.gravity),
            ("max_velocity", self.max_velocity),
            ("max_frame_dt", self.max_frame_dt),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("rotation_speed", self.rotation_speed),
        ];
        let non_negative = [
            ("flip_cooldown", self.flip_cooldown),
            ("level_complete_delay", self.level_complete_delay),
            ("out_of_bounds_margin", self.out_of_bounds_margin),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid { name, value });
            }
        }
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid { name, value });
            }
        }
        Ok(())
    }
}
