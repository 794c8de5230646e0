//! Game state and level transitions
//!
//! `GameState` is the whole simulation: the loaded level, the player body,
//! the gravity controller and the level-progression flags. The frame driver
//! owns it and advances it with [`tick`](super::tick::tick).

use glam::Vec2;

use super::gravity::{GravityController, GravityDirection};
use super::level::{Level, LevelSource};
use super::player::PlayerBody;
use crate::settings::{Settings, SettingsError};

/// Where the run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Physics running on the current level
    Playing,
    /// Goal reached; waiting out the delay before the next level
    LevelComplete,
    /// No level left to load. Terminal.
    GameComplete,
}

/// Complete simulation state for one run through a level source
#[derive(Debug, Clone)]
pub struct GameState<S> {
    /// Validated tuning; fixed for the life of the state
    pub(crate) settings: Settings,
    levels: S,
    /// Index of the level being played (0-based)
    pub level_index: usize,
    /// `None` only once the game is complete
    pub level: Option<Level>,
    pub player: PlayerBody,
    pub gravity: GravityController,
    pub phase: GamePhase,
    /// Seconds since the goal was reached
    pub complete_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl<S: LevelSource> GameState<S> {
    /// Start at the first level with default tuning
    pub fn new(levels: S) -> Self {
        Self::build(levels, Settings::default())
    }

    /// Start at the first level with custom tuning, refusing invalid values
    pub fn with_settings(levels: S, settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(levels, settings))
    }

    fn build(levels: S, settings: Settings) -> Self {
        let mut state = Self {
            gravity: GravityController::new(settings.gravity, settings.flip_cooldown),
            player: PlayerBody::with_limits(
                Vec2::ZERO,
                settings.max_velocity,
                settings.rotation_speed,
            ),
            settings,
            levels,
            level_index: 0,
            level: None,
            phase: GamePhase::Playing,
            complete_timer: 0.0,
            time_ticks: 0,
        };
        state.load_level(0);
        state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn levels(&self) -> &S {
        &self.levels
    }

    pub fn is_level_complete(&self) -> bool {
        self.phase == GamePhase::LevelComplete
    }

    pub fn is_game_complete(&self) -> bool {
        self.phase == GamePhase::GameComplete
    }

    /// Load level `index`, replacing the player body and resetting gravity.
    ///
    /// Returns `false` and ends the game when the source has no such level.
    pub fn load_level(&mut self, index: usize) -> bool {
        self.level_index = index;

        let Some(level) = self.levels.level(index) else {
            log::info!("No level {}: game complete", index + 1);
            self.level = None;
            self.phase = GamePhase::GameComplete;
            return false;
        };

        log::info!("Loaded level {}: {}", index + 1, level.name());
        self.player = PlayerBody::with_limits(
            level.spawn_point(),
            self.settings.max_velocity,
            self.settings.rotation_speed,
        );
        self.level = Some(level);
        self.gravity.reset();
        self.phase = GamePhase::Playing;
        self.complete_timer = 0.0;
        true
    }

    /// Ask for a gravity flip. Refused during the flip cooldown, for the
    /// current direction, and once the level or game is complete.
    pub fn request_gravity_flip(&mut self, direction: GravityDirection) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let accepted = self.gravity.request_flip(direction);
        if accepted {
            log::debug!("Gravity flipped to: {}", direction);
        }
        accepted
    }

    /// Put the player back at the spawn point with default gravity
    pub(crate) fn respawn_player(&mut self) {
        self.player.respawn();
        self.gravity.reset();
    }
}
