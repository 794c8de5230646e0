//! Validated levels and the level-source seam
//!
//! A `Level` can only be built from a grid that has exactly one spawn and one
//! goal, so the simulation never has to guess where the player starts.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::{TileGrid, TileKind};

/// Why a grid was refused as a level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level `{0}` has no spawn tile")]
    MissingSpawn(String),
    #[error("level `{name}` has {count} spawn tiles, expected one")]
    MultipleSpawns { name: String, count: usize },
    #[error("level `{0}` has no goal tile")]
    MissingGoal(String),
    #[error("level `{name}` has {count} goal tiles, expected one")]
    MultipleGoals { name: String, count: usize },
    #[error("level `{name}`: recorded {kind} position no longer holds a {kind} tile")]
    StaleMarker { name: String, kind: &'static str },
}

/// Serialized form of a level. Markers are re-derived from the grid.
#[derive(Deserialize)]
struct LevelData {
    name: String,
    grid: TileGrid,
}

impl TryFrom<LevelData> for Level {
    type Error = LevelError;

    fn try_from(data: LevelData) -> Result<Self, Self::Error> {
        Level::new(data.name, data.grid)
    }
}

/// A playable level: a tile grid plus where the player starts and ends
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LevelData")]
pub struct Level {
    name: String,
    grid: TileGrid,
    spawn_point: Vec2,
    goal_position: Vec2,
}

impl Level {
    pub fn new(name: impl Into<String>, grid: TileGrid) -> Result<Self, LevelError> {
        let name = name.into();

        let spawn_point = marker(&name, &grid, TileKind::Spawn, grid.spawn_point())?;
        let goal_position = marker(&name, &grid, TileKind::Goal, grid.goal_position())?;

        Ok(Self {
            name,
            grid,
            spawn_point,
            goal_position,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    pub fn goal_position(&self) -> Vec2 {
        self.goal_position
    }
}

/// Check that exactly one `kind` tile exists and the grid's recorded position points at it
fn marker(
    name: &str,
    grid: &TileGrid,
    kind: TileKind,
    recorded: Option<Vec2>,
) -> Result<Vec2, LevelError> {
    let count = grid.count(kind);
    match (kind, count) {
        (TileKind::Spawn, 0) => return Err(LevelError::MissingSpawn(name.to_string())),
        (TileKind::Goal, 0) => return Err(LevelError::MissingGoal(name.to_string())),
        (TileKind::Spawn, n) if n > 1 => {
            return Err(LevelError::MultipleSpawns {
                name: name.to_string(),
                count: n,
            });
        }
        (TileKind::Goal, n) if n > 1 => {
            return Err(LevelError::MultipleGoals {
                name: name.to_string(),
                count: n,
            });
        }
        _ => {}
    }

    let stale = || LevelError::StaleMarker {
        name: name.to_string(),
        kind: kind.as_str(),
    };
    let pos = recorded.ok_or_else(stale)?;
    if grid.tile_at_world(pos) != kind {
        return Err(stale());
    }
    Ok(pos)
}

/// Supplies levels by index (0-based). `None` means there are no more levels.
pub trait LevelSource {
    fn level(&self, index: usize) -> Option<Level>;

    /// Number of levels available
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LevelSource for Vec<Level> {
    fn level(&self, index: usize) -> Option<Level> {
        self.get(index).cloned()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}
