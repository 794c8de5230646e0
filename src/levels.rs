//! Built-in levels
//!
//! Three hand-authored 32x24 rooms. Every room is walled in on all four sides.

use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::sim::{Level, LevelError, LevelSource, TileGrid, TileKind};

const TOP: i32 = GRID_HEIGHT - 1;
const RIGHT: i32 = GRID_WIDTH - 1;

/// The levels shipped with the game
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLevels;

impl BuiltinLevels {
    pub const COUNT: usize = 3;

    /// Build level `index`, or `None` past the last level
    pub fn build(index: usize) -> Option<Result<Level, LevelError>> {
        let level = match index {
            0 => Level::new("Level 1 - Awakening", awakening()),
            1 => Level::new("Level 2 - Danger Zone", danger_zone()),
            2 => Level::new("Level 3 - Zero G", zero_g()),
            _ => return None,
        };
        Some(level)
    }
}

impl LevelSource for BuiltinLevels {
    fn level(&self, index: usize) -> Option<Level> {
        match Self::build(index)? {
            Ok(level) => Some(level),
            Err(e) => {
                log::error!("Built-in level {} is invalid: {}", index + 1, e);
                None
            }
        }
    }

    fn len(&self) -> usize {
        Self::COUNT
    }
}

/// Empty room with solid floor, ceiling and side walls
fn walled_room() -> TileGrid {
    let mut grid = TileGrid::new(GRID_WIDTH, GRID_HEIGHT);
    grid.fill_row(0, 0..=RIGHT, TileKind::Solid);
    grid.fill_row(TOP, 0..=RIGHT, TileKind::Solid);
    grid.fill_col(0, 0..=TOP, TileKind::Solid);
    grid.fill_col(RIGHT, 0..=TOP, TileKind::Solid);
    grid
}

/// Platforms climbing to the upper right; the last one needs an upward flip
fn awakening() -> TileGrid {
    let mut grid = walled_room();
    grid.set_tile(3, 1, TileKind::Spawn);

    grid.fill_row(4, 8..=12, TileKind::Solid);
    grid.fill_row(8, 15..=19, TileKind::Solid);
    grid.fill_row(12, 22..=26, TileKind::Solid);
    grid.fill_col(14, 1..=6, TileKind::Solid);

    grid.set_tile(28, 20, TileKind::Goal);
    grid.fill_row(19, 26..=29, TileKind::Solid);
    grid
}

/// Floor spike pit and a row of ceiling spikes
fn danger_zone() -> TileGrid {
    let mut grid = walled_room();
    grid.set_tile(3, 1, TileKind::Spawn);

    grid.fill_row(3, 5..=10, TileKind::Solid);
    grid.fill_row(1, 11..=14, TileKind::Spike);
    grid.fill_row(3, 15..=20, TileKind::Solid);
    grid.fill_row(10, 10..=18, TileKind::Solid);
    grid.fill_row(TOP - 1, 12..=16, TileKind::Spike);

    grid.set_tile(25, 10, TileKind::Goal);
    grid.fill_row(9, 23..=27, TileKind::Solid);
    grid
}

/// Two pillars and spikes hanging under the middle shelf
fn zero_g() -> TileGrid {
    let mut grid = walled_room();
    grid.set_tile(2, 1, TileKind::Spawn);

    grid.fill_col(10, 5..=15, TileKind::Solid);
    grid.fill_col(20, 5..=15, TileKind::Solid);
    grid.fill_row(8, 5..=9, TileKind::Solid);
    grid.fill_row(12, 11..=19, TileKind::Solid);
    grid.fill_row(8, 21..=28, TileKind::Solid);
    grid.fill_row(7, 13..=17, TileKind::Spike);

    grid.set_tile(28, 20, TileKind::Goal);
    grid.fill_row(19, 26..=29, TileKind::Solid);
    grid
}
