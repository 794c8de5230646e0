//! Tile grid the player collides against
//!
//! Grid cell `(col, row)` covers the world rectangle
//! `[col * TILE_SIZE, (col + 1) * TILE_SIZE) x [row * TILE_SIZE, (row + 1) * TILE_SIZE)`.
//! Row 0 is the bottom of the level. Anything outside the grid reads as solid wall.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::Rect;
use crate::consts::TILE_SIZE;

/// What a grid cell contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    /// Wall or platform
    Solid,
    /// Kills the player on contact
    Spike,
    /// Completes the level on contact
    Goal,
    /// Player start marker (no collision response)
    Spawn,
}

impl TileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Empty => "Empty",
            TileKind::Solid => "Solid",
            TileKind::Spike => "Spike",
            TileKind::Goal => "Goal",
            TileKind::Spawn => "Spawn",
        }
    }
}

/// One non-empty tile overlapping a queried box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCollision {
    pub kind: TileKind,
    pub bounds: Rect,
    pub col: i32,
    pub row: i32,
}

/// World-space origin of a grid cell
#[inline]
pub fn cell_origin(col: i32, row: i32) -> Vec2 {
    Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE)
}

/// Grid cell containing a world coordinate
#[inline]
fn world_to_cell(v: f32) -> i32 {
    (v / TILE_SIZE).floor() as i32
}

/// Why serialized grid data was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} must not be negative")]
    NegativeSize { width: i32, height: i32 },
    #[error("grid is {width}x{height} but holds {len} tiles")]
    SizeMismatch { width: i32, height: i32, len: usize },
}

/// Serialized form of a grid, checked before it becomes a `TileGrid`
#[derive(Deserialize)]
struct TileGridData {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
    #[serde(default)]
    spawn_point: Option<Vec2>,
    #[serde(default)]
    goal_position: Option<Vec2>,
}

impl TryFrom<TileGridData> for TileGrid {
    type Error = GridError;

    fn try_from(data: TileGridData) -> Result<Self, Self::Error> {
        let TileGridData {
            width,
            height,
            tiles,
            spawn_point,
            goal_position,
        } = data;

        if width < 0 || height < 0 {
            return Err(GridError::NegativeSize { width, height });
        }
        if tiles.len() != width as usize * height as usize {
            return Err(GridError::SizeMismatch {
                width,
                height,
                len: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
            spawn_point,
            goal_position,
        })
    }
}

/// Fixed-size grid of tiles, stored row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TileGridData")]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
    /// World position of the most recently placed spawn tile
    spawn_point: Option<Vec2>,
    /// World position of the most recently placed goal tile
    goal_position: Option<Vec2>,
}

impl TileGrid {
    /// Create an all-empty grid. Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![TileKind::Empty; width as usize * height as usize],
            spawn_point: None,
            goal_position: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn spawn_point(&self) -> Option<Vec2> {
        self.spawn_point
    }

    pub fn goal_position(&self) -> Option<Vec2> {
        self.goal_position
    }

    /// Size of the whole grid in world units
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * TILE_SIZE
    }

    #[inline]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        (0..self.width).contains(&col) && (0..self.height).contains(&row)
    }

    #[inline]
    fn index(&self, col: i32, row: i32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Overwrite a cell. Out-of-range coordinates are ignored.
    pub fn set_tile(&mut self, col: i32, row: i32, kind: TileKind) {
        if !self.in_bounds(col, row) {
            return;
        }
        let idx = self.index(col, row);
        self.tiles[idx] = kind;

        match kind {
            TileKind::Spawn => self.spawn_point = Some(cell_origin(col, row)),
            TileKind::Goal => self.goal_position = Some(cell_origin(col, row)),
            _ => {}
        }
    }

    /// Fill an inclusive horizontal run of cells
    pub fn fill_row(&mut self, row: i32, cols: std::ops::RangeInclusive<i32>, kind: TileKind) {
        for col in cols {
            self.set_tile(col, row, kind);
        }
    }

    /// Fill an inclusive vertical run of cells
    pub fn fill_col(&mut self, col: i32, rows: std::ops::RangeInclusive<i32>, kind: TileKind) {
        for row in rows {
            self.set_tile(col, row, kind);
        }
    }

    /// Kind at a cell; everything outside the grid is solid
    pub fn tile(&self, col: i32, row: i32) -> TileKind {
        if self.in_bounds(col, row) {
            self.tiles[self.index(col, row)]
        } else {
            TileKind::Solid
        }
    }

    /// Kind of the cell under a world point
    pub fn tile_at_world(&self, pos: Vec2) -> TileKind {
        self.tile(world_to_cell(pos.x), world_to_cell(pos.y))
    }

    /// Number of in-grid cells of the given kind
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }

    /// Every non-empty tile whose rectangle overlaps `area`.
    ///
    /// Scans the cells under `area` widened by one tile on each side, so a
    /// body that moved up to a tile this frame still finds its neighbours.
    /// Results are row-major: ascending row, then ascending column. Collision
    /// handling depends on this order.
    ///
    /// The scan never leaves the one-cell ring of implicit wall around the
    /// grid, so huge or unbounded boxes stay cheap.
    pub fn query_overlap(&self, area: &Rect) -> Vec<TileCollision> {
        let start_col = world_to_cell(area.left()).saturating_sub(1).max(-1);
        let end_col = world_to_cell(area.right()).saturating_add(1).min(self.width);
        let start_row = world_to_cell(area.bottom()).saturating_sub(1).max(-1);
        let end_row = world_to_cell(area.top()).saturating_add(1).min(self.height);

        let mut hits = Vec::new();
        for row in start_row..=end_row {
            for col in start_col..=end_col {
                let kind = self.tile(col, row);
                if kind == TileKind::Empty {
                    continue;
                }
                let bounds = Rect::square(cell_origin(col, row), TILE_SIZE);
                if area.overlaps(&bounds) {
                    hits.push(TileCollision {
                        kind,
                        bounds,
                        col,
                        row,
                    });
                }
            }
        }
        hits
    }
}
