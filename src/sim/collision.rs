//! Tile collision classification and response
//!
//! Collisions are handled in the grid's row-major query order. Spikes and
//! goals end processing for the tick as soon as they are met. Each solid tile
//! is pushed out along its axis of least overlap, one tile at a time, with no
//! second pass over tiles already handled.

use glam::Vec2;

use super::grid::{TileCollision, TileGrid, TileKind};
use super::player::PlayerBody;
use super::rect::Rect;

/// Separation needed to push a body out of one tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Axis-aligned unit normal pointing away from the tile
    pub normal: Vec2,
    /// Penetration depth along `normal`
    pub penetration: f32,
}

/// What the tile contacts in one tick amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionOutcome {
    /// Touching nothing
    #[default]
    None,
    /// Pushed out of at least one solid tile
    Blocked,
    /// Hit a spike
    Died,
    /// Reached the goal
    GoalReached,
}

/// Minimum translation out of `tile` for `body`, along the axis of smaller overlap.
///
/// On a tie the vertical axis wins. The push direction compares the body's
/// corner to the tile's corner.
pub fn minimum_translation(body: &Rect, tile: &Rect) -> Contact {
    let overlap = body.overlap_depth(tile);

    if overlap.x < overlap.y {
        let normal = if body.left() < tile.left() {
            Vec2::new(-1.0, 0.0)
        } else {
            Vec2::new(1.0, 0.0)
        };
        Contact {
            normal,
            penetration: overlap.x,
        }
    } else {
        let normal = if body.bottom() < tile.bottom() {
            Vec2::new(0.0, -1.0)
        } else {
            Vec2::new(0.0, 1.0)
        };
        Contact {
            normal,
            penetration: overlap.y,
        }
    }
}

/// Push the player out of one solid tile
pub fn resolve_solid(player: &mut PlayerBody, tile: &Rect) -> Contact {
    let contact = minimum_translation(&player.bounds(), tile);
    player.resolve_against_solid(contact.normal, contact.penetration);
    contact
}

/// Handle every tile the player currently overlaps.
///
/// Tile bounds come from a single query made before any resolution; each
/// solid is resolved against the player's box as it stands after the
/// solids before it. A spike kills the player (the caller respawns).
pub fn resolve_collisions(player: &mut PlayerBody, grid: &TileGrid) -> CollisionOutcome {
    let hits: Vec<TileCollision> = grid.query_overlap(&player.bounds());

    let mut outcome = CollisionOutcome::None;
    for hit in &hits {
        match hit.kind {
            TileKind::Spike => {
                player.die();
                return CollisionOutcome::Died;
            }
            TileKind::Goal => return CollisionOutcome::GoalReached,
            TileKind::Solid => {
                resolve_solid(player, &hit.bounds);
                outcome = CollisionOutcome::Blocked;
            }
            TileKind::Spawn | TileKind::Empty => {}
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILE_SIZE;
    use crate::sim::grid::cell_origin;

    fn tile_rect(col: i32, row: i32) -> Rect {
        Rect::square(cell_origin(col, row), TILE_SIZE)
    }

    #[test]
    fn test_mtv_prefers_smaller_overlap() {
        // Body's right edge 2 units into the tile, 8 units of vertical overlap
        let tile = tile_rect(2, 1);
        let body = Rect::new(tile.left() - 26.0, tile.top() - 8.0, 28.0, 28.0);

        let contact = minimum_translation(&body, &tile);
        assert_eq!(contact.normal, Vec2::new(-1.0, 0.0));
        assert!((contact.penetration - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_resolve_separates_on_resolved_axis() {
        let tile = tile_rect(2, 1);
        let mut player = PlayerBody::new(Vec2::new(tile.left() - 26.0, tile.top() - 8.0));
        player.vel = Vec2::new(100.0, -50.0);

        resolve_solid(&mut player, &tile);

        let bounds = player.bounds();
        assert!(bounds.right() <= tile.left() + 1e-4);
        assert!(!bounds.overlaps(&tile));
        assert_eq!(player.vel, Vec2::new(0.0, -50.0));
        assert!(!player.grounded);
    }

    #[test]
    fn test_mtv_vertical_floor() {
        let tile = tile_rect(3, 0);
        let body = Rect::new(tile.left() + 2.0, tile.top() - 3.0, 28.0, 28.0);
        let contact = minimum_translation(&body, &tile);
        assert_eq!(contact.normal, Vec2::new(0.0, 1.0));
        assert!((contact.penetration - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_mtv_vertical_ceiling() {
        let tile = tile_rect(3, 5);
        let body = Rect::new(tile.left(), tile.bottom() - 25.0, 28.0, 28.0);
        let contact = minimum_translation(&body, &tile);
        assert_eq!(contact.normal, Vec2::new(0.0, -1.0));
        assert!((contact.penetration - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_mtv_tie_goes_vertical() {
        let tile = tile_rect(1, 1);
        let body = Rect::new(tile.right() - 4.0, tile.top() - 4.0, 28.0, 28.0);
        let contact = minimum_translation(&body, &tile);
        assert_eq!(contact.normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_resolve_landing_on_floor() {
        let mut grid = TileGrid::new(8, 8);
        grid.fill_row(0, 0..=7, TileKind::Solid);

        let mut player = PlayerBody::new(Vec2::new(66.0, TILE_SIZE - 5.0));
        player.vel = Vec2::new(0.0, -200.0);

        let outcome = resolve_collisions(&mut player, &grid);
        assert_eq!(outcome, CollisionOutcome::Blocked);
        assert!((player.pos.y - TILE_SIZE).abs() < 1e-4);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn test_spike_stops_processing() {
        let mut grid = TileGrid::new(8, 8);
        grid.set_tile(2, 1, TileKind::Spike);
        grid.set_tile(2, 2, TileKind::Solid);

        let start = Vec2::new(66.0, 58.0);
        let mut player = PlayerBody::new(start);
        let outcome = resolve_collisions(&mut player, &grid);

        assert_eq!(outcome, CollisionOutcome::Died);
        assert!(!player.alive);
        // The solid after the spike was never resolved
        assert_eq!(player.pos, start);
    }

    #[test]
    fn test_goal_stops_processing() {
        let mut grid = TileGrid::new(8, 8);
        grid.set_tile(2, 1, TileKind::Goal);
        grid.set_tile(2, 2, TileKind::Solid);

        let start = Vec2::new(66.0, 58.0);
        let mut player = PlayerBody::new(start);
        let outcome = resolve_collisions(&mut player, &grid);

        assert_eq!(outcome, CollisionOutcome::GoalReached);
        assert!(player.alive);
        assert_eq!(player.pos, start);
    }

    #[test]
    fn test_solid_before_spike_is_resolved() {
        let mut grid = TileGrid::new(8, 8);
        grid.set_tile(2, 1, TileKind::Solid);
        grid.set_tile(2, 2, TileKind::Spike);

        let mut player = PlayerBody::new(Vec2::new(66.0, 58.0));
        let outcome = resolve_collisions(&mut player, &grid);

        // Floor pushes the body up 6, still overlapping the spike cell above
        assert_eq!(outcome, CollisionOutcome::Died);
        assert!((player.pos.y - 64.0).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_tile_is_passable() {
        let mut grid = TileGrid::new(8, 8);
        grid.set_tile(2, 2, TileKind::Spawn);

        let start = Vec2::new(66.0, 66.0);
        let mut player = PlayerBody::new(start);
        assert_eq!(resolve_collisions(&mut player, &grid), CollisionOutcome::None);
        assert_eq!(player.pos, start);
    }

    #[test]
    fn test_multiple_solids_resolve_in_query_order() {
        // Body sunk into a floor seam: two floor tiles, each resolved in turn
        let mut grid = TileGrid::new(8, 8);
        grid.fill_row(0, 0..=7, TileKind::Solid);

        let mut player = PlayerBody::new(Vec2::new(80.0, TILE_SIZE - 4.0));
        let outcome = resolve_collisions(&mut player, &grid);

        assert_eq!(outcome, CollisionOutcome::Blocked);
        // First tile pushes up 4; second tile is then only edge-touching, and
        // its overlap is measured on the moved box
        assert!((player.pos.y - TILE_SIZE).abs() < 1e-4);
        assert_eq!(player.pos.x, 80.0);
    }
}
