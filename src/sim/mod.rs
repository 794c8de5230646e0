//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, with a clamped frame time
//! - Stable collision order (row-major over the tile grid)
//! - No rendering or platform dependencies

pub mod collision;
pub mod gravity;
pub mod grid;
pub mod level;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, Contact, minimum_translation, resolve_collisions};
pub use gravity::{GravityController, GravityDirection};
pub use grid::{GridError, TileCollision, TileGrid, TileKind, cell_origin};
pub use level::{Level, LevelError, LevelSource};
pub use player::PlayerBody;
pub use rect::Rect;
pub use state::{GamePhase, GameState};
pub use tick::{TickOutcome, TickReport, tick};
