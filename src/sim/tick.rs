//! Per-frame simulation step
//!
//! One call per rendered frame. The frame time is clamped so a hitch can't
//! integrate the player through a one-tile wall.

use glam::Vec2;

use super::collision::{CollisionOutcome, resolve_collisions};
use super::gravity::GravityDirection;
use super::level::LevelSource;
use super::state::{GamePhase, GameState};

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickOutcome {
    /// Nothing notable (falling freely, or waiting after the goal)
    #[default]
    None,
    /// Pushed out of solid tiles
    Blocked,
    /// Hit a spike and was respawned
    Died,
    /// Touched the goal this tick
    GoalReached,
    /// Drifted past the viewport and was respawned
    OutOfBounds,
    /// The next level was loaded
    LevelLoaded,
    /// Ran out of levels this tick, or earlier
    GameComplete,
}

/// Everything a renderer needs after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub player_pos: Vec2,
    /// Cube rotation in degrees
    pub player_rotation: f32,
    pub alive: bool,
    pub grounded: bool,
    pub gravity: GravityDirection,
    pub flipping: bool,
    pub level_index: usize,
    pub level_complete: bool,
    pub game_complete: bool,
}

impl TickReport {
    fn capture<S>(state: &GameState<S>, outcome: TickOutcome) -> Self {
        Self {
            outcome,
            player_pos: state.player.pos,
            player_rotation: state.player.rotation(),
            alive: state.player.alive,
            grounded: state.player.grounded,
            gravity: state.gravity.direction(),
            flipping: state.gravity.is_flipping(),
            level_index: state.level_index,
            level_complete: state.phase == GamePhase::LevelComplete,
            game_complete: state.phase == GamePhase::GameComplete,
        }
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick<S: LevelSource>(state: &mut GameState<S>, dt: f32) -> TickReport {
    // NaN would poison every position it touches
    let dt = if dt.is_nan() {
        0.0
    } else {
        dt.clamp(0.0, state.settings.max_frame_dt)
    };
    let outcome = step(state, dt);
    TickReport::capture(state, outcome)
}

fn step<S: LevelSource>(state: &mut GameState<S>, dt: f32) -> TickOutcome {
    match state.phase {
        GamePhase::GameComplete => return TickOutcome::GameComplete,
        GamePhase::LevelComplete => {
            state.complete_timer += dt;
            if state.complete_timer > state.settings.level_complete_delay {
                let next = state.level_index + 1;
                return if state.load_level(next) {
                    TickOutcome::LevelLoaded
                } else {
                    TickOutcome::GameComplete
                };
            }
            return TickOutcome::None;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    state.gravity.tick(dt);
    let force = state.gravity.force();
    let direction = state.gravity.direction();
    state.player.integrate(dt, force, direction);

    let collision = match state.level.as_ref() {
        Some(level) => resolve_collisions(&mut state.player, level.grid()),
        None => CollisionOutcome::None,
    };

    let mut outcome = match collision {
        CollisionOutcome::None => TickOutcome::None,
        CollisionOutcome::Blocked => TickOutcome::Blocked,
        CollisionOutcome::Died => {
            log::debug!("Player hit a spike at {:?}", state.player.pos);
            state.respawn_player();
            TickOutcome::Died
        }
        CollisionOutcome::GoalReached => {
            log::info!("Level {} complete!", state.level_index + 1);
            state.phase = GamePhase::LevelComplete;
            state.complete_timer = 0.0;
            TickOutcome::GoalReached
        }
    };

    if out_of_bounds(state) {
        log::debug!("Player left the world at {:?}, respawning", state.player.pos);
        state.respawn_player();
        outcome = TickOutcome::OutOfBounds;
    }

    outcome
}

/// More than the margin past any viewport edge
fn out_of_bounds<S>(state: &GameState<S>) -> bool {
    let s = &state.settings;
    let pos = state.player.pos;
    pos.x < -s.out_of_bounds_margin
        || pos.x > s.viewport_width + s.out_of_bounds_margin
        || pos.y < -s.out_of_bounds_margin
        || pos.y > s.viewport_height + s.out_of_bounds_margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::grid::{TileGrid, TileKind, cell_origin};
    use crate::sim::level::Level;

    /// 12x8 room with a floor, spawn at (2,3) hovering above it, goal far right
    fn room() -> TileGrid {
        let mut grid = TileGrid::new(12, 8);
        grid.fill_row(0, 0..=11, TileKind::Solid);
        grid.set_tile(2, 3, TileKind::Spawn);
        grid.set_tile(10, 1, TileKind::Goal);
        grid
    }

    fn level(name: &str, grid: TileGrid) -> Level {
        Level::new(name, grid).unwrap()
    }

    #[test]
    fn test_free_fall_first_tick() {
        let mut state = GameState::new(vec![level("fall", room())]);
        let start = state.player.pos;

        let report = tick(&mut state, 0.016);
        assert_eq!(report.outcome, TickOutcome::None);
        assert!((state.player.vel.y - (-12.8)).abs() < 1e-4);
        assert_eq!(state.player.vel.x, 0.0);
        assert!((report.player_pos.y - (start.y - 12.8 * 0.016)).abs() < 1e-4);
        assert_eq!(report.gravity, GravityDirection::Down);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut a = GameState::new(vec![level("a", room())]);
        let mut b = GameState::new(vec![level("b", room())]);
        tick(&mut a, 0.5);
        tick(&mut b, MAX_FRAME_DT);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.vel, b.player.vel);
    }

    #[test]
    fn test_bad_dt_is_a_no_op_step() {
        let mut state = GameState::new(vec![level("nan", room())]);
        let start = state.player.pos;
        tick(&mut state, f32::NAN);
        tick(&mut state, -1.0);
        assert_eq!(state.player.pos, start);
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_lands_on_floor() {
        let mut state = GameState::new(vec![level("land", room())]);
        let mut blocked = false;
        for _ in 0..120 {
            let report = tick(&mut state, MAX_FRAME_DT);
            blocked |= report.outcome == TickOutcome::Blocked;
        }
        assert!(blocked);
        assert!(state.player.grounded);
        assert!((state.player.pos.y - TILE_SIZE).abs() < 1e-3);
        assert_eq!(state.player.pos.x, cell_origin(2, 3).x);
    }

    #[test]
    fn test_spike_kills_and_respawns_same_tick() {
        let mut grid = room();
        grid.fill_row(1, 1..=4, TileKind::Spike);
        let mut state = GameState::new(vec![level("spikes", grid)]);
        let spawn = state.player.spawn();

        // Flip sideways first so the gravity reset is observable
        assert!(state.request_gravity_flip(GravityDirection::Left));
        state.player.pos = Vec2::new(66.0, 60.0);

        let report = tick(&mut state, MAX_FRAME_DT);
        assert_eq!(report.outcome, TickOutcome::Died);
        assert!(report.alive);
        assert_eq!(report.player_pos, spawn);
        assert_eq!(report.gravity, GravityDirection::Down);
        assert!(!report.flipping);
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_goal_completes_then_freezes() {
        let mut state = GameState::new(vec![level("first", room()), level("second", room())]);
        state.player.pos = cell_origin(10, 1) + Vec2::new(2.0, 2.0);

        let report = tick(&mut state, MAX_FRAME_DT);
        assert_eq!(report.outcome, TickOutcome::GoalReached);
        assert!(report.level_complete);

        // Frozen while the completion timer runs
        let frozen = state.player.pos;
        assert!(!state.request_gravity_flip(GravityDirection::Up));
        let mut elapsed = 0.0;
        while elapsed + MAX_FRAME_DT <= LEVEL_COMPLETE_DELAY {
            let report = tick(&mut state, MAX_FRAME_DT);
            elapsed += MAX_FRAME_DT;
            assert_eq!(report.outcome, TickOutcome::None);
            assert!(report.level_complete);
            assert_eq!(report.player_pos, frozen);
        }

        // Next tick crosses 1.5 s and loads the second level
        let report = tick(&mut state, MAX_FRAME_DT);
        assert_eq!(report.outcome, TickOutcome::LevelLoaded);
        assert_eq!(report.level_index, 1);
        assert!(!report.level_complete);
        assert_eq!(report.player_pos, cell_origin(2, 3));
        assert_eq!(state.level.as_ref().map(|l| l.name()), Some("second"));
    }

    #[test]
    fn test_last_goal_ends_game() {
        let mut state = GameState::new(vec![level("only", room())]);
        state.player.pos = cell_origin(10, 1) + Vec2::new(2.0, 2.0);
        tick(&mut state, MAX_FRAME_DT);

        let mut last = None;
        for _ in 0..200 {
            last = Some(tick(&mut state, MAX_FRAME_DT));
        }
        let report = last.unwrap();
        assert_eq!(report.outcome, TickOutcome::GameComplete);
        assert!(report.game_complete);
        assert!(state.level.is_none());

        // Terminal: nothing moves any more
        let pos = state.player.pos;
        tick(&mut state, MAX_FRAME_DT);
        assert_eq!(state.player.pos, pos);
    }

    #[test]
    fn test_out_of_bounds_respawns() {
        let mut state = GameState::new(vec![level("oob", room())]);
        assert!(state.request_gravity_flip(GravityDirection::Right));
        state.player.pos = Vec2::new(VIEWPORT_WIDTH + OUT_OF_BOUNDS_MARGIN + 5.0, 300.0);

        let report = tick(&mut state, MAX_FRAME_DT);
        assert_eq!(report.outcome, TickOutcome::OutOfBounds);
        assert_eq!(report.player_pos, state.player.spawn());
        assert_eq!(report.gravity, GravityDirection::Down);
    }

    #[test]
    fn test_within_margin_is_not_out_of_bounds() {
        let mut state = GameState::new(vec![level("edge", room())]);
        state.player.pos = Vec2::new(VIEWPORT_WIDTH + 50.0, 300.0);
        let report = tick(&mut state, MAX_FRAME_DT);
        // Well past the grid's wall ring: nothing to hit, just falling
        assert_eq!(report.outcome, TickOutcome::None);
        assert!(report.player_pos.y < 300.0);
        assert_eq!(report.player_pos.x, VIEWPORT_WIDTH + 50.0);
    }

    #[test]
    fn test_flip_cooldown_runs_in_tick() {
        let mut state = GameState::new(vec![level("flip", room())]);
        assert!(state.request_gravity_flip(GravityDirection::Up));
        assert!(!state.request_gravity_flip(GravityDirection::Left));

        for _ in 0..13 {
            tick(&mut state, MAX_FRAME_DT);
        }
        assert!(state.request_gravity_flip(GravityDirection::Left));
    }

    #[test]
    fn test_determinism() {
        let flips = [
            (5, GravityDirection::Up),
            (40, GravityDirection::Right),
            (70, GravityDirection::Down),
            (90, GravityDirection::Left),
        ];
        let run = || {
            let mut state = GameState::new(vec![level("det", room())]);
            let mut reports = Vec::new();
            for frame in 0..150 {
                for &(at, dir) in &flips {
                    if frame == at {
                        state.request_gravity_flip(dir);
                    }
                }
                reports.push(tick(&mut state, MAX_FRAME_DT));
            }
            reports
        };

        let first = run();
        let second = run();
        assert_eq!(first, second);
    }
}
