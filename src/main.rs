//! Gravity Flip headless runner
//!
//! Plays the built-in levels with a fixed flip script and logs what happens.
//! Rendering and touch input live in the platform front-ends.
//!
//! Set `GRAVITY_FLIP_SETTINGS` to a JSON file to override physics tuning and
//! `RUST_LOG=debug` to see every flip and respawn.

use gravity_flip::sim::{GameState, GravityDirection, TickOutcome, tick};
use gravity_flip::{BuiltinLevels, Settings};

/// Run for at most this many frames (~60 s at 60 Hz)
const MAX_FRAMES: u32 = 3600;
/// Frame time fed to the simulation
const FRAME_DT: f32 = 1.0 / 60.0;

/// Flip gravity every so often, cycling through the directions
const FLIP_SCRIPT: [(u32, GravityDirection); 4] = [
    (90, GravityDirection::Right),
    (180, GravityDirection::Up),
    (270, GravityDirection::Left),
    (360, GravityDirection::Down),
];
const FLIP_SCRIPT_PERIOD: u32 = 360;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gravity Flip (headless) starting...");

    let settings = match std::env::var_os("GRAVITY_FLIP_SETTINGS") {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut state = match GameState::with_settings(BuiltinLevels, settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            return;
        }
    };
    let mut deaths = 0u32;
    let mut respawns = 0u32;

    for frame in 0..MAX_FRAMES {
        let phase = frame % FLIP_SCRIPT_PERIOD + 1;
        for &(at, direction) in &FLIP_SCRIPT {
            if phase == at {
                state.request_gravity_flip(direction);
            }
        }

        let report = tick(&mut state, FRAME_DT);
        match report.outcome {
            TickOutcome::Died => deaths += 1,
            TickOutcome::OutOfBounds => respawns += 1,
            TickOutcome::GameComplete => {
                log::info!("All levels cleared after {} frames", frame + 1);
                break;
            }
            _ => {}
        }
    }

    let level = state.level.as_ref().map_or("-", |l| l.name());
    log::info!(
        "Finished on level {} ({}), {} deaths, {} out-of-bounds respawns, player at {:?}",
        state.level_index + 1,
        level,
        deaths,
        respawns,
        state.player.pos
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web front-end drives the simulation itself
}
