//! The player cube

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gravity::GravityDirection;
use super::rect::Rect;
use crate::consts::*;
use crate::normalize_degrees;

/// Rotation within this many degrees of its target snaps onto it
const ROTATION_SNAP: f32 = 1.0;

/// Position and velocity of the cube the player steers with gravity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Bottom-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Per-axis speed cap
    pub max_vel: f32,
    pub grounded: bool,
    pub alive: bool,
    /// Where `respawn` puts the cube
    spawn: Vec2,
    /// Display rotation in degrees, eases toward the gravity direction's angle.
    /// Visual only.
    rotation: f32,
    rotation_speed: f32,
}

impl PlayerBody {
    pub fn new(spawn: Vec2) -> Self {
        Self::with_limits(spawn, MAX_VELOCITY, PLAYER_ROTATION_SPEED)
    }

    pub fn with_limits(spawn: Vec2, max_vel: f32, rotation_speed: f32) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
            max_vel,
            grounded: false,
            alive: true,
            spawn,
            rotation: 0.0,
            rotation_speed,
        }
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Advance one step under `force`. Dead bodies don't move.
    pub fn integrate(&mut self, dt: f32, force: Vec2, direction: GravityDirection) {
        if !self.alive {
            return;
        }

        self.vel += force * dt;
        self.vel = self
            .vel
            .clamp(Vec2::splat(-self.max_vel), Vec2::splat(self.max_vel));
        self.pos += self.vel * dt;

        self.rotate_toward(direction.rotation(), dt);
    }

    /// Turn toward `target` degrees along the shorter way round
    fn rotate_toward(&mut self, target: f32, dt: f32) {
        let delta = normalize_degrees(target - self.rotation);
        if delta.abs() <= ROTATION_SNAP {
            self.rotation = normalize_degrees(target);
            return;
        }
        let max_step = self.rotation_speed * dt;
        self.rotation = normalize_degrees(self.rotation + delta.clamp(-max_step, max_step));
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Push out of a solid along `normal` and stop motion on that axis.
    ///
    /// Any vertical contact counts as grounded, ceiling included.
    pub fn resolve_against_solid(&mut self, normal: Vec2, penetration: f32) {
        self.pos += normal * penetration;

        if normal.x != 0.0 {
            self.vel.x = 0.0;
        }
        if normal.y != 0.0 {
            self.vel.y = 0.0;
        }

        self.grounded = normal.y != 0.0;
    }

    pub fn die(&mut self) {
        self.alive = false;
        self.vel = Vec2::ZERO;
    }

    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
        self.alive = true;
        self.grounded = false;
        self.rotation = 0.0;
    }

    /// Move the respawn point; the body stays where it is
    pub fn set_spawn(&mut self, spawn: Vec2) {
        self.spawn = spawn;
    }
}
