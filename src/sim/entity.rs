//! Entity types and their per-tick movement rules

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{angle_to, direction_to, from_angle};

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    /// Facing angle in radians (0 = +x, y grows downward)
    pub facing: f32,
    /// Goes negative freely; anything <= 0 ends the run
    pub health: i32,
}

impl Avatar {
    pub fn new(pos: Vec2, health: i32) -> Self {
        Self {
            pos,
            facing: 0.0,
            health,
        }
    }

    /// Shift position by `delta`. The playfield does not clamp the avatar.
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Face toward a target point
    pub fn set_facing(&mut self, target: Vec2) {
        self.facing = angle_to(self.pos, target);
    }

    pub fn apply_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// A pursuing adversary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub pos: Vec2,
}

impl Adversary {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Step `speed` units straight toward `target`.
    ///
    /// Returns false (and stays put) when already on top of the target.
    pub fn pursue(&mut self, target: Vec2, speed: f32) -> bool {
        match direction_to(self.pos, target) {
            Some(dir) => {
                self.pos += dir * speed;
                true
            }
            None => false,
        }
    }
}

/// A fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Fixed at creation
    pub vel: Vec2,
}

impl Projectile {
    /// Launch from `origin` along `angle` at `speed` units per tick
    pub fn fired(origin: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            pos: origin,
            vel: from_angle(angle, speed),
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// Drawable shape descriptor for one entity
///
/// The render pass matches on this instead of asking entities to draw
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    /// Filled circle with a facing indicator
    Avatar { pos: Vec2, radius: f32, facing: f32 },
    /// Filled square centred on `pos`
    Adversary { pos: Vec2, size: f32 },
    /// Small filled circle
    Projectile { pos: Vec2, radius: f32 },
}
