//! Game settings
//!
//! One immutable bundle of tuning values, built from the literal constants in
//! [`crate::consts`] and cloned into the simulation at startup.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning and playfield configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Window caption
    pub window_title: String,

    // === Avatar ===
    /// Distance moved per tick per held direction key
    pub avatar_step: f32,
    pub avatar_radius: f32,
    pub starting_health: i32,

    // === Adversaries ===
    /// Side length of the square adversary
    pub adversary_size: f32,
    /// Pursuit distance covered per tick
    pub adversary_speed: f32,
    /// Population cap checked by spawn admission
    pub max_adversaries: usize,
    /// Health removed from the avatar on contact
    pub contact_damage: i32,

    // === Projectiles ===
    /// Distance covered per tick
    pub projectile_speed: f32,
    pub projectile_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            tick_rate: TICK_RATE,
            window_title: "Arena Shooter".to_string(),

            avatar_step: AVATAR_STEP,
            avatar_radius: AVATAR_RADIUS,
            starting_health: AVATAR_START_HEALTH,

            adversary_size: ADVERSARY_SIZE,
            adversary_speed: ADVERSARY_SPEED,
            max_adversaries: MAX_ADVERSARIES,
            contact_damage: CONTACT_DAMAGE,

            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
        }
    }
}

impl Settings {
    /// Adversary-to-avatar distance below which contact is made
    pub fn contact_radius(&self) -> f32 {
        self.adversary_size / 2.0 + self.avatar_radius
    }

    /// Adversary-to-projectile distance below which a shot lands
    pub fn hit_radius(&self) -> f32 {
        self.adversary_size / 2.0 + self.projectile_radius
    }

    /// Wall-clock length of one tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate.max(1)))
    }

    /// Whether a point lies inside the half-open playfield `[0, w) x [0, h)`
    pub fn in_bounds(&self, pos: Vec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }

    /// Avatar starting position (playfield centre, whole units)
    pub fn avatar_spawn(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }

    /// Playfield size as a vector
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radii() {
        let settings = Settings::default();
        assert_eq!(settings.contact_radius(), 20.0);
        assert_eq!(settings.hit_radius(), 13.0);
    }

    #[test]
    fn test_in_bounds_is_half_open() {
        let settings = Settings::default();
        assert!(settings.in_bounds(Vec2::new(0.0, 0.0)));
        assert!(settings.in_bounds(Vec2::new(799.9, 599.9)));
        assert!(!settings.in_bounds(Vec2::new(800.0, 10.0)));
        assert!(!settings.in_bounds(Vec2::new(10.0, 600.0)));
        assert!(!settings.in_bounds(Vec2::new(-0.1, 10.0)));
    }

    #[test]
    fn test_avatar_spawn_centre() {
        assert_eq!(Settings::default().avatar_spawn(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_tick_duration_60hz() {
        let d = Settings::default().tick_duration();
        assert!((d.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }
}
