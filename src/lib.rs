//! Arena Shooter - a single avatar holding out against pursuing adversaries
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions)
//! - `game_loop`: Fixed-rate Running/Terminated driver
//! - `input`: Held keys and discrete input events
//! - `renderer`: Render pass and wgpu pipeline
//! - `platform`: winit window and event plumbing
//! - `settings`: Immutable tuning values

pub mod game_loop;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game_loop::{ExitReason, GameLoop, LoopPhase, RunSummary, TickClock};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;

    /// Playfield dimensions (logical units, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Avatar defaults
    pub const AVATAR_RADIUS: f32 = 10.0;
    pub const AVATAR_STEP: f32 = 2.0;
    pub const AVATAR_START_HEALTH: i32 = 100;
    /// Length of the facing indicator drawn from the avatar centre
    pub const AIM_LINE_LENGTH: f32 = 20.0;
    pub const AIM_LINE_WIDTH: f32 = 2.0;

    /// Adversary defaults
    pub const ADVERSARY_SIZE: f32 = 20.0;
    pub const ADVERSARY_SPEED: f32 = 1.0;
    pub const MAX_ADVERSARIES: usize = 5;
    pub const CONTACT_DAMAGE: i32 = 10;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 3.0;

    /// Separations below this count as "already there"
    pub const ARRIVAL_EPSILON: f32 = 1e-4;

    /// HUD health bar placement
    pub const HEALTH_BAR_ORIGIN: (f32, f32) = (10.0, 10.0);
    pub const HEALTH_BAR_HEIGHT: f32 = 20.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing from `from` toward `to`
///
/// Returns `None` when the points are closer than [`consts::ARRIVAL_EPSILON`],
/// where the direction is undefined.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let len = delta.length();
    if len < consts::ARRIVAL_EPSILON {
        return None;
    }
    Some(delta / len)
}

/// Angle (radians) of the ray from `from` to `to`, quadrant-correct
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Vector of the given length pointing along `angle`
#[inline]
pub fn from_angle(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.cos() * length, angle.sin() * length)
}
