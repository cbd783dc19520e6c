//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one tick in a fixed order:
//! avatar movement, spawn admission, pursuit, projectile flight and culling,
//! then collision resolution.

use super::collision::{CollisionReport, resolve_collisions};
use super::state::GameState;
use crate::input::HeldKeys;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Whether spawn admission added an adversary
    pub spawned: bool,
    /// Projectiles removed for leaving the playfield
    pub culled: usize,
    pub collisions: CollisionReport,
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, held: HeldKeys) -> TickReport {
    // 1. Held-key movement (additive, unclamped)
    let delta = held.movement(state.settings.avatar_step);
    state.avatar.move_by(delta);

    // 2. Spawn admission (at most one per tick)
    let spawned = state.spawn_adversary();

    // 3. Pursuit toward where the avatar is now
    let target = state.avatar.pos;
    let speed = state.settings.adversary_speed;
    for adversary in &mut state.adversaries {
        adversary.pursue(target, speed);
    }

    // 4. Projectile flight; anything out of play is gone before collisions
    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    let culled = state.cull_projectiles();

    // 5. Collisions
    let collisions = resolve_collisions(state);

    state.time_ticks += 1;

    TickReport {
        spawned,
        culled,
        collisions,
    }
}
