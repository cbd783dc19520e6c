//! Collision resolution
//!
//! Naive pairwise checks in collection order. Each adversary is resolved at
//! most once per pass: avatar contact wins outright, otherwise the first
//! live projectile in range takes it out and is spent.

use super::state::GameState;
use crate::distance;

/// Outcome of one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Adversaries removed by touching the avatar
    pub contacts: u32,
    /// Adversaries removed by projectiles (one projectile each)
    pub kills: u32,
}

/// Resolve avatar contacts and projectile hits, removing what was struck.
///
/// Uses mark-and-compact: `retain` visits every adversary exactly once and a
/// per-projectile mask keeps a spent projectile from landing a second hit
/// within the same pass.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let GameState {
        settings,
        avatar,
        adversaries,
        projectiles,
        ..
    } = state;

    let contact_radius = settings.contact_radius();
    let hit_radius = settings.hit_radius();
    let damage = settings.contact_damage;

    let mut report = CollisionReport::default();
    let mut spent = vec![false; projectiles.len()];

    adversaries.retain(|adversary| {
        if distance(adversary.pos, avatar.pos) < contact_radius {
            avatar.apply_damage(damage);
            report.contacts += 1;
            log::debug!(
                "Contact at ({:.1}, {:.1}), health now {}",
                adversary.pos.x,
                adversary.pos.y,
                avatar.health
            );
            return false;
        }

        let hit = projectiles
            .iter()
            .zip(spent.iter_mut())
            .find(|(projectile, used)| {
                !**used && distance(adversary.pos, projectile.pos) < hit_radius
            });
        match hit {
            Some((_, used)) => {
                *used = true;
                report.kills += 1;
                false
            }
            None => true,
        }
    });

    if report.kills > 0 {
        let mut mask = spent.iter();
        projectiles.retain(|_| !mask.next().copied().unwrap_or(false));
        log::debug!("{} adversaries shot down", report.kills);
    }

    state.contacts += report.contacts;
    state.kills += report.kills;
    report
}
