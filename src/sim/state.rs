//! Game state and core simulation types
//!
//! `GameState` is the sole owner of every entity. Nothing outside the
//! simulation holds on to an entity; the render pass only borrows a
//! [`Sprite`] snapshot for the frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Adversary, Avatar, Projectile, Sprite};
use crate::settings::Settings;

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Tuning values, fixed for the whole run
    pub settings: Settings,
    pub avatar: Avatar,
    /// Insertion order is iteration order
    pub adversaries: Vec<Adversary>,
    /// Insertion order is iteration order
    pub projectiles: Vec<Projectile>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Adversaries destroyed by projectiles
    pub kills: u32,
    /// Adversaries that reached the avatar
    pub contacts: u32,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let avatar = Avatar::new(settings.avatar_spawn(), settings.starting_health);
        Self {
            seed,
            avatar,
            adversaries: Vec::with_capacity(settings.max_adversaries),
            projectiles: Vec::new(),
            time_ticks: 0,
            kills: 0,
            contacts: 0,
            rng: Pcg32::seed_from_u64(seed),
            settings,
        }
    }

    /// Spawn admission: add one adversary at a random in-bounds position if
    /// the population is below the cap. Returns whether one was added.
    pub fn spawn_adversary(&mut self) -> bool {
        if self.adversaries.len() >= self.settings.max_adversaries {
            return false;
        }
        let pos = Vec2::new(
            self.rng.random_range(0.0..self.settings.width),
            self.rng.random_range(0.0..self.settings.height),
        );
        log::trace!("Spawned adversary at ({:.1}, {:.1})", pos.x, pos.y);
        self.adversaries.push(Adversary::new(pos));
        true
    }

    /// Fire one projectile from the avatar along its current facing
    pub fn fire(&mut self) {
        let projectile = Projectile::fired(
            self.avatar.pos,
            self.avatar.facing,
            self.settings.projectile_speed,
        );
        self.projectiles.push(projectile);
    }

    /// Drop projectiles that have left the playfield
    pub fn cull_projectiles(&mut self) -> usize {
        let before = self.projectiles.len();
        let settings = &self.settings;
        self.projectiles.retain(|p| settings.in_bounds(p.pos));
        before - self.projectiles.len()
    }

    pub fn is_defeated(&self) -> bool {
        self.avatar.is_defeated()
    }

    /// Drawable snapshot in draw order: avatar, adversaries, projectiles
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        let avatar = Sprite::Avatar {
            pos: self.avatar.pos,
            radius: self.settings.avatar_radius,
            facing: self.avatar.facing,
        };
        let size = self.settings.adversary_size;
        let radius = self.settings.projectile_radius;

        std::iter::once(avatar)
            .chain(
                self.adversaries
                    .iter()
                    .map(move |a| Sprite::Adversary { pos: a.pos, size }),
            )
            .chain(
                self.projectiles
                    .iter()
                    .map(move |p| Sprite::Projectile { pos: p.pos, radius }),
            )
    }
}
