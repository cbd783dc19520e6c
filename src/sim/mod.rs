//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve_collisions};
pub use entity::{Adversary, Avatar, Projectile, Sprite};
pub use state::GameState;
pub use tick::{TickReport, tick};
