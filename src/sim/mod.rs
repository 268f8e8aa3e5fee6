//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn/fire order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod kinematics;
mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circle_contains, resolve_collisions};
pub use kinematics::{Body, Kinematic, Plane};
pub use state::{GameEvent, GameState, Obstacle, Projectile, Ship, Turn};
pub use tick::{ControlIntent, sanitize_dt, tick};
