//! Drift Rocks - a wrap-around asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state)
//! - `view`: Read-only render snapshot and ship geometry
//! - `platform`: Input collection and frame timing
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;
pub mod view;

pub use tuning::{Tuning, TuningError};
pub use view::{Renderer, Snapshot};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLANE_WIDTH: f32 = 900.0;
    pub const PLANE_HEIGHT: f32 = 600.0;

    /// Ship acceleration while thrusting (pixels/s²)
    pub const SHIP_THRUST: f32 = 300.0;
    /// Ship turn rate (radians/s)
    pub const SHIP_ROTATE: f32 = std::f32::consts::PI;
    /// Ship drawing size
    pub const SHIP_LENGTH: f32 = 30.0;
    pub const SHIP_WIDTH: f32 = 20.0;

    /// Seconds between shots
    pub const RELOAD_TIME: f32 = 0.16;
    /// Muzzle speed added to the ship velocity (pixels/s)
    pub const SHOT_SPEED: f32 = 350.0;
    /// Shot lifetime (seconds)
    pub const SHOT_LIFE: f32 = 1.0;
    pub const SHOT_RADIUS: f32 = 3.5;

    pub const OBSTACLE_RADIUS: f32 = 20.0;
    pub const OBSTACLE_MIN_SPEED: f32 = 20.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 80.0;
    /// Obstacles spawned per level on top of the level number
    pub const BASE_OBSTACLES: u32 = 8;
    /// Minimum spawn distance between an obstacle and the ship
    pub const SPAWN_CLEARANCE: f32 = 150.0;
    /// Redraws per obstacle before falling back to the far corner
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

    /// Native driver frame step (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest elapsed time handed to the simulation for a single frame
    pub const MAX_FRAME_DT: f32 = 0.25;
}

/// Non-negative modulo: maps any finite `m` into `[0, n)`
#[inline]
pub fn wrap(m: f32, n: f32) -> f32 {
    let r = m.rem_euclid(n);
    // rem_euclid rounds tiny negatives up to exactly n
    if r >= n { 0.0 } else { r }
}

/// Unit vector for a heading (radians, counterclockwise, y up)
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_negative() {
        assert_eq!(wrap(-10.0, 600.0), 590.0);
        assert_eq!(wrap(-600.0, 600.0), 0.0);
        assert_eq!(wrap(-1250.0, 600.0), 550.0);
    }

    #[test]
    fn test_wrap_positive() {
        assert_eq!(wrap(0.0, 900.0), 0.0);
        assert_eq!(wrap(450.0, 900.0), 450.0);
        assert_eq!(wrap(900.0, 900.0), 0.0);
        assert_eq!(wrap(1000.0, 900.0), 100.0);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_below_bound() {
        let r = wrap(-1.0e-8, 600.0);
        assert!((0.0..600.0).contains(&r));
    }

    #[test]
    fn test_heading_vector_up() {
        let v = heading_vector(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }
}
