//! Level-start obstacle field
//!
//! Obstacles get a uniform position on the plane and a uniform drift
//! direction. Positions too close to the ship are redrawn, up to
//! `MAX_SPAWN_ATTEMPTS` times, before falling back to the plane corner
//! farthest from the ship.
//!
//! Only `GameState` calls in here, with a tuning it has already validated.

use glam::Vec2;
use rand::Rng;

use super::kinematics::Plane;
use super::state::Obstacle;
use crate::consts::MAX_SPAWN_ATTEMPTS;
use crate::heading_vector;
use crate::tuning::Tuning;

/// Spawn `count` obstacles clear of `ship_pos`
pub fn spawn_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    plane: &Plane,
    ship_pos: Vec2,
    count: usize,
    tuning: &Tuning,
) -> Vec<Obstacle> {
    (0..count)
        .map(|_| {
            let pos = clear_position(rng, plane, ship_pos, tuning.spawn_clearance);
            let vel = random_velocity(rng, tuning.obstacle_min_speed, tuning.obstacle_max_speed);
            Obstacle::new(pos, vel)
        })
        .collect()
}

/// Uniform point on the plane strictly farther than `clearance` from `avoid`
pub fn clear_position<R: Rng + ?Sized>(
    rng: &mut R,
    plane: &Plane,
    avoid: Vec2,
    clearance: f32,
) -> Vec2 {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = plane.wrap(Vec2::new(
            rng.random_range(0.0..plane.width),
            rng.random_range(0.0..plane.height),
        ));
        if candidate.distance(avoid) > clearance {
            return candidate;
        }
    }

    let corner = plane.farthest_corner(avoid);
    if corner.distance(avoid) <= clearance {
        log::warn!(
            "No spawn point clears {} px around {:?}; using {:?}",
            clearance,
            avoid,
            corner
        );
    } else {
        log::debug!("Spawn rejection cap hit; using corner {:?}", corner);
    }
    corner
}

/// Uniform direction, speed uniform in `[min_speed, max_speed]`
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, min_speed: f32, max_speed: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let speed = rng.random_range(min_speed..=max_speed);
    heading_vector(angle) * speed
}
