//! Shot vs. rock collision detection and resolution
//!
//! Hits use straight-line distance between centers against the obstacle
//! radius. Collisions are not tested across the wrap seam.

use glam::Vec2;

use super::kinematics::Kinematic;
use super::state::{Obstacle, Projectile};

/// True if `point` lies strictly inside the circle
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance_squared(point) < radius * radius
}

/// Destroy every obstacle touched by a live projectile.
///
/// Each obstacle consumes at most one projectile, and a consumed projectile
/// (life set to 0) cannot hit anything else this step. Obstacles are removed
/// with `retain`, so removal never skips or revisits an entry. Spent
/// projectiles stay in the slice for the caller to prune.
///
/// Returns the positions of destroyed obstacles, in obstacle order.
pub fn resolve_collisions(
    obstacles: &mut Vec<Obstacle>,
    projectiles: &mut [Projectile],
    obstacle_radius: f32,
) -> Vec<Vec2> {
    let mut destroyed = Vec::new();

    obstacles.retain(|obstacle| {
        let center = obstacle.pos();
        let hit = projectiles
            .iter_mut()
            .find(|shot| shot.is_alive() && circle_contains(center, obstacle_radius, shot.pos()));

        match hit {
            Some(shot) => {
                shot.consume();
                destroyed.push(center);
                false
            }
            None => true,
        }
    });

    destroyed
}
