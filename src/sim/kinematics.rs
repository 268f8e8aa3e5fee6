//! Motion on the wrap-around plane
//!
//! Every moving entity carries a `Body`: a position inside the plane and an
//! unbounded velocity. The plane is a torus, so leaving one edge re-enters
//! the opposite one.
//!
//! Velocity uses a y-up convention while positions use screen coordinates
//! (y down). A positive `vel.y` therefore *decreases* the rendered y, which
//! keeps headings and trigonometry consistent with what the renderer draws.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::wrap;

/// The toroidal playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub width: f32,
    pub height: f32,
}

impl Plane {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Distance from the center to any corner
    pub fn half_diagonal(&self) -> f32 {
        self.center().length()
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }

    /// Fold an arbitrary point back onto the plane
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(wrap(pos.x, self.width), wrap(pos.y, self.height))
    }

    /// Plane corner with the largest straight-line distance from `pos`.
    ///
    /// Ties (a point on a center line) resolve toward the zero edge, so the
    /// plane center maps to the origin.
    pub fn farthest_corner(&self, pos: Vec2) -> Vec2 {
        let far = |p: f32, n: f32| {
            if p < n / 2.0 {
                n * (1.0 - f32::EPSILON)
            } else {
                0.0
            }
        };
        Vec2::new(far(pos.x, self.width), far(pos.y, self.height))
    }
}

impl Default for Plane {
    fn default() -> Self {
        use crate::consts::{PLANE_HEIGHT, PLANE_WIDTH};
        Self::new(PLANE_WIDTH, PLANE_HEIGHT)
    }
}

/// Position + velocity shared by every moving entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Drift by `vel * dt`, wrapping across the plane edges
    pub fn advance(&mut self, plane: &Plane, dt: f32) {
        self.pos = Vec2::new(
            wrap(self.pos.x + self.vel.x * dt, plane.width),
            // screen y is flipped
            wrap(self.pos.y - self.vel.y * dt, plane.height),
        );
    }
}

/// Anything that moves on the plane
pub trait Kinematic {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn pos(&self) -> Vec2 {
        self.body().pos
    }

    fn vel(&self) -> Vec2 {
        self.body().vel
    }

    fn advance(&mut self, plane: &Plane, dt: f32) {
        self.body_mut().advance(plane, dt);
    }
}

impl Kinematic for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_advance_positive_vel_moves_up_screen() {
        let plane = Plane::new(900.0, 600.0);
        let mut body = Body::new(Vec2::new(450.0, 300.0), Vec2::new(10.0, 100.0));
        body.advance(&plane, 0.5);
        assert_eq!(body.pos, Vec2::new(455.0, 250.0));
    }

    #[test]
    fn test_advance_wraps_edges() {
        let plane = Plane::new(900.0, 600.0);
        let mut body = Body::new(Vec2::new(890.0, 5.0), Vec2::new(20.0, 10.0));
        body.advance(&plane, 1.0);
        assert_eq!(body.pos, Vec2::new(10.0, 595.0));
    }

    #[test]
    fn test_advance_zero_dt_is_noop() {
        let plane = Plane::default();
        let before = Body::new(Vec2::new(12.5, 480.25), Vec2::new(-300.0, 77.0));
        let mut body = before;
        body.advance(&plane, 0.0);
        assert_eq!(body, before);
    }

    #[test]
    fn test_farthest_corner() {
        let plane = Plane::new(900.0, 600.0);
        assert_eq!(plane.farthest_corner(plane.center()), Vec2::ZERO);

        let corner = plane.farthest_corner(Vec2::new(10.0, 10.0));
        assert!(plane.contains(corner));
        assert!(corner.x > 899.0 && corner.y > 599.0);
    }

    proptest! {
        #[test]
        fn advance_stays_on_plane(
            x in 0.0f32..900.0,
            y in 0.0f32..600.0,
            dx in -1.0e4f32..1.0e4,
            dy in -1.0e4f32..1.0e4,
            dt in 0.0f32..10.0,
        ) {
            let plane = Plane::new(900.0, 600.0);
            let mut body = Body::new(Vec2::new(x, y), Vec2::new(dx, dy));
            body.advance(&plane, dt);
            prop_assert!(plane.contains(body.pos), "escaped plane: {:?}", body.pos);
        }

        #[test]
        fn wrap_lands_in_range(m in -1.0e6f32..1.0e6, n in 1.0f32..2000.0) {
            let r = wrap(m, n);
            prop_assert!(r >= 0.0 && r < n, "wrap({}, {}) = {}", m, n, r);
        }
    }
}
