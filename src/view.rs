//! Read-only render view
//!
//! Renderers never touch `GameState` directly. They get a `Snapshot` copied
//! out after each tick, in screen coordinates (origin top-left, y down).

use glam::Vec2;
use serde::Serialize;

use crate::consts::{SHIP_LENGTH, SHIP_WIDTH};
use crate::sim::{GameState, Kinematic};

/// Anything that can draw a frame
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Ship position and facing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShipPose {
    pub pos: Vec2,
    /// Radians, counterclockwise with y up
    pub heading: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub level: u32,
    pub playing: bool,
    pub ship: ShipPose,
    pub projectiles: Vec<Vec2>,
    pub obstacles: Vec<Vec2>,
    pub shot_radius: f32,
    pub obstacle_radius: f32,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            width: state.plane().width,
            height: state.plane().height,
            level: state.level,
            playing: state.playing,
            ship: ShipPose {
                pos: state.ship.pos(),
                heading: state.ship.heading,
            },
            projectiles: state.projectiles.iter().map(|p| p.pos()).collect(),
            obstacles: state.obstacles.iter().map(|o| o.pos()).collect(),
            shot_radius: state.tuning().shot_radius,
            obstacle_radius: state.tuning().obstacle_radius,
        }
    }
}

impl Snapshot {
    /// Start prompt shown while the level is frozen
    pub fn prompt(&self) -> Option<String> {
        if self.playing {
            None
        } else {
            Some(format!("Level {} - press Up to start", self.level))
        }
    }

    pub fn ship_shape(&self) -> ShipShape {
        ShipShape::from_pose(&self.ship)
    }
}

/// Ship triangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipShape {
    pub nose: Vec2,
    pub starboard: Vec2,
    pub port: Vec2,
}

impl ShipShape {
    /// Nose sits 2/3 of the hull length ahead of the pose, the base 1/3
    /// behind. Screen y is flipped, so the hull is rotated by `-heading`.
    pub fn from_pose(pose: &ShipPose) -> Self {
        let (sin, cos) = pose.heading.sin_cos();
        // local (a, b) -> screen, rotated by -heading
        let to_screen =
            |a: f32, b: f32| pose.pos + Vec2::new(a * cos + b * sin, b * cos - a * sin);

        Self {
            nose: to_screen(SHIP_LENGTH * 2.0 / 3.0, 0.0),
            starboard: to_screen(-SHIP_LENGTH / 3.0, SHIP_WIDTH / 2.0),
            port: to_screen(-SHIP_LENGTH / 3.0, -SHIP_WIDTH / 2.0),
        }
    }

    pub fn points(&self) -> [Vec2; 3] {
        [self.nose, self.starboard, self.port]
    }
}
