//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything the simulation mutates. It
//! is built by the caller and handed to `tick` by `&mut`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::kinematics::{Body, Kinematic, Plane};
use super::spawn::spawn_obstacles;
use super::tick::ControlIntent;
use crate::heading_vector;
use crate::tuning::{Tuning, TuningError};
use crate::view::Snapshot;

/// Turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

/// Things that happened during the last tick (for logging/effects only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First thrust of the level unfroze the simulation
    LevelStarted { level: u32 },
    ShotFired { pos: Vec2 },
    ObstacleDestroyed { pos: Vec2 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Facing (radians, counterclockwise from +x, never normalized)
    pub heading: f32,
    /// Turn rate (radians/s)
    pub turn_rate: f32,
    /// Thrust acceleration (pixels/s²)
    pub thrust_accel: f32,
    /// Seconds until the next shot; zero or negative means ready
    pub reload: f32,
}

impl Ship {
    /// Ship at rest at `pos`, facing up the screen
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO),
            heading: std::f32::consts::FRAC_PI_2,
            turn_rate: tuning.ship_rotate,
            thrust_accel: tuning.ship_thrust,
            reload: 0.0,
        }
    }

    pub fn facing(&self) -> Vec2 {
        heading_vector(self.heading)
    }

    /// Accelerate along the heading. Speed is never capped.
    pub fn thrust(&mut self, dt: f32) {
        self.body.vel += self.facing() * self.thrust_accel * dt;
    }

    pub fn turn(&mut self, dt: f32, direction: Turn) {
        match direction {
            Turn::Left => self.heading += self.turn_rate * dt,
            Turn::Right => self.heading -= self.turn_rate * dt,
        }
    }

    pub fn reloaded(&self) -> bool {
        self.reload <= 0.0
    }

    /// Launch a shot if reloaded, restarting the cooldown
    pub fn fire(&mut self, tuning: &Tuning) -> Option<Projectile> {
        if !self.reloaded() {
            return None;
        }
        self.reload = tuning.reload_time;
        let vel = self.body.vel + self.facing() * tuning.shot_speed;
        Some(Projectile::new(self.body.pos, vel, tuning.shot_life))
    }

    /// Run the reload timer down; it keeps going below zero
    pub fn cool_down(&mut self, dt: f32) {
        self.reload -= dt;
    }
}

impl Kinematic for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// A shot fired by the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    /// Seconds left before the shot fizzles
    pub life: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, life: f32) -> Self {
        Self {
            body: Body::new(pos, vel),
            life,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn age(&mut self, dt: f32) {
        self.life -= dt;
    }

    /// Spend the shot immediately (it hit something)
    pub fn consume(&mut self) {
        self.life = 0.0;
    }
}

impl Kinematic for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
}

impl Obstacle {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            body: Body::new(pos, vel),
        }
    }
}

impl Kinematic for Obstacle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner RNG, seeded from `seed`
    rng: Pcg32,
    /// Gameplay constants in force, validated on construction
    tuning: Tuning,
    plane: Plane,
    /// Current level (1-based by default)
    pub level: u32,
    /// False until the first thrust of the level
    pub playing: bool,
    /// Simulated seconds since the level unfroze
    pub time: f32,
    pub ship: Ship,
    /// Live shots, in firing order
    pub projectiles: Vec<Projectile>,
    /// Live obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Intent applied by the most recent tick
    pub intent: ControlIntent,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game at the tuning's starting level
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        let level = tuning.start_level;
        Self::with_level(seed, tuning, level)
    }

    /// Create a new game at a specific level. Fails if `tuning` does not
    /// validate, since the spawner relies on its bounds.
    pub fn with_level(seed: u64, tuning: Tuning, level: u32) -> Result<Self, TuningError> {
        tuning.validate()?;
        let plane = tuning.plane();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            plane,
            level,
            playing: false,
            time: 0.0,
            ship: Ship::new(plane.center(), &tuning),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            intent: ControlIntent::default(),
            events: Vec::new(),
        };

        state.start_level(level);

        Ok(state)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Reset the ship, clear shots, spawn a fresh obstacle field and freeze
    /// until the next thrust
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        self.playing = false;
        self.time = 0.0;
        self.ship = Ship::new(self.plane.center(), &self.tuning);
        self.projectiles.clear();
        self.intent = ControlIntent::default();
        self.events.clear();

        let count = self.tuning.obstacle_count(level);
        self.obstacles = spawn_obstacles(
            &mut self.rng,
            &self.plane,
            self.ship.pos(),
            count,
            &self.tuning,
        );

        log::info!(
            "Level {}: {} obstacles (seed {})",
            level,
            self.obstacles.len(),
            self.seed
        );
    }

    /// Fire if the level is live and the ship has reloaded.
    /// Returns whether a shot was launched.
    pub fn fire(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        let Some(shot) = self.ship.fire(&self.tuning) else {
            return false;
        };
        self.events.push(GameEvent::ShotFired { pos: shot.pos() });
        self.projectiles.push(shot);
        true
    }

    /// All obstacles destroyed. The level does not advance on its own.
    pub fn is_cleared(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }
}
