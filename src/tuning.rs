//! Data-driven game balance
//!
//! Every gameplay number lives in `Tuning` so a JSON file can retune a run
//! without a rebuild. Missing fields fall back to `crate::consts`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Plane;

/// Environment variable naming an optional tuning JSON file
pub const TUNING_ENV: &str = "DRIFT_ROCKS_TUNING";

#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(err) => write!(f, "tuning read error: {err}"),
            TuningError::Parse(err) => write!(f, "tuning parse error: {err}"),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(err) => Some(err),
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        TuningError::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Gameplay constants for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Plane ===
    pub plane_width: f32,
    pub plane_height: f32,

    // === Ship ===
    /// Thrust acceleration (pixels/s²)
    pub ship_thrust: f32,
    /// Turn rate (radians/s)
    pub ship_rotate: f32,
    /// Cooldown between shots (seconds)
    pub reload_time: f32,

    // === Shots ===
    pub shot_speed: f32,
    pub shot_life: f32,
    /// Drawing only; hits are tested against the obstacle radius
    pub shot_radius: f32,

    // === Obstacles ===
    pub obstacle_radius: f32,
    pub obstacle_min_speed: f32,
    pub obstacle_max_speed: f32,
    pub spawn_clearance: f32,
    pub base_obstacles: u32,

    pub start_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            plane_width: PLANE_WIDTH,
            plane_height: PLANE_HEIGHT,

            ship_thrust: SHIP_THRUST,
            ship_rotate: SHIP_ROTATE,
            reload_time: RELOAD_TIME,

            shot_speed: SHOT_SPEED,
            shot_life: SHOT_LIFE,
            shot_radius: SHOT_RADIUS,

            obstacle_radius: OBSTACLE_RADIUS,
            obstacle_min_speed: OBSTACLE_MIN_SPEED,
            obstacle_max_speed: OBSTACLE_MAX_SPEED,
            spawn_clearance: SPAWN_CLEARANCE,
            base_obstacles: BASE_OBSTACLES,

            start_level: 1,
        }
    }
}

impl Tuning {
    pub fn plane(&self) -> Plane {
        Plane::new(self.plane_width, self.plane_height)
    }

    /// Number of obstacles spawned at the start of `level`
    pub fn obstacle_count(&self, level: u32) -> usize {
        self.base_obstacles.saturating_add(level) as usize
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by `DRIFT_ROCKS_TUNING`, or use defaults
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(TUNING_ENV) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(err) => {
                log::warn!("Ignoring {}={}: {}", TUNING_ENV, path, err);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("plane_width", self.plane_width),
            ("plane_height", self.plane_height),
            ("ship_thrust", self.ship_thrust),
            ("ship_rotate", self.ship_rotate),
            ("reload_time", self.reload_time),
            ("shot_speed", self.shot_speed),
            ("shot_life", self.shot_life),
            ("shot_radius", self.shot_radius),
            ("obstacle_radius", self.obstacle_radius),
            ("obstacle_min_speed", self.obstacle_min_speed),
            ("obstacle_max_speed", self.obstacle_max_speed),
            ("spawn_clearance", self.spawn_clearance),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite, got {value}")));
        }

        if self.plane_width <= 0.0 || self.plane_height <= 0.0 {
            return Err(invalid(format!(
                "plane must have positive size, got {}x{}",
                self.plane_width, self.plane_height
            )));
        }

        let non_negative = [
            ("ship_thrust", self.ship_thrust),
            ("ship_rotate", self.ship_rotate),
            ("reload_time", self.reload_time),
            ("shot_speed", self.shot_speed),
            ("shot_life", self.shot_life),
            ("shot_radius", self.shot_radius),
            ("obstacle_radius", self.obstacle_radius),
            ("obstacle_min_speed", self.obstacle_min_speed),
            ("spawn_clearance", self.spawn_clearance),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(invalid(format!("{name} must not be negative, got {value}")));
        }

        if self.obstacle_min_speed > self.obstacle_max_speed {
            return Err(invalid(format!(
                "obstacle speed range is empty: {}..{}",
                self.obstacle_min_speed, self.obstacle_max_speed
            )));
        }

        // The far corner is the spawner's last resort, so it must be clear.
        let half_diagonal = self.plane().half_diagonal();
        if self.spawn_clearance >= half_diagonal {
            return Err(invalid(format!(
                "spawn_clearance {} leaves no room on a {}x{} plane (max {})",
                self.spawn_clearance, self.plane_width, self.plane_height, half_diagonal
            )));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> TuningError {
    TuningError::Invalid(reason)
}
