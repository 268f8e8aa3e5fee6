//! Per-frame simulation step
//!
//! Advances the game by a variable `dt` in a fixed order so identical inputs
//! always produce identical states.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::kinematics::Kinematic;
use super::state::{GameEvent, GameState, Projectile, Turn};

/// Player intent for a single frame. Replaces the previous frame's intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlIntent {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
}

/// Negative or non-finite deltas become a zero-length step
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, intent: &ControlIntent, dt: f32) {
    let dt = sanitize_dt(dt);
    let plane = *state.plane();
    let obstacle_radius = state.tuning().obstacle_radius;

    state.intent = *intent;
    state.events.clear();

    // Controls
    if intent.thrust {
        state.ship.thrust(dt);
        if !state.playing {
            state.playing = true;
            log::info!("Level {} started", state.level);
            state.events.push(GameEvent::LevelStarted { level: state.level });
        }
    }
    if intent.turn_left {
        state.ship.turn(dt, Turn::Left);
    }
    if intent.turn_right {
        state.ship.turn(dt, Turn::Right);
    }
    if intent.fire {
        state.fire();
    }

    // Drift shots and rocks (frozen until the level starts)
    if state.playing {
        state.time += dt;
        for shot in &mut state.projectiles {
            shot.advance(&plane, dt);
            shot.age(dt);
        }
        for obstacle in &mut state.obstacles {
            obstacle.advance(&plane, dt);
        }
    }

    let destroyed =
        resolve_collisions(&mut state.obstacles, &mut state.projectiles, obstacle_radius);
    for pos in destroyed {
        log::debug!("Obstacle destroyed at ({:.1}, {:.1})", pos.x, pos.y);
        state.events.push(GameEvent::ObstacleDestroyed { pos });
    }
    let hit_this_tick = state
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ObstacleDestroyed { .. }));
    if hit_this_tick && state.is_cleared() {
        log::info!("Level {} cleared in {:.2}s", state.level, state.time);
    }

    state.projectiles.retain(Projectile::is_alive);

    state.ship.advance(&plane, dt);
    state.ship.cool_down(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, Projectile};
    use crate::tuning::Tuning;
    use glam::Vec2;

    const THRUST: ControlIntent = ControlIntent {
        thrust: true,
        turn_left: false,
        turn_right: false,
        fire: false,
    };

    /// State with no obstacles so nothing collides by accident
    fn open_field() -> GameState {
        let mut state = GameState::new(12345, Tuning::default()).expect("valid tuning");
        state.obstacles.clear();
        state
    }

    #[test]
    fn test_frozen_until_thrust() {
        let mut state = GameState::new(12345, Tuning::default()).expect("valid tuning");
        let before: Vec<_> = state.obstacles.iter().map(|o| o.body).collect();

        tick(&mut state, &ControlIntent::default(), 0.5);
        assert!(!state.playing);
        let after: Vec<_> = state.obstacles.iter().map(|o| o.body).collect();
        assert_eq!(before, after);
        assert_eq!(state.ship.pos(), Vec2::new(450.0, 300.0));

        // Fire alone does nothing before the level starts
        let fire = ControlIntent {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 0.5);
        assert!(state.projectiles.is_empty());
        assert!(!state.playing);
    }

    #[test]
    fn test_first_thrust_scenario() {
        let mut state = open_field();
        tick(&mut state, &THRUST, 1.0);

        assert!(state.playing);
        let vel = state.ship.vel();
        assert!(vel.x.abs() < 1e-3);
        assert!((vel.y - 300.0).abs() < 1e-3);

        let pos = state.ship.pos();
        assert!((pos.x - 450.0).abs() < 1e-3);
        assert!(pos.y.abs() < 1e-3);
        assert_eq!(state.events, vec![GameEvent::LevelStarted { level: 1 }]);
    }

    #[test]
    fn test_playing_is_irreversible() {
        let mut state = open_field();
        tick(&mut state, &THRUST, 0.1);
        for _ in 0..5 {
            tick(&mut state, &ControlIntent::default(), 0.1);
        }
        assert!(state.playing);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_obstacles_drift_once_playing() {
        let mut state = GameState::new(12345, Tuning::default()).expect("valid tuning");
        let before: Vec<_> = state.obstacles.iter().map(|o| o.pos()).collect();

        tick(&mut state, &THRUST, 0.1);

        let moved = state
            .obstacles
            .iter()
            .zip(&before)
            .filter(|(o, p)| o.pos() != **p)
            .count();
        assert!(moved > 0);
        for obstacle in &state.obstacles {
            assert!(state.plane().contains(obstacle.pos()));
        }
    }

    #[test]
    fn test_zero_dt_is_idempotent() {
        let mut state = GameState::new(777, Tuning::default()).expect("valid tuning");
        tick(&mut state, &THRUST, 0.2);
        let fire = ControlIntent {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 0.05);
        assert_eq!(state.projectiles.len(), 1);

        let ship = state.ship.body;
        let reload = state.ship.reload;
        let shots: Vec<_> = state.projectiles.iter().map(|p| (p.body, p.life)).collect();
        let rocks: Vec<_> = state.obstacles.iter().map(|o| o.body).collect();

        tick(&mut state, &ControlIntent::default(), 0.0);

        assert_eq!(state.ship.body, ship);
        assert_eq!(state.ship.reload, reload);
        let shots_after: Vec<_> = state.projectiles.iter().map(|p| (p.body, p.life)).collect();
        let rocks_after: Vec<_> = state.obstacles.iter().map(|o| o.body).collect();
        assert_eq!(shots_after, shots);
        assert_eq!(rocks_after, rocks);
    }

    #[test]
    fn test_zero_dt_still_applies_intent() {
        let mut state = open_field();
        let intent = ControlIntent {
            thrust: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &intent, 0.0);
        assert!(state.playing);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.ship.vel(), Vec2::ZERO);
    }

    #[test]
    fn test_reload_gating() {
        let mut state = open_field();
        let fire = ControlIntent {
            thrust: true,
            fire: true,
            ..Default::default()
        };

        // t = 0.0: fires
        tick(&mut state, &fire, 0.1);
        assert_eq!(state.projectiles.len(), 1);
        // t = 0.1: still reloading
        tick(&mut state, &fire, 0.1);
        assert_eq!(state.projectiles.len(), 1);
        // t = 0.2: ready again
        tick(&mut state, &fire, 0.1);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_reload_counts_down_without_fire() {
        let mut state = open_field();
        state.playing = true;
        state.ship.reload = 0.16;
        tick(&mut state, &ControlIntent::default(), 0.1);
        tick(&mut state, &ControlIntent::default(), 0.1);
        assert!(state.ship.reload < 0.0);
        assert!(state.ship.reloaded());
    }

    #[test]
    fn test_turn_both_ways_cancels() {
        let mut state = open_field();
        let intent = ControlIntent {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        let heading = state.ship.heading;
        tick(&mut state, &intent, 0.25);
        assert!((state.ship.heading - heading).abs() < 1e-6);
    }

    #[test]
    fn test_turn_left_rotates_counterclockwise() {
        let mut state = open_field();
        let intent = ControlIntent {
            turn_left: true,
            ..Default::default()
        };
        tick(&mut state, &intent, 0.5);
        assert!((state.ship.heading - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_collision_removes_both() {
        let mut state = open_field();
        state.playing = true;
        let spot = Vec2::new(200.0, 200.0);
        state.obstacles.push(Obstacle::new(spot, Vec2::ZERO));
        state.projectiles.push(Projectile::new(spot, Vec2::ZERO, 1.0));

        tick(&mut state, &ControlIntent::default(), 0.016);

        assert!(state.obstacles.is_empty());
        assert!(state.projectiles.is_empty());
        assert!(state.is_cleared());
        assert_eq!(state.events, vec![GameEvent::ObstacleDestroyed { pos: spot }]);
    }

    #[test]
    fn test_shots_expire() {
        let mut state = open_field();
        let intent = ControlIntent {
            thrust: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &intent, 0.0);
        assert_eq!(state.projectiles.len(), 1);

        tick(&mut state, &ControlIntent::default(), 0.6);
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, &ControlIntent::default(), 0.6);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_shot_travels_with_wrap() {
        let mut state = open_field();
        let intent = ControlIntent {
            thrust: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &intent, 0.0);
        // 350 px/s upward from y = 300 for 0.9s crosses the top edge
        tick(&mut state, &ControlIntent::default(), 0.9);
        let pos = state.projectiles[0].pos();
        assert!((pos.y - 585.0).abs() < 1e-2, "y = {}", pos.y);
        assert!(state.plane().contains(pos));
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut state = open_field();
        tick(&mut state, &THRUST, -1.0);
        assert!(state.playing);
        assert_eq!(state.ship.vel(), Vec2::ZERO);
        assert_eq!(state.ship.pos(), Vec2::new(450.0, 300.0));

        tick(&mut state, &THRUST, f32::NAN);
        assert_eq!(state.ship.vel(), Vec2::ZERO);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default()).expect("valid tuning");
        let mut state2 = GameState::new(99999, Tuning::default()).expect("valid tuning");

        let inputs = [
            THRUST,
            ControlIntent {
                turn_left: true,
                fire: true,
                ..Default::default()
            },
            ControlIntent {
                thrust: true,
                turn_right: true,
                fire: true,
                ..Default::default()
            },
            ControlIntent::default(),
        ];

        for _ in 0..30 {
            for input in &inputs {
                tick(&mut state1, input, 1.0 / 60.0);
                tick(&mut state2, input, 1.0 / 60.0);
            }
        }

        assert_eq!(state1.ship.body, state2.ship.body);
        assert_eq!(state1.projectiles.len(), state2.projectiles.len());
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
    }
}
