//! Match tuning and roster layout

use bolt_ballistics::BallisticsConfig;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_8, PI};

/// One roster slot: ground position and initial facing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Ground X
    pub x: f32,
    /// Ground Z
    pub z: f32,
    /// Initial facing (radians around Y)
    pub yaw: f32,
}

impl SpawnPoint {
    /// Create a spawn point
    pub fn new(x: f32, z: f32, yaw: f32) -> Self {
        Self { x, z, yaw }
    }
}

/// All match tuning in one place.
///
/// Teams are assigned by roster index parity: even slots are Red, odd
/// slots are Blue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Roster spawn slots, in turn order
    pub spawns: Vec<SpawnPoint>,
    /// Seconds each actor gets per turn
    pub turn_duration: f32,
    /// Fixed delay between turns
    pub transition_duration: f32,
    /// Charge power cap
    pub max_power: f32,
    /// Charge power gained per second of hold
    pub charge_rate: f32,
    /// Walk speed in meters per second
    pub move_speed: f32,
    /// Yaw rate in radians per second
    pub turn_speed: f32,
    /// Aim pitch rate in radians per second
    pub aim_speed: f32,
    /// Aim pitch bounds (min, max) in radians
    pub aim_pitch_bounds: (f32, f32),
    /// Height below which stray projectiles are despawned
    pub floor_y: f32,
    /// Altitude of the detached overhead camera
    pub global_camera_height: f32,
    /// Projectile tuning
    pub ballistics: BallisticsConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            spawns: vec![
                SpawnPoint::new(-1.0, 3.0, -FRAC_PI_2),
                SpawnPoint::new(12.0, 15.0, FRAC_PI_8),
                SpawnPoint::new(-17.0, -17.0, -0.75 * PI),
                SpawnPoint::new(-4.0, 17.0, 0.0),
                SpawnPoint::new(16.5, -11.5, PI),
                SpawnPoint::new(2.0, -9.0, PI),
                SpawnPoint::new(-17.0, 3.5, -FRAC_PI_2),
                SpawnPoint::new(12.5, -18.5, FRAC_PI_2),
            ],
            turn_duration: 30.0,
            transition_duration: 1.5,
            max_power: 10.0,
            charge_rate: 5.0,
            move_speed: 5.1,
            turn_speed: 1.2,
            aim_speed: 0.42,
            aim_pitch_bounds: (-FRAC_PI_4, FRAC_PI_3),
            floor_y: -10.0,
            global_camera_height: 50.0,
            ballistics: BallisticsConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Replace the roster
    pub fn with_spawns(mut self, spawns: Vec<SpawnPoint>) -> Self {
        self.spawns = spawns;
        self
    }

    /// Set the per-turn countdown
    pub fn with_turn_duration(mut self, seconds: f32) -> Self {
        self.turn_duration = seconds;
        self
    }

    /// Set the inter-turn delay
    pub fn with_transition_duration(mut self, seconds: f32) -> Self {
        self.transition_duration = seconds;
        self
    }
}
