//! Ballistics tuning

use serde::{Deserialize, Serialize};

/// Tunable projectile parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallisticsConfig {
    /// Launch speed per unit of charge power
    pub launch_scale: f32,
    /// Projectile sphere radius
    pub radius: f32,
    /// Projectile mass
    pub mass: f32,
    /// Projectile restitution (bounce off the arena)
    pub restitution: f32,
    /// Continuous collision detection, so a full-power shot cannot tunnel
    /// through the ground plane
    pub ccd_enabled: bool,
}

impl Default for BallisticsConfig {
    fn default() -> Self {
        Self {
            launch_scale: 2.5,
            radius: 0.2,
            mass: 1.0,
            restitution: 0.3,
            ccd_enabled: true,
        }
    }
}

impl BallisticsConfig {
    /// Set the launch speed scale
    pub fn with_launch_scale(mut self, scale: f32) -> Self {
        self.launch_scale = scale;
        self
    }

    /// Set the projectile radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}
