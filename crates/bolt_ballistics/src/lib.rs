//! Bolt Ballistics - projectiles and their one-shot resolution
//!
//! The [`ProjectileSystem`](system::ProjectileSystem) spawns cannon shots
//! as dynamic spheres, classifies each projectile's first contact as a hit
//! (an actor collider) or a miss (anything else), and guarantees the
//! classification happens at most once per projectile: the `resolved` flag
//! plays the role of a collision listener detached after its first event.
//! Resolved projectiles keep simulating visually until the match despawns
//! them; anything that falls below the floor threshold is pruned outright
//! as a safety net, never as a second resolution path.

pub mod config;
pub mod projectile;
pub mod system;

pub mod prelude {
    //! Common imports for ballistics functionality
    pub use crate::config::BallisticsConfig;
    pub use crate::projectile::Projectile;
    pub use crate::system::{launch_velocity, ProjectileSystem, ShotResolution};
}

pub use prelude::*;
