//! A single projectile in flight

use bolt_core::{ActorId, ProjectileId};
use bolt_physics::{ColliderHandle, RigidBodyHandle};
use glam::Vec3;

/// One cannon shot.
///
/// `resolved` is the single-consume guard: once set, later contacts and
/// steps are no-ops for this projectile, though its body keeps simulating
/// (it may roll around) until despawned.
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Projectile identifier
    pub id: ProjectileId,
    /// Who fired it
    pub spawner: ActorId,
    /// Physics body
    pub body: RigidBodyHandle,
    /// Physics collider
    pub collider: ColliderHandle,
    /// Sphere radius
    pub radius: f32,
    /// Cached render position, refreshed from physics each frame
    pub position: Vec3,
    /// Whether this projectile's outcome has been decided
    pub resolved: bool,
}
