//! Projectile lifecycle: spawn, resolve once, prune

use crate::config::BallisticsConfig;
use crate::projectile::Projectile;
use bolt_core::{ActorId, BodyTag, ProjectileId};
use bolt_physics::{
    ColliderDesc, ColliderShape, PhysicsMaterial, PhysicsWorld, Result, RigidBodyDesc,
};
use glam::Vec3;
use log::{debug, info};

/// Launch velocity from aim angles and charge power.
///
/// Yaw 0 faces -Z; positive pitch raises the shot.
pub fn launch_velocity(yaw: f32, pitch: f32, power: f32, scale: f32) -> Vec3 {
    let speed = scale * power;
    Vec3::new(
        -yaw.sin() * pitch.cos() * speed,
        pitch.sin() * speed,
        -yaw.cos() * pitch.cos() * speed,
    )
}

/// The decided outcome of one projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotResolution {
    /// Which projectile resolved
    pub projectile: ProjectileId,
    /// Who fired it
    pub spawner: ActorId,
    /// The actor that was struck, or `None` for a miss
    pub hit: Option<ActorId>,
    /// World-space contact point (best available)
    pub point: Vec3,
}

/// Owns every live projectile and decides each one's outcome exactly once
#[derive(Default)]
pub struct ProjectileSystem {
    projectiles: Vec<Projectile>,
    next_id: u64,
}

impl ProjectileSystem {
    /// Create an empty system
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live projectiles
    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    /// Whether no projectiles are live
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Iterate live projectiles
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    /// Spawn a shot from `origin` with the given aim and charge power
    pub fn spawn(
        &mut self,
        world: &mut PhysicsWorld,
        spawner: ActorId,
        origin: Vec3,
        yaw: f32,
        pitch: f32,
        power: f32,
        config: &BallisticsConfig,
    ) -> ProjectileId {
        let id = ProjectileId::new(self.next_id);
        self.next_id += 1;

        let velocity = launch_velocity(yaw, pitch, power, config.launch_scale);

        let body = world.create_rigid_body(
            RigidBodyDesc::dynamic()
                .with_position(origin.x, origin.y, origin.z)
                .with_linear_velocity(velocity.x, velocity.y, velocity.z)
                .with_mass(config.mass)
                .with_ccd(config.ccd_enabled),
        );
        let collider = world.create_collider(
            ColliderDesc::new(ColliderShape::sphere(config.radius))
                .with_material(PhysicsMaterial::new(0.5, config.restitution))
                .with_contact_events(true)
                .with_user_data(BodyTag::Projectile(id).encode()),
            Some(body),
        );

        info!(
            "actor {} fired projectile {} at power {power:.1}",
            spawner.index(),
            id.raw()
        );

        self.projectiles.push(Projectile {
            id,
            spawner,
            body,
            collider,
            radius: config.radius,
            position: origin,
            resolved: false,
        });
        id
    }

    /// Drain this step's contact events into resolutions.
    ///
    /// Only the first contact of each projectile produces a resolution;
    /// the `resolved` flag detaches it from all later events.
    pub fn collect_resolutions(&mut self, world: &PhysicsWorld) -> Vec<ShotResolution> {
        let mut resolutions = Vec::new();

        for event in world.collision_started() {
            let tags = [
                BodyTag::decode(event.user_data1),
                BodyTag::decode(event.user_data2),
            ];

            for (own, other) in [(tags[0], tags[1]), (tags[1], tags[0])] {
                let Some(id) = own.and_then(|t| t.as_projectile()) else {
                    continue;
                };
                let Some(projectile) =
                    self.projectiles.iter_mut().find(|p| p.id == id && !p.resolved)
                else {
                    continue;
                };

                projectile.resolved = true;
                let hit = other.and_then(|t| t.as_actor());
                let point = event
                    .average_contact_point()
                    .map(Vec3::from_array)
                    .unwrap_or(projectile.position);

                debug!(
                    "projectile {} resolved: {}",
                    id.raw(),
                    match hit {
                        Some(actor) => format!("hit actor {}", actor.index()),
                        None => "miss".to_string(),
                    }
                );

                resolutions.push(ShotResolution {
                    projectile: id,
                    spawner: projectile.spawner,
                    hit,
                    point,
                });
            }
        }

        resolutions
    }

    /// Refresh cached render positions from the physics bodies
    pub fn sync(&mut self, world: &PhysicsWorld) -> Result<()> {
        for projectile in &mut self.projectiles {
            let [x, y, z] = world.get_body_position(projectile.body)?;
            projectile.position = Vec3::new(x, y, z);
        }
        Ok(())
    }

    /// Despawn every projectile below `floor_y`, resolved or not.
    ///
    /// Purely a visual safety net for escapees; it never produces a
    /// resolution. Returns how many were pruned.
    pub fn prune_below(&mut self, world: &mut PhysicsWorld, floor_y: f32) -> usize {
        let mut pruned = 0;
        self.projectiles.retain(|p| {
            if p.position.y < floor_y {
                world.remove_rigid_body(p.body);
                pruned += 1;
                false
            } else {
                true
            }
        });
        if pruned > 0 {
            debug!("pruned {pruned} projectile(s) below the floor");
        }
        pruned
    }

    /// Despawn every resolved projectile. Called when the turn advances.
    pub fn clear_resolved(&mut self, world: &mut PhysicsWorld) {
        self.projectiles.retain(|p| {
            if p.resolved {
                world.remove_rigid_body(p.body);
                false
            } else {
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bolt_physics::{PhysicsConfig, RigidBodyDesc};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const DT: f32 = 1.0 / 60.0;

    fn world_with_ground() -> PhysicsWorld {
        let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let ground = world.create_rigid_body(RigidBodyDesc::fixed());
        world.create_collider(
            ColliderDesc::new(ColliderShape::ground_plane())
                .with_user_data(BodyTag::Scenery.encode()),
            Some(ground),
        );
        world
    }

    fn add_actor_block(world: &mut PhysicsWorld, actor: ActorId, x: f32, z: f32) {
        let body = world.create_rigid_body(RigidBodyDesc::fixed().with_position(x, 1.31, z));
        world.create_collider(
            ColliderDesc::new(ColliderShape::cuboid(0.5, 1.31, 0.25))
                .with_user_data(BodyTag::Actor(actor).encode()),
            Some(body),
        );
    }

    #[test]
    fn test_velocity_decomposition_straight_ahead() {
        let v = launch_velocity(0.0, 0.0, 4.0, 2.5);
        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.y, 0.0);
        assert_relative_eq!(v.z, -10.0);
    }

    #[test]
    fn test_velocity_decomposition_angles() {
        // Quarter-turn yaw sends the shot along -X
        let v = launch_velocity(FRAC_PI_2, 0.0, 2.0, 2.5);
        assert_relative_eq!(v.x, -5.0, epsilon = 1e-5);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-5);

        // Positive pitch trades horizontal speed for vertical
        let v = launch_velocity(0.0, FRAC_PI_4, 2.0, 2.5);
        assert_relative_eq!(v.y, 5.0 * FRAC_PI_4.sin(), epsilon = 1e-5);
        assert!(v.z < 0.0);
        assert_relative_eq!(v.length(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ground_contact_is_a_miss() {
        let mut world = world_with_ground();
        let mut system = ProjectileSystem::new();
        let config = BallisticsConfig::default();

        system.spawn(
            &mut world,
            ActorId::new(0),
            Vec3::new(0.0, 1.4, 0.0),
            0.0,
            0.0,
            4.0,
            &config,
        );

        let mut resolutions = Vec::new();
        for _ in 0..600 {
            world.step(DT);
            resolutions.extend(system.collect_resolutions(&world));
            system.sync(&world).unwrap();
            if !resolutions.is_empty() {
                break;
            }
        }

        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].hit, None);
        assert_eq!(resolutions[0].spawner, ActorId::new(0));
    }

    #[test]
    fn test_actor_contact_is_a_hit() {
        let mut world = world_with_ground();
        let mut system = ProjectileSystem::new();
        let config = BallisticsConfig::default();
        let target = ActorId::new(3);
        add_actor_block(&mut world, target, 0.0, -4.0);

        // Flat, fast shot straight at the block
        system.spawn(
            &mut world,
            ActorId::new(0),
            Vec3::new(0.0, 1.5, 0.0),
            0.0,
            0.0,
            8.0,
            &config,
        );

        let mut resolutions = Vec::new();
        for _ in 0..600 {
            world.step(DT);
            resolutions.extend(system.collect_resolutions(&world));
            system.sync(&world).unwrap();
            if !resolutions.is_empty() {
                break;
            }
        }

        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].hit, Some(target));
    }

    #[test]
    fn test_resolves_at_most_once() {
        let mut world = world_with_ground();
        let mut system = ProjectileSystem::new();
        let config = BallisticsConfig::default();

        // A bouncy lob guarantees several ground contacts
        system.spawn(
            &mut world,
            ActorId::new(0),
            Vec3::new(0.0, 1.4, 0.0),
            0.0,
            FRAC_PI_4,
            4.0,
            &config,
        );

        let mut total = 0;
        for _ in 0..1200 {
            world.step(DT);
            total += system.collect_resolutions(&world).len();
            system.sync(&world).unwrap();
        }
        assert_eq!(total, 1, "exactly one resolution despite repeated contacts");
        assert_eq!(system.len(), 1, "resolved projectile lives until cleared");

        system.clear_resolved(&mut world);
        assert!(system.is_empty());
    }

    #[test]
    fn test_max_power_shot_does_not_tunnel() {
        let mut world = world_with_ground();
        let mut system = ProjectileSystem::new();
        let config = BallisticsConfig::default();

        // Full charge aimed straight down at the plane
        system.spawn(
            &mut world,
            ActorId::new(0),
            Vec3::new(0.0, 2.0, 0.0),
            0.0,
            -FRAC_PI_2,
            10.0,
            &config,
        );

        let mut resolutions = Vec::new();
        for _ in 0..120 {
            world.step(DT);
            resolutions.extend(system.collect_resolutions(&world));
            if !resolutions.is_empty() {
                break;
            }
        }
        assert_eq!(resolutions.len(), 1, "CCD must register the ground contact");
        assert_eq!(resolutions[0].hit, None);
    }

    #[test]
    fn test_prune_below_floor() {
        // No ground: the shot falls forever
        let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let mut system = ProjectileSystem::new();
        let config = BallisticsConfig::default();

        system.spawn(
            &mut world,
            ActorId::new(0),
            Vec3::new(0.0, 1.4, 0.0),
            0.0,
            0.0,
            2.0,
            &config,
        );

        let mut pruned = 0;
        for _ in 0..1800 {
            world.step(DT);
            let resolutions = system.collect_resolutions(&world);
            assert!(resolutions.is_empty(), "pruning must never resolve");
            system.sync(&world).unwrap();
            pruned += system.prune_below(&mut world, -10.0);
            if pruned > 0 {
                break;
            }
        }
        assert_eq!(pruned, 1);
        assert!(system.is_empty());
        assert_eq!(world.body_count(), 0);
    }
}
