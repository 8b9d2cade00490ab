//! Physics world - main simulation container

use crate::body::{RigidBodyDesc, RigidBodyHandle, RigidBodyType};
use crate::collider::{ColliderDesc, ColliderHandle};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::events::{CollisionEvent, CollisionEventType, ContactData, EventCollector};
use log::{debug, trace};
use rapier3d::prelude as rapier;
use std::num::NonZeroUsize;

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    config: PhysicsConfig,

    /// Rapier physics pipeline
    pipeline: rapier::PhysicsPipeline,

    /// Gravity
    gravity: rapier::Vector<f32>,

    /// Integration parameters
    integration_params: rapier::IntegrationParameters,

    /// Island manager
    islands: rapier::IslandManager,

    /// Broad phase
    broad_phase: rapier::DefaultBroadPhase,

    /// Narrow phase
    narrow_phase: rapier::NarrowPhase,

    /// Impulse joint set
    impulse_joints: rapier::ImpulseJointSet,

    /// Multibody joint set
    multibody_joints: rapier::MultibodyJointSet,

    /// CCD solver
    ccd_solver: rapier::CCDSolver,

    /// Query pipeline
    query_pipeline: rapier::QueryPipeline,

    /// Rigid body set
    bodies: rapier::RigidBodySet,

    /// Collider set
    colliders: rapier::ColliderSet,

    /// Events collected during the most recent `step` call
    events: EventCollector,

    /// Accumulated time for fixed timestep
    accumulated_time: f32,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;

        let gravity = rapier::Vector::new(config.gravity[0], config.gravity[1], config.gravity[2]);
        debug!(
            "physics world ready: timestep {}s, max {} substeps",
            config.timestep, config.max_substeps
        );

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;
        // validate() guarantees solver_iterations >= 1
        if let Some(iterations) = NonZeroUsize::new(config.solver_iterations) {
            integration_params.num_solver_iterations = iterations;
        }

        Ok(Self {
            config,
            pipeline: rapier::PhysicsPipeline::new(),
            gravity,
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            events: EventCollector::new(),
            accumulated_time: 0.0,
        })
    }

    /// Get the physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    // ==================== Rigid Bodies ====================

    /// Create a rigid body
    pub fn create_rigid_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle {
        let builder = desc.to_rapier_builder();
        let handle = self.bodies.insert(builder);
        RigidBodyHandle(handle)
    }

    /// Remove a rigid body and its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle.0,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Get rigid body position
    pub fn get_body_position(&self, handle: RigidBodyHandle) -> Result<[f32; 3]> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let pos = b.translation();
                [pos.x, pos.y, pos.z]
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Set rigid body position
    pub fn set_body_position(&mut self, handle: RigidBodyHandle, x: f32, y: f32, z: f32) -> Result<()> {
        self.bodies
            .get_mut(handle.0)
            .map(|b| {
                b.set_translation(rapier::Vector::new(x, y, z), true);
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get rigid body rotation (quaternion: x, y, z, w)
    pub fn get_body_rotation(&self, handle: RigidBodyHandle) -> Result<[f32; 4]> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let rot = b.rotation();
                [rot.i, rot.j, rot.k, rot.w]
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Set rigid body rotation to a yaw (radians around Y)
    pub fn set_body_yaw(&mut self, handle: RigidBodyHandle, yaw: f32) -> Result<()> {
        self.bodies
            .get_mut(handle.0)
            .map(|b| {
                b.set_rotation(
                    rapier::Rotation::from_axis_angle(&rapier::Vector::y_axis(), yaw),
                    true,
                );
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get rigid body linear velocity
    pub fn get_body_linear_velocity(&self, handle: RigidBodyHandle) -> Result<[f32; 3]> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let vel = b.linvel();
                [vel.x, vel.y, vel.z]
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Set rigid body linear velocity
    pub fn set_body_linear_velocity(&mut self, handle: RigidBodyHandle, x: f32, y: f32, z: f32) -> Result<()> {
        self.bodies
            .get_mut(handle.0)
            .map(|b| {
                b.set_linvel(rapier::Vector::new(x, y, z), true);
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Switch a body between static and dynamic.
    ///
    /// Switching to static zeroes the body's velocity so a later switch
    /// back to dynamic does not resume stale motion.
    pub fn set_body_type(&mut self, handle: RigidBodyHandle, body_type: RigidBodyType) -> Result<()> {
        self.bodies
            .get_mut(handle.0)
            .map(|b| {
                if body_type == RigidBodyType::Static {
                    b.set_linvel(rapier::Vector::zeros(), false);
                    b.set_angvel(rapier::Vector::zeros(), false);
                }
                b.set_body_type(body_type.into(), true);
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get a body's current type
    pub fn get_body_type(&self, handle: RigidBodyHandle) -> Result<RigidBodyType> {
        self.bodies
            .get(handle.0)
            .map(|b| match b.body_type() {
                rapier::RigidBodyType::Dynamic => RigidBodyType::Dynamic,
                _ => RigidBodyType::Static,
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    // ==================== Colliders ====================

    /// Create a collider attached to a rigid body
    pub fn create_collider(&mut self, desc: ColliderDesc, parent: Option<RigidBodyHandle>) -> ColliderHandle {
        let builder = desc.to_rapier_builder();
        let handle = match parent {
            Some(body) => self.colliders.insert_with_parent(builder, body.0, &mut self.bodies),
            None => self.colliders.insert(builder),
        };
        ColliderHandle(handle)
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.colliders
            .remove(handle.0, &mut self.islands, &mut self.bodies, true);
    }

    /// Get a collider's user data
    pub fn get_collider_user_data(&self, handle: ColliderHandle) -> Result<u128> {
        self.colliders
            .get(handle.0)
            .map(|c| c.user_data)
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    // ==================== Simulation ====================

    /// Step the physics simulation with fixed timestep.
    ///
    /// Events are cleared at the start of each call and accumulated across
    /// all substeps taken within it, so a multi-substep frame cannot drop
    /// a contact.
    pub fn step(&mut self, delta_time: f32) {
        self.events.clear();
        self.accumulated_time += delta_time;

        let mut steps = 0;
        while self.accumulated_time >= self.config.timestep && steps < self.config.max_substeps {
            self.step_internal();
            self.accumulated_time -= self.config.timestep;
            steps += 1;
        }

        if !self.events.collision_events.is_empty() {
            trace!(
                "{} substep(s), {} collision event(s)",
                steps,
                self.events.collision_events.len()
            );
        }

        self.query_pipeline.update(&self.colliders);
    }

    /// Internal fixed timestep
    fn step_internal(&mut self) {
        let (collision_send, collision_recv) = crossbeam_channel::unbounded();
        let event_handler = ChannelEventCollector {
            collision_events: collision_send,
        };

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &event_handler,
        );

        while let Ok(event) = collision_recv.try_recv() {
            let (h1, h2, started) = match event {
                rapier::CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                rapier::CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };

            let c1 = self.colliders.get(h1);
            let c2 = self.colliders.get(h2);

            let contacts = if started {
                self.get_contacts(h1, h2)
            } else {
                Vec::new()
            };

            self.events.collision_events.push(CollisionEvent {
                collider1: ColliderHandle(h1),
                collider2: ColliderHandle(h2),
                event_type: if started {
                    CollisionEventType::Started
                } else {
                    CollisionEventType::Stopped
                },
                contacts,
                user_data1: c1.map(|c| c.user_data).unwrap_or(0),
                user_data2: c2.map(|c| c.user_data).unwrap_or(0),
            });
        }
    }

    /// Get world-space contact points between two colliders
    fn get_contacts(&self, h1: rapier::ColliderHandle, h2: rapier::ColliderHandle) -> Vec<ContactData> {
        let mut contacts = Vec::new();

        let Some(c1) = self.colliders.get(h1) else {
            return contacts;
        };
        let pose1 = c1.position();

        if let Some(contact_pair) = self.narrow_phase.contact_pair(h1, h2) {
            for manifold in &contact_pair.manifolds {
                let world_normal = pose1 * manifold.local_n1;
                for point in &manifold.points {
                    let world_point = pose1 * point.local_p1;
                    contacts.push(ContactData {
                        point: [world_point.x, world_point.y, world_point.z],
                        normal: [world_normal.x, world_normal.y, world_normal.z],
                        depth: point.dist,
                    });
                }
            }
        }

        contacts
    }

    // ==================== Events ====================

    /// Get collision events from the last `step` call
    pub fn collision_events(&self) -> &[CollisionEvent] {
        &self.events.collision_events
    }

    /// Get collision start events from the last `step` call
    pub fn collision_started(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.events.started_collisions()
    }

    // ==================== Debug ====================

    /// Get number of rigid bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Get number of colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

/// Channel-based event collector for Rapier
struct ChannelEventCollector {
    collision_events: crossbeam_channel::Sender<rapier::CollisionEvent>,
}

impl rapier::EventHandler for ChannelEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        event: rapier::CollisionEvent,
        _contact_pair: Option<&rapier::ContactPair>,
    ) {
        let _ = self.collision_events.send(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        _contact_pair: &rapier::ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}
