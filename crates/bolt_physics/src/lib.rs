//! Bolt Physics - Rapier 3D integration
//!
//! Thin wrapper around Rapier 3D providing the simulation surface the turn
//! engine needs: static and dynamic rigid bodies, the four collider shapes
//! the arena uses (spheres, boxes, Y cylinders, the ground half-space),
//! fixed-timestep stepping, and per-pair collision events carrying collider
//! user data.
//!
//! # Example
//!
//! ```ignore
//! use bolt_physics::prelude::*;
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default())?;
//!
//! let body = physics.create_rigid_body(RigidBodyDesc::dynamic().with_position(0.0, 10.0, 0.0));
//! physics.create_collider(ColliderDesc::new(ColliderShape::sphere(0.2)), Some(body));
//!
//! physics.step(1.0 / 60.0);
//! ```

pub mod body;
pub mod collider;
pub mod config;
pub mod error;
pub mod events;
pub mod material;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{RigidBodyConstraints, RigidBodyDesc, RigidBodyHandle, RigidBodyType};
    pub use crate::collider::{ColliderDesc, ColliderHandle, ColliderShape};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{CollisionEvent, CollisionEventType, ContactData};
    pub use crate::material::PhysicsMaterial;
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
