//! Bolt Rig - articulated combatant skeleton
//!
//! An [`ActorRig`](actor::ActorRig) is one robot in the duel: a named joint
//! tree with fixed dimensions, the joint-angle pose driving it, an integer
//! hit counter, two named camera mounts, and a single physics body that is
//! dynamic while the actor is taking its turn and static otherwise.
//!
//! The joint tree is data, not a scene graph: world transforms are computed
//! on demand by a pure function of (position, yaw, pose, dims), so there
//! are no parent/child back references to keep in sync.

pub mod actor;
pub mod camera;
pub mod health;
pub mod pose;
pub mod skeleton;

pub mod prelude {
    //! Common imports for rig functionality
    pub use crate::actor::ActorRig;
    pub use crate::camera::{CameraMount, CameraPose};
    pub use crate::health::Health;
    pub use crate::pose::JointPose;
    pub use crate::skeleton::{world_transform, JointId, SkeletonDims};
}

pub use prelude::*;
