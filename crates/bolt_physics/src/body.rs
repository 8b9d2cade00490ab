//! Rigid body types

use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Handle to a rigid body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RigidBodyHandle(pub(crate) rapier::RigidBodyHandle);

impl RigidBodyHandle {
    /// Create from raw Rapier handle
    pub fn from_raw(handle: rapier::RigidBodyHandle) -> Self {
        Self(handle)
    }

    /// Get the raw Rapier handle
    pub fn raw(&self) -> rapier::RigidBodyHandle {
        self.0
    }
}

/// Type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RigidBodyType {
    /// Static body - never moves, infinite mass
    Static,
    /// Dynamic body - fully simulated
    #[default]
    Dynamic,
}

impl From<RigidBodyType> for rapier::RigidBodyType {
    fn from(t: RigidBodyType) -> Self {
        match t {
            RigidBodyType::Static => rapier::RigidBodyType::Fixed,
            RigidBodyType::Dynamic => rapier::RigidBodyType::Dynamic,
        }
    }
}

/// Constraints on rigid body motion
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RigidBodyConstraints {
    /// Lock rotation on X axis
    pub lock_rotation_x: bool,
    /// Lock rotation on Y axis
    pub lock_rotation_y: bool,
    /// Lock rotation on Z axis
    pub lock_rotation_z: bool,
}

impl RigidBodyConstraints {
    /// No constraints
    pub const NONE: Self = Self {
        lock_rotation_x: false,
        lock_rotation_y: false,
        lock_rotation_z: false,
    };

    /// Lock all rotation (upright characters)
    pub const LOCK_ROTATION: Self = Self {
        lock_rotation_x: true,
        lock_rotation_y: true,
        lock_rotation_z: true,
    };

    /// Convert to Rapier locked axes
    pub fn to_rapier(&self) -> rapier::LockedAxes {
        let mut axes = rapier::LockedAxes::empty();
        if self.lock_rotation_x {
            axes |= rapier::LockedAxes::ROTATION_LOCKED_X;
        }
        if self.lock_rotation_y {
            axes |= rapier::LockedAxes::ROTATION_LOCKED_Y;
        }
        if self.lock_rotation_z {
            axes |= rapier::LockedAxes::ROTATION_LOCKED_Z;
        }
        axes
    }
}

/// Description for creating a rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyDesc {
    /// Type of rigid body
    pub body_type: RigidBodyType,
    /// Initial position
    pub position: [f32; 3],
    /// Initial rotation (quaternion: x, y, z, w)
    pub rotation: [f32; 4],
    /// Initial linear velocity
    pub linear_velocity: [f32; 3],
    /// Gravity scale (0 = no gravity, 1 = normal, 2 = double)
    pub gravity_scale: f32,
    /// Linear damping (air resistance)
    pub linear_damping: f32,
    /// Angular damping (rotational resistance)
    pub angular_damping: f32,
    /// Additional mass on top of the collider-derived mass (0 = none)
    pub mass: f32,
    /// Motion constraints
    pub constraints: RigidBodyConstraints,
    /// Enable continuous collision detection
    pub ccd_enabled: bool,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            linear_velocity: [0.0, 0.0, 0.0],
            gravity_scale: 1.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            mass: 0.0,
            constraints: RigidBodyConstraints::NONE,
            ccd_enabled: false,
        }
    }
}

impl RigidBodyDesc {
    /// Create a static body description
    pub fn fixed() -> Self {
        Self {
            body_type: RigidBodyType::Static,
            ..Default::default()
        }
    }

    /// Create a dynamic body description
    pub fn dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            ..Default::default()
        }
    }

    /// Set position
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    /// Set rotation to a yaw (radians around Y)
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        let (s, c) = (yaw * 0.5).sin_cos();
        self.rotation = [0.0, s, 0.0, c];
        self
    }

    /// Set linear velocity
    pub fn with_linear_velocity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.linear_velocity = [x, y, z];
        self
    }

    /// Set additional mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set constraints
    pub fn with_constraints(mut self, constraints: RigidBodyConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Enable CCD
    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd_enabled = enabled;
        self
    }

    /// Build a Rapier rigid body builder
    pub(crate) fn to_rapier_builder(&self) -> rapier::RigidBodyBuilder {
        let rotation = UnitQuaternion::from_quaternion(Quaternion::new(
            self.rotation[3],
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
        ));
        let isometry = rapier::Isometry::from_parts(
            rapier::Translation::new(self.position[0], self.position[1], self.position[2]),
            rotation,
        );

        let mut builder = rapier::RigidBodyBuilder::new(self.body_type.into())
            .position(isometry)
            .linvel(rapier::Vector::new(
                self.linear_velocity[0],
                self.linear_velocity[1],
                self.linear_velocity[2],
            ))
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .locked_axes(self.constraints.to_rapier())
            .ccd_enabled(self.ccd_enabled);

        if self.mass > 0.0 {
            builder = builder.additional_mass(self.mass);
        }

        builder
    }
}
