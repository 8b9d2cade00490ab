//! Collider types

use crate::material::PhysicsMaterial;
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Handle to a collider in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub(crate) rapier::ColliderHandle);

impl ColliderHandle {
    /// Create from raw Rapier handle
    pub fn from_raw(handle: rapier::ColliderHandle) -> Self {
        Self(handle)
    }

    /// Get the raw Rapier handle
    pub fn raw(&self) -> rapier::ColliderHandle {
        self.0
    }
}

/// Collision shape type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere with radius
    Sphere { radius: f32 },
    /// Box with half-extents
    Box { half_extents: [f32; 3] },
    /// Cylinder aligned along Y axis
    CylinderY { half_height: f32, radius: f32 },
    /// Infinite plane with an outward normal (the arena floor)
    HalfSpace { normal: [f32; 3] },
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Box {
            half_extents: [0.5, 0.5, 0.5],
        }
    }
}

impl ColliderShape {
    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Create a box shape from half-extents
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: [hx, hy, hz],
        }
    }

    /// Create a box shape from full size
    pub fn from_size(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            half_extents: [width * 0.5, height * 0.5, depth * 0.5],
        }
    }

    /// Create a cylinder shape (Y-aligned)
    pub fn cylinder(half_height: f32, radius: f32) -> Self {
        Self::CylinderY {
            half_height,
            radius,
        }
    }

    /// Create a horizontal ground plane facing up
    pub fn ground_plane() -> Self {
        Self::HalfSpace {
            normal: [0.0, 1.0, 0.0],
        }
    }

    /// Build a Rapier shared shape
    pub(crate) fn to_rapier(&self) -> rapier::SharedShape {
        match self {
            Self::Sphere { radius } => rapier::SharedShape::ball(*radius),
            Self::Box { half_extents } => {
                rapier::SharedShape::cuboid(half_extents[0], half_extents[1], half_extents[2])
            }
            Self::CylinderY {
                half_height,
                radius,
            } => rapier::SharedShape::cylinder(*half_height, *radius),
            Self::HalfSpace { normal } => {
                let n = rapier::Vector::new(normal[0], normal[1], normal[2]);
                let unit = rapier::nalgebra::Unit::try_new(n, 1.0e-6)
                    .unwrap_or_else(|| rapier::Vector::y_axis());
                rapier::SharedShape::halfspace(unit)
            }
        }
    }
}

/// Description for creating a collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Collision shape
    pub shape: ColliderShape,
    /// Position offset from parent body
    pub position_offset: [f32; 3],
    /// Physics material
    pub material: PhysicsMaterial,
    /// Emit collision events for contacts involving this collider.
    /// Rapier only reports a contact pair if at least one of the two
    /// colliders enables this.
    pub contact_events: bool,
    /// User data (body tag encoding)
    pub user_data: u128,
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::default(),
            position_offset: [0.0, 0.0, 0.0],
            material: PhysicsMaterial::default(),
            contact_events: false,
            user_data: 0,
        }
    }
}

impl ColliderDesc {
    /// Create a new collider description with a shape
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    /// Set position offset
    pub fn with_offset(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position_offset = [x, y, z];
        self
    }

    /// Set material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Enable collision events
    pub fn with_contact_events(mut self, enabled: bool) -> Self {
        self.contact_events = enabled;
        self
    }

    /// Set user data
    pub fn with_user_data(mut self, data: u128) -> Self {
        self.user_data = data;
        self
    }

    /// Build a Rapier collider builder
    pub(crate) fn to_rapier_builder(&self) -> rapier::ColliderBuilder {
        let mut builder = rapier::ColliderBuilder::new(self.shape.to_rapier())
            .translation(rapier::Vector::new(
                self.position_offset[0],
                self.position_offset[1],
                self.position_offset[2],
            ))
            .friction(self.material.friction)
            .restitution(self.material.restitution)
            .density(self.material.density)
            .user_data(self.user_data);

        if self.contact_events {
            builder = builder.active_events(rapier::ActiveEvents::COLLISION_EVENTS);
        }

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size_halves_extents() {
        let shape = ColliderShape::from_size(12.0, 4.0, 0.5);
        match shape {
            ColliderShape::Box { half_extents } => {
                assert_eq!(half_extents, [6.0, 2.0, 0.25]);
            }
            _ => panic!("expected a box"),
        }
    }

    #[test]
    fn test_desc_serde_roundtrip() {
        let desc = ColliderDesc::new(ColliderShape::sphere(0.2))
            .with_offset(0.0, 0.31, 0.0)
            .with_contact_events(true)
            .with_user_data(42);

        let json = serde_json::to_string(&desc).unwrap();
        let back: ColliderDesc = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_data, 42);
        assert!(back.contact_events);
    }
}
