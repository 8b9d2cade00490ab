//! Named camera mounts

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The two per-actor camera attachment slots.
///
/// Both are parented to the head joint, so pitching the aim tilts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMount {
    /// Behind and above the head, looking past the actor
    ThirdPerson,
    /// At the head origin, looking where the actor aims
    FirstPerson,
}

/// A computed camera placement in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position
    pub position: Vec3,
    /// Look-at target
    pub target: Vec3,
}

impl CameraMount {
    /// Offset from the head joint, in head-local coordinates
    pub(crate) fn local_offset(&self) -> Vec3 {
        match self {
            CameraMount::ThirdPerson => Vec3::new(0.0, 1.5, 5.5),
            CameraMount::FirstPerson => Vec3::ZERO,
        }
    }

    /// Look-at point, in head-local coordinates
    pub(crate) fn local_target(&self) -> Vec3 {
        match self {
            CameraMount::ThirdPerson => Vec3::new(0.0, 0.0, -2.5),
            CameraMount::FirstPerson => Vec3::new(0.0, 0.0, -1.0),
        }
    }
}
