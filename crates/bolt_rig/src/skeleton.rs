//! Skeleton dimensions and the named joint tree

use crate::pose::JointPose;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Fixed dimensions of the robot model (meters)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SkeletonDims {
    /// Torso box width
    pub torso_width: f32,
    /// Torso box height
    pub torso_height: f32,
    /// Torso box depth
    pub torso_depth: f32,
    /// Head sphere radius
    pub head_radius: f32,
    /// Leg segment width
    pub leg_width: f32,
    /// Leg segment height (hip to knee, knee to foot)
    pub leg_height: f32,
    /// Leg segment depth
    pub leg_depth: f32,
    /// Arm segment width
    pub arm_width: f32,
    /// Arm segment height (shoulder to elbow, elbow to muzzle)
    pub arm_height: f32,
    /// Cannon cylinder radius
    pub cannon_radius: f32,
    /// Joint sphere radius
    pub joint_radius: f32,
}

impl Default for SkeletonDims {
    fn default() -> Self {
        Self {
            torso_width: 0.6,
            torso_height: 1.0,
            torso_depth: 0.45,
            head_radius: 0.35,
            leg_width: 0.22,
            leg_height: 0.5,
            leg_depth: 0.24,
            arm_width: 0.18,
            arm_height: 0.45,
            cannon_radius: 0.16,
            joint_radius: 0.135,
        }
    }
}

impl SkeletonDims {
    /// Waist height above the ground when standing (two leg segments)
    pub fn stand_height(&self) -> f32 {
        2.0 * self.leg_height
    }

    /// Head center above the waist
    pub fn head_center_y(&self) -> f32 {
        self.torso_height + self.head_radius - 0.08
    }

    /// Shoulder pivot sideways offset from the waist
    pub fn shoulder_x(&self) -> f32 {
        self.torso_width / 2.0 + self.joint_radius - 0.05
    }

    /// Shoulder pivot height above the waist
    pub fn shoulder_y(&self) -> f32 {
        self.torso_height - 0.075
    }

    /// Hip pivot sideways offset from the waist
    pub fn hip_x(&self) -> f32 {
        self.torso_width / 2.0 - self.leg_width / 2.0
    }

    /// Half extents of the single waist-relative body collider, covering
    /// feet to head top
    pub fn collider_half_extents(&self) -> [f32; 3] {
        let head_top = self.head_center_y() + self.head_radius;
        [0.5, (self.stand_height() + head_top) / 2.0, 0.25]
    }

    /// Vertical offset of the body collider center from the waist
    pub fn collider_offset_y(&self) -> f32 {
        let head_top = self.head_center_y() + self.head_radius;
        head_top - self.collider_half_extents()[1]
    }
}

/// Named joints of the rig, one per animated pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointId {
    /// Root of the tree; carries position, yaw and the idle bob
    Waist,
    /// Torso box, twists with `torso_yaw`
    Torso,
    /// Head sphere, pitches with the aim
    Head,
    /// Off-arm shoulder pivot
    ShoulderL,
    /// Cannon-arm shoulder pivot
    ShoulderR,
    /// Off-arm elbow pivot
    ElbowL,
    /// Cannon-arm elbow pivot
    ElbowR,
    /// Tip of the cannon; projectiles spawn here
    Muzzle,
    /// Left hip pivot
    HipL,
    /// Right hip pivot
    HipR,
    /// Left knee pivot
    KneeL,
    /// Right knee pivot
    KneeR,
}

impl JointId {
    /// Parent joint, or `None` for the waist
    pub fn parent(&self) -> Option<JointId> {
        match self {
            JointId::Waist => None,
            JointId::Torso
            | JointId::Head
            | JointId::ShoulderL
            | JointId::ShoulderR
            | JointId::HipL
            | JointId::HipR => Some(JointId::Waist),
            JointId::ElbowL => Some(JointId::ShoulderL),
            JointId::ElbowR => Some(JointId::ShoulderR),
            JointId::Muzzle => Some(JointId::ElbowR),
            JointId::KneeL => Some(JointId::HipL),
            JointId::KneeR => Some(JointId::HipR),
        }
    }
}

/// Local transform of a joint relative to its parent
fn local_transform(joint: JointId, pose: &JointPose, dims: &SkeletonDims) -> (Vec3, Quat) {
    match joint {
        // The waist's transform comes from position/yaw in world_transform
        JointId::Waist => (Vec3::ZERO, Quat::IDENTITY),
        JointId::Torso => (
            Vec3::new(0.0, dims.torso_height / 2.0, 0.0),
            Quat::from_rotation_y(pose.torso_yaw),
        ),
        JointId::Head => (
            Vec3::new(0.0, dims.head_center_y(), 0.0),
            Quat::from_rotation_x(pose.head_pitch),
        ),
        JointId::ShoulderR => (
            Vec3::new(dims.shoulder_x(), dims.shoulder_y(), 0.0),
            Quat::from_rotation_x(pose.shoulder_pitch) * Quat::from_rotation_z(pose.shoulder_roll),
        ),
        JointId::ShoulderL => (
            Vec3::new(-dims.shoulder_x(), dims.shoulder_y(), 0.0),
            Quat::from_rotation_z(-pose.shoulder_roll),
        ),
        JointId::ElbowR => (
            Vec3::new(0.0, -dims.arm_height, 0.0),
            Quat::from_rotation_x(pose.elbow_pitch),
        ),
        JointId::ElbowL => (
            Vec3::new(0.0, -dims.arm_height, 0.0),
            Quat::from_rotation_x(pose.elbow_pitch),
        ),
        JointId::Muzzle => (Vec3::new(0.0, -dims.arm_height, 0.0), Quat::IDENTITY),
        JointId::HipL => (
            Vec3::new(-dims.hip_x(), 0.0, 0.0),
            Quat::from_rotation_x(pose.hip_pitch_l),
        ),
        JointId::HipR => (
            Vec3::new(dims.hip_x(), 0.0, 0.0),
            Quat::from_rotation_x(pose.hip_pitch_r),
        ),
        JointId::KneeL => (
            Vec3::new(0.0, -dims.leg_height, 0.0),
            Quat::from_rotation_x(pose.knee_pitch_l),
        ),
        JointId::KneeR => (
            Vec3::new(0.0, -dims.leg_height, 0.0),
            Quat::from_rotation_x(pose.knee_pitch_r),
        ),
    }
}

/// World transform of a joint, composed down the parent chain.
///
/// Pure function of the rig's root state and pose; `position` is the waist
/// origin at standing height.
pub fn world_transform(
    position: Vec3,
    yaw: f32,
    pose: &JointPose,
    dims: &SkeletonDims,
    joint: JointId,
) -> (Vec3, Quat) {
    match joint.parent() {
        None => (
            position + Vec3::Y * pose.root_lift,
            Quat::from_rotation_y(yaw),
        ),
        Some(parent) => {
            let (parent_pos, parent_rot) = world_transform(position, yaw, pose, dims, parent);
            let (local_pos, local_rot) = local_transform(joint, pose, dims);
            (parent_pos + parent_rot * local_pos, parent_rot * local_rot)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn rig_at_origin() -> (Vec3, SkeletonDims) {
        let dims = SkeletonDims::default();
        (Vec3::new(0.0, dims.stand_height(), 0.0), dims)
    }

    #[test]
    fn test_derived_dimensions() {
        let dims = SkeletonDims::default();
        assert_relative_eq!(dims.stand_height(), 1.0);
        assert_relative_eq!(dims.head_center_y(), 1.27);
        assert_relative_eq!(dims.shoulder_x(), 0.385);
        assert_relative_eq!(dims.shoulder_y(), 0.925);
        assert_relative_eq!(dims.hip_x(), 0.19, epsilon = 1e-6);
        assert_relative_eq!(dims.collider_half_extents()[1], 1.31);
        assert_relative_eq!(dims.collider_offset_y(), 0.31, epsilon = 1e-6);
    }

    #[test]
    fn test_head_sits_above_waist() {
        let (position, dims) = rig_at_origin();
        let pose = JointPose::default();
        let (head, _) = world_transform(position, 0.0, &pose, &dims, JointId::Head);
        assert_relative_eq!(head.x, 0.0);
        assert_relative_eq!(head.y, dims.stand_height() + dims.head_center_y());
        assert_relative_eq!(head.z, 0.0);
    }

    #[test]
    fn test_muzzle_hangs_down_at_rest() {
        let (position, dims) = rig_at_origin();
        // Zero the rest roll/bend so the arm hangs exactly straight
        let pose = JointPose {
            shoulder_roll: 0.0,
            elbow_pitch: 0.0,
            ..JointPose::default()
        };
        let (muzzle, _) = world_transform(position, 0.0, &pose, &dims, JointId::Muzzle);
        assert_relative_eq!(muzzle.x, dims.shoulder_x());
        assert_relative_eq!(
            muzzle.y,
            dims.stand_height() + dims.shoulder_y() - 2.0 * dims.arm_height,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_muzzle_points_forward_when_aiming() {
        let (position, dims) = rig_at_origin();
        let pose = JointPose {
            shoulder_pitch: FRAC_PI_2,
            shoulder_roll: 0.0,
            elbow_pitch: 0.0,
            ..JointPose::default()
        };
        let (muzzle, _) = world_transform(position, 0.0, &pose, &dims, JointId::Muzzle);
        // Arm raised level: the muzzle extends along -Z at shoulder height
        assert_relative_eq!(
            muzzle.y,
            dims.stand_height() + dims.shoulder_y(),
            epsilon = 1e-5
        );
        assert_relative_eq!(muzzle.z, -2.0 * dims.arm_height, epsilon = 1e-5);
    }

    #[test]
    fn test_yaw_rotates_whole_tree() {
        let (position, dims) = rig_at_origin();
        let pose = JointPose {
            shoulder_roll: 0.0,
            elbow_pitch: 0.0,
            ..JointPose::default()
        };
        // Facing +X after a -π/2 yaw: the cannon shoulder moves to +Z
        let (shoulder, _) = world_transform(position, -FRAC_PI_2, &pose, &dims, JointId::ShoulderR);
        assert_relative_eq!(shoulder.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(shoulder.z, dims.shoulder_x(), epsilon = 1e-5);
    }

    #[test]
    fn test_root_lift_moves_everything() {
        let (position, dims) = rig_at_origin();
        let mut pose = JointPose::default();
        let (head_before, _) = world_transform(position, PI / 3.0, &pose, &dims, JointId::Head);
        pose.root_lift = -0.04;
        let (head_after, _) = world_transform(position, PI / 3.0, &pose, &dims, JointId::Head);
        assert_relative_eq!(head_after.y, head_before.y - 0.04, epsilon = 1e-6);
        assert_relative_eq!(head_after.x, head_before.x, epsilon = 1e-6);
    }
}
