//! Joint-angle pose

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// The full set of animated joint angles (radians) plus the root lift.
///
/// Only the cannon-arm shoulder pitches and rolls; the off arm mirrors the
/// rest roll and never animates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPose {
    /// Torso twist around Y
    pub torso_yaw: f32,
    /// Cannon-arm shoulder pitch (0 = arm down, π/2 = level)
    pub shoulder_pitch: f32,
    /// Cannon-arm shoulder roll
    pub shoulder_roll: f32,
    /// Cannon-arm elbow pitch
    pub elbow_pitch: f32,
    /// Left hip pitch
    pub hip_pitch_l: f32,
    /// Right hip pitch
    pub hip_pitch_r: f32,
    /// Left knee pitch
    pub knee_pitch_l: f32,
    /// Right knee pitch
    pub knee_pitch_r: f32,
    /// Head pitch (aim elevation)
    pub head_pitch: f32,
    /// Vertical offset of the waist from standing height (idle bob)
    pub root_lift: f32,
}

impl Default for JointPose {
    /// The rest pose: cannon arm rolled slightly outward, elbow slightly
    /// bent, everything else neutral.
    fn default() -> Self {
        Self {
            torso_yaw: 0.0,
            shoulder_pitch: 0.0,
            shoulder_roll: PI / 20.0,
            elbow_pitch: PI / 15.0,
            hip_pitch_l: 0.0,
            hip_pitch_r: 0.0,
            knee_pitch_l: 0.0,
            knee_pitch_r: 0.0,
            head_pitch: 0.0,
            root_lift: 0.0,
        }
    }
}

impl JointPose {
    /// The firing stance: cannon arm raised level and rolled inward.
    pub fn aim() -> Self {
        Self {
            shoulder_pitch: PI / 2.0,
            shoulder_roll: -PI / 10.0,
            ..Default::default()
        }
    }

    /// Componentwise linear interpolation
    pub fn lerp(a: &JointPose, b: &JointPose, t: f32) -> JointPose {
        let l = |x: f32, y: f32| x + (y - x) * t;
        JointPose {
            torso_yaw: l(a.torso_yaw, b.torso_yaw),
            shoulder_pitch: l(a.shoulder_pitch, b.shoulder_pitch),
            shoulder_roll: l(a.shoulder_roll, b.shoulder_roll),
            elbow_pitch: l(a.elbow_pitch, b.elbow_pitch),
            hip_pitch_l: l(a.hip_pitch_l, b.hip_pitch_l),
            hip_pitch_r: l(a.hip_pitch_r, b.hip_pitch_r),
            knee_pitch_l: l(a.knee_pitch_l, b.knee_pitch_l),
            knee_pitch_r: l(a.knee_pitch_r, b.knee_pitch_r),
            head_pitch: l(a.head_pitch, b.head_pitch),
            root_lift: l(a.root_lift, b.root_lift),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_endpoints() {
        let rest = JointPose::default();
        let aim = JointPose::aim();

        assert_eq!(JointPose::lerp(&rest, &aim, 0.0), rest);
        assert_eq!(JointPose::lerp(&rest, &aim, 1.0), aim);

        let mid = JointPose::lerp(&rest, &aim, 0.5);
        assert_relative_eq!(mid.shoulder_pitch, PI / 4.0, epsilon = 1e-6);
    }
}
