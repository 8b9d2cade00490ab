//! Looping keyframe clips

use bolt_rig::JointPose;
use serde::{Deserialize, Serialize};

/// How a clip behaves past its last keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    /// Wrap back to the start
    Loop,
    /// Play forward then backward (yoyo)
    PingPong,
}

/// A timed pose keyframe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseKeyframe {
    /// Time in seconds
    pub time: f32,
    /// Pose at this time
    pub pose: JointPose,
}

/// A looping sequence of pose keyframes, sampled with linear interpolation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseClip {
    keyframes: Vec<PoseKeyframe>,
    loop_mode: LoopMode,
}

impl PoseClip {
    /// Create a clip; keyframes are sorted by time
    pub fn new(mut keyframes: Vec<PoseKeyframe>, loop_mode: LoopMode) -> Self {
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            keyframes,
            loop_mode,
        }
    }

    /// Duration of one pass (half a yoyo period for ping-pong clips)
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map(|k| k.time).unwrap_or(0.0)
    }

    /// Pose at the first keyframe (transition-in target)
    pub fn first_pose(&self) -> JointPose {
        self.keyframes
            .first()
            .map(|k| k.pose)
            .unwrap_or_default()
    }

    /// Sample the clip at an unbounded playback time
    pub fn sample(&self, time: f32) -> JointPose {
        if self.keyframes.is_empty() {
            return JointPose::default();
        }
        let duration = self.duration();
        if duration <= 0.0 {
            return self.keyframes[0].pose;
        }

        let local = match self.loop_mode {
            LoopMode::Loop => time.rem_euclid(duration),
            LoopMode::PingPong => {
                let phase = time.rem_euclid(2.0 * duration);
                if phase <= duration {
                    phase
                } else {
                    2.0 * duration - phase
                }
            }
        };

        // Binary search for the surrounding pair
        let idx = self.keyframes.partition_point(|k| k.time <= local);
        let prev = &self.keyframes[idx.saturating_sub(1)];
        let next = &self.keyframes[idx.min(self.keyframes.len() - 1)];

        let span = next.time - prev.time;
        let t = if span.abs() < 1e-4 {
            0.0
        } else {
            ((local - prev.time) / span).clamp(0.0, 1.0)
        };
        JointPose::lerp(&prev.pose, &next.pose, t)
    }
}

/// The idle yoyo: a subtle bob with the legs swaying against it.
///
/// Half period 1.2 s; ping-pong makes the loop self-restarting.
pub fn idle_clip() -> PoseClip {
    let rest = JointPose::default();
    let dip = JointPose {
        root_lift: -0.04,
        hip_pitch_l: 0.05,
        hip_pitch_r: 0.05,
        knee_pitch_l: 0.08,
        knee_pitch_r: 0.08,
        ..rest
    };
    PoseClip::new(
        vec![
            PoseKeyframe { time: 0.0, pose: rest },
            PoseKeyframe { time: 1.2, pose: dip },
        ],
        LoopMode::PingPong,
    )
}

/// The walk gait: alternating legs over a 0.6 s cycle, with passing poses
/// at the quarter points and a wrap key matching the start.
pub fn walk_clip() -> PoseClip {
    let rest = JointPose::default();
    let stride = |hip_l: f32, hip_r: f32, knee_l: f32, knee_r: f32| JointPose {
        hip_pitch_l: hip_l,
        hip_pitch_r: hip_r,
        knee_pitch_l: knee_l,
        knee_pitch_r: knee_r,
        ..rest
    };

    let left_leads = stride(0.45, -0.45, 0.0, 0.8);
    let passing_a = stride(0.0, 0.0, 0.4, 0.4);
    let right_leads = stride(-0.45, 0.45, 0.8, 0.0);
    let passing_b = stride(0.0, 0.0, 0.4, 0.4);

    PoseClip::new(
        vec![
            PoseKeyframe { time: 0.0, pose: left_leads },
            PoseKeyframe { time: 0.15, pose: passing_a },
            PoseKeyframe { time: 0.3, pose: right_leads },
            PoseKeyframe { time: 0.45, pose: passing_b },
            PoseKeyframe { time: 0.6, pose: left_leads },
        ],
        LoopMode::Loop,
    )
}
