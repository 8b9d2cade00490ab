//! The pose state machine

use crate::clip::{idle_clip, walk_clip, PoseClip};
use crate::easing::Easing;
use bolt_rig::{ActorRig, JointPose};
use log::debug;

/// Animation states of one actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseState {
    /// Continuous bob-and-sway loop; the default whenever nothing else
    /// is requested
    Idle,
    /// One-shot lean into the first gait pose
    IdleToWalk,
    /// Looping alternating-leg gait
    Walking,
    /// One-shot settle back to the rest pose
    WalkToIdle,
    /// Transition into (and hold of) the firing stance
    Aiming,
    /// One-shot return from the firing stance to rest
    AimToIdle,
    /// Recoil kick, then an automatic chained return after a settle delay
    Shooting,
}

/// Where the rig goes after the shot recoil settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterShot {
    /// Ease back into the held aim stance
    HoldAim,
    /// Ease all the way back to idle
    ReturnToIdle,
}

/// Emitted when a one-shot transition runs to completion.
///
/// Interrupted transitions emit nothing; looping states never complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseEvent {
    /// The named state's transition finished its full duration
    Completed(PoseState),
}

/// What a tween moves toward. Relative targets are resolved against the
/// captured start pose, so a recoil kicks from wherever the arm is.
#[derive(Debug, Clone, Copy)]
enum TweenTarget {
    Pose(JointPose),
    ShoulderKick(f32),
}

/// An in-flight one-shot transition. The start pose is captured from the
/// rig on the first update after the request, so a transition issued
/// mid-flight of another picks up exactly where the pose is.
#[derive(Debug, Clone)]
struct Tween {
    start: Option<JointPose>,
    target: TweenTarget,
    resolved_target: JointPose,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            start: None,
            target,
            resolved_target: JointPose::default(),
            duration,
            elapsed: 0.0,
            easing,
        }
    }
}

const IDLE_TO_WALK_SECS: f32 = 0.2;
const WALK_TO_IDLE_SECS: f32 = 0.3;
const TO_AIM_SECS: f32 = 0.15;
const AIM_TO_IDLE_SECS: f32 = 0.4;
const RECOIL_SECS: f32 = 0.12;
const RECOIL_KICK: f32 = 0.35;
const SETTLE_SECS: f32 = 0.5;

/// Drives one rig's joint pose.
///
/// At most one transition is in flight at any instant; a new request
/// cancels (stops, never reverses) the old one. Call
/// [`update`](PoseController::update) once per frame.
pub struct PoseController {
    state: PoseState,
    tween: Option<Tween>,
    /// Remaining post-recoil delay before the automatic chain
    settle: Option<f32>,
    after_shot: AfterShot,
    idle: PoseClip,
    walk: PoseClip,
    clip_time: f32,
}

impl Default for PoseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseController {
    /// Create a controller in the idle loop
    pub fn new() -> Self {
        Self {
            state: PoseState::Idle,
            tween: None,
            settle: None,
            after_shot: AfterShot::ReturnToIdle,
            idle: idle_clip(),
            walk: walk_clip(),
            clip_time: 0.0,
        }
    }

    /// Current state
    pub fn state(&self) -> PoseState {
        self.state
    }

    /// Whether a one-shot transition is currently in flight
    pub fn in_flight(&self) -> bool {
        self.tween.is_some()
    }

    /// Start walking: lean into the gait, then loop it
    pub fn begin_walk(&mut self) {
        let target = self.walk.first_pose();
        self.request(
            PoseState::IdleToWalk,
            Tween::new(
                TweenTarget::Pose(target),
                IDLE_TO_WALK_SECS,
                Easing::QuadraticInOut,
            ),
        );
    }

    /// Stop walking: settle back to rest, then idle
    pub fn end_walk(&mut self) {
        self.request(
            PoseState::WalkToIdle,
            Tween::new(
                TweenTarget::Pose(JointPose::default()),
                WALK_TO_IDLE_SECS,
                Easing::QuadraticInOut,
            ),
        );
    }

    /// Raise the cannon into the firing stance and hold it there
    pub fn to_aim(&mut self) {
        self.request(
            PoseState::Aiming,
            Tween::new(
                TweenTarget::Pose(JointPose::aim()),
                TO_AIM_SECS,
                Easing::QuadraticInOut,
            ),
        );
    }

    /// Lower the cannon back to rest, then idle
    pub fn aim_to_idle(&mut self) {
        self.request(
            PoseState::AimToIdle,
            Tween::new(
                TweenTarget::Pose(JointPose::default()),
                AIM_TO_IDLE_SECS,
                Easing::QuadraticInOut,
            ),
        );
    }

    /// Play the shot recoil, then chain per `after` once the settle delay
    /// passes
    pub fn shoot(&mut self, after: AfterShot) {
        self.after_shot = after;
        self.request(
            PoseState::Shooting,
            Tween::new(
                TweenTarget::ShoulderKick(RECOIL_KICK),
                RECOIL_SECS,
                Easing::QuadraticOut,
            ),
        );
    }

    /// Replace any in-flight transition. Last request wins; the cancelled
    /// tween emits no completion.
    fn request(&mut self, state: PoseState, tween: Tween) {
        if self.tween.is_some() {
            debug!("pose transition to {:?} cancels in-flight {:?}", state, self.state);
        }
        self.state = state;
        self.tween = Some(tween);
        self.settle = None;
    }

    /// Advance the machine by `dt`, writing the sampled pose into the rig.
    /// Returns the completion events that fired this frame.
    pub fn update(&mut self, rig: &mut ActorRig, dt: f32) -> Vec<PoseEvent> {
        let mut events = Vec::new();

        if let Some(tween) = self.tween.as_mut() {
            // Capture the live pose on the first frame of the transition
            let start = *tween.start.get_or_insert_with(|| *rig.pose());
            if tween.elapsed == 0.0 {
                tween.resolved_target = match tween.target {
                    TweenTarget::Pose(pose) => pose,
                    TweenTarget::ShoulderKick(kick) => JointPose {
                        shoulder_pitch: start.shoulder_pitch + kick,
                        ..start
                    },
                };
            }

            tween.elapsed += dt;
            let t = (tween.elapsed / tween.duration).min(1.0);
            let eased = tween.easing.apply(t);
            rig.apply_joint_pose(JointPose::lerp(&start, &tween.resolved_target, eased));

            if t >= 1.0 {
                self.tween = None;
                events.push(PoseEvent::Completed(self.state));
                self.finish_transition();
            }
            return events;
        }

        if let Some(remaining) = self.settle.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.settle = None;
                match self.after_shot {
                    AfterShot::HoldAim => self.to_aim(),
                    AfterShot::ReturnToIdle => self.aim_to_idle(),
                }
            }
            return events;
        }

        match self.state {
            PoseState::Idle => {
                self.clip_time += dt;
                rig.apply_joint_pose(self.idle.sample(self.clip_time));
            }
            PoseState::Walking => {
                self.clip_time += dt;
                rig.apply_joint_pose(self.walk.sample(self.clip_time));
            }
            // Aiming holds its final pose; no auto-loop
            _ => {}
        }

        events
    }

    /// State bookkeeping after a tween runs its full duration
    fn finish_transition(&mut self) {
        match self.state {
            PoseState::IdleToWalk => {
                self.state = PoseState::Walking;
                self.clip_time = 0.0;
            }
            PoseState::WalkToIdle | PoseState::AimToIdle => {
                self.state = PoseState::Idle;
                self.clip_time = 0.0;
            }
            PoseState::Shooting => {
                self.settle = Some(SETTLE_SECS);
            }
            // Aiming holds; looping states never get here
            _ => {}
        }
    }
}
