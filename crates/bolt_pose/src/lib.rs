//! Bolt Pose - the per-actor animation state machine
//!
//! A [`PoseController`](controller::PoseController) drives one rig through
//! seven states: a self-restarting idle loop, a walk cycle with lean-in and
//! settle-out transitions, the aim stance, and the shot recoil. One-shot
//! transitions are tweens that capture the live pose as their start values,
//! so interrupting mid-flight never snaps; at most one transition is ever
//! in flight, and a new request cancels the old one outright
//! (last-request-wins, no queue).

pub mod clip;
pub mod controller;
pub mod easing;

pub mod prelude {
    //! Common imports for pose functionality
    pub use crate::clip::{LoopMode, PoseClip, PoseKeyframe};
    pub use crate::controller::{AfterShot, PoseController, PoseEvent, PoseState};
    pub use crate::easing::Easing;
}

pub use prelude::*;
