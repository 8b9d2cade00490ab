//! Bolt Match - the turn engine
//!
//! The [`MatchController`](controller::MatchController) owns the roster,
//! the active-turn index, the input intents, and the turn clock, and runs
//! one fixed-order frame per render tick. Phases advance strictly in
//! sequence; every suspension (countdown, charge ramp, inter-turn delay,
//! shot resolution) is owned state advanced inside the frame, so there are
//! no independent timers to race each other.
//!
//! ```ignore
//! use bolt_match::prelude::*;
//!
//! let mut world = PhysicsWorld::new(PhysicsConfig::default())?;
//! let mut game = MatchController::new(&mut world, MatchConfig::default())?;
//!
//! game.apply_intent(Intent::MoveForward, KeyState::Pressed);
//! loop {
//!     game.frame(&mut world, 1.0 / 60.0)?;
//!     if game.phase().is_terminal() { break; }
//! }
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod intent;
pub mod phase;

pub mod prelude {
    //! Common imports for match functionality
    pub use crate::clock::TurnClock;
    pub use crate::config::{MatchConfig, SpawnPoint};
    pub use crate::controller::{MatchController, ShotOutcome, ViewMode};
    pub use crate::error::{MatchError, Result};
    pub use crate::intent::{Intent, IntentState, KeyState};
    pub use crate::phase::MatchPhase;
}

pub use prelude::*;
