//! Error types for match orchestration

use thiserror::Error;

/// Match orchestration errors
#[derive(Debug, Error)]
pub enum MatchError {
    /// The configuration provides no actors to spawn
    #[error("Cannot start a match with an empty roster")]
    EmptyRoster,

    /// A physics operation failed (stale handle, bad config)
    #[error("Physics error: {0}")]
    Physics(#[from] bolt_physics::PhysicsError),
}

/// Result type for match operations
pub type Result<T> = std::result::Result<T, MatchError>;
