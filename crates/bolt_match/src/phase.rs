//! Match phases

use serde::{Deserialize, Serialize};

/// The strictly sequential phases of a match.
///
/// TurnActive → (Charging →) Resolving or TurnTransition → TurnActive …
/// until GameOver. No phase is ever skipped or re-entered concurrently;
/// the controller is the only writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// The active actor moves, turns, and aims
    TurnActive,
    /// Charge input is held; power ramps, movement is frozen
    Charging,
    /// A shot is in flight, waiting for its first contact
    Resolving,
    /// Fixed delay between turns
    TurnTransition,
    /// One team has been eliminated
    GameOver,
}

impl MatchPhase {
    /// Whether movement/aim/charge input is processed in this phase
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::TurnActive | Self::Charging)
    }

    /// Whether the turn countdown runs in this phase
    pub fn is_live(&self) -> bool {
        matches!(self, Self::TurnActive | Self::Charging)
    }

    /// Whether the match has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_properties() {
        assert!(MatchPhase::TurnActive.accepts_input());
        assert!(MatchPhase::Charging.accepts_input());
        assert!(!MatchPhase::Resolving.accepts_input());
        assert!(!MatchPhase::TurnTransition.accepts_input());
        assert!(!MatchPhase::GameOver.accepts_input());

        assert!(MatchPhase::GameOver.is_terminal());
        assert!(!MatchPhase::Resolving.is_terminal());

        assert!(MatchPhase::Charging.is_live());
        assert!(!MatchPhase::Resolving.is_live());
    }
}
