//! Integer hit counter

use serde::{Deserialize, Serialize};

/// Health as a number of remaining hits.
///
/// Every hit costs exactly one point; reaching zero eliminates the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Remaining hits
    pub current: u32,
    /// Starting hits
    pub max: u32,
}

impl Health {
    /// Create at full health
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Take one hit, saturating at zero. Returns true if this hit caused
    /// elimination (the counter just reached zero).
    pub fn take_hit(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.current == 0
    }

    /// Whether the actor is eliminated
    pub fn is_dead(&self) -> bool {
        self.current == 0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(3)
    }
}
