//! Team affiliation

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two opposing teams.
///
/// Roster convention: even roster indices are Red, odd indices are Blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    /// Numeric team index (Red = 0, Blue = 1)
    pub const fn index(&self) -> u32 {
        match self {
            Team::Red => 0,
            Team::Blue => 1,
        }
    }

    /// Team for a roster index (even = Red, odd = Blue)
    pub const fn from_roster_index(index: u32) -> Self {
        if index % 2 == 0 {
            Team::Red
        } else {
            Team::Blue
        }
    }

    /// The opposing team
    pub const fn opponent(&self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Red => write!(f, "red"),
            Team::Blue => write!(f, "blue"),
        }
    }
}
