//! Identifiers for match participants

use serde::{Deserialize, Serialize};

/// Identifier of an actor in the match roster.
///
/// Assigned at roster construction and stable for the whole match: roster
/// positions shift as actors are eliminated, ids never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Create from a raw roster index
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index
    pub const fn index(&self) -> u32 {
        self.0
    }
}

/// Identifier of a spawned projectile, unique across the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u64);

impl ProjectileId {
    /// Create from a raw counter value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw counter value
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        let a = ActorId::new(3);
        assert_eq!(a.index(), 3);
        assert_eq!(a, ActorId::new(3));
        assert_ne!(a, ActorId::new(4));

        let p = ProjectileId::new(42);
        assert_eq!(p.raw(), 42);
    }
}
