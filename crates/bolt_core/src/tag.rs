//! Collider user-data tags
//!
//! Rapier colliders carry a u128 user-data word. Every body the engine
//! creates stores a `BodyTag` there, so a contact event can be classified
//! from the event alone, without a side table.

use crate::id::{ActorId, ProjectileId};

const KIND_ACTOR: u128 = 1;
const KIND_PROJECTILE: u128 = 2;
const KIND_SCENERY: u128 = 3;

/// What a tagged collider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyTag {
    /// A combatant's body collider
    Actor(ActorId),
    /// A projectile in flight
    Projectile(ProjectileId),
    /// Terrain, walls, the ground plane - anything a projectile counts
    /// as a miss against
    Scenery,
}

impl BodyTag {
    /// Pack into a collider user-data word.
    ///
    /// Never produces zero, so an untagged collider (rapier's default
    /// user data) stays distinguishable.
    pub fn encode(&self) -> u128 {
        match self {
            BodyTag::Actor(id) => (KIND_ACTOR << 64) | id.index() as u128,
            BodyTag::Projectile(id) => (KIND_PROJECTILE << 64) | id.raw() as u128,
            BodyTag::Scenery => KIND_SCENERY << 64,
        }
    }

    /// Decode a user-data word. Returns `None` for untagged colliders.
    pub fn decode(data: u128) -> Option<BodyTag> {
        let payload = data as u64;
        match data >> 64 {
            k if k == KIND_ACTOR => Some(BodyTag::Actor(ActorId::new(payload as u32))),
            k if k == KIND_PROJECTILE => Some(BodyTag::Projectile(ProjectileId::new(payload))),
            k if k == KIND_SCENERY => Some(BodyTag::Scenery),
            _ => None,
        }
    }

    /// The actor id, if this tags an actor
    pub fn as_actor(&self) -> Option<ActorId> {
        match self {
            BodyTag::Actor(id) => Some(*id),
            _ => None,
        }
    }

    /// The projectile id, if this tags a projectile
    pub fn as_projectile(&self) -> Option<ProjectileId> {
        match self {
            BodyTag::Projectile(id) => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        let tags = [
            BodyTag::Actor(ActorId::new(7)),
            BodyTag::Projectile(ProjectileId::new(u64::MAX)),
            BodyTag::Scenery,
        ];
        for tag in tags {
            assert_eq!(BodyTag::decode(tag.encode()), Some(tag));
        }
    }

    #[test]
    fn test_untagged_decodes_none() {
        assert_eq!(BodyTag::decode(0), None);
        assert_eq!(BodyTag::decode(99 << 64), None);
    }

    #[test]
    fn test_accessors() {
        let actor = BodyTag::Actor(ActorId::new(2));
        assert_eq!(actor.as_actor(), Some(ActorId::new(2)));
        assert_eq!(actor.as_projectile(), None);

        let projectile = BodyTag::Projectile(ProjectileId::new(5));
        assert_eq!(projectile.as_projectile(), Some(ProjectileId::new(5)));
        assert_eq!(projectile.as_actor(), None);
    }
}
