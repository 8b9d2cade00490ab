//! Bolt Core - shared vocabulary for the Bolt Arena turn engine
//!
//! Small, dependency-light types used by every other crate in the
//! workspace: actor and projectile identifiers, team affiliation, and the
//! collider user-data tag encoding that classifies physics contacts.

pub mod id;
pub mod tag;
pub mod team;

pub mod prelude {
    //! Common imports for core types
    pub use crate::id::{ActorId, ProjectileId};
    pub use crate::tag::BodyTag;
    pub use crate::team::Team;
}

pub use prelude::*;
