//! Collision abstraction.
//!
//! Collision resolution against static geometry and between bodies is
//! delegated to an external physics collaborator; the client core only
//! consumes its overlap reports, already tagged by participant kind.

use crate::net::SessionId;

/// An overlap reported by the physics collaborator.
///
/// `owner` is the player whose pool fired the projectile; `slot` is
/// the projectile's index in that pool. A projectile overlapping its
/// own shooter is never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    ProjectileTerrain {
        owner: SessionId,
        slot: usize,
    },
    ProjectilePlayer {
        owner: SessionId,
        slot: usize,
        victim: SessionId,
    },
}

/// Source of overlap reports, drained once per simulation step.
pub trait CollisionBackend {
    fn drain_contacts(&mut self) -> Vec<ContactEvent>;
}

/// No-op collision source.
#[derive(Default)]
pub struct NullCollision;

impl CollisionBackend for NullCollision {
    fn drain_contacts(&mut self) -> Vec<ContactEvent> {
        Vec::new()
    }
}
