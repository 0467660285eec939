//=========================================================================
// World Errors
//=========================================================================
//
// Lookup failures raised by the simulation world.
//
// None of these are fatal: interaction components match on them and fall
// back to a safe state instead of propagating.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::world::{AnchorId, EntityId};

//=== WorldError ==========================================================

/// Errors returned by [`World`](super::world::World) lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The entity was never spawned or has already been removed.
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    /// The entity exists but carries no physical body.
    #[error("entity {0} has no physical body")]
    MissingBody(EntityId),

    /// The anchor was never registered with the world.
    #[error("anchor {0} does not exist")]
    UnknownAnchor(AnchorId),
}

//=========================================================================
// Unit Tests
//=========================================================================
