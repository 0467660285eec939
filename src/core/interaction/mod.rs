//=========================================================================
// Interaction System
//=========================================================================
//
// Player-side half of the core: what can be grabbed, and carrying it.
//
// Flow:
//   Overlap (grab volume) → GrabDetector → CarryController → World forces
//
//=========================================================================

//=== Module Declarations =================================================

mod carry;
mod detector;

//=== Public API ==========================================================

pub use carry::{CarryController, CarryEvent, CarryState};
pub use detector::GrabDetector;

//=== Internal Dependencies ===============================================

use crate::core::world::{EntityId, Tag};

//=== Overlap =============================================================

/// Overlap notification from an external volume test.
///
/// Carries the entity and its tag so handlers can filter without a world
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub entity: EntityId,
    pub tag: Tag,
}

impl Overlap {
    pub fn new(entity: EntityId, tag: impl Into<Tag>) -> Self {
        Self {
            entity,
            tag: tag.into(),
        }
    }
}
