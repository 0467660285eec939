//=========================================================================
// Grab Detector
//=========================================================================
//
// Tracks the single object the player could grab right now.
//
// Policy (last write wins):
//   enter(grabbable)     → candidate = entity
//   enter(anything else) → candidate cleared, even if one was valid
//   exit(candidate)      → candidate cleared
//   exit(other)          → no-op
//
// `available()` is derived from the candidate, so it can never disagree
// with it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::Overlap;
use crate::core::world::{EntityId, Tag};

//=== GrabDetector ========================================================

/// Detection state of the grab volume.
#[derive(Debug)]
pub struct GrabDetector {
    grabbable_tag: Tag,
    candidate: Option<EntityId>,
}

impl GrabDetector {
    pub fn new(grabbable_tag: Tag) -> Self {
        Self {
            grabbable_tag,
            candidate: None,
        }
    }

    //--- Overlap Events ---------------------------------------------------

    /// Handles an object entering the grab volume.
    pub fn on_enter(&mut self, overlap: &Overlap) {
        if overlap.tag == self.grabbable_tag {
            debug!("Grab candidate {} entered", overlap.entity);
            self.candidate = Some(overlap.entity);
        } else {
            if let Some(previous) = self.candidate {
                debug!(
                    "Non-grabbable {} ({}) cleared candidate {}",
                    overlap.entity, overlap.tag, previous
                );
            }
            self.candidate = None;
        }
    }

    /// Handles an object leaving the grab volume.
    pub fn on_exit(&mut self, overlap: &Overlap) {
        self.forget(overlap.entity);
    }

    /// Drops the candidate if it is `entity` (exited or removed).
    pub fn forget(&mut self, entity: EntityId) {
        if self.candidate == Some(entity) {
            debug!("Grab candidate {} cleared", entity);
            self.candidate = None;
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns `true` if an object can be grabbed.
    pub fn available(&self) -> bool {
        self.candidate.is_some()
    }

    /// The object that would be grabbed, if any.
    pub fn candidate(&self) -> Option<EntityId> {
        self.candidate
    }

    pub fn grabbable_tag(&self) -> &Tag {
        &self.grabbable_tag
    }
}

impl Default for GrabDetector {
    fn default() -> Self {
        Self::new(Tag::new(crate::core::config::GRABBABLE_TAG))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
