//=========================================================================
// Carry Controller
//=========================================================================
//
// Grab / hold / release state machine with a spring-to-anchor carry force.
//
// State machine:
// ```text
//          interact && detector.available()
//   Idle ───────────────────────────────────► Holding { held, original }
//    ▲                                            │
//    │  interact (restore properties)             │
//    ├────────────────────────────────────────────┤
//    │  held entity gone (no restoration)         │
//    └────────────────────────────────────────────┘
// ```
//
// While holding, every physics tick applies `(anchor - position) * gain`
// unless the body is already within `threshold` of the anchor. Stability
// comes from the carry-mode damping, not from the force itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::mem;

use glam::Vec3;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::GrabDetector;
use crate::core::config::{CarryConfig, RestoreMode};
use crate::core::world::{AnchorId, Attachment, EntityId, PhysicalProperties, World};

//=== CarryState ==========================================================

/// Current state of the carry controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarryState {
    /// Nothing is carried.
    Idle,

    /// `held` is carried; `original` is what its body had before the grab.
    Holding {
        held: EntityId,
        original: PhysicalProperties,
    },
}

//=== CarryEvent ==========================================================

/// Transition produced by an interaction or a physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryEvent {
    /// The entity was picked up.
    Grabbed(EntityId),

    /// The entity was let go and its body restored.
    Released(EntityId),

    /// The entity disappeared while carried; nothing was restored.
    Lost(EntityId),
}

//=== CarryController =====================================================

/// Owns the hold/release state and the carry force.
#[derive(Debug)]
pub struct CarryController {
    config: CarryConfig,
    anchor: AnchorId,
    state: CarryState,
}

impl CarryController {
    pub fn new(anchor: AnchorId, config: CarryConfig) -> Self {
        Self {
            config,
            anchor,
            state: CarryState::Idle,
        }
    }

    //--- Interaction ------------------------------------------------------

    /// Reacts to one interact press: grabs when idle, releases when holding.
    pub fn on_interact(
        &mut self,
        detector: &GrabDetector,
        world: &mut World,
    ) -> Option<CarryEvent> {
        match self.state {
            CarryState::Idle => self.try_grab(detector, world),
            CarryState::Holding { .. } => self.release(world),
        }
    }

    /// Picks up the detector's candidate.
    ///
    /// No-op while already holding, when nothing is available, or when the
    /// candidate has no body (or no longer exists).
    pub fn try_grab(&mut self, detector: &GrabDetector, world: &mut World) -> Option<CarryEvent> {
        if self.is_holding() {
            return None;
        }

        let candidate = detector.candidate()?;
        let carry_properties = self.config.carry_properties();

        let body = match world.body_mut(candidate) {
            Ok(body) => body,
            Err(e) => {
                warn!("Cannot grab {}: {}", candidate, e);
                return None;
            }
        };

        let original = body.properties;
        body.properties = carry_properties;

        self.state = CarryState::Holding {
            held: candidate,
            original,
        };

        info!("Grabbed {} (attached to {})", candidate, self.anchor);
        Some(CarryEvent::Grabbed(candidate))
    }

    /// Lets go of the carried entity.
    ///
    /// Always ends in `Idle` when holding. If the entity no longer exists
    /// nothing is restored and [`CarryEvent::Lost`] is returned. No-op when
    /// idle.
    pub fn release(&mut self, world: &mut World) -> Option<CarryEvent> {
        let CarryState::Holding { held, original } = mem::replace(&mut self.state, CarryState::Idle)
        else {
            return None;
        };

        let restored = match self.config.restore_mode {
            RestoreMode::Defaults => self.config.release_properties,
            RestoreMode::Original => original,
        };

        match world.body_mut(held) {
            Ok(body) => {
                body.properties = restored;
                info!("Released {}", held);
                Some(CarryEvent::Released(held))
            }
            Err(e) => {
                warn!("Released {} without restoring: {}", held, e);
                Some(CarryEvent::Lost(held))
            }
        }
    }

    //--- Physics Tick -----------------------------------------------------

    /// Applies the carry force for this tick and returns it.
    ///
    /// Returns `None` when idle, inside the dead zone, or when the held
    /// entity has vanished (which also resets the controller to `Idle`).
    pub fn fixed_update(&mut self, world: &mut World) -> Option<Vec3> {
        let CarryState::Holding { held, .. } = self.state else {
            return None;
        };

        let anchor_position = match world.anchor_position(self.anchor) {
            Ok(position) => position,
            Err(e) => {
                warn!("Carry force skipped: {}", e);
                return None;
            }
        };

        let position = match world.body(held) {
            Ok(body) => body.position,
            Err(e) => {
                warn!("Lost carried entity {}: {}", held, e);
                self.state = CarryState::Idle;
                return None;
            }
        };

        let displacement = anchor_position - position;
        if displacement.length() <= self.config.threshold {
            return None;
        }

        let force = displacement * self.config.gain;
        if let Err(e) = world.apply_force(held, force) {
            warn!("Carry force on {} dropped: {}", held, e);
            return None;
        }
        debug!("Carry force {:?} on {}", force, held);
        Some(force)
    }

    /// Forces `Idle` if `entity` is the carried one, without restoration.
    pub fn forget(&mut self, entity: EntityId) -> Option<CarryEvent> {
        match self.state {
            CarryState::Holding { held, .. } if held == entity => {
                self.state = CarryState::Idle;
                debug!("Carried entity {} removed", entity);
                Some(CarryEvent::Lost(entity))
            }
            _ => None,
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn state(&self) -> CarryState {
        self.state
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, CarryState::Holding { .. })
    }

    pub fn held(&self) -> Option<EntityId> {
        match self.state {
            CarryState::Holding { held, .. } => Some(held),
            CarryState::Idle => None,
        }
    }

    /// Anchor relation for the carried entity, if any.
    pub fn attachment(&self) -> Option<Attachment> {
        self.held().map(|held| Attachment {
            held,
            anchor: self.anchor,
        })
    }

    pub fn anchor(&self) -> AnchorId {
        self.anchor
    }

    pub fn config(&self) -> &CarryConfig {
        &self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
