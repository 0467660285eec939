//=========================================================================
// Simulation World
//=========================================================================
//
// Owns every live entity and anchor, and integrates bodies each step.
//
// Architecture:
//   World
//     ├─ slots:   Vec<Slot>        (generational entity storage)
//     ├─ free:    Vec<u32>         (reusable slot indices)
//     └─ anchors: Vec<Vec3>        (anchor positions by AnchorId)
//
// Components never own entities. They keep `EntityId`s and resolve them
// through the world each time, so a removed entity shows up as a
// `WorldError` rather than a dangling reference.
//
//=========================================================================

//=== Module Declarations =================================================

mod body;
mod entity;

//=== Public API ==========================================================

pub use body::{Body, Constraints, PhysicalProperties};
pub use entity::{Descriptor, Entity, EntityDesc, EntityId, Tag};

//=== External Dependencies ===============================================

use std::fmt;

use glam::Vec3;
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::error::WorldError;

//=== AnchorId ============================================================

/// Handle to a point carried objects can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(u32);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

//=== Attachment ==========================================================

/// Relation between a carried entity and the anchor it follows.
///
/// Produced by the carry controller while it holds something; consulted
/// by [`World::move_anchor`] to drag the entity along with its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub held: EntityId,
    pub anchor: AnchorId,
}

//=== World ===============================================================

struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Container for live entities, their bodies, and anchors.
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    anchors: Vec<Vec3>,
    gravity: Vec3,
}

impl World {
    /// Standard downward gravity in m/s².
    pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

    pub fn new() -> Self {
        Self::with_gravity(Self::DEFAULT_GRAVITY)
    }

    pub fn with_gravity(gravity: Vec3) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            anchors: Vec::new(),
            gravity,
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    //--- Entity Lifecycle -------------------------------------------------

    /// Creates a live entity and returns its id.
    pub fn spawn(&mut self, desc: EntityDesc) -> EntityId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entity: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        let id = EntityId {
            index,
            generation: slot.generation,
        };

        slot.entity = Some(Entity {
            id,
            tag: desc.tag,
            body: desc.body,
            descriptor: desc.descriptor,
        });

        trace!("Spawned entity {}", id);
        id
    }

    /// Removes an entity permanently and hands it back.
    ///
    /// The slot's generation is bumped so `id` never resolves again.
    pub fn despawn(&mut self, id: EntityId) -> Result<Entity, WorldError> {
        let slot = self
            .slot_mut(id)
            .ok_or(WorldError::UnknownEntity(id))?;

        let entity = slot.entity.take().ok_or(WorldError::UnknownEntity(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        debug!("Despawned entity {} ({})", id, entity.tag);
        Ok(entity)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_ok()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entity.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all live entities.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().filter_map(|s| s.entity.as_ref())
    }

    //--- Lookup -----------------------------------------------------------

    pub fn entity(&self, id: EntityId) -> Result<&Entity, WorldError> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.entity.as_ref())
            .ok_or(WorldError::UnknownEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, WorldError> {
        self.slot_mut(id)
            .and_then(|s| s.entity.as_mut())
            .ok_or(WorldError::UnknownEntity(id))
    }

    pub fn body(&self, id: EntityId) -> Result<&Body, WorldError> {
        self.entity(id)?
            .body
            .as_ref()
            .ok_or(WorldError::MissingBody(id))
    }

    pub fn body_mut(&mut self, id: EntityId) -> Result<&mut Body, WorldError> {
        self.entity_mut(id)?
            .body
            .as_mut()
            .ok_or(WorldError::MissingBody(id))
    }

    /// Accumulates a force on an entity's body for the next step.
    pub fn apply_force(&mut self, id: EntityId, force: Vec3) -> Result<(), WorldError> {
        self.body_mut(id)?.add_force(force);
        Ok(())
    }

    //--- Anchors ----------------------------------------------------------

    pub fn add_anchor(&mut self, position: Vec3) -> AnchorId {
        self.anchors.push(position);
        AnchorId((self.anchors.len() - 1) as u32)
    }

    pub fn anchor_position(&self, anchor: AnchorId) -> Result<Vec3, WorldError> {
        self.anchors
            .get(anchor.0 as usize)
            .copied()
            .ok_or(WorldError::UnknownAnchor(anchor))
    }

    /// Moves an anchor, dragging the attached entity by the same offset.
    ///
    /// The attached body keeps its velocity and keeps simulating; only its
    /// position follows the anchor. An attachment to another anchor, or to
    /// an entity that no longer exists, is ignored.
    pub fn move_anchor(
        &mut self,
        anchor: AnchorId,
        position: Vec3,
        attachment: Option<Attachment>,
    ) -> Result<(), WorldError> {
        let slot = self
            .anchors
            .get_mut(anchor.0 as usize)
            .ok_or(WorldError::UnknownAnchor(anchor))?;

        let delta = position - *slot;
        *slot = position;

        if let Some(attachment) = attachment.filter(|a| a.anchor == anchor) {
            match self.body_mut(attachment.held) {
                Ok(body) => body.position += delta,
                Err(e) => debug!("Attachment to {} skipped: {}", anchor, e),
            }
        }

        Ok(())
    }

    //--- Simulation -------------------------------------------------------

    /// Integrates every body by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let gravity = self.gravity;
        for body in self
            .slots
            .iter_mut()
            .filter_map(|s| s.entity.as_mut())
            .filter_map(|e| e.body.as_mut())
        {
            body.integrate(dt, gravity);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn slot_mut(&mut self, id: EntityId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pickable_at(position: Vec3) -> EntityDesc {
        EntityDesc::new("Pickable").with_body(Body::new(position))
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn spawned_entity_is_resolvable() {
        let mut world = World::new();
        let id = world.spawn(pickable_at(Vec3::ONE));

        assert!(world.contains(id));
        assert_eq!(world.len(), 1);
        assert_eq!(world.entity(id).unwrap().tag, Tag::new("Pickable"));
        assert_eq!(world.body(id).unwrap().position, Vec3::ONE);
    }

    #[test]
    fn despawn_returns_entity_and_invalidates_id() {
        let mut world = World::new();
        let id = world.spawn(pickable_at(Vec3::ZERO));

        let removed = world.despawn(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(!world.contains(id));
        assert!(world.is_empty());
        assert_eq!(world.despawn(id).unwrap_err(), WorldError::UnknownEntity(id));
    }

    #[test]
    fn reused_slot_does_not_alias_stale_id() {
        let mut world = World::new();
        let old = world.spawn(pickable_at(Vec3::ZERO));
        world.despawn(old).unwrap();

        let new = world.spawn(EntityDesc::new("Wall"));
        assert_ne!(old, new);
        assert!(!world.contains(old));
        assert_eq!(world.entity(new).unwrap().tag, Tag::new("Wall"));
    }

    #[test]
    fn body_lookup_distinguishes_missing_body() {
        let mut world = World::new();
        let wall = world.spawn(EntityDesc::new("Wall"));

        assert_eq!(world.body(wall).unwrap_err(), WorldError::MissingBody(wall));
    }

    //=====================================================================
    // Anchor Tests
    //=====================================================================

    #[test]
    fn move_anchor_drags_attached_body() {
        let mut world = World::new();
        let anchor = world.add_anchor(Vec3::ZERO);
        let held = world.spawn(pickable_at(Vec3::new(0.0, 1.0, 0.0)));

        world
            .move_anchor(anchor, Vec3::new(2.0, 0.0, 0.0), Some(Attachment { held, anchor }))
            .unwrap();

        assert_eq!(world.anchor_position(anchor).unwrap(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(world.body(held).unwrap().position, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn move_anchor_without_attachment_leaves_bodies() {
        let mut world = World::new();
        let anchor = world.add_anchor(Vec3::ZERO);
        let other = world.spawn(pickable_at(Vec3::ZERO));

        world.move_anchor(anchor, Vec3::X, None).unwrap();

        assert_eq!(world.body(other).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn move_anchor_ignores_despawned_attachment() {
        let mut world = World::new();
        let anchor = world.add_anchor(Vec3::ZERO);
        let held = world.spawn(pickable_at(Vec3::ZERO));
        world.despawn(held).unwrap();

        let result = world.move_anchor(anchor, Vec3::X, Some(Attachment { held, anchor }));
        assert!(result.is_ok());
    }

    #[test]
    fn unknown_anchor_is_an_error() {
        let mut world = World::new();
        let mut other = World::new();
        let foreign = other.add_anchor(Vec3::ZERO);

        assert_eq!(
            world.move_anchor(foreign, Vec3::X, None).unwrap_err(),
            WorldError::UnknownAnchor(foreign)
        );
    }

    //=====================================================================
    // Simulation Tests
    //=====================================================================

    #[test]
    fn step_applies_forces_then_clears_them() {
        let mut world = World::with_gravity(Vec3::ZERO);
        let id = world.spawn(pickable_at(Vec3::ZERO));

        world.apply_force(id, Vec3::new(10.0, 0.0, 0.0)).unwrap();
        world.step(0.1);

        let body = world.body(id).unwrap();
        assert!(body.position.x > 0.0);
        assert_eq!(body.accumulated_force(), Vec3::ZERO);
    }

    #[test]
    fn step_skips_entities_without_body() {
        let mut world = World::new();
        world.spawn(EntityDesc::new("Wall"));
        world.step(0.1);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn apply_force_to_removed_entity_fails() {
        let mut world = World::new();
        let id = world.spawn(pickable_at(Vec3::ZERO));
        world.despawn(id).unwrap();

        assert_eq!(
            world.apply_force(id, Vec3::X).unwrap_err(),
            WorldError::UnknownEntity(id)
        );
    }
}
