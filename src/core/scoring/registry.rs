//=========================================================================
// Drop Registry
//=========================================================================
//
// Collection-volume handler: turns a grabbable entering the zone into a
// ledger entry and removes the instance from the world.
//
// Order: tag check → descriptor check → ledger.register() → despawn.
// Entities without a descriptor are left untouched.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::time::Duration;

use log::debug;

//=== Internal Dependencies ===============================================

use super::ledger::ScoreLedger;
use super::notify::Notification;
use crate::core::interaction::Overlap;
use crate::core::world::{EntityId, Tag, World};

//=== DropOutcome =========================================================

/// Result of a successful drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    /// The entity that was removed from the world.
    pub entity: EntityId,

    /// The notification the ledger produced for it.
    pub notification: Notification,
}

//=== DropRegistry ========================================================

#[derive(Debug)]
pub struct DropRegistry {
    grabbable_tag: Tag,
}

impl DropRegistry {
    pub fn new(grabbable_tag: Tag) -> Self {
        Self { grabbable_tag }
    }

    /// Handles an entity entering the collection volume.
    ///
    /// Returns `None` when the entity is not grabbable, has no descriptor,
    /// or is already gone.
    pub fn on_enter(
        &self,
        overlap: &Overlap,
        world: &mut World,
        ledger: &mut ScoreLedger,
        now: Duration,
    ) -> Option<DropOutcome> {
        if overlap.tag != self.grabbable_tag {
            return None;
        }

        let descriptor = match world.entity(overlap.entity) {
            Ok(entity) => match &entity.descriptor {
                Some(descriptor) => Arc::clone(descriptor),
                None => {
                    debug!("Ignoring {}: no descriptor", overlap.entity);
                    return None;
                }
            },
            Err(e) => {
                debug!("Ignoring drop: {}", e);
                return None;
            }
        };

        let notification = ledger.register(&descriptor, now);

        if let Err(e) = world.despawn(overlap.entity) {
            debug!("Despawn after drop failed: {}", e);
        }

        Some(DropOutcome {
            entity: overlap.entity,
            notification,
        })
    }

    pub fn grabbable_tag(&self) -> &Tag {
        &self.grabbable_tag
    }
}

impl Default for DropRegistry {
    fn default() -> Self {
        Self::new(Tag::new(crate::core::config::GRABBABLE_TAG))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::{ChannelNotifier, DropRecord};
    use crate::core::world::{Body, Descriptor, EntityDesc};
    use glam::Vec3;

    fn bottle(world: &mut World, value: i32) -> EntityId {
        world.spawn(
            EntityDesc::new("Pickable")
                .with_body(Body::new(Vec3::ZERO))
                .with_descriptor(Descriptor::new("Bottle", value)),
        )
    }

    #[test]
    fn drop_registers_notifies_and_removes() {
        let mut world = World::new();
        let (notifier, rx) = ChannelNotifier::bounded(4);
        let mut ledger = ScoreLedger::with_sink(notifier);
        let registry = DropRegistry::default();
        let id = bottle(&mut world, 2);

        let outcome = registry
            .on_enter(&Overlap::new(id, "Pickable"), &mut world, &mut ledger, Duration::ZERO)
            .unwrap();

        assert_eq!(outcome.entity, id);
        assert_eq!(outcome.notification.message, "Removed Bottle (+2)");
        assert_eq!(ledger.drop_count(), 1);
        assert_eq!(ledger.total_score(), 2);
        assert_eq!(rx.try_recv().unwrap().message, "Removed Bottle (+2)");
        assert!(!world.contains(id));
    }

    #[test]
    fn non_grabbable_tag_is_ignored() {
        let mut world = World::new();
        let mut ledger = ScoreLedger::new();
        let registry = DropRegistry::default();
        let id = bottle(&mut world, 2);

        let outcome =
            registry.on_enter(&Overlap::new(id, "Wall"), &mut world, &mut ledger, Duration::ZERO);

        assert_eq!(outcome, None);
        assert_eq!(ledger.drop_count(), 0);
        assert!(world.contains(id));
    }

    #[test]
    fn missing_descriptor_is_silently_ignored() {
        let mut world = World::new();
        let mut ledger = ScoreLedger::new();
        let registry = DropRegistry::default();
        let id = world.spawn(EntityDesc::new("Pickable").with_body(Body::new(Vec3::ZERO)));

        let outcome =
            registry.on_enter(&Overlap::new(id, "Pickable"), &mut world, &mut ledger, Duration::ZERO);

        assert_eq!(outcome, None);
        assert_eq!(ledger.drop_count(), 0);
        assert!(world.contains(id), "Entity without descriptor must stay");
    }

    #[test]
    fn second_enter_of_removed_entity_is_ignored() {
        let mut world = World::new();
        let mut ledger = ScoreLedger::new();
        let registry = DropRegistry::default();
        let id = bottle(&mut world, 2);
        let overlap = Overlap::new(id, "Pickable");

        registry.on_enter(&overlap, &mut world, &mut ledger, Duration::ZERO);
        let again = registry.on_enter(&overlap, &mut world, &mut ledger, Duration::ZERO);

        assert_eq!(again, None);
        assert_eq!(ledger.drop_count(), 1);
    }

    #[test]
    fn shared_template_survives_instance_removal() {
        let mut world = World::new();
        let mut ledger = ScoreLedger::new();
        let registry = DropRegistry::default();
        let template = Arc::new(Descriptor::new("Can", 5));
        let a = world.spawn(EntityDesc::new("Pickable").with_shared_descriptor(Arc::clone(&template)));
        let b = world.spawn(EntityDesc::new("Pickable").with_shared_descriptor(Arc::clone(&template)));

        registry.on_enter(&Overlap::new(a, "Pickable"), &mut world, &mut ledger, Duration::ZERO);

        assert_eq!(*template, Descriptor::new("Can", 5));
        assert!(world.contains(b));
        assert_eq!(ledger.log(), &[DropRecord::new("Can", 5)]);
    }
}
