//=========================================================================
// Entities
//=========================================================================
//
// Identity, tagging and static value data for world entities.
//
// Ids are generational: a slot reused after a despawn gets a new
// generation, so a stale id never resolves to the wrong entity.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use super::body::Body;

//=== EntityId ============================================================

/// Non-owning handle to an entity in a [`World`](super::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

//=== Tag =================================================================

/// Classification label used by overlap handlers (e.g. `"Pickable"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// Creates a tag from a static or owned string.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Tag {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

//=== Descriptor ==========================================================

/// Static value data shared by every instance of an object template.
///
/// Entities hold it behind an [`Arc`], so removing an instance never
/// touches the template's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub value: i32,
}

impl Descriptor {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

//=== Entity ==============================================================

/// A live object owned by the world.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub tag: Tag,
    pub body: Option<Body>,
    pub descriptor: Option<Arc<Descriptor>>,
}

//=== EntityDesc ==========================================================

/// Spawn description for [`World::spawn`](super::World::spawn).
///
/// ```
/// use pickup_core::core::world::{Body, Descriptor, EntityDesc};
/// use glam::Vec3;
///
/// let desc = EntityDesc::new("Pickable")
///     .with_body(Body::new(Vec3::ZERO))
///     .with_descriptor(Descriptor::new("Can", 5));
/// ```
#[derive(Debug, Clone)]
pub struct EntityDesc {
    pub(super) tag: Tag,
    pub(super) body: Option<Body>,
    pub(super) descriptor: Option<Arc<Descriptor>>,
}

impl EntityDesc {
    /// Describes an entity with the given tag and nothing attached.
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: tag.into(),
            body: None,
            descriptor: None,
        }
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches value data owned by this instance alone.
    pub fn with_descriptor(self, descriptor: Descriptor) -> Self {
        self.with_shared_descriptor(Arc::new(descriptor))
    }

    /// Attaches value data shared with other instances of the same template.
    pub fn with_shared_descriptor(mut self, descriptor: Arc<Descriptor>) -> Self {
        self.descriptor = Some(descriptor);
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_compares_by_name() {
        assert_eq!(Tag::new("Pickable"), Tag::from("Pickable"));
        assert_eq!(Tag::from(String::from("Wall")), Tag::new("Wall"));
        assert_ne!(Tag::new("Pickable"), Tag::new("pickable"));
    }

    #[test]
    fn tag_display_is_plain_name() {
        assert_eq!(Tag::new("Pickable").to_string(), "Pickable");
    }

    #[test]
    fn entity_desc_collects_parts() {
        let desc = EntityDesc::new("Pickable").with_descriptor(Descriptor::new("Can", 5));

        assert_eq!(desc.tag.as_str(), "Pickable");
        assert!(desc.body.is_none());
        assert_eq!(desc.descriptor.as_deref(), Some(&Descriptor::new("Can", 5)));
    }

    #[test]
    fn shared_descriptor_is_not_copied() {
        let template = Arc::new(Descriptor::new("Bottle", 3));
        let a = EntityDesc::new("Pickable").with_shared_descriptor(Arc::clone(&template));
        let b = EntityDesc::new("Pickable").with_shared_descriptor(Arc::clone(&template));

        assert!(Arc::ptr_eq(a.descriptor.as_ref().unwrap(), b.descriptor.as_ref().unwrap()));
        assert_eq!(Arc::strong_count(&template), 3);
    }
}
