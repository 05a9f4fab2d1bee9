//! Entity identification for card instances.
//!
//! Every card instance created during a session (drawn, held, played,
//! locked) gets a unique `EntityId`. Definitions are matched by name;
//! instances are addressed by entity ID so two copies of the same card
//! in hand stay distinguishable.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one session.
///
/// IDs are allocated by the session's monotonic counter and are never
/// reused, even across restarts of the same session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Allocator for session-unique entity IDs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create a new allocator starting at ID 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next unique entity ID.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id() {
        let id = EntityId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Entity(42)");
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = EntityAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        let c = alloc.allocate();

        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(c, EntityId(2));
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
