//! Card instances - per-session runtime state.
//!
//! A `CardInstance` is one card in one session: a unique entity ID plus
//! a private, mutable copy of the definition's stats. The combine
//! action mutates the instance copy only, so two sessions sharing the
//! same definitions can never see each other's modifications.
//!
//! Name and type are cached from the definition at instantiation; both
//! are immutable on the definition, so the cache cannot go stale.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, CardType, StatMap};
use crate::core::entity::EntityId;

/// A card instance in a session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub entity: EntityId,

    /// The definition this instance was created from.
    pub card: CardId,

    /// Cached definition name (the matching key).
    pub name: String,

    /// Cached definition type.
    pub card_type: CardType,

    /// Mutable stat snapshot, seeded from the definition.
    pub stats: StatMap,
}

impl CardInstance {
    /// Instantiate a definition with a fresh entity ID.
    #[must_use]
    pub fn from_definition(entity: EntityId, definition: &CardDefinition) -> Self {
        Self {
            entity,
            card: definition.id,
            name: definition.name.clone(),
            card_type: definition.card_type,
            stats: definition.stats.clone(),
        }
    }

    /// Get a stat value with a default.
    #[must_use]
    pub fn stat(&self, name: &str, default: f32) -> f32 {
        self.stats.get(name).copied().unwrap_or(default)
    }

    /// Does this instance carry the named stat?
    #[must_use]
    pub fn has_stat(&self, name: &str) -> bool {
        self.stats.contains_key(name)
    }

    /// Add to a stat's value in place, inserting it if absent.
    ///
    /// Returns the new value.
    pub fn add_to_stat(&mut self, name: &str, delta: f32) -> f32 {
        let value = self.stats.entry(name.to_string()).or_insert(0.0);
        *value += delta;
        *value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salt_definition() -> CardDefinition {
        CardDefinition::new(CardId::new(1), "Salt", CardType::Spice).with_stat("Saltiness", 1.0)
    }

    #[test]
    fn test_instantiation_copies_stats() {
        let def = salt_definition();
        let instance = CardInstance::from_definition(EntityId(7), &def);

        assert_eq!(instance.entity, EntityId(7));
        assert_eq!(instance.card, CardId::new(1));
        assert_eq!(instance.name, "Salt");
        assert_eq!(instance.card_type, CardType::Spice);
        assert_eq!(instance.stat("Saltiness", 0.0), 1.0);
    }

    #[test]
    fn test_mutation_never_touches_definition() {
        let def = salt_definition();
        let mut instance = CardInstance::from_definition(EntityId(7), &def);

        instance.add_to_stat("Saltiness", 1.0);

        assert_eq!(instance.stat("Saltiness", 0.0), 2.0);
        assert_eq!(def.stat("Saltiness", 0.0), 1.0);
    }

    #[test]
    fn test_two_instances_are_independent() {
        let def = salt_definition();
        let mut a = CardInstance::from_definition(EntityId(1), &def);
        let b = CardInstance::from_definition(EntityId(2), &def);

        a.add_to_stat("Saltiness", 5.0);

        assert_eq!(a.stat("Saltiness", 0.0), 6.0);
        assert_eq!(b.stat("Saltiness", 0.0), 1.0);
    }

    #[test]
    fn test_add_to_missing_stat_inserts() {
        let def = salt_definition();
        let mut instance = CardInstance::from_definition(EntityId(1), &def);

        let new_value = instance.add_to_stat("Sweetness", 0.5);

        assert_eq!(new_value, 0.5);
        assert!(instance.has_stat("Sweetness"));
    }
}
