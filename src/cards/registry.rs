//! Card registry for definition lookup.
//!
//! Stores every card definition for a game and indexes them by ID and
//! by name. Names are the matching contract the rules use; the name
//! index keeps those matches O(1) instead of scanning.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardType};
use super::instance::CardInstance;
use crate::core::entity::EntityAllocator;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use stovetop::cards::{CardRegistry, CardDefinition, CardId, CardType};
///
/// let mut registry = CardRegistry::new();
/// registry.register(
///     CardDefinition::new(CardId::new(1), "Salt", CardType::Spice)
///         .with_stat("Saltiness", 1.0),
/// );
///
/// assert_eq!(registry.id_by_name("Salt"), Some(CardId::new(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    by_name: FxHashMap<String, CardId>,
    next_id: u32,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID or name already exists; card
    /// names are the identity key, so duplicates would make matching
    /// ambiguous. Content loaded through `catalog` is validated before
    /// it gets here.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        if self.by_name.contains_key(&card.name) {
            panic!("Card with name '{}' already registered", card.name);
        }
        self.next_id = self.next_id.max(card.id.raw() + 1);
        self.by_name.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, card);
    }

    /// Register a card, assigning the next free ID. Returns that ID.
    pub fn register_auto(
        &mut self,
        name: impl Into<String>,
        card_type: CardType,
    ) -> CardId {
        let id = CardId::new(self.next_id);
        self.register(CardDefinition::new(id, name, card_type));
        id
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Look up a card ID by name.
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Look up a card definition by name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.id_by_name(name).and_then(|id| self.get(id))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the registry empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.card_type == card_type)
    }

    /// Create a fresh instance of a definition, allocating an entity ID.
    ///
    /// Returns `None` if the ID is not registered.
    #[must_use]
    pub fn instantiate(
        &self,
        id: CardId,
        allocator: &mut EntityAllocator,
    ) -> Option<CardInstance> {
        self.get(id)
            .map(|def| CardInstance::from_definition(allocator.allocate(), def))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(
            CardId::new(1),
            "Tomato",
            CardType::Ingredient,
        ));

        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Tomato");
        assert!(registry.get(CardId::new(99)).is_none());
        assert_eq!(registry.id_by_name("Tomato"), Some(CardId::new(1)));
        assert!(registry.id_by_name("Onion").is_none());
    }

    #[test]
    fn test_register_auto() {
        let mut registry = CardRegistry::new();

        let a = registry.register_auto("Knife", CardType::Tool);
        let b = registry.register_auto("Whisk", CardType::Tool);

        assert_eq!(a, CardId::new(0));
        assert_eq!(b, CardId::new(1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_auto_after_explicit_ids() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(5), "Pan", CardType::Tool));

        let next = registry.register_auto("Pot", CardType::Tool);
        assert_eq!(next, CardId::new(6));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "A", CardType::Tool));
        registry.register(CardDefinition::new(CardId::new(1), "B", CardType::Tool));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_name_panics() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "A", CardType::Tool));
        registry.register(CardDefinition::new(CardId::new(2), "A", CardType::Tool));
    }

    #[test]
    fn test_find_by_type() {
        let mut registry = CardRegistry::new();
        registry.register_auto("Tomato", CardType::Ingredient);
        registry.register_auto("Onion", CardType::Ingredient);
        registry.register_auto("Knife", CardType::Tool);

        assert_eq!(registry.find_by_type(CardType::Ingredient).count(), 2);
        assert_eq!(registry.find_by_type(CardType::Tool).count(), 1);
        assert_eq!(registry.find_by_type(CardType::Spice).count(), 0);
    }

    #[test]
    fn test_instantiate() {
        let mut registry = CardRegistry::new();
        registry.register(
            CardDefinition::new(CardId::new(1), "Salt", CardType::Spice)
                .with_stat("Saltiness", 1.0),
        );

        let mut alloc = EntityAllocator::new();
        let a = registry.instantiate(CardId::new(1), &mut alloc).unwrap();
        let b = registry.instantiate(CardId::new(1), &mut alloc).unwrap();

        assert_ne!(a.entity, b.entity);
        assert_eq!(a.name, "Salt");
        assert!(registry.instantiate(CardId::new(99), &mut alloc).is_none());
    }
}
