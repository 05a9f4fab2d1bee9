//! Recipe system: target dishes and the recipe book.
//!
//! A `RecipeDefinition` is the immutable scoring target for one round:
//! required cards per category (quantity = list length, duplicates
//! meaningful) and the target stat vector the combined dish should hit.
//!
//! `RecipeBook` holds all authored recipes and hands out the random
//! without-replacement selection used at game setup.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardRegistry, CardType, StatMap};
use crate::core::rng::GameRng;

/// Unique identifier for a recipe definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub u32);

impl RecipeId {
    /// Create a new recipe ID.
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

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Recipe({})", self.0)
    }
}

/// Immutable recipe target.
///
/// Required lists reference card definitions; a card appearing twice
/// means two copies are required. Spice requirements live inside
/// `required_ingredients`, matching how the game's content is authored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecipeDefinition {
    /// Unique identifier for this recipe.
    pub id: RecipeId,

    /// Dish name.
    pub name: String,

    /// Flavor/help text.
    #[serde(default)]
    pub description: String,

    /// Required ingredients (Spice-typed entries included).
    pub required_ingredients: Vec<CardId>,

    /// Required tools.
    pub required_tools: Vec<CardId>,

    /// Required techniques.
    pub required_techniques: Vec<CardId>,

    /// Target combined stats for a perfect dish.
    pub target_stats: StatMap,
}

impl RecipeDefinition {
    /// Create a new recipe with no requirements.
    #[must_use]
    pub fn new(id: RecipeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            required_ingredients: Vec::new(),
            required_tools: Vec::new(),
            required_techniques: Vec::new(),
            target_stats: StatMap::default(),
        }
    }

    /// Append a required ingredient (builder pattern).
    #[must_use]
    pub fn with_ingredient(mut self, card: CardId) -> Self {
        self.required_ingredients.push(card);
        self
    }

    /// Append a required tool (builder pattern).
    #[must_use]
    pub fn with_tool(mut self, card: CardId) -> Self {
        self.required_tools.push(card);
        self
    }

    /// Append a required technique (builder pattern).
    #[must_use]
    pub fn with_technique(mut self, card: CardId) -> Self {
        self.required_techniques.push(card);
        self
    }

    /// Set a target stat (builder pattern).
    #[must_use]
    pub fn with_target_stat(mut self, name: impl Into<String>, value: f32) -> Self {
        self.target_stats.insert(name.into(), value);
        self
    }

    /// Number of Spice-typed entries inside `required_ingredients`.
    ///
    /// This is the required spice count the scorer checks; spices are
    /// authored into the ingredient list, not a separate one.
    #[must_use]
    pub fn required_spice_count(&self, registry: &CardRegistry) -> usize {
        self.required_ingredients
            .iter()
            .filter(|id| {
                registry
                    .get(**id)
                    .is_some_and(|def| def.card_type == CardType::Spice)
            })
            .count()
    }
}

/// Registry of recipe definitions.
#[derive(Clone, Debug, Default)]
pub struct RecipeBook {
    recipes: FxHashMap<RecipeId, RecipeDefinition>,
    next_id: u32,
}

impl RecipeBook {
    /// Create a new empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recipe.
    ///
    /// Panics if a recipe with the same ID already exists. Content
    /// loaded through `catalog` is validated before it gets here.
    pub fn register(&mut self, recipe: RecipeDefinition) {
        if self.recipes.contains_key(&recipe.id) {
            panic!("Recipe with ID {:?} already registered", recipe.id);
        }
        self.next_id = self.next_id.max(recipe.id.raw() + 1);
        self.recipes.insert(recipe.id, recipe);
    }

    /// The next free recipe ID, for callers building recipes by hand.
    #[must_use]
    pub fn next_id(&self) -> RecipeId {
        RecipeId::new(self.next_id)
    }

    /// Get a recipe by ID.
    #[must_use]
    pub fn get(&self, id: RecipeId) -> Option<&RecipeDefinition> {
        self.recipes.get(&id)
    }

    /// Number of recipes in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Is the book empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Iterate over all recipes.
    pub fn iter(&self) -> impl Iterator<Item = &RecipeDefinition> {
        self.recipes.values()
    }

    /// Select up to `count` distinct recipes at random, without
    /// replacement.
    ///
    /// Returns fewer than `count` when the book is short - a degraded
    /// but valid outcome (the game simply plays fewer rounds), not an
    /// error.
    #[must_use]
    pub fn select_random(&self, count: usize, rng: &mut GameRng) -> Vec<RecipeId> {
        let mut available: Vec<RecipeId> = self.recipes.keys().copied().collect();
        // Deterministic order before the deterministic shuffle.
        available.sort_by_key(|id| id.raw());

        if available.len() < count {
            tracing::warn!(
                available = available.len(),
                requested = count,
                "not enough distinct recipes; game will run short"
            );
        }

        let mut selected = Vec::with_capacity(count.min(available.len()));
        for _ in 0..count {
            if available.is_empty() {
                break;
            }
            let index = rng.gen_range_usize(0..available.len());
            selected.push(available.swap_remove(index));
        }
        selected
    }
}
