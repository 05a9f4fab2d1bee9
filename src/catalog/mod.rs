//! Content catalog loading.
//!
//! The engine's "data source" collaborator: the full set of card and
//! recipe definitions plus the starting deck lists, loaded before a
//! session starts. Content is authored as JSON in which recipes and
//! decks reference cards **by name**; loading resolves every name
//! through the registry and rejects the catalog up front on unknown or
//! duplicate names, so a running session never hits a dangling
//! reference.
//!
//! ```json
//! {
//!   "cards": [
//!     { "name": "Salt", "card_type": "Spice", "stats": { "Saltiness": 1.0 } }
//!   ],
//!   "recipes": [
//!     { "name": "Salt Crust", "required_ingredients": ["Salt"],
//!       "target_stats": { "Saltiness": 2.0 } }
//!   ],
//!   "decks": [
//!     { "name": "Pantry", "cards": ["Salt"] }
//!   ]
//! }
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardId, CardRegistry, CardType, StatMap};
use crate::deck::DeckPool;
use crate::recipes::{RecipeBook, RecipeDefinition, RecipeId};

/// Why a catalog failed to load.
#[derive(Debug)]
pub enum CatalogError {
    /// The JSON itself would not parse.
    Json(serde_json::Error),
    /// Two cards share a name.
    DuplicateCard(String),
    /// Two recipes share a name.
    DuplicateRecipe(String),
    /// A recipe or deck references a card name that does not exist.
    UnknownCard {
        /// Where the reference appeared ("recipe 'X'", "deck 'Y'").
        context: String,
        /// The unresolved card name.
        name: String,
    },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Json(err) => write!(f, "catalog is not valid JSON: {err}"),
            CatalogError::DuplicateCard(name) => {
                write!(f, "duplicate card name in catalog: '{name}'")
            }
            CatalogError::DuplicateRecipe(name) => {
                write!(f, "duplicate recipe name in catalog: '{name}'")
            }
            CatalogError::UnknownCard { context, name } => {
                write!(f, "{context} references unknown card '{name}'")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Json(err)
    }
}

/// Authored card record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardSpec {
    pub name: String,
    pub card_type: CardType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub artwork: Option<String>,
    #[serde(default)]
    pub stats: FxHashMap<String, f32>,
}

/// Authored recipe record; card references by name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecipeSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_ingredients: Vec<String>,
    #[serde(default)]
    pub required_tools: Vec<String>,
    #[serde(default)]
    pub required_techniques: Vec<String>,
    #[serde(default)]
    pub target_stats: FxHashMap<String, f32>,
}

/// Authored starting deck; card references by name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeckSpec {
    pub name: String,
    pub cards: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    cards: Vec<CardSpec>,
    #[serde(default)]
    recipes: Vec<RecipeSpec>,
    #[serde(default)]
    decks: Vec<DeckSpec>,
}

/// A resolved starting deck list.
#[derive(Clone, Debug)]
pub struct DeckList {
    /// Display name of the deck.
    pub name: String,
    /// Resolved initial pool contents.
    pub cards: Vec<CardId>,
}

/// Fully resolved game content: registry, recipe book, deck lists.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    registry: CardRegistry,
    book: RecipeBook,
    deck_lists: Vec<DeckList>,
}

impl Catalog {
    /// Assemble a catalog from already-built parts.
    #[must_use]
    pub fn new(registry: CardRegistry, book: RecipeBook, deck_lists: Vec<DeckList>) -> Self {
        Self {
            registry,
            book,
            deck_lists,
        }
    }

    /// Load and validate a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::resolve(file)
    }

    /// Load and validate a catalog from a reader.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_reader(reader)?;
        Self::resolve(file)
    }

    fn resolve(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut registry = CardRegistry::new();
        for (index, spec) in file.cards.into_iter().enumerate() {
            if registry.id_by_name(&spec.name).is_some() {
                return Err(CatalogError::DuplicateCard(spec.name));
            }
            let mut def = CardDefinition::new(CardId::new(index as u32), spec.name, spec.card_type)
                .with_description(spec.description);
            if let Some(artwork) = spec.artwork {
                def = def.with_artwork(artwork);
            }
            def.stats = spec.stats;
            registry.register(def);
        }

        let resolve_names = |names: &[String], context: &str| -> Result<Vec<CardId>, CatalogError> {
            names
                .iter()
                .map(|name| {
                    registry
                        .id_by_name(name)
                        .ok_or_else(|| CatalogError::UnknownCard {
                            context: context.to_string(),
                            name: name.clone(),
                        })
                })
                .collect()
        };

        let mut book = RecipeBook::new();
        let mut seen_recipes: FxHashMap<String, ()> = FxHashMap::default();
        for (index, spec) in file.recipes.into_iter().enumerate() {
            if seen_recipes.insert(spec.name.clone(), ()).is_some() {
                return Err(CatalogError::DuplicateRecipe(spec.name));
            }
            let context = format!("recipe '{}'", spec.name);
            let mut recipe = RecipeDefinition::new(RecipeId::new(index as u32), spec.name);
            recipe.description = spec.description;
            recipe.required_ingredients = resolve_names(&spec.required_ingredients, &context)?;
            recipe.required_tools = resolve_names(&spec.required_tools, &context)?;
            recipe.required_techniques = resolve_names(&spec.required_techniques, &context)?;
            recipe.target_stats = spec.target_stats.into_iter().collect();
            book.register(recipe);
        }

        let mut deck_lists = Vec::with_capacity(file.decks.len());
        for spec in file.decks {
            let context = format!("deck '{}'", spec.name);
            deck_lists.push(DeckList {
                cards: resolve_names(&spec.cards, &context)?,
                name: spec.name,
            });
        }

        Ok(Self::new(registry, book, deck_lists))
    }

    /// The card registry.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// The recipe book.
    #[must_use]
    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    /// The authored deck lists.
    #[must_use]
    pub fn deck_lists(&self) -> &[DeckList] {
        &self.deck_lists
    }

    /// Build fresh deck pools for a new session.
    #[must_use]
    pub fn build_decks(&self) -> Vec<DeckPool> {
        self.deck_lists
            .iter()
            .map(|list| DeckPool::new(list.name.clone(), list.cards.clone()))
            .collect()
    }

    /// Tear the catalog into its parts (registry, book, deck lists).
    #[must_use]
    pub fn into_parts(self) -> (CardRegistry, RecipeBook, Vec<DeckList>) {
        (self.registry, self.book, self.deck_lists)
    }

    /// A small built-in catalog: the shipped spices, a pantry of
    /// ingredients, a drawer of tools and techniques, and three dishes.
    /// Used by demos and tests.
    #[must_use]
    pub fn builtin() -> Self {
        const BUILTIN: &str = include_str!("builtin.json");
        Self::from_json_str(BUILTIN).expect("builtin catalog must be valid")
    }
}
