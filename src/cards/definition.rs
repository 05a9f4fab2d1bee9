//! Card definitions - immutable card templates.
//!
//! A `CardDefinition` is authored content: name, type, description and
//! the base stat values. Definitions are shared, read-only reference
//! data; anything mutable at runtime lives on `CardInstance`.
//!
//! The card *name* is the identity key the rules match on (recipe
//! requirements, spice combination targets). `CardId` exists so lookups
//! go through an index instead of repeated name scans.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The four card types of the cooking game.
///
/// Ingredients and Spices play directly into the dish; Tools and
/// Techniques only enter it through the three-step technique
/// combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Ingredient,
    Spice,
    Tool,
    Technique,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Ingredient => "Ingredient",
            CardType::Spice => "Spice",
            CardType::Tool => "Tool",
            CardType::Technique => "Technique",
        };
        write!(f, "{name}")
    }
}

/// Map of stat name to value. Stat names are unique per card by
/// construction.
pub type StatMap = FxHashMap<String, f32>;

/// Immutable card template.
///
/// ## Example
///
/// ```
/// use stovetop::cards::{CardDefinition, CardId, CardType};
///
/// let salt = CardDefinition::new(CardId::new(1), "Salt", CardType::Spice)
///     .with_stat("Saltiness", 1.0);
///
/// assert_eq!(salt.stat("Saltiness", 0.0), 1.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this definition.
    pub id: CardId,

    /// Card name - the identity key for matching and combination.
    pub name: String,

    /// Card type.
    pub card_type: CardType,

    /// Flavor/help text shown on the card.
    #[serde(default)]
    pub description: String,

    /// Opaque artwork reference (asset path); the engine never reads it.
    #[serde(default)]
    pub artwork: Option<String>,

    /// Base stat values. Cloned into each instance; never mutated here.
    #[serde(default)]
    pub stats: StatMap,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            description: String::new(),
            artwork: None,
            stats: StatMap::default(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the artwork reference (builder pattern).
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    /// Add a stat (builder pattern). Replaces any prior value for the
    /// same stat name.
    #[must_use]
    pub fn with_stat(mut self, name: impl Into<String>, value: f32) -> Self {
        self.stats.insert(name.into(), value);
        self
    }

    /// Get a stat value with a default.
    #[must_use]
    pub fn stat(&self, name: &str, default: f32) -> f32 {
        self.stats.get(name).copied().unwrap_or(default)
    }

    /// Does this card carry the named stat?
    #[must_use]
    pub fn has_stat(&self, name: &str) -> bool {
        self.stats.contains_key(name)
    }
}
