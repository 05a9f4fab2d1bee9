//! # stovetop
//!
//! A headless rules engine for a single-player cooking card game:
//! draw cards from replenishing deck pools, assemble a dish over a
//! handful of rounds, score it against a target recipe.
//!
//! ## Design Principles
//!
//! 1. **Headless**: No rendering, no input handling, no timing. The
//!    engine exposes operations and snapshot queries; a render layer
//!    drives it and drains `GameEvent`s to know what to redraw.
//!
//! 2. **Definitions vs. Instances**: Card and recipe definitions are
//!    immutable, shared content. Every mutable stat lives on a
//!    session-owned `CardInstance` with its own `EntityId`.
//!
//! 3. **Soft Failure**: Invalid player actions return `ActionError`
//!    values with player-facing messages; the engine never panics on
//!    bad input and rejections leave state untouched.
//!
//! 4. **Deterministic**: All randomness flows through a seeded
//!    `GameRng`; two sessions with the same seed, content, and action
//!    sequence play out identically.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, phases, events, errors, RNG, configuration
//! - `cards`: Card definitions, instances, and the registry
//! - `recipes`: Recipe definitions and the recipe book
//! - `deck`: Replenishing deck pools
//! - `scoring`: Round scoring against a recipe
//! - `session`: The phase machine and all player operations
//! - `catalog`: JSON content loading and validation
//! - `store`: High-score persistence

pub mod cards;
pub mod catalog;
pub mod core;
pub mod deck;
pub mod recipes;
pub mod scoring;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    ActionError, EntityAllocator, EntityId, GameConfig, GameEvent, GameRng, GameRngState, Phase,
    ScoringConfig,
};

pub use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry, CardType, StatMap};

pub use crate::recipes::{RecipeBook, RecipeDefinition, RecipeId};

pub use crate::deck::{DeckId, DeckPool};

pub use crate::scoring::{score_round, ScoreBreakdown};

pub use crate::session::{CookingSelection, GameSession, HIGH_SCORE_KEY};

pub use crate::catalog::{Catalog, CatalogError};

pub use crate::store::{JsonFileStore, MemoryStore, SettingsStore};
