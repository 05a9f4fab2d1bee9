//! Core engine types: entities, phases, RNG, configuration, events, errors.
//!
//! These are the building blocks the rest of the crate composes. The
//! game-specific rules live in `session` and `scoring`.

pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod phase;
pub mod rng;

pub use config::{GameConfig, ScoringConfig};
pub use entity::{EntityAllocator, EntityId};
pub use error::ActionError;
pub use events::GameEvent;
pub use phase::Phase;
pub use rng::{GameRng, GameRngState};
