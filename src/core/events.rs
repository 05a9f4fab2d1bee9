//! Change notifications for the render layer.
//!
//! The engine never owns UI objects. Instead every operation appends
//! `GameEvent`s describing what changed; the render layer drains them
//! after each call and rebuilds the affected views (hand strip, played
//! pile, score panel). Events carry entity IDs, not card data — views
//! fetch current card state through the session's snapshot queries.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::phase::Phase;
use crate::deck::DeckId;

/// Something observable happened inside the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The session moved to a new phase.
    PhaseChanged { from: Phase, to: Phase },
    /// Hand contents changed; rebuild the hand view.
    HandChanged,
    /// Played-set contents changed; rebuild the dish view.
    PlayedChanged,
    /// A drawn card was staged and awaits keep/discard/combine.
    CardStaged { entity: EntityId, deck: DeckId },
    /// The staged card was resolved (kept, discarded, or combined).
    StageResolved,
    /// A combine merged the staged card's stat into a hand card.
    StatsCombined {
        target: EntityId,
        stat: String,
        new_value: f32,
    },
    /// A technique selection step advanced or was cancelled.
    SelectionChanged,
    /// A card was locked to carry into the next round (or unlocked).
    LockChanged { locked: Option<EntityId> },
    /// A round was scored.
    RoundScored { round: usize, score: i64 },
    /// The finished game beat the stored high score.
    NewHighScore { score: i64 },
}
