//! Replenishing deck pools.
//!
//! A `DeckPool` is an infinite bag: drawing picks uniformly at random
//! from the pool without consuming it. The one piece of state beyond
//! the pool itself is the last drawn card, which is excluded from the
//! next draw so a non-trivial pool never yields the same card twice in
//! a row.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::cards::CardId;
use crate::core::rng::GameRng;

/// Index of a deck pool within a session.
///
/// The shipped game runs two pools (ingredients/spices and
/// tools/techniques); the session supports any number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(pub usize);

impl DeckId {
    /// Create a new deck ID.
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deck({})", self.0)
    }
}

/// A named, replenishing pool of card definitions.
///
/// The pool never shrinks on draw. `add_card` grows it; added cards are
/// drawable immediately.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeckPool {
    name: String,
    pool: Vec<CardId>,
    last_drawn: Option<CardId>,
}

impl DeckPool {
    /// Create a pool with its initial card list.
    ///
    /// An empty list is accepted with a warning; every draw from the
    /// resulting pool returns `None`.
    #[must_use]
    pub fn new(name: impl Into<String>, cards: Vec<CardId>) -> Self {
        let name = name.into();
        if cards.is_empty() {
            warn!(deck = %name, "deck initialized with no cards in the pool");
        } else {
            debug!(deck = %name, cards = cards.len(), "deck initialized");
        }
        Self {
            name,
            pool: cards,
            last_drawn: None,
        }
    }

    /// The pool's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a card to the pool, available for future draws immediately.
    pub fn add_card(&mut self, card: CardId) {
        self.pool.push(card);
    }

    /// Current pool size. Informational only - draws never consume.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Is the pool empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Draw a card uniformly at random, avoiding an immediate repeat of
    /// the previous draw where possible.
    ///
    /// Exactly one occurrence of the last drawn card is excluded from
    /// the candidates. If that leaves nothing (the pool's only distinct
    /// remaining option is the last draw), the full pool is used instead
    /// so drawing never blocks.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<CardId> {
        if self.pool.is_empty() {
            warn!(deck = %self.name, "no cards in the pool to draw from");
            return None;
        }

        let mut candidates: SmallVec<[CardId; 16]> = self.pool.iter().copied().collect();
        if let Some(last) = self.last_drawn {
            if let Some(pos) = candidates.iter().position(|&c| c == last) {
                candidates.remove(pos);
            }
        }

        if candidates.is_empty() {
            debug!(
                deck = %self.name,
                "only the last drawn card remains as an option; allowing a repeat"
            );
            candidates = self.pool.iter().copied().collect();
        }

        let drawn = rng.choose(&candidates).copied()?;
        self.last_drawn = Some(drawn);
        Some(drawn)
    }
}
