//! Game sessions: the phase machine and every player operation.
//!
//! A `GameSession` owns the complete state of one single-player game:
//! phase, round counters, hand, played-set, staged draw, technique
//! selection, deck pools, and the RNG. All operations are synchronous
//! calls; invalid ones come back as `ActionError` values and leave
//! state untouched. The render layer drives the session through the
//! operation methods and rebuilds its views from the snapshot queries
//! plus the drained `GameEvent`s - the session never owns UI objects.
//!
//! One session per execution context; sessions share nothing mutable.
//! Definitions stay immutable, and every mutable stat lives on a
//! session-owned `CardInstance`.

mod cooking;
mod drawing;

use im::Vector;
use tracing::{debug, info, warn};

use crate::cards::{CardInstance, CardRegistry};
use crate::catalog::Catalog;
use crate::core::entity::{EntityAllocator, EntityId};
use crate::core::error::ActionError;
use crate::core::events::GameEvent;
use crate::core::phase::Phase;
use crate::core::rng::GameRng;
use crate::core::GameConfig;
use crate::deck::{DeckId, DeckPool};
use crate::recipes::{RecipeBook, RecipeDefinition, RecipeId};
use crate::scoring::{score_round, ScoreBreakdown};
use crate::store::SettingsStore;

/// Settings key under which the high score is persisted.
pub const HIGH_SCORE_KEY: &str = "HighScore";

/// Where the three-step technique combination currently stands.
///
/// The stashed cards stay in hand until the combination completes;
/// cancelling reverts to `None` without moving anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CookingSelection {
    /// No combination in progress.
    #[default]
    None,
    /// A Technique is stashed; waiting for a Tool.
    WaitingForTool { technique: EntityId },
    /// Technique and Tool are stashed; waiting for an Ingredient.
    WaitingForIngredient { technique: EntityId, tool: EntityId },
}

impl CookingSelection {
    /// Is a combination in progress?
    #[must_use]
    pub fn in_progress(&self) -> bool {
        !matches!(self, CookingSelection::None)
    }
}

/// One single-player game session.
pub struct GameSession<S: SettingsStore> {
    config: GameConfig,
    registry: CardRegistry,
    book: RecipeBook,
    decks: Vec<DeckPool>,
    rng: GameRng,
    store: S,
    alloc: EntityAllocator,
    events: Vec<GameEvent>,

    phase: Phase,
    current_round: usize,
    total_score: i64,
    discards_used: u32,
    hand: Vector<CardInstance>,
    played: Vector<CardInstance>,
    /// Active lock designation; the card itself stays in hand.
    locked: Option<EntityId>,
    /// The locked card held out between rounds, pending re-entry.
    carry: Option<CardInstance>,
    staged: Option<CardInstance>,
    selection: CookingSelection,
    game_recipes: Vec<RecipeId>,
    last_breakdown: Option<ScoreBreakdown>,
}

impl<S: SettingsStore> GameSession<S> {
    /// Create a session from loaded content. Starts in `MainMenu`.
    #[must_use]
    pub fn new(catalog: Catalog, config: GameConfig, store: S, seed: u64) -> Self {
        let (registry, book, deck_lists) = catalog.into_parts();
        let decks = deck_lists
            .into_iter()
            .map(|list| DeckPool::new(list.name, list.cards))
            .collect();

        Self {
            config,
            registry,
            book,
            decks,
            rng: GameRng::new(seed),
            store,
            alloc: EntityAllocator::new(),
            events: Vec::new(),
            phase: Phase::MainMenu,
            current_round: 0,
            total_score: 0,
            discards_used: 0,
            hand: Vector::new(),
            played: Vector::new(),
            locked: None,
            carry: None,
            staged: None,
            selection: CookingSelection::None,
            game_recipes: Vec::new(),
            last_breakdown: None,
        }
    }

    // === Lifecycle operations ===

    /// Start a new game from the main menu.
    pub fn start_game(&mut self) -> Result<String, ActionError> {
        if self.phase != Phase::MainMenu {
            return self.reject(ActionError::WrongPhase {
                action: "start a game",
                required: Phase::MainMenu,
                current: self.phase,
            });
        }
        self.change_phase(Phase::GameSetup);
        Ok(self.round_banner())
    }

    /// Start another game after game end. The high score persists.
    pub fn restart_game(&mut self) -> Result<String, ActionError> {
        if self.phase != Phase::GameEnd {
            return self.reject(ActionError::WrongPhase {
                action: "restart the game",
                required: Phase::GameEnd,
                current: self.phase,
            });
        }
        self.change_phase(Phase::GameSetup);
        Ok(self.round_banner())
    }

    /// Abandon the session and return to the main menu. Valid from any
    /// phase; resets everything except the persisted high score.
    pub fn return_to_main_menu(&mut self) -> Result<String, ActionError> {
        self.reset_game_state();
        self.change_phase(Phase::MainMenu);
        Ok("Returned to the main menu.".to_string())
    }

    /// Advance past the round-end screen: next round, or game end.
    pub fn continue_round(&mut self) -> Result<String, ActionError> {
        if self.phase != Phase::RoundEnd {
            return self.reject(ActionError::WrongPhase {
                action: "continue",
                required: Phase::RoundEnd,
                current: self.phase,
            });
        }

        if self.current_round + 1 < self.game_recipes.len() {
            // Hold the locked card out of the hand wipe; it re-enters
            // the hand when the next drawing phase begins.
            if let Some(entity) = self.locked.take() {
                if let Some(index) = self.hand.iter().position(|c| c.entity == entity) {
                    let card = self.hand.remove(index);
                    info!(card = %card.name, "locked card carried to the next round");
                    self.carry = Some(card);
                }
                self.events.push(GameEvent::LockChanged { locked: None });
            }
            self.hand = Vector::new();
            self.played = Vector::new();
            self.discards_used = 0;
            self.current_round += 1;
            self.events.push(GameEvent::HandChanged);
            self.events.push(GameEvent::PlayedChanged);
            self.change_phase(Phase::DrawingPhase);
            Ok(self.round_banner())
        } else {
            debug!("all rounds completed; ending game");
            self.change_phase(Phase::GameEnd);
            Ok(format!("Game over! Final score: {}.", self.total_score))
        }
    }

    /// Designate a hand card to carry over, unplayed, into the next
    /// round. Re-locking moves the designation; playing the card clears
    /// it.
    pub fn lock_card(&mut self, entity: EntityId) -> Result<String, ActionError> {
        if self.phase != Phase::CookingPhase {
            return self.reject(ActionError::WrongPhase {
                action: "lock a card",
                required: Phase::CookingPhase,
                current: self.phase,
            });
        }
        let Some(card) = self.hand.iter().find(|c| c.entity == entity) else {
            return self.reject(ActionError::CardNotInHand);
        };
        let name = card.name.clone();
        self.locked = Some(entity);
        self.events.push(GameEvent::LockChanged {
            locked: Some(entity),
        });
        Ok(format!("{name} locked in; it will carry over to the next round."))
    }

    /// Clear the lock designation. Idempotent.
    pub fn unlock_card(&mut self) -> Result<String, ActionError> {
        if self.locked.take().is_some() {
            self.events.push(GameEvent::LockChanged { locked: None });
            Ok("Lock removed.".to_string())
        } else {
            Ok("No card is locked.".to_string())
        }
    }

    // === Phase machine ===

    fn change_phase(&mut self, new_phase: Phase) {
        if self.phase == new_phase {
            warn!(phase = %new_phase, "attempted to change to the current phase; ignoring");
            return;
        }

        let from = self.phase;
        info!(%from, to = %new_phase, "phase change");
        self.phase = new_phase;
        self.events.push(GameEvent::PhaseChanged {
            from,
            to: new_phase,
        });
        self.on_phase_enter(new_phase);
    }

    fn on_phase_enter(&mut self, phase: Phase) {
        // Entering any phase aborts a half-built technique selection.
        if self.selection.in_progress() {
            self.selection = CookingSelection::None;
            self.events.push(GameEvent::SelectionChanged);
        }

        match phase {
            Phase::MainMenu | Phase::RoundEnd => {}

            Phase::GameSetup => {
                self.reset_game_state();
                self.game_recipes = self
                    .book
                    .select_random(self.config.total_rounds, &mut self.rng);
                info!(
                    recipes = self.game_recipes.len(),
                    requested = self.config.total_rounds,
                    "game setup complete"
                );
                self.change_phase(Phase::DrawingPhase);
            }

            Phase::DrawingPhase => {
                self.discards_used = 0;
                if let Some(card) = self.carry.take() {
                    info!(card = %card.name, "locked card added to hand");
                    self.hand.push_back(card);
                    self.events.push(GameEvent::HandChanged);
                }
            }

            Phase::CookingPhase => {
                self.played = Vector::new();
                self.events.push(GameEvent::PlayedChanged);
            }

            Phase::ScoringPhase => {
                self.score_current_round();
                self.change_phase(Phase::RoundEnd);
            }

            Phase::GameEnd => {
                let high = self.store.get_int(HIGH_SCORE_KEY, 0);
                info!(final_score = self.total_score, high, "game ended");
                if self.total_score > high {
                    self.store.set_int(HIGH_SCORE_KEY, self.total_score);
                    self.events.push(GameEvent::NewHighScore {
                        score: self.total_score,
                    });
                }
            }
        }
    }

    fn score_current_round(&mut self) {
        let recipe = self
            .game_recipes
            .get(self.current_round)
            .and_then(|id| self.book.get(*id));

        let breakdown = match recipe {
            Some(recipe) => {
                let played: Vec<CardInstance> = self.played.iter().cloned().collect();
                score_round(&played, recipe, &self.registry, &self.config.scoring)
            }
            None => {
                warn!(
                    round = self.current_round,
                    "no recipe for this round; scoring zero"
                );
                ScoreBreakdown::zero()
            }
        };

        let score = breakdown.total();
        self.total_score += score;
        info!(
            round = self.current_round + 1,
            score,
            total = self.total_score,
            "round scored"
        );
        self.events.push(GameEvent::RoundScored {
            round: self.current_round,
            score,
        });
        self.last_breakdown = Some(breakdown);
    }

    fn reset_game_state(&mut self) {
        self.current_round = 0;
        self.total_score = 0;
        self.discards_used = 0;
        self.hand = Vector::new();
        self.played = Vector::new();
        self.locked = None;
        self.carry = None;
        self.staged = None;
        self.selection = CookingSelection::None;
        self.game_recipes = Vec::new();
        self.last_breakdown = None;
        self.events.push(GameEvent::HandChanged);
        self.events.push(GameEvent::PlayedChanged);
    }

    fn round_banner(&self) -> String {
        match self.current_recipe() {
            Some(recipe) => format!(
                "Round {}/{}: cook {}!",
                self.current_round + 1,
                self.game_recipes.len(),
                recipe.name
            ),
            None => format!("Round {}: no recipe available.", self.current_round + 1),
        }
    }

    /// Log and return a rejection.
    fn reject(&self, error: ActionError) -> Result<String, ActionError> {
        warn!(phase = %self.phase, %error, "action rejected");
        Err(error)
    }

    // === Snapshot queries ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current round index (0-based).
    #[must_use]
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Number of rounds in this game - may be fewer than configured
    /// when the recipe book was short.
    #[must_use]
    pub fn rounds_in_game(&self) -> usize {
        self.game_recipes.len()
    }

    /// Cumulative game score.
    #[must_use]
    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    /// Discards remaining this round.
    #[must_use]
    pub fn discards_left(&self) -> u32 {
        self.config
            .max_discards_per_round
            .saturating_sub(self.discards_used)
    }

    /// Snapshot of the hand. O(1); safe to hold across operations.
    #[must_use]
    pub fn hand(&self) -> Vector<CardInstance> {
        self.hand.clone()
    }

    /// Snapshot of the played-set (the dish under construction).
    #[must_use]
    pub fn played_cards(&self) -> Vector<CardInstance> {
        self.played.clone()
    }

    /// The staged card awaiting a keep/discard/combine decision.
    #[must_use]
    pub fn staged_card(&self) -> Option<&CardInstance> {
        self.staged.as_ref()
    }

    /// The active lock designation, if any.
    #[must_use]
    pub fn locked_card(&self) -> Option<EntityId> {
        self.locked
    }

    /// Where the technique selection currently stands.
    #[must_use]
    pub fn selection(&self) -> CookingSelection {
        self.selection
    }

    /// This round's recipe.
    #[must_use]
    pub fn current_recipe(&self) -> Option<&RecipeDefinition> {
        self.game_recipes
            .get(self.current_round)
            .and_then(|id| self.book.get(*id))
    }

    /// Next round's recipe, for the "up next" display.
    #[must_use]
    pub fn next_recipe(&self) -> Option<&RecipeDefinition> {
        self.game_recipes
            .get(self.current_round + 1)
            .and_then(|id| self.book.get(*id))
    }

    /// Breakdown of the most recently scored round.
    #[must_use]
    pub fn last_breakdown(&self) -> Option<&ScoreBreakdown> {
        self.last_breakdown.as_ref()
    }

    /// The persisted high score.
    #[must_use]
    pub fn high_score(&self) -> i64 {
        self.store.get_int(HIGH_SCORE_KEY, 0)
    }

    /// Pool size of a deck, if it exists.
    #[must_use]
    pub fn deck_len(&self, deck: DeckId) -> Option<usize> {
        self.decks.get(deck.index()).map(DeckPool::len)
    }

    /// Number of deck pools in the session.
    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    /// The card registry backing this session.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Take all queued change notifications.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Shared helpers for the operation modules ===

    fn hand_index(&self, entity: EntityId) -> Option<usize> {
        self.hand.iter().position(|c| c.entity == entity)
    }

    fn hand_has_type(&self, card_type: crate::cards::CardType) -> bool {
        self.hand.iter().any(|c| c.card_type == card_type)
    }

    fn hand_full(&self) -> bool {
        self.hand.len() >= self.config.hand_limit
    }

    /// End the drawing phase because the hand reached its limit.
    fn finish_drawing_if_full(&mut self) -> Option<String> {
        if self.hand_full() {
            self.change_phase(Phase::CookingPhase);
            Some("Hand is full! Drawing Phase ends.".to_string())
        } else {
            None
        }
    }
}
