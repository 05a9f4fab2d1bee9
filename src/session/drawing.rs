//! Drawing-phase operations: draw, keep, discard, combine, finish.
//!
//! Drawing runs as a loop of decisions. Each draw stages exactly one
//! card; nothing else may happen until the staged card is kept,
//! discarded, or combined. The phase ends when the hand reaches the
//! configured limit or the player ends it early.

use tracing::{debug, info};

use crate::cards::CardType;
use crate::core::error::ActionError;
use crate::core::events::GameEvent;
use crate::core::phase::Phase;
use crate::deck::DeckId;
use crate::store::SettingsStore;

use super::GameSession;

impl<S: SettingsStore> GameSession<S> {
    /// Draw one card from a deck and stage it for a decision.
    pub fn draw_from_deck(&mut self, deck: DeckId) -> Result<String, ActionError> {
        if self.phase != Phase::DrawingPhase {
            return self.reject(ActionError::WrongPhase {
                action: "draw cards",
                required: Phase::DrawingPhase,
                current: self.phase,
            });
        }
        if self.staged.is_some() {
            return self.reject(ActionError::DecisionPending);
        }
        if self.hand_full() {
            return self.reject(ActionError::HandFull);
        }

        if deck.index() >= self.decks.len() {
            return self.reject(ActionError::UnknownDeck(deck));
        }
        let deck_name = self.decks[deck.index()].name().to_string();
        let Some(card_id) = self.decks[deck.index()].draw(&mut self.rng) else {
            return self.reject(ActionError::EmptyDeck { deck: deck_name });
        };

        // Deck pools are built from the same catalog as the registry,
        // so a drawn ID always resolves.
        let Some(instance) = self.registry.instantiate(card_id, &mut self.alloc) else {
            return self.reject(ActionError::EmptyDeck { deck: deck_name });
        };

        debug!(card = %instance.name, deck = %deck_name, "card drawn and staged");
        let entity = instance.entity;
        let name = instance.name.clone();
        self.staged = Some(instance);
        self.events.push(GameEvent::CardStaged { entity, deck });
        Ok(format!("Drew {name}. Keep, discard, or combine?"))
    }

    /// Keep the staged card: move it into the hand.
    ///
    /// A full hand ends the drawing phase immediately.
    pub fn keep(&mut self) -> Result<String, ActionError> {
        self.require_staged("keep a card")?;
        if self.hand_full() {
            // Unreachable through normal play (draw is rejected at the
            // limit), but keep must never overfill the hand.
            return self.reject(ActionError::HandFull);
        }

        let Some(card) = self.staged.take() else {
            return self.reject(ActionError::NoStagedCard);
        };
        let name = card.name.clone();
        info!(card = %name, "card kept");
        self.hand.push_back(card);
        self.events.push(GameEvent::StageResolved);
        self.events.push(GameEvent::HandChanged);

        if let Some(message) = self.finish_drawing_if_full() {
            return Ok(message);
        }
        Ok(format!("Kept {name}."))
    }

    /// Discard the staged card, spending one of the round's discards.
    pub fn discard(&mut self) -> Result<String, ActionError> {
        self.require_staged("discard a card")?;
        let max = self.config.max_discards_per_round;
        if self.discards_used >= max {
            return self.reject(ActionError::NoDiscardsLeft {
                used: self.discards_used,
                max,
            });
        }

        let Some(card) = self.staged.take() else {
            return self.reject(ActionError::NoStagedCard);
        };
        self.discards_used += 1;
        info!(card = %card.name, used = self.discards_used, max, "card discarded");
        self.events.push(GameEvent::StageResolved);
        Ok(format!(
            "Discarded {}. {} discards left.",
            card.name,
            max - self.discards_used
        ))
    }

    /// Combine the staged Spice into a same-named card already in hand,
    /// boosting the stat the spice maps to.
    ///
    /// Failed preconditions (not a Spice, no matching hand card) keep
    /// the stage so the player can choose again; a spice without a stat
    /// mapping or a target without the stat clears the stage, consuming
    /// the draw.
    pub fn combine(&mut self) -> Result<String, ActionError> {
        self.require_staged("combine cards")?;
        let Some(staged) = self.staged.as_ref() else {
            return self.reject(ActionError::NoStagedCard);
        };

        if staged.card_type != CardType::Spice {
            return self.reject(ActionError::NotASpice);
        }
        let Some(target_index) = self.hand.iter().position(|c| c.name == staged.name) else {
            let name = staged.name.clone();
            return self.reject(ActionError::NoMatchingCard { name });
        };

        let Some(stat) = self.config.spice_stat(&staged.name).map(str::to_string) else {
            let spice = staged.name.clone();
            self.staged = None;
            self.events.push(GameEvent::StageResolved);
            return self.reject(ActionError::NoSpiceMapping { spice });
        };

        let target_has_stat = self
            .hand
            .get(target_index)
            .is_some_and(|c| c.has_stat(&stat));
        if !target_has_stat {
            self.staged = None;
            self.events.push(GameEvent::StageResolved);
            return self.reject(ActionError::MissingStat { stat });
        }

        let Some(staged) = self.staged.take() else {
            return self.reject(ActionError::NoStagedCard);
        };
        let boost = staged.stat(&stat, 0.0);
        // target_index was found above and the hand is unchanged since.
        let (target, new_value) = {
            let card = &mut self.hand[target_index];
            (card.entity, card.add_to_stat(&stat, boost))
        };

        info!(
            spice = %staged.name,
            %stat,
            boost,
            new_value,
            "spice combined into hand card"
        );
        self.events.push(GameEvent::StatsCombined {
            target,
            stat: stat.clone(),
            new_value,
        });
        self.events.push(GameEvent::StageResolved);
        self.events.push(GameEvent::HandChanged);

        Ok(format!(
            "Combined {}! {stat} is now {new_value} on the card in hand.",
            staged.name
        ))
    }

    /// End the drawing phase early with the hand as it stands.
    pub fn finish_drawing(&mut self) -> Result<String, ActionError> {
        if self.phase != Phase::DrawingPhase {
            return self.reject(ActionError::WrongPhase {
                action: "finish drawing",
                required: Phase::DrawingPhase,
                current: self.phase,
            });
        }
        if self.staged.is_some() {
            return self.reject(ActionError::DecisionPending);
        }

        self.change_phase(Phase::CookingPhase);
        Ok("Cooking Phase begins.".to_string())
    }

    fn require_staged(&self, action: &'static str) -> Result<(), ActionError> {
        if self.phase != Phase::DrawingPhase {
            return Err(ActionError::WrongPhase {
                action,
                required: Phase::DrawingPhase,
                current: self.phase,
            });
        }
        if self.staged.is_none() {
            return Err(ActionError::NoStagedCard);
        }
        Ok(())
    }
}
