//! Cooking-phase operations: playing cards into the dish.
//!
//! Ingredients and Spices play directly from hand. Techniques start a
//! three-step combination (Technique, then Tool, then Ingredient) that
//! moves all three cards into the dish at once when the last step
//! lands; until then the stashed cards stay in hand and the selection
//! can be cancelled without cost.

use tracing::{info, warn};

use crate::cards::{CardInstance, CardType};
use crate::core::entity::EntityId;
use crate::core::error::ActionError;
use crate::core::events::GameEvent;
use crate::core::phase::Phase;
use crate::store::SettingsStore;

use super::{CookingSelection, GameSession};

impl<S: SettingsStore> GameSession<S> {
    /// Play a hand card into the dish, or advance the technique
    /// selection when one is in progress.
    pub fn play_card(&mut self, entity: EntityId) -> Result<String, ActionError> {
        if self.phase != Phase::CookingPhase {
            return self.reject(ActionError::WrongPhase {
                action: "play cards",
                required: Phase::CookingPhase,
                current: self.phase,
            });
        }
        let Some(index) = self.hand_index(entity) else {
            return self.reject(ActionError::CardNotInHand);
        };
        let card_type = self.hand[index].card_type;
        let name = self.hand[index].name.clone();

        match self.selection {
            CookingSelection::None => match card_type {
                CardType::Ingredient | CardType::Spice => {
                    self.move_to_played(&[entity]);
                    Ok(format!("Played {name}."))
                }
                CardType::Tool => self.reject(ActionError::ToolWithoutTechnique),
                CardType::Technique => {
                    if !self.hand_has_type(CardType::Tool) {
                        return self.reject(ActionError::NoToolInHand { technique: name });
                    }
                    self.selection = CookingSelection::WaitingForTool { technique: entity };
                    self.events.push(GameEvent::SelectionChanged);
                    Ok(format!("Selected {name}. Now select a Tool from your hand."))
                }
            },

            CookingSelection::WaitingForTool { technique } => {
                if card_type != CardType::Tool {
                    return self.reject(ActionError::ExpectedTool);
                }
                if !self.hand_has_type(CardType::Ingredient) {
                    let technique_name = self.card_name(technique);
                    return self.reject(ActionError::NoIngredientInHand {
                        technique: technique_name,
                    });
                }
                self.selection = CookingSelection::WaitingForIngredient {
                    technique,
                    tool: entity,
                };
                self.events.push(GameEvent::SelectionChanged);
                Ok(format!("Selected Tool: {name}. Now select an Ingredient."))
            }

            CookingSelection::WaitingForIngredient { technique, tool } => {
                if card_type != CardType::Ingredient {
                    return self.reject(ActionError::ExpectedIngredient);
                }
                let technique_name = self.card_name(technique);
                let tool_name = self.card_name(tool);

                self.selection = CookingSelection::None;
                self.events.push(GameEvent::SelectionChanged);
                self.move_to_played(&[technique, tool, entity]);

                info!(
                    technique = %technique_name,
                    tool = %tool_name,
                    ingredient = %name,
                    "technique combination completed"
                );
                Ok(format!("Used {technique_name} with {tool_name} on {name}!"))
            }
        }
    }

    /// Abandon a half-built technique selection. Idempotent; the
    /// stashed cards never left the hand.
    pub fn cancel_selection(&mut self) -> Result<String, ActionError> {
        if self.selection.in_progress() {
            self.selection = CookingSelection::None;
            self.events.push(GameEvent::SelectionChanged);
            Ok("Technique selection cancelled.".to_string())
        } else {
            Ok("No selection in progress.".to_string())
        }
    }

    /// Submit the dish for scoring.
    ///
    /// Scoring chains straight through to the round-end screen; the
    /// breakdown is available from `last_breakdown` afterwards.
    pub fn finish_cooking(&mut self) -> Result<String, ActionError> {
        if self.phase != Phase::CookingPhase {
            return self.reject(ActionError::WrongPhase {
                action: "finish cooking",
                required: Phase::CookingPhase,
                current: self.phase,
            });
        }
        if self.selection.in_progress() {
            return self.reject(ActionError::SelectionInProgress);
        }

        let round = self.current_round + 1;
        self.change_phase(Phase::ScoringPhase);
        let score = self
            .last_breakdown()
            .map(super::ScoreBreakdown::total)
            .unwrap_or_default();
        Ok(format!("Round {round} scored: {score} points."))
    }

    /// Move hand cards into the played-set, preserving argument order.
    fn move_to_played(&mut self, entities: &[EntityId]) {
        for &entity in entities {
            let Some(index) = self.hand_index(entity) else {
                // Selections only reference cards verified in hand, so
                // this indicates internal inconsistency.
                warn!(%entity, "card vanished from hand before playing");
                continue;
            };
            let card: CardInstance = self.hand.remove(index);
            if self.locked == Some(entity) {
                self.locked = None;
                self.events.push(GameEvent::LockChanged { locked: None });
            }
            self.played.push_back(card);
        }
        self.events.push(GameEvent::HandChanged);
        self.events.push(GameEvent::PlayedChanged);
    }

    fn card_name(&self, entity: EntityId) -> String {
        self.hand
            .iter()
            .chain(self.played.iter())
            .find(|c| c.entity == entity)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }
}
