//! Soft rejection values for player actions.
//!
//! Nothing in the engine panics on bad input: an invalid action comes
//! back as an `ActionError` whose `Display` text is the message the
//! render layer shows the player. Every rejection leaves the session
//! state untouched unless the variant's docs say otherwise.

use super::phase::Phase;
use crate::deck::DeckId;

/// Why a player action was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// The action is not valid in the current phase.
    WrongPhase {
        /// What the player tried to do, e.g. "draw cards".
        action: &'static str,
        /// The phase the action belongs to.
        required: Phase,
        /// The phase the session is actually in.
        current: Phase,
    },
    /// Hand already holds `hand_limit` cards.
    HandFull,
    /// A drawn card is staged; resolve it before drawing again.
    DecisionPending,
    /// No card is staged to keep/discard/combine.
    NoStagedCard,
    /// The per-round discard allowance is used up.
    NoDiscardsLeft { used: u32, max: u32 },
    /// The referenced card is not in hand.
    CardNotInHand,
    /// A Tool cannot be played without an active Technique.
    ToolWithoutTechnique,
    /// A Technique needs at least one Tool in hand to initiate.
    NoToolInHand { technique: String },
    /// The technique needs at least one Ingredient in hand.
    NoIngredientInHand { technique: String },
    /// Waiting for a Tool; some other card type was selected.
    ExpectedTool,
    /// Waiting for an Ingredient; some other card type was selected.
    ExpectedIngredient,
    /// Finish or cancel the technique selection first.
    SelectionInProgress,
    /// Only a Spice can be combined. Stage is kept.
    NotASpice,
    /// No same-named card in hand to combine onto. Stage is kept.
    NoMatchingCard { name: String },
    /// The spice has no entry in the spice-stat table. Stage is cleared.
    NoSpiceMapping { spice: String },
    /// The matching hand card lacks the mapped stat. Stage is cleared.
    MissingStat { stat: String },
    /// The deck pool has no cards to draw from.
    EmptyDeck { deck: String },
    /// No deck with this ID exists in the session.
    UnknownDeck(DeckId),
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::WrongPhase {
                action,
                required,
                current,
            } => write!(
                f,
                "Can only {action} during the {required}! (currently: {current})"
            ),
            ActionError::HandFull => write!(f, "Hand is already full!"),
            ActionError::DecisionPending => {
                write!(f, "Resolve the drawn card first (keep, discard, or combine).")
            }
            ActionError::NoStagedCard => write!(f, "No drawn card to act on."),
            ActionError::NoDiscardsLeft { used, max } => {
                write!(f, "No discards left this round ({used}/{max})!")
            }
            ActionError::CardNotInHand => write!(f, "Card not found in hand!"),
            ActionError::ToolWithoutTechnique => {
                write!(f, "You need to select a Technique first to use a Tool.")
            }
            ActionError::NoToolInHand { technique } => {
                write!(f, "You need a Tool card in your hand to use {technique}.")
            }
            ActionError::NoIngredientInHand { technique } => {
                write!(
                    f,
                    "You need an Ingredient card in your hand to use {technique}."
                )
            }
            ActionError::ExpectedTool => write!(f, "You must select a Tool card."),
            ActionError::ExpectedIngredient => write!(f, "You must select an Ingredient card."),
            ActionError::SelectionInProgress => {
                write!(f, "Finish your technique selection first, or cancel it.")
            }
            ActionError::NotASpice => write!(f, "Combination not possible: not a Spice."),
            ActionError::NoMatchingCard { name } => {
                write!(f, "No {name} in hand to combine with!")
            }
            ActionError::NoSpiceMapping { spice } => {
                write!(f, "Cannot combine: '{spice}' does not affect a known stat type.")
            }
            ActionError::MissingStat { stat } => {
                write!(
                    f,
                    "Cannot combine: the card in hand does not have the '{stat}' stat."
                )
            }
            ActionError::EmptyDeck { deck } => {
                write!(f, "Error drawing card: '{deck}' has no cards in its pool.")
            }
            ActionError::UnknownDeck(id) => write!(f, "No such deck: {id}."),
        }
    }
}

impl std::error::Error for ActionError {}
