//! Game phases.
//!
//! The session moves through a fixed linear progression:
//!
//! ```text
//! MainMenu -> GameSetup -> DrawingPhase -> CookingPhase
//!          -> ScoringPhase -> RoundEnd -> {DrawingPhase | GameEnd}
//! ```
//!
//! The only back-edge is RoundEnd returning to DrawingPhase while
//! rounds remain. GameEnd is terminal until a restart.

use serde::{Deserialize, Serialize};

/// Phase of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Idle; no game in progress.
    MainMenu,
    /// Transient: resets state and picks recipes, then chains straight
    /// into `DrawingPhase`. Never observable between operations.
    GameSetup,
    /// Drawing cards and resolving keep/discard/combine decisions.
    DrawingPhase,
    /// Playing cards from hand into the dish.
    CookingPhase,
    /// Transient: scores the dish, then chains into `RoundEnd`.
    ScoringPhase,
    /// Awaiting the continue trigger to start the next round or end.
    RoundEnd,
    /// Game over; high score persisted. Terminal until restart.
    GameEnd,
}

impl Phase {
    /// Is this a phase the session can rest in between operations?
    ///
    /// `GameSetup` and `ScoringPhase` chain onward immediately and are
    /// never observed by callers.
    #[must_use]
    pub fn is_resting(self) -> bool {
        !matches!(self, Phase::GameSetup | Phase::ScoringPhase)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::MainMenu => "Main Menu",
            Phase::GameSetup => "Game Setup",
            Phase::DrawingPhase => "Drawing Phase",
            Phase::CookingPhase => "Cooking Phase",
            Phase::ScoringPhase => "Scoring Phase",
            Phase::RoundEnd => "Round End",
            Phase::GameEnd => "Game End",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resting_phases() {
        assert!(Phase::MainMenu.is_resting());
        assert!(Phase::DrawingPhase.is_resting());
        assert!(Phase::CookingPhase.is_resting());
        assert!(Phase::RoundEnd.is_resting());
        assert!(Phase::GameEnd.is_resting());
        assert!(!Phase::GameSetup.is_resting());
        assert!(!Phase::ScoringPhase.is_resting());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Phase::DrawingPhase), "Drawing Phase");
        assert_eq!(format!("{}", Phase::GameEnd), "Game End");
    }
}
