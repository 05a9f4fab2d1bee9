//! Game configuration.
//!
//! A `GameConfig` fixes the knobs of a session at creation time: hand
//! limit, discard allowance, round count, the spice-to-stat table used
//! by the combine action, and the scoring constants.
//!
//! The scoring constants are configuration rather than hardcoded values
//! because the per-category "amount" bonuses shipped with different
//! values in different revisions of the game; defaults follow the
//! latest shipped tuning.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Scoring constants for a session.
///
/// ## Defaults
///
/// | constant | value |
/// |---|---|
/// | amount bonus (every category) | 0 |
/// | ingredient / spice type match | 15 |
/// | tool / technique type match | 10 |
/// | perfect dish bonus | 25 |
/// | stat tolerance | 0.1 |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Bonus for playing exactly the required number of ingredients.
    pub ingredient_amount_score: i64,
    /// Bonus for playing exactly the required number of spices.
    pub spice_amount_score: i64,
    /// Bonus for playing exactly the required number of tools.
    pub tool_amount_score: i64,
    /// Bonus for playing exactly the required number of techniques.
    pub technique_amount_score: i64,

    /// Points per matched required ingredient name.
    pub ingredient_type_score: i64,
    /// Points per matched required spice name.
    pub spice_type_score: i64,
    /// Points per matched required tool name.
    pub tool_type_score: i64,
    /// Points per matched required technique name.
    pub technique_type_score: i64,

    /// Bonus when combined stats hit every target within tolerance and
    /// introduce no extra stats.
    pub perfect_dish_bonus: i64,
    /// Allowed absolute deviation per target stat.
    pub stat_tolerance: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ingredient_amount_score: 0,
            spice_amount_score: 0,
            tool_amount_score: 0,
            technique_amount_score: 0,
            ingredient_type_score: 15,
            spice_type_score: 15,
            tool_type_score: 10,
            technique_type_score: 10,
            perfect_dish_bonus: 25,
            stat_tolerance: 0.1,
        }
    }
}

/// Complete session configuration.
///
/// Built with defaults matching the shipped game; individual knobs are
/// overridable builder-style.
///
/// ```
/// use stovetop::core::GameConfig;
///
/// let config = GameConfig::new()
///     .with_hand_limit(4)
///     .with_total_rounds(3);
///
/// assert_eq!(config.hand_limit, 4);
/// assert_eq!(config.max_discards_per_round, 5);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Maximum cards held in hand; reaching it ends the drawing phase.
    pub hand_limit: usize,

    /// Draw decisions that may be discarded per round.
    pub max_discards_per_round: u32,

    /// Rounds per game (one recipe each).
    pub total_rounds: usize,

    /// Spice name to the stat it boosts when combined.
    pub spice_stat_table: FxHashMap<String, String>,

    /// Scoring constants.
    pub scoring: ScoringConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut spice_stat_table = FxHashMap::default();
        spice_stat_table.insert("Salt".to_string(), "Saltiness".to_string());
        spice_stat_table.insert("Honey".to_string(), "Sweetness".to_string());
        spice_stat_table.insert("Garlic Spice".to_string(), "Umaminess".to_string());
        spice_stat_table.insert("Pepper".to_string(), "Spiciness".to_string());

        Self {
            hand_limit: 6,
            max_discards_per_round: 5,
            total_rounds: 5,
            spice_stat_table,
            scoring: ScoringConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration with the shipped defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "Hand limit must be at least 1");
        self.hand_limit = limit;
        self
    }

    /// Set the per-round discard allowance.
    #[must_use]
    pub fn with_max_discards(mut self, max: u32) -> Self {
        self.max_discards_per_round = max;
        self
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_total_rounds(mut self, rounds: usize) -> Self {
        assert!(rounds > 0, "Must play at least 1 round");
        self.total_rounds = rounds;
        self
    }

    /// Replace the scoring constants.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Add or replace a spice-to-stat mapping.
    #[must_use]
    pub fn with_spice_mapping(
        mut self,
        spice: impl Into<String>,
        stat: impl Into<String>,
    ) -> Self {
        self.spice_stat_table.insert(spice.into(), stat.into());
        self
    }

    /// Look up the stat a spice boosts, if it has a mapping.
    #[must_use]
    pub fn spice_stat(&self, spice_name: &str) -> Option<&str> {
        self.spice_stat_table.get(spice_name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spice_table() {
        let config = GameConfig::default();

        assert_eq!(config.spice_stat("Salt"), Some("Saltiness"));
        assert_eq!(config.spice_stat("Honey"), Some("Sweetness"));
        assert_eq!(config.spice_stat("Garlic Spice"), Some("Umaminess"));
        assert_eq!(config.spice_stat("Pepper"), Some("Spiciness"));
        assert_eq!(config.spice_stat("Cinnamon"), None);
    }

    #[test]
    fn test_default_limits() {
        let config = GameConfig::default();
        assert_eq!(config.hand_limit, 6);
        assert_eq!(config.max_discards_per_round, 5);
        assert_eq!(config.total_rounds, 5);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_hand_limit(4)
            .with_max_discards(2)
            .with_total_rounds(3)
            .with_spice_mapping("Cinnamon", "Sweetness");

        assert_eq!(config.hand_limit, 4);
        assert_eq!(config.max_discards_per_round, 2);
        assert_eq!(config.total_rounds, 3);
        assert_eq!(config.spice_stat("Cinnamon"), Some("Sweetness"));
    }

    #[test]
    fn test_default_scoring_constants() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.ingredient_amount_score, 0);
        assert_eq!(scoring.ingredient_type_score, 15);
        assert_eq!(scoring.spice_type_score, 15);
        assert_eq!(scoring.tool_type_score, 10);
        assert_eq!(scoring.technique_type_score, 10);
        assert_eq!(scoring.perfect_dish_bonus, 25);
        assert!((scoring.stat_tolerance - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    #[should_panic(expected = "Hand limit must be at least 1")]
    fn test_zero_hand_limit_panics() {
        let _ = GameConfig::new().with_hand_limit(0);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hand_limit, config.hand_limit);
        assert_eq!(back.spice_stat_table, config.spice_stat_table);
    }
}
