//! Round scoring.
//!
//! A dish (the played-set) is scored against its recipe in three parts:
//!
//! 1. **Amount bonus** per category when the played count exactly equals
//!    the required count (constants default to 0; configurable).
//! 2. **Type-match score**: a one-to-one multiset intersection by card
//!    name per category, times a per-category constant.
//! 3. **Perfect-dish bonus** when the summed stats of every played card
//!    hit each target stat within tolerance and introduce no stats the
//!    recipe does not ask for.
//!
//! The result is order-invariant: it depends only on name frequencies
//! and summed stats.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{CardInstance, CardRegistry, CardType, StatMap};
use crate::core::config::ScoringConfig;
use crate::recipes::RecipeDefinition;

/// Per-component result of scoring one round.
///
/// `Display` renders the player-facing breakdown text.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBreakdown {
    /// Amount bonuses actually awarded, per category.
    pub ingredient_amount: i64,
    pub spice_amount: i64,
    pub tool_amount: i64,
    pub technique_amount: i64,

    /// Type-match points, per category.
    pub ingredient_score: i64,
    pub spice_score: i64,
    pub tool_score: i64,
    pub technique_score: i64,

    /// `None` when the recipe has no target stats (bonus not
    /// applicable); otherwise whether the dish was perfect.
    pub perfect_dish: Option<bool>,

    /// Bonus awarded for a perfect dish (0 unless `Some(true)`).
    pub perfect_bonus: i64,
}

impl ScoreBreakdown {
    /// A zero score, used when the round has no recipe to score against.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            ingredient_amount: 0,
            spice_amount: 0,
            tool_amount: 0,
            technique_amount: 0,
            ingredient_score: 0,
            spice_score: 0,
            tool_score: 0,
            technique_score: 0,
            perfect_dish: None,
            perfect_bonus: 0,
        }
    }

    /// Total round score. Never negative, never capped.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.ingredient_amount
            + self.spice_amount
            + self.tool_amount
            + self.technique_amount
            + self.ingredient_score
            + self.spice_score
            + self.tool_score
            + self.technique_score
            + self.perfect_bonus
    }
}

impl std::fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Score Breakdown:")?;
        writeln!(f, "Ingredient Score: +{}", self.ingredient_score)?;
        writeln!(f, "Spice Score: +{}", self.spice_score)?;
        writeln!(f, "Tool Score: +{}", self.tool_score)?;
        writeln!(f, "Technique Score: +{}", self.technique_score)?;

        let amount_total =
            self.ingredient_amount + self.spice_amount + self.tool_amount + self.technique_amount;
        if amount_total > 0 {
            writeln!(f, "Amount Bonus: +{amount_total}")?;
        }

        match self.perfect_dish {
            Some(true) => writeln!(f, "Perfect Dish Bonus: +{}", self.perfect_bonus),
            Some(false) => writeln!(f, "Perfect Dish Bonus: +0"),
            None => writeln!(f, "Perfect Dish Bonus: N/A"),
        }
    }
}

/// Score a played-set against a recipe.
pub fn score_round(
    played: &[CardInstance],
    recipe: &RecipeDefinition,
    registry: &CardRegistry,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let ingredients = of_type(played, CardType::Ingredient);
    let spices = of_type(played, CardType::Spice);
    let tools = of_type(played, CardType::Tool);
    let techniques = of_type(played, CardType::Technique);

    // Requirement names, resolved once through the registry. Spice
    // requirements are authored inside the ingredient list; the spice
    // category matches against that subset while the ingredient
    // category matches against the full list.
    let required_ingredients = required_names(&recipe.required_ingredients, registry, None);
    let required_spices = required_names(
        &recipe.required_ingredients,
        registry,
        Some(CardType::Spice),
    );
    let required_tools = required_names(&recipe.required_tools, registry, None);
    let required_techniques = required_names(&recipe.required_techniques, registry, None);

    let ingredient_amount = amount_bonus(
        ingredients.len(),
        recipe.required_ingredients.len(),
        config.ingredient_amount_score,
    );
    let spice_amount = amount_bonus(
        spices.len(),
        required_spices.len(),
        config.spice_amount_score,
    );
    let tool_amount = amount_bonus(
        tools.len(),
        recipe.required_tools.len(),
        config.tool_amount_score,
    );
    let technique_amount = amount_bonus(
        techniques.len(),
        recipe.required_techniques.len(),
        config.technique_amount_score,
    );

    let ingredient_score =
        count_matches(&required_ingredients, &ingredients) as i64 * config.ingredient_type_score;
    let spice_score = count_matches(&required_spices, &spices) as i64 * config.spice_type_score;
    let tool_score = count_matches(&required_tools, &tools) as i64 * config.tool_type_score;
    let technique_score =
        count_matches(&required_techniques, &techniques) as i64 * config.technique_type_score;

    let (perfect_dish, perfect_bonus) = if recipe.target_stats.is_empty() {
        (None, 0)
    } else {
        let combined = combined_stats(played);
        let perfect = is_perfect(&combined, &recipe.target_stats, config.stat_tolerance);
        debug!(recipe = %recipe.name, perfect, "perfect dish check");
        (
            Some(perfect),
            if perfect { config.perfect_dish_bonus } else { 0 },
        )
    };

    ScoreBreakdown {
        ingredient_amount,
        spice_amount,
        tool_amount,
        technique_amount,
        ingredient_score,
        spice_score,
        tool_score,
        technique_score,
        perfect_dish,
        perfect_bonus,
    }
}

fn of_type<'a>(played: &'a [CardInstance], card_type: CardType) -> SmallVec<[&'a CardInstance; 8]> {
    played
        .iter()
        .filter(|c| c.card_type == card_type)
        .collect()
}

/// Resolve required card IDs to names, optionally keeping only one type.
fn required_names<'a>(
    required: &[crate::cards::CardId],
    registry: &'a CardRegistry,
    only: Option<CardType>,
) -> SmallVec<[&'a str; 8]> {
    required
        .iter()
        .filter_map(|id| registry.get(*id))
        .filter(|def| only.map_or(true, |t| def.card_type == t))
        .map(|def| def.name.as_str())
        .collect()
}

fn amount_bonus(played: usize, required: usize, bonus: i64) -> i64 {
    if played == required {
        bonus
    } else {
        0
    }
}

/// One-to-one multiset intersection by name: each required entry claims
/// at most one unclaimed played card with the identical name. Equals
/// the sum over names of min(required count, played count).
fn count_matches(required: &[&str], played: &[&CardInstance]) -> usize {
    let mut remaining: FxHashMap<&str, usize> = FxHashMap::default();
    for card in played {
        *remaining.entry(card.name.as_str()).or_insert(0) += 1;
    }

    let mut matches = 0;
    for name in required {
        if let Some(count) = remaining.get_mut(name) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }
    matches
}

/// Sum stat values across all played cards into one map.
fn combined_stats(played: &[CardInstance]) -> StatMap {
    let mut combined = StatMap::default();
    for card in played {
        for (name, value) in &card.stats {
            *combined.entry(name.clone()).or_insert(0.0) += value;
        }
    }
    combined
}

/// Perfect iff every target stat is present within tolerance and the
/// combined map introduces no extra stat names.
fn is_perfect(combined: &StatMap, targets: &StatMap, tolerance: f32) -> bool {
    for (name, target) in targets {
        match combined.get(name) {
            Some(value) if (value - target).abs() <= tolerance => {}
            _ => return false,
        }
    }
    combined.keys().all(|name| targets.contains_key(name))
}
