//! Property tests for scoring and deck draws.

use proptest::prelude::*;

use stovetop::{
    score_round, CardDefinition, CardId, CardInstance, CardRegistry, CardType, DeckPool,
    EntityAllocator, GameRng, RecipeDefinition, RecipeId, ScoringConfig,
};

/// Small card universe the generators index into.
fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    let cards = [
        ("Tomato", CardType::Ingredient),
        ("Onion", CardType::Ingredient),
        ("Chicken", CardType::Ingredient),
        ("Salt", CardType::Spice),
        ("Pepper", CardType::Spice),
        ("Knife", CardType::Tool),
        ("Pan", CardType::Tool),
        ("Chop", CardType::Technique),
        ("Fry", CardType::Technique),
    ];
    for (index, (name, card_type)) in cards.iter().enumerate() {
        let mut def = CardDefinition::new(CardId::new(index as u32), *name, *card_type);
        if *card_type == CardType::Ingredient {
            def = def.with_stat("Umaminess", 0.5);
        }
        registry.register(def);
    }
    registry
}

const UNIVERSE: u32 = 9;

fn instantiate(registry: &CardRegistry, ids: &[u32]) -> Vec<CardInstance> {
    let mut alloc = EntityAllocator::new();
    ids.iter()
        .map(|&id| registry.instantiate(CardId::new(id), &mut alloc).unwrap())
        .collect()
}

fn recipe_from(ids: &[u32]) -> RecipeDefinition {
    let mut recipe = RecipeDefinition::new(RecipeId::new(0), "Generated");
    for &id in ids {
        // Route requirements to the category list their type belongs in,
        // spices included among the ingredients.
        recipe = match id {
            0..=4 => recipe.with_ingredient(CardId::new(id)),
            5 | 6 => recipe.with_tool(CardId::new(id)),
            _ => recipe.with_technique(CardId::new(id)),
        };
    }
    recipe
}

proptest! {
    /// Scoring depends only on what was played, never on play order.
    #[test]
    fn score_is_order_invariant(
        played_ids in proptest::collection::vec(0..UNIVERSE, 0..10),
        required_ids in proptest::collection::vec(0..UNIVERSE, 0..6),
    ) {
        let registry = registry();
        let recipe = recipe_from(&required_ids);
        let config = ScoringConfig::default();

        let played = instantiate(&registry, &played_ids);
        let mut reversed = played.clone();
        reversed.reverse();

        prop_assert_eq!(
            score_round(&played, &recipe, &registry, &config),
            score_round(&reversed, &recipe, &registry, &config)
        );
    }

    /// Type-match points never exceed what the requirement lists allow,
    /// and the total is never negative.
    #[test]
    fn score_is_bounded(
        played_ids in proptest::collection::vec(0..UNIVERSE, 0..10),
        required_ids in proptest::collection::vec(0..UNIVERSE, 0..6),
    ) {
        let registry = registry();
        let recipe = recipe_from(&required_ids);
        let config = ScoringConfig::default();

        let played = instantiate(&registry, &played_ids);
        let breakdown = score_round(&played, &recipe, &registry, &config);

        let required_total = recipe.required_ingredients.len() as i64
            * config.ingredient_type_score
            + recipe.required_tools.len() as i64 * config.tool_type_score
            + recipe.required_techniques.len() as i64 * config.technique_type_score;

        // Spice requirements also count once in the ingredient list, so
        // the spice category can add at most its own share again.
        let spice_total =
            recipe.required_spice_count(&registry) as i64 * config.spice_type_score;

        prop_assert!(breakdown.total() >= 0);
        prop_assert!(
            breakdown.total() <= required_total + spice_total + config.perfect_dish_bonus
        );
    }

    /// Playing a superset of cards never lowers the type-match score.
    #[test]
    fn extra_cards_never_reduce_type_score(
        played_ids in proptest::collection::vec(0..UNIVERSE, 0..8),
        extra in 0..UNIVERSE,
        required_ids in proptest::collection::vec(0..UNIVERSE, 0..6),
    ) {
        let registry = registry();
        let recipe = recipe_from(&required_ids);
        let config = ScoringConfig {
            // Isolate the type-match component.
            perfect_dish_bonus: 0,
            ..ScoringConfig::default()
        };

        let base = instantiate(&registry, &played_ids);
        let mut more_ids = played_ids.clone();
        more_ids.push(extra);
        let more = instantiate(&registry, &more_ids);

        let base_score = score_round(&base, &recipe, &registry, &config);
        let more_score = score_round(&more, &recipe, &registry, &config);

        let type_total = |b: &stovetop::ScoreBreakdown| {
            b.ingredient_score + b.spice_score + b.tool_score + b.technique_score
        };
        prop_assert!(type_total(&more_score) >= type_total(&base_score));
    }

    /// A pool with at least two distinct cards never repeats the
    /// previous draw.
    #[test]
    fn draws_never_repeat_with_distinct_pool(
        seed in any::<u64>(),
        pool_size in 2..12u32,
        draws in 1..100usize,
    ) {
        let cards: Vec<CardId> = (0..pool_size).map(CardId::new).collect();
        let mut deck = DeckPool::new("Generated", cards);
        let mut rng = GameRng::new(seed);

        let mut last = None;
        for _ in 0..draws {
            let drawn = deck.draw(&mut rng);
            prop_assert!(drawn.is_some());
            if let (Some(prev), Some(current)) = (last, drawn) {
                prop_assert_ne!(prev, current);
            }
            last = drawn;
        }
    }

    /// Draws never shrink the pool.
    #[test]
    fn draws_never_consume(
        seed in any::<u64>(),
        pool_size in 1..12u32,
        draws in 1..50usize,
    ) {
        let cards: Vec<CardId> = (0..pool_size).map(CardId::new).collect();
        let mut deck = DeckPool::new("Generated", cards);
        let mut rng = GameRng::new(seed);

        for _ in 0..draws {
            prop_assert!(deck.draw(&mut rng).is_some());
            prop_assert_eq!(deck.len(), pool_size as usize);
        }
    }

    /// Every draw yields a card that is actually in the pool.
    #[test]
    fn draws_come_from_the_pool(
        seed in any::<u64>(),
        pool in proptest::collection::vec(0..20u32, 1..10),
    ) {
        let cards: Vec<CardId> = pool.iter().copied().map(CardId::new).collect();
        let mut deck = DeckPool::new("Generated", cards.clone());
        let mut rng = GameRng::new(seed);

        for _ in 0..30 {
            let drawn = deck.draw(&mut rng).unwrap();
            prop_assert!(cards.contains(&drawn));
        }
    }
}
