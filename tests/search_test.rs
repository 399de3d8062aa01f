use rand::rngs::StdRng;
use rand::SeedableRng;

use meal_planner_rs::error::PlannerError;
use meal_planner_rs::models::{FoodCatalog, PlanStyle, RequirementProfile};
use meal_planner_rs::planner::{
    aggregate, check, search_or_fallback, search_seeded, Outcome, RegenerateConfig, SearchConfig,
};
use meal_planner_rs::state::RestrictionSet;

/// A profile the built-in catalog can meet within a few hundred trials.
fn relaxed_profile() -> RequirementProfile {
    RequirementProfile {
        calories: 1500.0,
        protein: 40.0,
        carbs: 150.0,
        fat: 30.0,
        fiber: 15.0,
        calcium: 400.0,
        iron: 4.0,
        potassium: 1500.0,
        vitamin_a: 300.0,
        vitamin_c: 20.0,
        vitamin_d: 0.0,
        sodium_max: 2300.0,
        price_limit: 15.0,
    }
}

#[test]
fn test_same_seed_gives_same_plan() {
    let catalog = FoodCatalog::builtin();
    let profile = relaxed_profile();
    let config = SearchConfig::default();

    let first = search_seeded(&catalog, &profile, &config, 17).unwrap();
    let second = search_seeded(&catalog, &profile, &config, 17).unwrap();

    assert_eq!(first.entries(), second.entries());
    assert_eq!(first.price(), second.price());
}

#[test]
fn test_result_passes_independent_check() {
    let catalog = FoodCatalog::builtin();
    let profile = relaxed_profile();

    for seed in [1, 2, 3] {
        let plan = search_seeded(&catalog, &profile, &SearchConfig::default(), seed).unwrap();
        let verdict = check(&aggregate(plan.entries()), &profile);
        assert!(verdict.meets(), "seed {} produced {:?}", seed, verdict);
    }
}

#[test]
fn test_more_trials_never_cost_more() {
    let catalog = FoodCatalog::builtin();
    let profile = relaxed_profile();
    let short = SearchConfig::default().with_trials(100);
    let long = SearchConfig::default().with_trials(400);

    for seed in 0..8 {
        let Ok(few) = search_seeded(&catalog, &profile, &short, seed) else {
            continue;
        };
        let many = search_seeded(&catalog, &profile, &long, seed).unwrap();
        assert!(
            many.price() <= few.price(),
            "seed {}: {} trials cost {}, {} trials cost {}",
            seed,
            long.trials,
            many.price(),
            short.trials,
            few.price()
        );
    }
}

#[test]
fn test_impossible_budget_is_search_failure() {
    let catalog = FoodCatalog::builtin();
    let profile = relaxed_profile().with_budget(0.5);
    let config = SearchConfig::default().with_trials(200);

    let err = search_seeded(&catalog, &profile, &config, 4).unwrap_err();
    assert!(matches!(err, PlannerError::SearchFailure { trials: 200 }));
}

#[test]
fn test_failed_search_falls_back_to_template() {
    let catalog = FoodCatalog::builtin();
    let profile = RequirementProfile::default().with_budget(0.5);
    let restricted: RestrictionSet = ["P001"].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(8);

    let outcome = search_or_fallback(
        &catalog,
        &restricted,
        &profile,
        &SearchConfig::default().with_trials(50),
        &PlanStyle::Balanced.template(),
        &RegenerateConfig::default(),
        &mut rng,
    )
    .unwrap();

    assert!(outcome.is_fallback());
    assert_eq!(outcome.plan().name(), "Balanced Plan");
    assert!(!outcome.plan().contains_key("P001"));
    match outcome {
        Outcome::Fallback(revision) => assert_eq!(revision.substitutions.len(), 1),
        Outcome::Searched(_) => unreachable!(),
    }
}

#[test]
fn test_successful_search_is_not_a_fallback() {
    let catalog = FoodCatalog::builtin();
    let mut rng = StdRng::seed_from_u64(5);

    let outcome = search_or_fallback(
        &catalog,
        &RestrictionSet::new(),
        &relaxed_profile(),
        &SearchConfig::default(),
        &PlanStyle::Balanced.template(),
        &RegenerateConfig::default(),
        &mut rng,
    )
    .unwrap();

    assert!(!outcome.is_fallback());
    assert!(outcome.plan().meets());
}
