use assert_float_eq::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use meal_planner_rs::error::PlannerError;
use meal_planner_rs::models::{
    Category, FoodCatalog, Nutrient, PlanStyle, PlanTemplate, RequirementProfile,
};
use meal_planner_rs::planner::{regenerate_seeded, RegenerateConfig, SubstitutionPolicy};
use meal_planner_rs::state::RestrictionSet;

fn chicken_template() -> PlanTemplate {
    PlanTemplate::new("Chicken", &[("P001", 1.5)])
}

#[test]
fn test_restricted_chicken_becomes_eggs() {
    let catalog = FoodCatalog::builtin();
    let restricted: RestrictionSet = ["P001"].into_iter().collect();
    // Eggs at 1.5 servings give 214.5 kcal and 18.9 g protein.
    let profile = RequirementProfile {
        calories: 200.0,
        protein: 18.0,
        ..Default::default()
    };

    let revision = regenerate_seeded(
        &chicken_template(),
        &catalog,
        &restricted,
        &profile,
        &RegenerateConfig::default(),
        0,
    )
    .unwrap();

    assert_eq!(revision.plan.len(), 1);
    let entry = revision.plan.entries()[0];
    assert_eq!(entry.key(), "P004");
    assert_float_absolute_eq!(entry.servings(), 1.5, 1e-12);
    assert_float_absolute_eq!(revision.plan.price(), 0.90, 1e-9);
    assert!(!revision.plan.contains_key("P001"));
    assert!(revision.top_ups.is_empty());

    assert_eq!(revision.substitutions.len(), 1);
    assert_eq!(revision.substitutions[0].original, "P001");
    assert_eq!(revision.substitutions[0].replacement, "P004");
}

#[test]
fn test_substitute_keeps_its_place_before_top_ups() {
    let catalog = FoodCatalog::builtin();
    let restricted: RestrictionSet = ["P001"].into_iter().collect();

    let revision = regenerate_seeded(
        &chicken_template(),
        &catalog,
        &restricted,
        &RequirementProfile::default(),
        &RegenerateConfig::default(),
        3,
    )
    .unwrap();

    let first = revision.plan.entries()[0];
    assert_eq!(first.key(), "P004");
    assert_float_absolute_eq!(first.servings(), 1.5, 1e-12);
    assert!(!revision.top_ups.is_empty());
    assert!(revision.top_ups.len() <= 2);
    assert_eq!(revision.plan.len(), 1 + revision.top_ups.len());
}

#[test]
fn test_restricted_keys_never_appear() {
    let catalog = FoodCatalog::builtin();
    let keys: Vec<String> = catalog.foods().iter().map(|f| f.key.clone()).collect();
    let profile = RequirementProfile::default();
    let styles = [PlanStyle::Balanced, PlanStyle::LowCost, PlanStyle::HighProtein];
    let policies = [SubstitutionPolicy::Cheapest, SubstitutionPolicy::Random];
    let mut picker = StdRng::seed_from_u64(2024);

    for seed in 0..40u64 {
        let count = picker.gen_range(0..=20);
        let restricted: RestrictionSet =
            keys.choose_multiple(&mut picker, count).cloned().collect();

        for style in styles {
            let template = style.template();
            for substitution in policies {
                let config = RegenerateConfig {
                    substitution,
                    ..Default::default()
                };
                let revision =
                    regenerate_seeded(&template, &catalog, &restricted, &profile, &config, seed)
                        .unwrap();

                let hits = revision.plan.restricted_hits(&restricted);
                assert!(
                    hits.is_empty(),
                    "{:?} restricted but kept ({:?}, seed {})",
                    hits,
                    style,
                    seed
                );
                assert!(revision.top_ups.len() <= 2);
                assert!(revision.plan.len() <= template.len() + 2);
            }
        }
    }
}

#[test]
fn test_huge_shortfall_still_adds_two_entries() {
    let catalog = FoodCatalog::builtin();
    let template = PlanTemplate::new("Tiny", &[("V002", 1.0)]);
    let profile = RequirementProfile {
        calories: 100_000.0,
        protein: 10_000.0,
        ..Default::default()
    };

    for seed in 0..20 {
        let revision = regenerate_seeded(
            &template,
            &catalog,
            &RestrictionSet::new(),
            &profile,
            &RegenerateConfig::default(),
            seed,
        )
        .unwrap();

        assert_eq!(revision.top_ups.len(), 2, "seed {}", seed);
        assert_eq!(revision.plan.len(), template.len() + 2);
        assert!(!revision.plan.meets());
    }
}

#[test]
fn test_small_shortfall_is_tolerated() {
    let catalog = FoodCatalog::builtin();
    // Balanced template totals 1577.5 kcal and about 117 g protein.
    let profile = RequirementProfile {
        calories: 1600.0,
        ..Default::default()
    };

    let revision = regenerate_seeded(
        &PlanStyle::Balanced.template(),
        &catalog,
        &RestrictionSet::new(),
        &profile,
        &RegenerateConfig::default(),
        1,
    )
    .unwrap();

    assert!(revision.top_ups.is_empty());
    let deficit = revision.plan.verdict().deficit(Nutrient::Calories).unwrap();
    assert_float_absolute_eq!(deficit, 22.5, 1e-6);
}

#[test]
fn test_category_without_alternative_is_dropped() {
    let catalog = FoodCatalog::builtin();
    let restricted: RestrictionSet = ["D001", "D002"].into_iter().collect();
    let template = PlanStyle::Balanced.template();

    let revision = regenerate_seeded(
        &template,
        &catalog,
        &restricted,
        &RequirementProfile::default(),
        &RegenerateConfig::default(),
        6,
    )
    .unwrap();

    assert_eq!(revision.dropped, vec!["D001".to_string()]);
    assert!(revision.substitutions.is_empty());
    assert!(revision.plan.in_category(Category::Dairy).is_empty());
    assert_eq!(revision.plan.len(), template.len() - 1 + revision.top_ups.len());
}

#[test]
fn test_everything_restricted_is_infeasible() {
    let catalog = FoodCatalog::builtin();
    let restricted: RestrictionSet = catalog.foods().iter().map(|f| f.key.clone()).collect();

    let err = regenerate_seeded(
        &PlanStyle::LowCost.template(),
        &catalog,
        &restricted,
        &RequirementProfile::default(),
        &RegenerateConfig::default(),
        0,
    )
    .unwrap_err();

    assert!(matches!(err, PlannerError::InfeasibleRestriction { restricted: 23 }));
}

#[test]
fn test_unknown_template_key_is_rejected() {
    let catalog = FoodCatalog::builtin();
    let template = PlanTemplate::new("Broken", &[("P004", 1.0), ("X999", 1.0)]);

    let err = regenerate_seeded(
        &template,
        &catalog,
        &RestrictionSet::new(),
        &RequirementProfile::default(),
        &RegenerateConfig::default(),
        0,
    )
    .unwrap_err();

    assert!(matches!(err, PlannerError::FoodNotFound(ref key) if key == "X999"));
}

#[test]
fn test_random_substitution_is_seeded_and_same_category() {
    let catalog = FoodCatalog::builtin();
    let restricted: RestrictionSet = ["P001", "G001", "V001"].into_iter().collect();
    let config = RegenerateConfig {
        substitution: SubstitutionPolicy::Random,
        ..Default::default()
    };
    let template = PlanStyle::HighProtein.template();
    let profile = RequirementProfile::default();

    let first = regenerate_seeded(&template, &catalog, &restricted, &profile, &config, 99).unwrap();
    let second =
        regenerate_seeded(&template, &catalog, &restricted, &profile, &config, 99).unwrap();

    assert_eq!(first.plan.entries(), second.plan.entries());
    assert_eq!(first.substitutions, second.substitutions);

    for sub in &first.substitutions {
        let original = catalog.get(&sub.original).unwrap();
        let replacement = catalog.get(&sub.replacement).unwrap();
        assert_eq!(original.category, replacement.category);
        assert!(!restricted.contains(&sub.replacement));
    }
}
