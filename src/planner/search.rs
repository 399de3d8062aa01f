use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::models::{FoodCatalog, FoodRecord, Plan, PlanEntry, RequirementProfile};
use crate::planner::constants::{
    DEFAULT_TRIALS, MAX_FOODS_PER_CATEGORY, MAX_SAMPLED_SERVINGS, MIN_SAMPLED_SERVINGS,
};
use crate::state::RestrictionSet;

/// Name given to plans produced by the search.
pub const SEARCH_PLAN_NAME: &str = "Lowest Cost Plan";

/// Tunables for the sampling search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub trials: usize,
    pub min_servings: f64,
    pub max_servings: f64,
    pub max_per_category: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            min_servings: MIN_SAMPLED_SERVINGS,
            max_servings: MAX_SAMPLED_SERVINGS,
            max_per_category: MAX_FOODS_PER_CATEGORY,
        }
    }
}

impl SearchConfig {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_servings.is_finite()
            || !self.max_servings.is_finite()
            || self.min_servings <= 0.0
            || self.min_servings > self.max_servings
        {
            return Err(PlannerError::InvalidInput(format!(
                "Serving range must satisfy 0 < min <= max, got [{}, {}]",
                self.min_servings, self.max_servings
            )));
        }
        if self.max_per_category == 0 {
            return Err(PlannerError::InvalidInput(
                "At least one food per category must be drawn".to_string(),
            ));
        }
        Ok(())
    }
}

/// Search for the cheapest plan that meets every requirement.
///
/// Each trial draws 1..=`max_per_category` distinct foods from every
/// category with a uniform serving multiplier each. A candidate replaces the
/// incumbent only if it is feasible and strictly cheaper, so a larger trial
/// budget over the same random sequence never gives a worse result.
pub fn search<'a, R: Rng + ?Sized>(
    catalog: &'a FoodCatalog,
    profile: &RequirementProfile,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<Plan<'a>> {
    search_excluding(catalog, &RestrictionSet::new(), profile, config, rng)
}

/// `search` over the catalog foods whose keys are not restricted.
pub fn search_excluding<'a, R: Rng + ?Sized>(
    catalog: &'a FoodCatalog,
    restricted: &RestrictionSet,
    profile: &RequirementProfile,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<Plan<'a>> {
    config.validate()?;
    if catalog.is_empty() {
        return Err(PlannerError::EmptyCatalog);
    }

    let groups: Vec<Vec<&'a FoodRecord>> = catalog
        .categories()
        .into_iter()
        .map(|category| {
            catalog
                .in_category(category)
                .into_iter()
                .filter(|f| !restricted.contains(&f.key))
                .collect::<Vec<_>>()
        })
        .filter(|group| !group.is_empty())
        .collect();

    if groups.is_empty() {
        return Err(PlannerError::InfeasibleRestriction {
            restricted: restricted.len(),
        });
    }

    let mut incumbent: Option<Plan<'a>> = None;

    for trial in 0..config.trials {
        let candidate = sample_candidate(&groups, profile, config, rng)?;
        if !candidate.meets() {
            continue;
        }

        let improves = incumbent
            .as_ref()
            .map_or(true, |best| candidate.price() < best.price());

        if improves {
            debug!(
                trial = trial + 1,
                price = candidate.price(),
                items = candidate.len(),
                "new incumbent"
            );
            incumbent = Some(candidate);
        }
    }

    match incumbent {
        Some(plan) => {
            info!(
                trials = config.trials,
                price = plan.price(),
                items = plan.len(),
                "search finished"
            );
            Ok(plan)
        }
        None => {
            info!(trials = config.trials, "search found no feasible plan");
            Err(PlannerError::SearchFailure {
                trials: config.trials,
            })
        }
    }
}

/// `search` driven by a `StdRng` seeded from `seed`.
pub fn search_seeded<'a>(
    catalog: &'a FoodCatalog,
    profile: &RequirementProfile,
    config: &SearchConfig,
    seed: u64,
) -> Result<Plan<'a>> {
    let mut rng = StdRng::seed_from_u64(seed);
    search(catalog, profile, config, &mut rng)
}

/// Draw one category-balanced candidate.
fn sample_candidate<'a, R: Rng + ?Sized>(
    groups: &[Vec<&'a FoodRecord>],
    profile: &RequirementProfile,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<Plan<'a>> {
    let mut entries = Vec::new();

    for group in groups {
        let count = rng.gen_range(1..=config.max_per_category.min(group.len()));
        let picked: Vec<&'a FoodRecord> = group.choose_multiple(rng, count).copied().collect();

        for food in picked {
            let servings = rng.gen_range(config.min_servings..=config.max_servings);
            entries.push(PlanEntry::new(food, servings)?);
        }
    }

    Ok(Plan::new(SEARCH_PLAN_NAME, entries, profile))
}
