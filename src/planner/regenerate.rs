use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::{PlannerError, Result};
use crate::models::{
    FoodCatalog, FoodRecord, Nutrient, Plan, PlanEntry, PlanTemplate, RequirementProfile,
};
use crate::planner::constants::{
    CALORIE_DENSITY_THRESHOLD, DEFICIENCY_TOLERANCE, PROTEIN_DENSITY_THRESHOLD, TOP_UP_SERVINGS,
};
use crate::state::RestrictionSet;

/// How a replacement is chosen among same-category alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SubstitutionPolicy {
    /// Lowest price; ties go to the earlier catalog entry.
    #[default]
    Cheapest,
    /// Uniform pick from the injected random source.
    Random,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegenerateConfig {
    pub substitution: SubstitutionPolicy,
    /// Calorie top-up candidates must exceed this many kcal per serving.
    pub calorie_density: f64,
    /// Protein top-up candidates must exceed this many grams per serving.
    pub protein_density: f64,
    /// Deficits above this fraction of the floor trigger a top-up.
    pub deficiency_tolerance: f64,
}

impl Default for RegenerateConfig {
    fn default() -> Self {
        Self {
            substitution: SubstitutionPolicy::default(),
            calorie_density: CALORIE_DENSITY_THRESHOLD,
            protein_density: PROTEIN_DENSITY_THRESHOLD,
            deficiency_tolerance: DEFICIENCY_TOLERANCE,
        }
    }
}

impl RegenerateConfig {
    pub fn validate(&self) -> Result<()> {
        let thresholds = [self.calorie_density, self.protein_density];
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(PlannerError::InvalidInput(
                "Top-up density thresholds must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.deficiency_tolerance) {
            return Err(PlannerError::InvalidInput(format!(
                "Deficiency tolerance must be within [0, 1], got {}",
                self.deficiency_tolerance
            )));
        }
        Ok(())
    }
}

/// A restricted template slot filled by another food of the same category.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub original: String,
    pub replacement: String,
    pub servings: f64,
}

/// A regenerated plan and the changes made to reach it.
#[derive(Debug, Clone)]
pub struct Revision<'a> {
    pub plan: Plan<'a>,
    pub substitutions: Vec<Substitution>,
    /// Restricted slots with no same-category alternative.
    pub dropped: Vec<String>,
    /// Keys appended by the top-up pass, at most one per checked nutrient.
    pub top_ups: Vec<String>,
}

/// Rebuild a template plan that avoids every restricted key.
///
/// Restricted slots are replaced by a same-category food at the original
/// servings, or dropped if none is left. A single calorie top-up and then a
/// single protein top-up run afterwards, each only when the deficit exceeds
/// the tolerance and a dense enough food is available.
pub fn regenerate<'a, R: Rng + ?Sized>(
    template: &PlanTemplate,
    catalog: &'a FoodCatalog,
    restricted: &RestrictionSet,
    profile: &RequirementProfile,
    config: &RegenerateConfig,
    rng: &mut R,
) -> Result<Revision<'a>> {
    config.validate()?;

    let available: Vec<&'a FoodRecord> = catalog
        .foods()
        .iter()
        .filter(|f| !restricted.contains(&f.key))
        .collect();

    if available.is_empty() {
        return Err(PlannerError::InfeasibleRestriction {
            restricted: restricted.len(),
        });
    }

    let mut entries = Vec::with_capacity(template.len());
    let mut substitutions = Vec::new();
    let mut dropped = Vec::new();

    for slot in &template.entries {
        let original = catalog
            .get(&slot.key)
            .ok_or_else(|| PlannerError::FoodNotFound(slot.key.clone()))?;

        if !restricted.contains(&slot.key) {
            entries.push(PlanEntry::new(original, slot.servings)?);
            continue;
        }

        let alternatives: Vec<&'a FoodRecord> = available
            .iter()
            .copied()
            .filter(|f| f.category == original.category)
            .collect();

        match pick_alternative(&alternatives, config.substitution, rng) {
            Some(replacement) => {
                debug!(
                    original = %original.key,
                    replacement = %replacement.key,
                    servings = slot.servings,
                    "substituted restricted food"
                );
                entries.push(PlanEntry::new(replacement, slot.servings)?);
                substitutions.push(Substitution {
                    original: original.key.clone(),
                    replacement: replacement.key.clone(),
                    servings: slot.servings,
                });
            }
            None => {
                warn!(
                    key = %original.key,
                    category = %original.category,
                    "no alternative left in category, dropping slot"
                );
                dropped.push(original.key.clone());
            }
        }
    }

    let mut plan = Plan::new(template.name.clone(), entries, profile);
    let mut top_ups = Vec::new();

    let checks = [
        (Nutrient::Calories, config.calorie_density),
        (Nutrient::Protein, config.protein_density),
    ];
    for (nutrient, density) in checks {
        if let Some(grown) = top_up(&plan, profile, nutrient, density, &available, config, rng)? {
            if let Some(last) = grown.entries().last() {
                top_ups.push(last.key().to_string());
            }
            plan = grown;
        }
    }

    debug_assert!(plan.restricted_hits(restricted).is_empty());

    Ok(Revision {
        plan,
        substitutions,
        dropped,
        top_ups,
    })
}

/// `regenerate` driven by a `StdRng` seeded from `seed`.
pub fn regenerate_seeded<'a>(
    template: &PlanTemplate,
    catalog: &'a FoodCatalog,
    restricted: &RestrictionSet,
    profile: &RequirementProfile,
    config: &RegenerateConfig,
    seed: u64,
) -> Result<Revision<'a>> {
    let mut rng = StdRng::seed_from_u64(seed);
    regenerate(template, catalog, restricted, profile, config, &mut rng)
}

fn pick_alternative<'a, R: Rng + ?Sized>(
    alternatives: &[&'a FoodRecord],
    policy: SubstitutionPolicy,
    rng: &mut R,
) -> Option<&'a FoodRecord> {
    match policy {
        SubstitutionPolicy::Cheapest => alternatives.iter().copied().min_by(|a, b| {
            a.price
                .partial_cmp(&b.price)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SubstitutionPolicy::Random => alternatives.choose(rng).copied(),
    }
}

/// Append one serving of a dense food if `nutrient` is short by more than
/// the tolerance. Runs once per call; returns `None` when nothing is added.
fn top_up<'a, R: Rng + ?Sized>(
    plan: &Plan<'a>,
    profile: &RequirementProfile,
    nutrient: Nutrient,
    density: f64,
    available: &[&'a FoodRecord],
    config: &RegenerateConfig,
    rng: &mut R,
) -> Result<Option<Plan<'a>>> {
    let floor = profile.floor(nutrient).unwrap_or_default();
    let deficit = match plan.verdict().deficit(nutrient) {
        Some(d) if d > floor * config.deficiency_tolerance => d,
        _ => return Ok(None),
    };

    let candidates: Vec<&'a FoodRecord> = available
        .iter()
        .copied()
        .filter(|f| f.nutrients.get(nutrient) > density)
        .collect();

    let Some(food) = candidates.choose(rng).copied() else {
        debug!(%nutrient, deficit, "no food dense enough to top up");
        return Ok(None);
    };

    debug!(%nutrient, deficit, key = %food.key, "topping up");
    Ok(Some(plan.with_entry(PlanEntry::new(food, TOP_UP_SERVINGS)?, profile)))
}
