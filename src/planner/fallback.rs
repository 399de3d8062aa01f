use rand::Rng;
use tracing::warn;

use crate::error::{PlannerError, Result};
use crate::models::{FoodCatalog, Plan, PlanTemplate, RequirementProfile};
use crate::planner::regenerate::{regenerate, RegenerateConfig, Revision};
use crate::planner::search::{search_excluding, SearchConfig};
use crate::state::RestrictionSet;

/// Where a plan handed to the user came from.
#[derive(Debug, Clone)]
pub enum Outcome<'a> {
    /// The search found a feasible plan.
    Searched(Plan<'a>),
    /// The search failed and the fallback template was regenerated instead.
    Fallback(Revision<'a>),
}

impl<'a> Outcome<'a> {
    pub fn plan(&self) -> &Plan<'a> {
        match self {
            Outcome::Searched(plan) => plan,
            Outcome::Fallback(revision) => &revision.plan,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }
}

/// Search under the current restrictions; on search failure, regenerate
/// `fallback` with the same restrictions and random source.
///
/// Errors other than `SearchFailure` are returned unchanged. Nothing is
/// retried.
pub fn search_or_fallback<'a, R: Rng + ?Sized>(
    catalog: &'a FoodCatalog,
    restricted: &RestrictionSet,
    profile: &RequirementProfile,
    search_config: &SearchConfig,
    fallback: &PlanTemplate,
    regenerate_config: &RegenerateConfig,
    rng: &mut R,
) -> Result<Outcome<'a>> {
    match search_excluding(catalog, restricted, profile, search_config, rng) {
        Ok(plan) => Ok(Outcome::Searched(plan)),
        Err(PlannerError::SearchFailure { trials }) => {
            warn!(trials, fallback = %fallback.name, "no feasible plan found, using fallback");
            let revision =
                regenerate(fallback, catalog, restricted, profile, regenerate_config, rng)?;
            Ok(Outcome::Fallback(revision))
        }
        Err(e) => Err(e),
    }
}
