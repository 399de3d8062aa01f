/// Default number of sampling trials per search.
pub const DEFAULT_TRIALS: usize = 500;

/// Serving multiplier range drawn for each sampled food.
pub const MIN_SAMPLED_SERVINGS: f64 = 0.5;
pub const MAX_SAMPLED_SERVINGS: f64 = 2.0;

/// Foods drawn per category in each trial (at least one).
pub const MAX_FOODS_PER_CATEGORY: usize = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Regeneration top-up
// ─────────────────────────────────────────────────────────────────────────────

/// A deficit larger than this fraction of the floor triggers a top-up.
pub const DEFICIENCY_TOLERANCE: f64 = 0.10;

/// Calories per serving a food must exceed to be a calorie top-up.
pub const CALORIE_DENSITY_THRESHOLD: f64 = 150.0;

/// Protein grams per serving a food must exceed to be a protein top-up.
pub const PROTEIN_DENSITY_THRESHOLD: f64 = 10.0;

/// Servings added by each top-up.
pub const TOP_UP_SERVINGS: f64 = 1.0;

/// Meals a daily plan is split into for per-meal cost.
pub const MEALS_PER_DAY: f64 = 3.0;
