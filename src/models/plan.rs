use std::ops::{Add, AddAssign};

use crate::error::{PlannerError, Result};
use crate::models::food::{Category, FoodRecord, Nutrient, Nutrients};
use crate::models::profile::RequirementProfile;
use crate::planner::checker::{check, Verdict, Violation};
use crate::planner::constants::MEALS_PER_DAY;
use crate::planner::totals::aggregate;
use crate::state::RestrictionSet;

/// A catalog food and how many servings of it the plan uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanEntry<'a> {
    food: &'a FoodRecord,
    servings: f64,
}

impl<'a> PlanEntry<'a> {
    /// Servings must be finite and strictly positive.
    pub fn new(food: &'a FoodRecord, servings: f64) -> Result<Self> {
        if !servings.is_finite() || servings <= 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "Servings for {} must be positive, got {}",
                food.key, servings
            )));
        }
        Ok(Self { food, servings })
    }

    pub fn food(&self) -> &'a FoodRecord {
        self.food
    }

    pub fn servings(&self) -> f64 {
        self.servings
    }

    pub fn key(&self) -> &'a str {
        &self.food.key
    }

    pub fn cost(&self) -> f64 {
        self.food.price * self.servings
    }

    pub fn calories(&self) -> f64 {
        self.food.calories() * self.servings
    }
}

/// Summed nutrients and price of a sequence of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub nutrients: Nutrients,
    pub price: f64,
}

impl Totals {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.nutrients.get(nutrient)
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(mut self, rhs: Totals) -> Totals {
        self += rhs;
        self
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Totals) {
        self.nutrients += rhs.nutrients;
        self.price += rhs.price;
    }
}

/// An ordered selection of entries with its derived totals and verdict.
///
/// Totals and verdict are computed at construction and never set
/// independently. Plans are immutable; every change yields a new plan.
#[derive(Debug, Clone)]
pub struct Plan<'a> {
    name: String,
    entries: Vec<PlanEntry<'a>>,
    totals: Totals,
    verdict: Verdict,
}

impl<'a> Plan<'a> {
    pub fn new(
        name: impl Into<String>,
        entries: Vec<PlanEntry<'a>>,
        profile: &RequirementProfile,
    ) -> Self {
        let totals = aggregate(&entries);
        let verdict = check(&totals, profile);
        Self {
            name: name.into(),
            entries,
            totals,
            verdict,
        }
    }

    /// New plan with one more entry appended.
    pub fn with_entry(&self, entry: PlanEntry<'a>, profile: &RequirementProfile) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        Plan::new(self.name.clone(), entries, profile)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[PlanEntry<'a>] {
        &self.entries
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn violations(&self) -> &[Violation] {
        self.verdict.violations()
    }

    pub fn meets(&self) -> bool {
        self.verdict.meets()
    }

    pub fn price(&self) -> f64 {
        self.totals.price
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key() == key)
    }

    /// Keys of entries that are in `restricted`, in plan order.
    pub fn restricted_hits(&self, restricted: &RestrictionSet) -> Vec<&'a str> {
        self.entries
            .iter()
            .map(|e| e.key())
            .filter(|key| restricted.contains(key))
            .collect()
    }

    /// Distinct categories, in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.food.category) {
                seen.push(entry.food.category);
            }
        }
        seen
    }

    /// Entries of one category, in plan order.
    pub fn in_category(&self, category: Category) -> Vec<&PlanEntry<'a>> {
        self.entries
            .iter()
            .filter(|e| e.food.category == category)
            .collect()
    }

    /// Servings merged by food key, in order of first appearance.
    pub fn shopping_list(&self) -> Vec<PlanEntry<'a>> {
        let mut merged: Vec<PlanEntry<'a>> = Vec::new();
        for entry in &self.entries {
            match merged.iter_mut().find(|m| m.key() == entry.key()) {
                Some(existing) => existing.servings += entry.servings,
                None => merged.push(*entry),
            }
        }
        merged
    }

    /// Total of one nutrient as a percentage of its floor (or the sodium
    /// ceiling). Zero when the limit is zero.
    pub fn percent_of(&self, profile: &RequirementProfile, nutrient: Nutrient) -> f64 {
        let limit = profile.floor(nutrient).unwrap_or(profile.sodium_max);
        if limit > 0.0 {
            self.totals.get(nutrient) / limit * 100.0
        } else {
            0.0
        }
    }

    /// Average calories per entry.
    pub fn calories_per_item(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.totals.nutrients.calories / self.entries.len() as f64
        }
    }

    /// Daily cost split over three meals.
    pub fn cost_per_meal(&self) -> f64 {
        self.totals.price / MEALS_PER_DAY
    }
}
