use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::food::Nutrient;

/// Daily nutrient floors, the sodium ceiling and the budget ceiling.
///
/// Defaults are the adult male reference targets. Missing fields in a JSON
/// profile fall back to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementProfile {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub calcium: f64,
    pub iron: f64,
    pub potassium: f64,
    pub vitamin_a: f64,
    pub vitamin_c: f64,
    pub vitamin_d: f64,
    /// Do-not-exceed sodium, mg.
    pub sodium_max: f64,
    /// Do-not-exceed daily cost, USD.
    pub price_limit: f64,
}

impl Default for RequirementProfile {
    fn default() -> Self {
        Self {
            calories: 2500.0,
            protein: 56.0,
            carbs: 340.0,
            fat: 83.0,
            fiber: 38.0,
            calcium: 1000.0,
            iron: 8.0,
            potassium: 3400.0,
            vitamin_a: 900.0,
            vitamin_c: 90.0,
            vitamin_d: 600.0,
            sodium_max: 2300.0,
            price_limit: 15.0,
        }
    }
}

impl RequirementProfile {
    /// Floor for a meet-or-exceed nutrient; `None` for sodium.
    pub fn floor(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::Calories => Some(self.calories),
            Nutrient::Protein => Some(self.protein),
            Nutrient::Carbs => Some(self.carbs),
            Nutrient::Fat => Some(self.fat),
            Nutrient::Fiber => Some(self.fiber),
            Nutrient::Calcium => Some(self.calcium),
            Nutrient::Iron => Some(self.iron),
            Nutrient::Potassium => Some(self.potassium),
            Nutrient::VitaminA => Some(self.vitamin_a),
            Nutrient::VitaminC => Some(self.vitamin_c),
            Nutrient::VitaminD => Some(self.vitamin_d),
            Nutrient::Sodium => None,
        }
    }

    /// Copy with a different budget ceiling.
    pub fn with_budget(mut self, price_limit: f64) -> Self {
        self.price_limit = price_limit;
        self
    }

    /// Every limit finite and non-negative, budget strictly positive.
    pub fn validate(&self) -> Result<()> {
        for nutrient in Nutrient::FLOOR_ORDER {
            let value = self.floor(nutrient).unwrap_or_default();
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::InvalidInput(format!(
                    "{} floor must be non-negative, got {}",
                    nutrient, value
                )));
            }
        }

        if !self.sodium_max.is_finite() || self.sodium_max < 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "Sodium ceiling must be non-negative, got {}",
                self.sodium_max
            )));
        }

        if !self.price_limit.is_finite() || self.price_limit <= 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "Budget must be positive, got {}",
                self.price_limit
            )));
        }

        Ok(())
    }
}
