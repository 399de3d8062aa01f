use std::fmt;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Food group a record belongs to. Every record has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Protein,
    Grain,
    Vegetable,
    Fruit,
    Dairy,
    Fat,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Protein,
        Category::Grain,
        Category::Vegetable,
        Category::Fruit,
        Category::Dairy,
        Category::Fat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Protein => "protein",
            Category::Grain => "grain",
            Category::Vegetable => "vegetable",
            Category::Fruit => "fruit",
            Category::Dairy => "dairy",
            Category::Fat => "fat",
        }
    }

    /// Capitalized name for headings.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Protein => "Protein",
            Category::Grain => "Grain",
            Category::Vegetable => "Vegetable",
            Category::Fruit => "Fruit",
            Category::Dairy => "Dairy",
            Category::Fat => "Fat",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| PlannerError::InvalidInput(format!("Unknown category: {}", s)))
    }
}

/// One field of the nutrient vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    Calcium,
    Iron,
    Potassium,
    Sodium,
    VitaminA,
    VitaminC,
    VitaminD,
}

impl Nutrient {
    /// Order in which floors are evaluated. Top-up logic relies on it.
    pub const FLOOR_ORDER: [Nutrient; 11] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
        Nutrient::Fiber,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Potassium,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::VitaminD,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Carbs => "Carbs",
            Nutrient::Fat => "Fat",
            Nutrient::Fiber => "Fiber",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::Potassium => "Potassium",
            Nutrient::Sodium => "Sodium",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::VitaminD => "Vitamin D",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Protein | Nutrient::Carbs | Nutrient::Fat | Nutrient::Fiber => "g",
            Nutrient::Calcium
            | Nutrient::Iron
            | Nutrient::Potassium
            | Nutrient::Sodium
            | Nutrient::VitaminC => "mg",
            Nutrient::VitaminA | Nutrient::VitaminD => "IU",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-shape nutrient vector, per serving or summed over a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub calcium: f64,
    pub iron: f64,
    pub potassium: f64,
    pub sodium: f64,
    pub vitamin_a: f64,
    pub vitamin_c: f64,
    pub vitamin_d: f64,
}

impl Nutrients {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
            Nutrient::Fiber => self.fiber,
            Nutrient::Calcium => self.calcium,
            Nutrient::Iron => self.iron,
            Nutrient::Potassium => self.potassium,
            Nutrient::Sodium => self.sodium,
            Nutrient::VitaminA => self.vitamin_a,
            Nutrient::VitaminC => self.vitamin_c,
            Nutrient::VitaminD => self.vitamin_d,
        }
    }

    fn values(&self) -> [f64; 12] {
        [
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.fiber,
            self.calcium,
            self.iron,
            self.potassium,
            self.sodium,
            self.vitamin_a,
            self.vitamin_c,
            self.vitamin_d,
        ]
    }

    /// All fields finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.values().iter().all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Add for Nutrients {
    type Output = Nutrients;

    fn add(mut self, rhs: Nutrients) -> Nutrients {
        self += rhs;
        self
    }
}

impl AddAssign for Nutrients {
    fn add_assign(&mut self, rhs: Nutrients) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fat += rhs.fat;
        self.fiber += rhs.fiber;
        self.calcium += rhs.calcium;
        self.iron += rhs.iron;
        self.potassium += rhs.potassium;
        self.sodium += rhs.sodium;
        self.vitamin_a += rhs.vitamin_a;
        self.vitamin_c += rhs.vitamin_c;
        self.vitamin_d += rhs.vitamin_d;
    }
}

impl Mul<f64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, factor: f64) -> Nutrients {
        Nutrients {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
            calcium: self.calcium * factor,
            iron: self.iron * factor,
            potassium: self.potassium * factor,
            sodium: self.sodium * factor,
            vitamin_a: self.vitamin_a * factor,
            vitamin_c: self.vitamin_c * factor,
            vitamin_d: self.vitamin_d * factor,
        }
    }
}

/// A catalog food with per-serving nutrition and price.
///
/// Records are built once when the catalog loads and are only ever borrowed
/// by plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodRecord {
    pub key: String,
    pub name: String,
    pub category: Category,
    pub serving: String,
    pub nutrients: Nutrients,
    pub price: f64,
}

impl FoodRecord {
    #[inline]
    pub fn calories(&self) -> f64 {
        self.nutrients.calories
    }

    #[inline]
    pub fn protein(&self) -> f64 {
        self.nutrients.protein
    }

    /// Non-empty key and name, valid nutrients, finite non-negative price.
    pub fn is_valid(&self) -> bool {
        !self.key.trim().is_empty()
            && !self.name.trim().is_empty()
            && self.nutrients.is_valid()
            && self.price.is_finite()
            && self.price >= 0.0
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}] {}: {} kcal, P:{} C:{} F:{}, ${:.2}",
            self.key,
            self.category,
            self.name,
            self.nutrients.calories,
            self.nutrients.protein,
            self.nutrients.carbs,
            self.nutrients.fat,
            self.price
        )
    }
}

impl PartialEq for FoodRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FoodRecord {}

impl std::hash::Hash for FoodRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_food() -> FoodRecord {
        FoodRecord {
            key: "F001".to_string(),
            name: "Banana".to_string(),
            category: Category::Fruit,
            serving: "1 medium".to_string(),
            nutrients: Nutrients {
                calories: 105.0,
                protein: 1.3,
                carbs: 27.0,
                fat: 0.4,
                fiber: 3.1,
                potassium: 422.0,
                ..Default::default()
            },
            price: 0.30,
        }
    }

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!("Protein".parse::<Category>().unwrap(), Category::Protein);
        assert_eq!(" dairy ".parse::<Category>().unwrap(), Category::Dairy);
        assert!("candy".parse::<Category>().is_err());
    }

    #[test]
    fn test_nutrients_scale_and_add() {
        let food = sample_food();
        let doubled = food.nutrients * 2.0;
        assert!((doubled.calories - 210.0).abs() < 1e-9);

        let sum = food.nutrients + food.nutrients;
        assert_eq!(sum, doubled);
    }

    #[test]
    fn test_nutrients_get_matches_fields() {
        let food = sample_food();
        assert_eq!(food.nutrients.get(Nutrient::Potassium), 422.0);
        assert_eq!(food.nutrients.get(Nutrient::VitaminD), 0.0);
    }

    #[test]
    fn test_is_valid() {
        let food = sample_food();
        assert!(food.is_valid());

        let mut negative = sample_food();
        negative.nutrients.fiber = -1.0;
        assert!(!negative.is_valid());

        let mut nan_price = sample_food();
        nan_price.price = f64::NAN;
        assert!(!nan_price.is_valid());
    }

    #[test]
    fn test_floor_order_excludes_sodium() {
        assert_eq!(Nutrient::FLOOR_ORDER.len(), 11);
        assert!(!Nutrient::FLOOR_ORDER.contains(&Nutrient::Sodium));
        assert_eq!(Nutrient::FLOOR_ORDER[0], Nutrient::Calories);
        assert_eq!(Nutrient::FLOOR_ORDER[1], Nutrient::Protein);
    }
}
