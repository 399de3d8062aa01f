use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{PlannerError, Result};
use crate::models::food::{Category, FoodRecord, Nutrients};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
const NAME_MATCH_THRESHOLD: f64 = 0.8;

/// Immutable, ordered collection of foods with unique keys.
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    foods: Vec<FoodRecord>,
    index: HashMap<String, usize>,
}

impl FoodCatalog {
    /// Build a catalog, rejecting duplicate keys and invalid records.
    pub fn new(foods: Vec<FoodRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(foods.len());
        for (i, food) in foods.iter().enumerate() {
            if !food.is_valid() {
                return Err(PlannerError::InvalidInput(format!(
                    "Invalid food record: {}",
                    food.debug_string()
                )));
            }
            if index.insert(food.key.clone(), i).is_some() {
                return Err(PlannerError::InvalidInput(format!(
                    "Duplicate food key: {}",
                    food.key
                )));
            }
        }
        Ok(Self { foods, index })
    }

    /// Get a food by exact key.
    pub fn get(&self, key: &str) -> Option<&FoodRecord> {
        self.index.get(key).map(|&i| &self.foods[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All foods in catalog order.
    pub fn foods(&self) -> &[FoodRecord] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Categories present, in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for food in &self.foods {
            if !seen.contains(&food.category) {
                seen.push(food.category);
            }
        }
        seen
    }

    /// Foods of one category, in catalog order.
    pub fn in_category(&self, category: Category) -> Vec<&FoodRecord> {
        self.foods
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    /// Exact key, or case-insensitive key or name.
    fn find_exact(&self, query: &str) -> Option<&FoodRecord> {
        if let Some(food) = self.get(query) {
            return Some(food);
        }

        let wanted = query.to_lowercase();
        self.foods
            .iter()
            .find(|f| f.key.to_lowercase() == wanted || f.name.to_lowercase() == wanted)
    }

    /// Resolve user input to a food.
    ///
    /// Tries an exact key, then an exact case-insensitive name, then the best
    /// fuzzy name match. Callers that cannot confirm a fuzzy hit should use
    /// `resolve_exact`.
    pub fn find_by_name(&self, query: &str) -> Option<&FoodRecord> {
        let query = query.trim();
        if let Some(food) = self.find_exact(query) {
            return Some(food);
        }

        let wanted = query.to_lowercase();
        self.foods
            .iter()
            .map(|f| (f, jaro_winkler(&f.name.to_lowercase(), &wanted)))
            .filter(|(_, score)| *score > NAME_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(f, _)| f)
    }

    /// Resolve a key or name without guessing.
    ///
    /// A query that only matches fuzzily is `FoodNotFound`, with the closest
    /// name as a suggestion.
    pub fn resolve_exact(&self, query: &str) -> Result<&FoodRecord> {
        let query = query.trim();
        if let Some(food) = self.find_exact(query) {
            return Ok(food);
        }

        let message = match self.find_by_name(query) {
            Some(close) => format!("{} (did you mean '{}'?)", query, close.name),
            None => query.to_string(),
        };
        Err(PlannerError::FoodNotFound(message))
    }

    /// Reference food table (per-serving values, USD).
    pub fn builtin() -> Self {
        use Category::*;

        #[rustfmt::skip]
        let foods = vec![
            // Proteins
            food("P001", "Chicken Breast", Protein, "100g", [165.0, 31.0, 0.0, 3.6, 0.0, 11.0, 0.7, 256.0, 64.0, 40.0, 0.0, 0.0], 2.50),
            food("P002", "Ground Beef", Protein, "100g", [250.0, 26.0, 0.0, 17.0, 0.0, 12.0, 2.6, 318.0, 68.0, 0.0, 0.0, 0.0], 3.00),
            food("P003", "Salmon", Protein, "100g", [208.0, 20.0, 0.0, 13.0, 0.0, 9.0, 0.5, 363.0, 59.0, 149.0, 0.0, 570.0], 4.50),
            food("P004", "Eggs", Protein, "2 large", [143.0, 12.6, 1.1, 9.5, 0.0, 56.0, 1.8, 138.0, 142.0, 540.0, 0.0, 87.0], 0.60),
            food("P005", "Black Beans", Protein, "1 cup", [227.0, 15.0, 41.0, 1.0, 15.0, 46.0, 3.6, 611.0, 1.0, 0.0, 0.0, 0.0], 1.20),
            food("P006", "Greek Yogurt", Protein, "170g", [100.0, 18.0, 6.0, 0.4, 0.0, 200.0, 0.1, 240.0, 65.0, 150.0, 0.0, 0.0], 1.80),
            food("P007", "Tofu", Protein, "100g", [76.0, 8.0, 2.0, 4.8, 1.0, 350.0, 1.6, 121.0, 7.0, 0.0, 0.0, 0.0], 1.50),
            // Grains
            food("G001", "Brown Rice", Grain, "1 cup", [216.0, 5.0, 45.0, 1.8, 3.5, 20.0, 0.8, 154.0, 10.0, 0.0, 0.0, 0.0], 0.80),
            food("G002", "Whole Wheat Bread", Grain, "2 slices", [160.0, 8.0, 30.0, 2.0, 4.0, 80.0, 2.1, 140.0, 300.0, 0.0, 0.0, 0.0], 0.60),
            food("G003", "Oatmeal", Grain, "1 cup", [166.0, 6.0, 28.0, 3.6, 4.0, 21.0, 1.6, 164.0, 2.0, 0.0, 0.0, 0.0], 0.50),
            food("G004", "Quinoa", Grain, "1 cup", [222.0, 8.0, 39.0, 3.6, 5.0, 31.0, 2.8, 318.0, 13.0, 0.0, 0.0, 0.0], 1.50),
            // Vegetables
            food("V001", "Broccoli", Vegetable, "1 cup", [31.0, 2.6, 6.0, 0.3, 2.4, 43.0, 0.7, 288.0, 30.0, 567.0, 81.0, 0.0], 0.70),
            food("V002", "Spinach", Vegetable, "1 cup", [7.0, 0.9, 1.0, 0.1, 0.7, 30.0, 0.8, 167.0, 24.0, 2813.0, 8.0, 0.0], 0.80),
            food("V003", "Carrots", Vegetable, "1 cup", [52.0, 1.2, 12.0, 0.3, 3.6, 42.0, 0.4, 410.0, 88.0, 21384.0, 7.0, 0.0], 0.50),
            food("V004", "Bell Peppers", Vegetable, "1 cup", [30.0, 1.0, 7.0, 0.3, 2.5, 12.0, 0.5, 211.0, 6.0, 157.0, 120.0, 0.0], 0.90),
            // Fruits
            food("F001", "Banana", Fruit, "1 medium", [105.0, 1.3, 27.0, 0.4, 3.1, 6.0, 0.3, 422.0, 1.0, 76.0, 10.0, 0.0], 0.30),
            food("F002", "Apple", Fruit, "1 medium", [95.0, 0.5, 25.0, 0.3, 4.4, 11.0, 0.2, 195.0, 2.0, 98.0, 8.0, 0.0], 0.40),
            food("F003", "Orange", Fruit, "1 medium", [62.0, 1.2, 15.0, 0.2, 3.1, 52.0, 0.1, 237.0, 0.0, 295.0, 70.0, 0.0], 0.35),
            food("F004", "Blueberries", Fruit, "1 cup", [84.0, 1.1, 21.0, 0.5, 3.6, 9.0, 0.4, 114.0, 1.0, 80.0, 14.0, 0.0], 2.00),
            // Dairy
            food("D001", "Milk (2%)", Dairy, "1 cup", [122.0, 8.0, 12.0, 5.0, 0.0, 293.0, 0.1, 366.0, 100.0, 395.0, 0.0, 120.0], 0.80),
            food("D002", "Cheddar Cheese", Dairy, "1 oz", [113.0, 7.0, 0.4, 9.0, 0.0, 204.0, 0.2, 28.0, 176.0, 300.0, 0.0, 12.0], 0.90),
            // Fats
            food("O001", "Olive Oil", Fat, "1 tbsp", [119.0, 0.0, 0.0, 14.0, 0.0, 0.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0], 0.40),
            food("O002", "Almonds", Fat, "1 oz", [164.0, 6.0, 6.0, 14.0, 3.5, 76.0, 1.1, 208.0, 0.0, 0.0, 0.0, 0.0], 0.70),
        ];

        let index = foods
            .iter()
            .enumerate()
            .map(|(i, f)| (f.key.clone(), i))
            .collect();
        Self { foods, index }
    }
}

/// Values in field order: calories, protein, carbs, fat, fiber, calcium,
/// iron, potassium, sodium, vitamin A, vitamin C, vitamin D.
fn food(
    key: &str,
    name: &str,
    category: Category,
    serving: &str,
    v: [f64; 12],
    price: f64,
) -> FoodRecord {
    FoodRecord {
        key: key.to_string(),
        name: name.to_string(),
        category,
        serving: serving.to_string(),
        nutrients: Nutrients {
            calories: v[0],
            protein: v[1],
            carbs: v[2],
            fat: v[3],
            fiber: v[4],
            calcium: v[5],
            iron: v[6],
            potassium: v[7],
            sodium: v[8],
            vitamin_a: v[9],
            vitamin_c: v[10],
            vitamin_d: v[11],
        },
        price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = FoodCatalog::builtin();
        assert_eq!(catalog.len(), 23);
        assert_eq!(catalog.categories(), Category::ALL.to_vec());
        assert_eq!(catalog.in_category(Category::Dairy).len(), 2);
    }

    #[test]
    fn test_builtin_passes_validation() {
        let catalog = FoodCatalog::builtin();
        assert!(FoodCatalog::new(catalog.foods().to_vec()).is_ok());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let catalog = FoodCatalog::builtin();
        let mut foods = catalog.foods().to_vec();
        foods.push(foods[0].clone());

        let err = FoodCatalog::new(foods).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_record_rejected() {
        let mut bad = FoodCatalog::builtin().foods()[0].clone();
        bad.price = -1.0;
        assert!(FoodCatalog::new(vec![bad]).is_err());
    }

    #[test]
    fn test_find_by_name() {
        let catalog = FoodCatalog::builtin();
        assert_eq!(catalog.find_by_name("P004").unwrap().name, "Eggs");
        assert_eq!(catalog.find_by_name("p004").unwrap().name, "Eggs");
        assert_eq!(catalog.find_by_name("chicken breast").unwrap().key, "P001");
        assert_eq!(catalog.find_by_name("Brocoli").unwrap().key, "V001");
        assert!(catalog.find_by_name("xyzzy").is_none());
    }

    #[test]
    fn test_resolve_exact_accepts_keys_and_names() {
        let catalog = FoodCatalog::builtin();
        assert_eq!(catalog.resolve_exact("G003").unwrap().name, "Oatmeal");
        assert_eq!(catalog.resolve_exact(" oatmeal ").unwrap().key, "G003");
        assert_eq!(catalog.resolve_exact("milk (2%)").unwrap().key, "D001");
    }

    #[test]
    fn test_resolve_exact_rejects_near_misses() {
        let catalog = FoodCatalog::builtin();

        let err = catalog.resolve_exact("Oat milk").unwrap_err();
        match err {
            PlannerError::FoodNotFound(message) => {
                assert_eq!(message, "Oat milk (did you mean 'Oatmeal'?)");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(matches!(
            catalog.resolve_exact("chicken thigh"),
            Err(PlannerError::FoodNotFound(_))
        ));
        assert!(matches!(
            catalog.resolve_exact("xyzzy"),
            Err(PlannerError::FoodNotFound(ref message)) if message == "xyzzy"
        ));
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let catalog = FoodCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.categories().is_empty());
    }
}
