use crate::models::{PlanEntry, Totals};

/// Sum nutrients and price over entries, each scaled by its servings.
///
/// Total on every input: an empty slice yields all zeros.
pub fn aggregate(entries: &[PlanEntry]) -> Totals {
    entries.iter().fold(Totals::default(), |mut acc, entry| {
        acc.nutrients += entry.food().nutrients * entry.servings();
        acc.price += entry.food().price * entry.servings();
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodCatalog;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(aggregate(&[]), Totals::default());
    }

    #[test]
    fn test_scales_by_servings() {
        let catalog = FoodCatalog::builtin();
        let eggs = catalog.get("P004").unwrap();
        let totals = aggregate(&[PlanEntry::new(eggs, 1.5).unwrap()]);

        assert!((totals.nutrients.calories - 214.5).abs() < 1e-9);
        assert!((totals.nutrients.protein - 18.9).abs() < 1e-9);
        assert!((totals.price - 0.90).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_food_is_additive() {
        let catalog = FoodCatalog::builtin();
        let rice = catalog.get("G001").unwrap();
        let once = aggregate(&[PlanEntry::new(rice, 2.0).unwrap()]);
        let twice = aggregate(&[
            PlanEntry::new(rice, 1.0).unwrap(),
            PlanEntry::new(rice, 1.0).unwrap(),
        ]);

        assert!((once.nutrients.carbs - twice.nutrients.carbs).abs() < 1e-9);
        assert!((once.price - twice.price).abs() < 1e-9);
    }
}
