use std::fmt::Write as _;

use crate::models::{FoodCatalog, FoodRecord, Nutrient, Plan, RequirementProfile};
use crate::planner::Revision;
use crate::state::RestrictionSet;

/// Nutrients shown in the status table, floors first, sodium last.
const STATUS_NUTRIENTS: [Nutrient; 12] = [
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
    Nutrient::Sodium,
];

/// Budget line, e.g. "Within budget ($15.00)" or "Over budget by $1.20".
pub fn budget_status(plan: &Plan, profile: &RequirementProfile) -> String {
    if plan.price() <= profile.price_limit {
        format!("Within budget (${:.2})", profile.price_limit)
    } else {
        format!("Over budget by ${:.2}", plan.price() - profile.price_limit)
    }
}

/// Format a plan: items by category, nutrient status, violations and stats.
pub fn format_plan(plan: &Plan, profile: &RequirementProfile) -> String {
    let mut out = String::new();

    if plan.is_empty() {
        let _ = writeln!(out, "{}: no items.", plan.name());
        return out;
    }

    let _ = writeln!(out, "=== {} ===", plan.name());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total daily cost: ${:.2}  [{}]",
        plan.price(),
        budget_status(plan, profile)
    );
    let _ = writeln!(out);

    let width = plan
        .entries()
        .iter()
        .map(|e| e.food().name.len())
        .max()
        .unwrap_or(10);

    for category in plan.categories() {
        let _ = writeln!(out, "{}", category.title());
        for entry in plan.in_category(category) {
            let food = entry.food();
            let _ = writeln!(
                out,
                "  {:<width$}  {:>4.1} x {:<9} ${:>5.2}  {:>5.0} kcal",
                food.name,
                entry.servings(),
                food.serving,
                entry.cost(),
                entry.calories(),
                width = width
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "--- Nutrition Status ---");
    for nutrient in STATUS_NUTRIENTS {
        let actual = plan.totals().get(nutrient);
        let percent = plan.percent_of(profile, nutrient);
        let limit = profile.floor(nutrient).unwrap_or(profile.sodium_max);
        let mark = if nutrient == Nutrient::Sodium {
            if actual <= limit { "ok" } else { "HIGH" }
        } else if actual >= limit {
            "ok"
        } else {
            "LOW"
        };
        let _ = writeln!(
            out,
            "  {:<10} {:>8.1} / {:>8.1} {:<4} {:>5.0}%  {}",
            nutrient.label(),
            actual,
            limit,
            nutrient.unit(),
            percent,
            mark
        );
    }

    let _ = writeln!(out);
    if plan.meets() {
        let _ = writeln!(out, "All requirements met.");
    } else {
        let _ = writeln!(out, "Unmet requirements:");
        for violation in plan.violations() {
            let _ = writeln!(out, "  - {}", violation.describe());
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "--- Quick Stats ---");
    let _ = writeln!(out, "Total items: {}", plan.len());
    let _ = writeln!(out, "Categories: {}", plan.categories().len());
    let _ = writeln!(out, "Cal/item: {:.0}", plan.calories_per_item());
    let _ = writeln!(out, "Cost/meal: ${:.2}", plan.cost_per_meal());

    out
}

/// Display a plan on stdout.
pub fn display_plan(plan: &Plan, profile: &RequirementProfile) {
    println!();
    print!("{}", format_plan(plan, profile));
    println!();
}

/// Format what a regeneration changed relative to its template.
pub fn format_revision(revision: &Revision, catalog: &FoodCatalog) -> String {
    let name = |key: &str| {
        catalog
            .get(key)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| key.to_string())
    };

    let mut out = String::new();
    for sub in &revision.substitutions {
        let _ = writeln!(
            out,
            "Replaced {} with {} ({:.1} servings)",
            name(sub.original.as_str()),
            name(sub.replacement.as_str()),
            sub.servings
        );
    }
    for key in &revision.dropped {
        let _ = writeln!(
            out,
            "Dropped {} (no alternative in its category)",
            name(key.as_str())
        );
    }
    for key in &revision.top_ups {
        let _ = writeln!(
            out,
            "Added 1 serving of {} to cover a shortfall",
            name(key.as_str())
        );
    }
    out
}

/// Display revision notes, if there are any.
pub fn display_revision(revision: &Revision, catalog: &FoodCatalog) {
    let notes = format_revision(revision, catalog);
    if !notes.is_empty() {
        println!();
        print!("{}", notes);
    }
}

/// Display the excluded foods.
pub fn display_restrictions(restricted: &RestrictionSet, catalog: &FoodCatalog) {
    if restricted.is_empty() {
        println!("No foods excluded.");
        return;
    }

    println!("Excluded foods ({}):", restricted.len());
    for key in restricted.iter() {
        match catalog.get(key) {
            Some(food) => println!("  {} ({})", food.name, key),
            None => println!("  {} (not in catalog)", key),
        }
    }
}

/// Display a simple list of foods with their details.
pub fn display_food_list(foods: &[&FoodRecord], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        println!(
            "  {:<5} {:<18} {:<10} {:<9} {:>4.0} kcal  P:{:<5} ${:.2}",
            food.key,
            food.name,
            food.category,
            food.serving,
            food.calories(),
            food.protein(),
            food.price
        );
    }

    println!();
}
