use dialoguer::{Confirm, Input, Select};

use crate::error::Result;
use crate::models::{FoodCatalog, Plan};

/// What the user chose in one round of the customize loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomizeAction {
    /// Exclude this food key and regenerate.
    Remove(String),
    /// Drop every exclusion.
    Clear,
    Done,
}

/// Ask which plan item to remove.
///
/// The list offers each distinct food in the plan, a free-text exclusion,
/// clearing all exclusions, and finishing.
pub fn prompt_customize_action(plan: &Plan, catalog: &FoodCatalog) -> Result<CustomizeAction> {
    let items = plan.shopping_list();

    let mut options: Vec<String> = items
        .iter()
        .map(|e| format!("Remove {} ({:.1} servings)", e.food().name, e.servings()))
        .collect();
    options.push("Exclude another food by name".to_string());
    options.push("Clear all exclusions".to_string());
    options.push("Done".to_string());

    let selection = Select::new()
        .with_prompt("Customize the plan")
        .items(&options)
        .default(options.len() - 1)
        .interact()?;

    let action = match selection {
        i if i < items.len() => CustomizeAction::Remove(items[i].key().to_string()),
        i if i == items.len() => match prompt_food(catalog)? {
            Some(key) => CustomizeAction::Remove(key),
            None => return prompt_customize_action(plan, catalog),
        },
        i if i == items.len() + 1 => CustomizeAction::Clear,
        _ => CustomizeAction::Done,
    };

    Ok(action)
}

/// Ask for a food by name, resolving typos with a confirmation.
pub fn prompt_food(catalog: &FoodCatalog) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("Food to exclude (name or key, empty to cancel)")
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let Some(food) = catalog.find_by_name(input) else {
        println!("No matching food found for '{}'", input);
        return Ok(None);
    };

    if food.name.eq_ignore_ascii_case(input) || food.key.eq_ignore_ascii_case(input) {
        return Ok(Some(food.key.clone()));
    }

    let confirm = prompt_yes_no(&format!("Did you mean '{}'?", food.name), true)?;
    Ok(confirm.then(|| food.key.clone()))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
