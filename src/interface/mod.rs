pub mod export;
pub mod prompts;
pub mod render;

pub use export::{plan_to_text, write_plan_csv, write_plan_json, write_shopping_list_csv};
pub use prompts::{prompt_customize_action, prompt_food, prompt_yes_no, CustomizeAction};
pub use render::{
    budget_status, display_food_list, display_plan, display_restrictions, display_revision,
    format_plan, format_revision,
};
