pub mod catalog;
pub mod food;
pub mod plan;
pub mod profile;
pub mod template;

pub use catalog::FoodCatalog;
pub use food::{Category, FoodRecord, Nutrient, Nutrients};
pub use plan::{Plan, PlanEntry, Totals};
pub use profile::RequirementProfile;
pub use template::{PlanStyle, PlanTemplate, TemplateEntry};
