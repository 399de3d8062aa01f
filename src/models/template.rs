use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One slot of a template: a catalog key and its serving multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub key: String,
    pub servings: f64,
}

/// Named, ordered list of slots describing a plan style before restrictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTemplate {
    pub name: String,
    pub entries: Vec<TemplateEntry>,
}

impl PlanTemplate {
    pub fn new(name: impl Into<String>, entries: &[(&str, f64)]) -> Self {
        Self {
            name: name.into(),
            entries: entries
                .iter()
                .map(|(key, servings)| TemplateEntry {
                    key: key.to_string(),
                    servings: *servings,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Built-in plan styles over the reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlanStyle {
    #[default]
    Balanced,
    LowCost,
    HighProtein,
}

impl PlanStyle {
    pub fn template(&self) -> PlanTemplate {
        match self {
            PlanStyle::Balanced => PlanTemplate::new(
                "Balanced Plan",
                &[
                    ("G003", 1.0), // Oatmeal
                    ("D001", 0.5), // Milk
                    ("F001", 1.0), // Banana
                    ("O002", 0.5), // Almonds
                    ("G001", 1.0), // Brown Rice
                    ("P001", 1.5), // Chicken Breast
                    ("V001", 2.0), // Broccoli
                    ("V003", 0.5), // Carrots
                    ("P005", 1.0), // Black Beans
                    ("G002", 1.0), // Whole Wheat Bread
                    ("V002", 3.0), // Spinach
                    ("F003", 1.0), // Orange
                    ("P006", 1.0), // Greek Yogurt
                    ("F004", 0.5), // Blueberries
                ],
            ),
            PlanStyle::LowCost => PlanTemplate::new(
                "Low Cost Plan",
                &[
                    ("P004", 2.0),
                    ("P005", 1.5),
                    ("G003", 1.5),
                    ("V003", 2.0),
                    ("F001", 1.0),
                    ("F002", 1.0),
                    ("G001", 1.0),
                    ("V001", 1.5),
                    ("D001", 0.5),
                    ("P006", 0.5),
                ],
            ),
            PlanStyle::HighProtein => PlanTemplate::new(
                "High Protein Plan",
                &[
                    ("P001", 2.0),
                    ("P006", 2.0),
                    ("P004", 3.0),
                    ("P003", 1.0),
                    ("G001", 1.0),
                    ("V001", 2.0),
                    ("F001", 1.0),
                    ("D001", 1.0),
                    ("O002", 1.0),
                ],
            ),
        }
    }
}
