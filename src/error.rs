use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Food catalog is empty")]
    EmptyCatalog,

    /// No candidate met every requirement within the trial budget.
    #[error("No feasible plan found in {trials} trials")]
    SearchFailure { trials: usize },

    /// Every catalog food is excluded, so no plan can be built.
    #[error("Cannot satisfy current restrictions ({restricted} foods excluded)")]
    InfeasibleRestriction { restricted: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
