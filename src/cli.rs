use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::models::PlanStyle;
use crate::planner::{SubstitutionPolicy, DEFAULT_TRIALS};

/// Meal planner: cheapest plans that meet daily nutrient requirements.
#[derive(Parser, Debug)]
#[command(name = "meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// JSON food catalog to use instead of the built-in table.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// JSON requirement profile; missing fields take the defaults.
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    /// Daily budget in USD, overriding the profile.
    #[arg(long, global = true)]
    pub budget: Option<f64>,

    /// Path to the persisted restriction set.
    #[arg(short, long, default_value = "restrictions.json", global = true)]
    pub session: PathBuf,

    /// Seed for the random source.
    #[arg(long, default_value_t = 42, global = true)]
    pub seed: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a plan from a template, honouring restrictions.
    Plan {
        #[arg(long, value_enum, default_value_t)]
        style: PlanStyle,

        /// Foods to exclude for this run (name or key, repeatable).
        #[arg(short = 'x', long)]
        exclude: Vec<String>,

        #[arg(long, value_enum, default_value_t)]
        substitution: SubstitutionPolicy,
    },

    /// Sample random plans and keep the cheapest feasible one.
    Search {
        #[arg(short, long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,

        /// Foods to exclude for this run (name or key, repeatable).
        #[arg(short = 'x', long)]
        exclude: Vec<String>,

        /// Report a failed search instead of falling back to the balanced plan.
        #[arg(long)]
        no_fallback: bool,
    },

    /// Remove foods interactively and regenerate after each change.
    Customize {
        #[arg(long, value_enum, default_value_t)]
        style: PlanStyle,

        #[arg(long, value_enum, default_value_t)]
        substitution: SubstitutionPolicy,
    },

    /// List catalog foods.
    Foods {
        /// Only show one category (protein, grain, vegetable, ...).
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Export a plan as CSV, JSON or text.
    Export {
        #[arg(long, value_enum, default_value_t)]
        style: PlanStyle,

        /// Foods to exclude for this run (name or key, repeatable).
        #[arg(short = 'x', long)]
        exclude: Vec<String>,

        #[arg(short, long, value_enum, default_value_t)]
        format: ExportFormat,

        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export the merged shopping list instead of plan entries.
        #[arg(long)]
        shopping_list: bool,
    },

    /// Show the persisted restriction set.
    Restrictions,

    /// Clear the persisted restriction set.
    Reset,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            style: PlanStyle::default(),
            exclude: Vec::new(),
            substitution: SubstitutionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_balanced_plan() {
        let cli = Cli::parse_from(["meal_planner"]);
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.command.unwrap_or_default(),
            Command::Plan {
                style: PlanStyle::Balanced,
                ..
            }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "meal_planner",
            "search",
            "--trials",
            "50",
            "--seed",
            "7",
            "--budget",
            "12.5",
            "-vv",
        ]);
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.budget, Some(12.5));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Some(Command::Search {
                trials: 50,
                no_fallback: false,
                ..
            })
        ));
    }

    #[test]
    fn test_repeated_excludes() {
        let cli = Cli::parse_from([
            "meal_planner",
            "plan",
            "--style",
            "low-cost",
            "-x",
            "chicken breast",
            "-x",
            "D001",
        ]);
        match cli.command {
            Some(Command::Plan { style, exclude, .. }) => {
                assert_eq!(style, PlanStyle::LowCost);
                assert_eq!(exclude, vec!["chicken breast", "D001"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
