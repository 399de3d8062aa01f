use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use meal_planner_rs::cli::{Cli, Command, ExportFormat};
use meal_planner_rs::error::{PlannerError, Result};
use meal_planner_rs::interface::{
    display_food_list, display_plan, display_restrictions, display_revision, plan_to_text,
    prompt_customize_action, prompt_yes_no, write_plan_csv, write_plan_json,
    write_shopping_list_csv, CustomizeAction,
};
use meal_planner_rs::logging::init_logging;
use meal_planner_rs::models::{Category, FoodCatalog, PlanStyle, RequirementProfile};
use meal_planner_rs::planner::{
    regenerate, regenerate_seeded, search_excluding, search_or_fallback, Outcome,
    RegenerateConfig, Revision, SearchConfig, SubstitutionPolicy,
};
use meal_planner_rs::state::{
    load_catalog, load_profile, load_restrictions, save_restrictions, RestrictionSet,
};

/// Inputs shared by every subcommand.
struct Context {
    catalog: FoodCatalog,
    profile: RequirementProfile,
    session: PathBuf,
    seed: u64,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)?,
        None => FoodCatalog::builtin(),
    };
    let mut profile = match &cli.profile {
        Some(path) => load_profile(path)?,
        None => RequirementProfile::default(),
    };
    if let Some(budget) = cli.budget {
        profile = profile.with_budget(budget);
        profile.validate()?;
    }
    debug!(foods = catalog.len(), budget = profile.price_limit, "inputs loaded");

    let ctx = Context {
        catalog,
        profile,
        session: cli.session,
        seed: cli.seed,
    };

    match cli.command.unwrap_or_default() {
        Command::Plan {
            style,
            exclude,
            substitution,
        } => cmd_plan(&ctx, style, &exclude, substitution),
        Command::Search {
            trials,
            exclude,
            no_fallback,
        } => cmd_search(&ctx, trials, &exclude, no_fallback),
        Command::Customize {
            style,
            substitution,
        } => cmd_customize(&ctx, style, substitution),
        Command::Foods { category } => cmd_foods(&ctx, category.as_deref()),
        Command::Export {
            style,
            exclude,
            format,
            output,
            shopping_list,
        } => cmd_export(&ctx, style, &exclude, format, output.as_deref(), shopping_list),
        Command::Restrictions => cmd_restrictions(&ctx),
        Command::Reset => cmd_reset(&ctx),
    }
}

/// Session restrictions plus the foods named on the command line.
///
/// Names must match a key or a food name exactly (ignoring case); the result
/// is not saved.
fn active_restrictions(ctx: &Context, exclude: &[String]) -> Result<RestrictionSet> {
    let mut restricted = load_restrictions(&ctx.session)?;

    for name in exclude {
        let food = ctx.catalog.resolve_exact(name)?;
        debug!(query = %name, key = %food.key, "excluding for this run");
        restricted.insert(food.key.clone());
    }

    Ok(restricted)
}

fn build_plan<'a>(
    ctx: &'a Context,
    style: PlanStyle,
    restricted: &RestrictionSet,
    substitution: SubstitutionPolicy,
) -> Result<Revision<'a>> {
    let config = RegenerateConfig {
        substitution,
        ..Default::default()
    };
    regenerate_seeded(
        &style.template(),
        &ctx.catalog,
        restricted,
        &ctx.profile,
        &config,
        ctx.seed,
    )
}

/// Show a template plan under the current restrictions.
fn cmd_plan(
    ctx: &Context,
    style: PlanStyle,
    exclude: &[String],
    substitution: SubstitutionPolicy,
) -> Result<()> {
    let restricted = active_restrictions(ctx, exclude)?;
    let revision = build_plan(ctx, style, &restricted, substitution)?;

    display_plan(&revision.plan, &ctx.profile);
    display_revision(&revision, &ctx.catalog);
    Ok(())
}

/// Search for the cheapest feasible plan.
fn cmd_search(ctx: &Context, trials: usize, exclude: &[String], no_fallback: bool) -> Result<()> {
    let restricted = active_restrictions(ctx, exclude)?;
    let config = SearchConfig::default().with_trials(trials);
    let mut rng = StdRng::seed_from_u64(ctx.seed);

    println!("Searching {} candidate plans...", trials);

    if no_fallback {
        let plan = search_excluding(&ctx.catalog, &restricted, &ctx.profile, &config, &mut rng)?;
        display_plan(&plan, &ctx.profile);
        return Ok(());
    }

    let outcome = search_or_fallback(
        &ctx.catalog,
        &restricted,
        &ctx.profile,
        &config,
        &PlanStyle::Balanced.template(),
        &RegenerateConfig::default(),
        &mut rng,
    )?;

    if let Outcome::Fallback(revision) = &outcome {
        println!("No plan met every requirement; showing the balanced plan instead.");
        display_revision(revision, &ctx.catalog);
    }
    display_plan(outcome.plan(), &ctx.profile);
    Ok(())
}

/// Interactive loop: remove foods, regenerate, repeat.
fn cmd_customize(ctx: &Context, style: PlanStyle, substitution: SubstitutionPolicy) -> Result<()> {
    let template = style.template();
    let config = RegenerateConfig {
        substitution,
        ..Default::default()
    };
    let original = load_restrictions(&ctx.session)?;
    let mut restricted = original.clone();
    let mut rng = StdRng::seed_from_u64(ctx.seed);

    loop {
        let revision = match regenerate(
            &template,
            &ctx.catalog,
            &restricted,
            &ctx.profile,
            &config,
            &mut rng,
        ) {
            Ok(revision) => revision,
            Err(e @ PlannerError::InfeasibleRestriction { .. }) if !restricted.is_empty() => {
                println!("{}", e);
                if prompt_yes_no("Clear all exclusions and start over?", true)? {
                    restricted.clear();
                    continue;
                }
                break;
            }
            Err(e) => return Err(e),
        };

        display_plan(&revision.plan, &ctx.profile);
        display_revision(&revision, &ctx.catalog);
        display_restrictions(&restricted, &ctx.catalog);

        match prompt_customize_action(&revision.plan, &ctx.catalog)? {
            CustomizeAction::Remove(key) => {
                if !restricted.insert(key.clone()) {
                    println!("{} is already excluded.", key);
                }
            }
            CustomizeAction::Clear => restricted.clear(),
            CustomizeAction::Done => break,
        }
    }

    if restricted != original && prompt_yes_no("Save exclusions for next time?", true)? {
        save_restrictions(&ctx.session, &restricted)?;
        println!("Exclusions saved to {}.", ctx.session.display());
    }

    Ok(())
}

/// List catalog foods, optionally for one category.
fn cmd_foods(ctx: &Context, category: Option<&str>) -> Result<()> {
    match category {
        Some(name) => {
            let category: Category = name.parse()?;
            let foods = ctx.catalog.in_category(category);
            display_food_list(&foods, category.title());
        }
        None => {
            let foods: Vec<_> = ctx.catalog.foods().iter().collect();
            display_food_list(&foods, "All Foods");
        }
    }
    Ok(())
}

/// Write a plan or its shopping list to a file or stdout.
fn cmd_export(
    ctx: &Context,
    style: PlanStyle,
    exclude: &[String],
    format: ExportFormat,
    output: Option<&Path>,
    shopping_list: bool,
) -> Result<()> {
    if shopping_list && format == ExportFormat::Json {
        return Err(PlannerError::InvalidInput(
            "The shopping list can be exported as CSV or text".to_string(),
        ));
    }

    let restricted = active_restrictions(ctx, exclude)?;
    let revision = build_plan(ctx, style, &restricted, SubstitutionPolicy::default())?;
    let plan = &revision.plan;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    match (format, shopping_list) {
        (ExportFormat::Csv, false) => write_plan_csv(plan, &mut writer)?,
        (ExportFormat::Csv, true) => write_shopping_list_csv(plan, &mut writer)?,
        (ExportFormat::Json, _) => write_plan_json(plan, &mut writer)?,
        (ExportFormat::Text, false) => writeln!(writer, "{}", plan_to_text(plan))?,
        (ExportFormat::Text, true) => {
            writeln!(writer, "Shopping List")?;
            for item in plan.shopping_list() {
                writeln!(
                    writer,
                    "- {} x {:.1} (${:.2})",
                    item.food().name,
                    item.servings(),
                    item.cost()
                )?;
            }
        }
    }
    writer.flush()?;

    if let Some(path) = output {
        eprintln!("Exported {} to {}", plan.name(), path.display());
    }
    Ok(())
}

fn cmd_restrictions(ctx: &Context) -> Result<()> {
    let restricted = load_restrictions(&ctx.session)?;
    display_restrictions(&restricted, &ctx.catalog);
    Ok(())
}

/// Clear the persisted restriction set.
fn cmd_reset(ctx: &Context) -> Result<()> {
    let mut restricted = load_restrictions(&ctx.session)?;
    let count = restricted.len();
    restricted.clear();
    save_restrictions(&ctx.session, &restricted)?;

    println!("Cleared {} exclusions.", count);
    Ok(())
}
