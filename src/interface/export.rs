use std::fmt::Write as _;
use std::io;

use crate::error::Result;
use crate::models::Plan;

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write plan entries as CSV, one row per entry.
pub fn write_plan_csv<W: io::Write>(plan: &Plan, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "key", "name", "category", "servings", "serving", "cost", "calories",
    ])?;

    for entry in plan.entries() {
        let food = entry.food();
        wtr.write_record([
            food.key.clone(),
            food.name.clone(),
            food.category.to_string(),
            format!("{:.2}", entry.servings()),
            food.serving.clone(),
            format!("{:.2}", entry.cost()),
            format!("{:.0}", entry.calories()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the shopping list (servings merged by food) as CSV.
pub fn write_shopping_list_csv<W: io::Write>(plan: &Plan, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["name", "servings", "serving", "cost"])?;

    for item in plan.shopping_list() {
        wtr.write_record([
            item.food().name.clone(),
            format!("{:.1}", item.servings()),
            item.food().serving.clone(),
            format!("{:.2}", item.cost()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the plan, totals and violations as pretty JSON.
pub fn write_plan_json<W: io::Write>(plan: &Plan, mut writer: W) -> Result<()> {
    let totals = plan.totals();
    let json = serde_json::json!({
        "name": plan.name(),
        "meets_requirements": plan.meets(),
        "price": truncate(totals.price, 2),
        "entries": plan.entries().iter().map(|e| {
            serde_json::json!({
                "key": e.key(),
                "name": e.food().name,
                "servings": truncate(e.servings(), 3),
                "cost": truncate(e.cost(), 2),
            })
        }).collect::<Vec<_>>(),
        "totals": totals.nutrients,
        "violations": plan.violations().iter().map(|v| v.describe()).collect::<Vec<_>>(),
    });

    serde_json::to_writer_pretty(&mut writer, &json)?;
    writeln!(writer)?;
    Ok(())
}

/// Plain-text plan summary for pasting elsewhere.
pub fn plan_to_text(plan: &Plan) -> String {
    let mut text = format!("{}\n\n", plan.name());
    for entry in plan.entries() {
        let _ = writeln!(
            text,
            "- {}: {:.1} serving(s) (${:.2})",
            entry.food().name,
            entry.servings(),
            entry.cost()
        );
    }
    let _ = write!(text, "\nTotal Cost: ${:.2}", plan.price());
    text
}
