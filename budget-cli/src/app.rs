//! Application-layer glue between the command line and the core crates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use budget_core::{
    BonusKind, BudgetPlan, IncomeBreakdown, IncomeDescription, IncomeLimits, IncomeTaxCalculator,
    MAX_PLANS_PER_USER, PlanSummary, TaxTableRegistry, TaxYearTable, summarize_plan,
};
use budget_data::{PlanLoader, TaxTableLoader, entries, parse_decimal};
use tracing::{debug, info};

/// Builds the registry of tax tables: the built-in year plus an optional
/// table file, which replaces the built-in one when it covers the same year.
pub fn build_registry(table_file: Option<&Path>) -> Result<TaxTableRegistry> {
    let mut registry = TaxTableRegistry::with_builtin();

    if let Some(path) = table_file {
        let table = TaxTableLoader::load_file(path)
            .with_context(|| format!("Failed to load tax table: {}", path.display()))?;
        registry.register(table)?;
    }

    debug!(years = ?registry.available_years(), "tax tables ready");
    Ok(registry)
}

/// Picks the table for `year`, or the latest registered table.
pub fn select_table(
    registry: &TaxTableRegistry,
    year: Option<i32>,
) -> Result<Arc<TaxYearTable>> {
    match year {
        Some(year) => Ok(registry.get(year)?),
        None => registry.latest().context("No tax tables are registered"),
    }
}

/// Parses and validates income flags against the product ceilings.
pub fn income_from_args(
    salary: &str,
    bonus_type: &str,
    bonus: &str,
    limits: &IncomeLimits,
) -> Result<IncomeDescription> {
    let salary = parse_decimal(salary).context("Invalid salary")?;
    let bonus = parse_decimal(bonus).context("Invalid bonus")?;

    let income = IncomeDescription::new(salary, BonusKind::from_parts(bonus_type, bonus)?);
    income.validate(limits)?;
    Ok(income)
}

pub fn breakdown(
    table: &TaxYearTable,
    income: &IncomeDescription,
) -> IncomeBreakdown {
    IncomeTaxCalculator::new(table).calculate(income)
}

/// Breakdown for a gross amount given on the command line.
pub fn breakdown_from_gross(
    table: &TaxYearTable,
    amount: &str,
) -> Result<IncomeBreakdown> {
    let gross = parse_decimal(amount).context("Invalid gross amount")?;
    Ok(IncomeTaxCalculator::new(table).calculate_from_gross(gross))
}

/// Loads a plan, appending any entries from a CSV file.
pub fn load_plan(
    plan_file: &Path,
    entries_file: Option<&Path>,
    limits: IncomeLimits,
) -> Result<BudgetPlan> {
    let mut plan = PlanLoader::new(limits)
        .load_file(plan_file)
        .with_context(|| format!("Failed to load plan: {}", plan_file.display()))?;

    if let Some(path) = entries_file {
        let items = entries::load_from_file(path)
            .with_context(|| format!("Failed to load entries: {}", path.display()))?;
        info!(
            expenses = items.expenses.len(),
            investments = items.investments.len(),
            "adding entries from {}",
            path.display()
        );
        items.append_to(&mut plan);
    }

    Ok(plan)
}

/// Loads up to [`MAX_PLANS_PER_USER`] plans for side-by-side summaries.
///
/// Extra entries can only be attached when a single plan is given.
pub fn load_plans(
    plan_files: &[PathBuf],
    entries_file: Option<&Path>,
    limits: IncomeLimits,
) -> Result<Vec<BudgetPlan>> {
    if plan_files.is_empty() {
        bail!("At least one plan file is required");
    }
    if plan_files.len() > MAX_PLANS_PER_USER {
        bail!(
            "At most {MAX_PLANS_PER_USER} plans can be summarized, got {}",
            plan_files.len()
        );
    }
    if entries_file.is_some() && plan_files.len() > 1 {
        bail!("Entries can only be added to a single plan");
    }

    plan_files
        .iter()
        .map(|path| load_plan(path, entries_file, limits))
        .collect()
}

pub fn summarize(
    plan: &BudgetPlan,
    table: &TaxYearTable,
) -> PlanSummary {
    summarize_plan(plan, table)
}
