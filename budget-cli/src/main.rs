use std::path::PathBuf;

use anyhow::Result;
use budget_cli::app;
use budget_cli::report::{BreakdownReport, SummaryReport, YearsReport};
use budget_core::IncomeLimits;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Net income and monthly budget calculator (Canada federal + Ontario).
///
/// Uses the built-in 2026 tax table unless another table file is given.
#[derive(Debug, Parser)]
#[command(name = "budget", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command that needs a tax table.
#[derive(Debug, clap::Args)]
struct TableArgs {
    /// Tax year to use. Defaults to the latest available table.
    #[arg(long)]
    year: Option<i32>,

    /// TOML file with an additional (or replacement) tax-year table.
    #[arg(long)]
    table: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Break down a yearly salary and optional bonus.
    Breakdown {
        /// Yearly salary, e.g. `80000` or `"$80,000"`.
        #[arg(long)]
        salary: String,

        /// How the bonus is expressed: none, fixed or percentage.
        #[arg(long, default_value = "none")]
        bonus_type: String,

        /// Bonus amount, or percentage points of salary.
        #[arg(long, default_value = "0")]
        bonus: String,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Break down a known gross annual income.
    Gross {
        /// Gross annual income.
        #[arg(long)]
        amount: String,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Summarize the monthly cash flow of one or more plans.
    Summary {
        /// Plan file (TOML). Repeat to compare up to five plans.
        #[arg(long = "plan", required = true)]
        plans: Vec<PathBuf>,

        /// Extra expenses and investments (CSV), for a single plan.
        #[arg(long)]
        entries: Option<PathBuf>,

        #[command(flatten)]
        table: TableArgs,
    },

    /// List the tax years with a table.
    Years {
        /// TOML file with an additional tax-year table.
        #[arg(long)]
        table: Option<PathBuf>,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");
    let limits = IncomeLimits::default();

    match cli.command {
        Command::Breakdown {
            salary,
            bonus_type,
            bonus,
            table,
        } => {
            let registry = app::build_registry(table.table.as_deref())?;
            let tax_table = app::select_table(&registry, table.year)?;
            let income = app::income_from_args(&salary, &bonus_type, &bonus, &limits)?;

            info!(tax_year = tax_table.tax_year, "computing breakdown");
            let breakdown = app::breakdown(&tax_table, &income);
            println!("{}", BreakdownReport::new(&tax_table, &breakdown));
        }
        Command::Gross { amount, table } => {
            let registry = app::build_registry(table.table.as_deref())?;
            let tax_table = app::select_table(&registry, table.year)?;

            info!(tax_year = tax_table.tax_year, "computing breakdown from gross");
            let breakdown = app::breakdown_from_gross(&tax_table, &amount)?;
            println!("{}", BreakdownReport::new(&tax_table, &breakdown));
        }
        Command::Summary {
            plans,
            entries,
            table,
        } => {
            let registry = app::build_registry(table.table.as_deref())?;
            let tax_table = app::select_table(&registry, table.year)?;
            let plans = app::load_plans(&plans, entries.as_deref(), limits)?;

            for (idx, plan) in plans.iter().enumerate() {
                info!(tax_year = tax_table.tax_year, plan = %plan.name, "summarizing plan");
                let summary = app::summarize(plan, &tax_table);
                if idx > 0 {
                    println!();
                }
                println!(
                    "{}",
                    SummaryReport {
                        table: &tax_table,
                        summary: &summary,
                    }
                );
            }
        }
        Command::Years { table } => {
            let registry = app::build_registry(table.as_deref())?;
            println!(
                "{}",
                YearsReport {
                    years: registry.available_years(),
                }
            );
        }
    }

    Ok(())
}
