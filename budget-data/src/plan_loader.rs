//! TOML loader for budget plans.
//!
//! ```toml
//! name = "Main"
//! yearly_salary = 80000
//! bonus_type = "percentage"    # none | fixed | percentage
//! bonus_value = 10
//!
//! [[expenses]]
//! name = "Rent"
//! amount = 2000
//!
//! [[expenses]]
//! name = "Groceries"
//! amount = "$150.00"
//! frequency = "biweekly"       # monthly (default) | biweekly
//!
//! [[investments]]
//! account = "TFSA"             # TFSA | RRSP | FHSA | NON_REGISTERED
//! amount = 500
//! ```
//!
//! Amounts may be integers, floats or strings; strings accept `$` and comma
//! thousands separators. The income is checked against [`IncomeLimits`]
//! before a plan is returned.

use std::path::Path;

use budget_core::{
    BonusKind, BudgetPlan, Frequency, IncomeDescription, IncomeLimits, IncomeValidationError,
    InvestmentAccount, InvestmentContribution, RecurringExpense,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::amount::deserialize_amount;

/// Longest plan name accepted, in characters.
pub const MAX_PLAN_NAME_LEN: usize = 64;

/// Errors that can occur when loading a plan.
#[derive(Debug, Error)]
pub enum PlanLoaderError {
    #[error("failed to read plan: {0}")]
    Io(#[from] std::io::Error),

    #[error("plan parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("plan name must not be empty")]
    EmptyName,

    #[error("plan name has {len} characters; at most {max} are allowed")]
    NameTooLong { len: usize, max: usize },

    #[error(transparent)]
    Income(#[from] IncomeValidationError),

    #[error("unknown frequency '{value}' for {item}")]
    UnknownFrequency { item: String, value: String },

    #[error("unknown investment account '{0}'")]
    UnknownAccount(String),

    #[error("amount for {item} must be non-negative, got {amount}")]
    NegativeAmount { item: String, amount: Decimal },
}

// ---------------------------------------------------------------------------
// Serde-compatible document that mirrors the TOML layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanDocument {
    name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    yearly_salary: Decimal,
    #[serde(default)]
    bonus_type: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    bonus_value: Decimal,
    #[serde(default)]
    expenses: Vec<ExpenseEntry>,
    #[serde(default)]
    investments: Vec<InvestmentEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExpenseEntry {
    name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    amount: Decimal,
    frequency: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InvestmentEntry {
    account: String,
    #[serde(deserialize_with = "deserialize_amount")]
    amount: Decimal,
    frequency: Option<String>,
}

/// Loader for budget plans, holding the product ceilings to enforce.
#[derive(Debug, Clone, Default)]
pub struct PlanLoader {
    limits: IncomeLimits,
}

impl PlanLoader {
    pub fn new(limits: IncomeLimits) -> Self {
        Self { limits }
    }

    /// Parse and validate a plan from TOML text.
    pub fn parse_str(
        &self,
        input: &str,
    ) -> Result<BudgetPlan, PlanLoaderError> {
        let document: PlanDocument = toml::from_str(input)?;

        let plan = self
            .convert(document)
            .inspect_err(|e| warn!(error = %e, "rejected plan"))?;

        debug!(
            plan = %plan.name,
            expenses = plan.expenses.len(),
            investments = plan.investments.len(),
            "loaded plan"
        );
        Ok(plan)
    }

    /// Read a file from disk and delegate to [`PlanLoader::parse_str`].
    pub fn load_file(
        &self,
        path: &Path,
    ) -> Result<BudgetPlan, PlanLoaderError> {
        let contents = std::fs::read_to_string(path)?;
        self.parse_str(&contents)
    }

    fn convert(
        &self,
        document: PlanDocument,
    ) -> Result<BudgetPlan, PlanLoaderError> {
        let name = document.name.trim().to_string();
        if name.is_empty() {
            return Err(PlanLoaderError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_PLAN_NAME_LEN {
            return Err(PlanLoaderError::NameTooLong {
                len,
                max: MAX_PLAN_NAME_LEN,
            });
        }

        let bonus = BonusKind::from_parts(&document.bonus_type, document.bonus_value)?;
        let income = IncomeDescription::new(document.yearly_salary, bonus);
        income.validate(&self.limits)?;

        let expenses = document
            .expenses
            .into_iter()
            .map(|entry| {
                let frequency = parse_frequency(&entry.name, entry.frequency.as_deref())?;
                non_negative(&entry.name, entry.amount)?;
                Ok(RecurringExpense {
                    name: entry.name,
                    amount: entry.amount,
                    frequency,
                })
            })
            .collect::<Result<Vec<_>, PlanLoaderError>>()?;

        let investments = document
            .investments
            .into_iter()
            .map(|entry| {
                let account = InvestmentAccount::parse(&entry.account)
                    .ok_or_else(|| PlanLoaderError::UnknownAccount(entry.account.clone()))?;
                let frequency = parse_frequency(account.as_str(), entry.frequency.as_deref())?;
                non_negative(account.as_str(), entry.amount)?;
                Ok(InvestmentContribution {
                    account,
                    amount: entry.amount,
                    frequency,
                })
            })
            .collect::<Result<Vec<_>, PlanLoaderError>>()?;

        Ok(BudgetPlan {
            name,
            income,
            expenses,
            investments,
        })
    }
}

fn parse_frequency(
    item: &str,
    value: Option<&str>,
) -> Result<Frequency, PlanLoaderError> {
    match value {
        None => Ok(Frequency::default()),
        Some(value) => Frequency::parse(value).ok_or_else(|| PlanLoaderError::UnknownFrequency {
            item: item.to_string(),
            value: value.to_string(),
        }),
    }
}

fn non_negative(
    item: &str,
    amount: Decimal,
) -> Result<(), PlanLoaderError> {
    if amount < Decimal::ZERO {
        return Err(PlanLoaderError::NegativeAmount {
            item: item.to_string(),
            amount,
        });
    }
    Ok(())
}
