//! CSV loader for recurring expenses and investment contributions.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed of surrounding whitespace.
//!
//! | Column      | Required | Notes |
//! |-------------|----------|-------|
//! | `category`  | yes      | `expense` or `investment` |
//! | `name`      | yes      | Label for expenses; optional for investments |
//! | `amount`    | yes      | Non-negative; `$` and comma separators allowed |
//! | `frequency` | no       | `monthly` (default when empty) or `biweekly` |
//! | `account`   | no       | Required for investments: `TFSA`, `RRSP`, `FHSA`, `NON_REGISTERED` |
//!
//! ### Example
//!
//! ```csv
//! category,name,amount,frequency,account
//! expense,Rent,"2,000.00",monthly,
//! expense,Groceries,150,biweekly,
//! investment,Retirement,250,biweekly,RRSP
//! ```

use std::path::Path;

use budget_core::{
    BudgetPlan, Frequency, InvestmentAccount, InvestmentContribution, RecurringExpense,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::amount::{ParseDecimalError, parse_decimal};

#[derive(Debug, Deserialize)]
struct CsvRow {
    category: String,
    #[serde(default)]
    name: String,
    amount: String,
    #[serde(default)]
    frequency: String,
    #[serde(default)]
    account: String,
}

/// Errors that can occur while loading line items.
///
/// Row numbers are 1-based and count data rows only (the header is row 0).
#[derive(Debug, thiserror::Error)]
pub enum EntryLoadError {
    #[error("failed to read entries: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV itself is malformed: bad quoting, a missing required column or
    /// a row with the wrong number of fields.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised category '{category}' on row {row}")]
    UnknownCategory { category: String, row: usize },

    #[error("invalid amount on row {row}: {source}")]
    InvalidAmount {
        row: usize,
        #[source]
        source: ParseDecimalError,
    },

    #[error("negative amount {amount} on row {row}")]
    NegativeAmount { amount: Decimal, row: usize },

    #[error("unrecognised frequency '{frequency}' on row {row}")]
    UnknownFrequency { frequency: String, row: usize },

    #[error("investment on row {row} has no account")]
    MissingAccount { row: usize },

    #[error("unrecognised account '{account}' on row {row}")]
    UnknownAccount { account: String, row: usize },
}

/// Expenses and investments read from one file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItems {
    pub expenses: Vec<RecurringExpense>,
    pub investments: Vec<InvestmentContribution>,
}

impl LineItems {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.investments.is_empty()
    }

    /// Appends these items after the plan's own entries.
    pub fn append_to(
        self,
        plan: &mut BudgetPlan,
    ) {
        plan.expenses.extend(self.expenses);
        plan.investments.extend(self.investments);
    }
}

enum LineItem {
    Expense(RecurringExpense),
    Investment(InvestmentContribution),
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LineItem, EntryLoadError> {
    let amount = parse_decimal(&row.amount).map_err(|source| EntryLoadError::InvalidAmount {
        row: row_number,
        source,
    })?;
    if amount < Decimal::ZERO {
        return Err(EntryLoadError::NegativeAmount {
            amount,
            row: row_number,
        });
    }

    let frequency = if row.frequency.is_empty() {
        Frequency::default()
    } else {
        Frequency::parse(&row.frequency).ok_or_else(|| EntryLoadError::UnknownFrequency {
            frequency: row.frequency.clone(),
            row: row_number,
        })?
    };

    match row.category.to_ascii_lowercase().as_str() {
        "expense" => Ok(LineItem::Expense(RecurringExpense {
            name: row.name,
            amount,
            frequency,
        })),
        "investment" => {
            if row.account.is_empty() {
                return Err(EntryLoadError::MissingAccount { row: row_number });
            }
            let account = InvestmentAccount::parse(&row.account).ok_or_else(|| {
                EntryLoadError::UnknownAccount {
                    account: row.account.clone(),
                    row: row_number,
                }
            })?;
            Ok(LineItem::Investment(InvestmentContribution {
                account,
                amount,
                frequency,
            }))
        }
        _ => Err(EntryLoadError::UnknownCategory {
            category: row.category,
            row: row_number,
        }),
    }
}

/// Parse CSV text and split the rows into expenses and investments.
///
/// # Errors
///
/// * [`EntryLoadError::Parse`] if the CSV is structurally invalid.
/// * Any row-level variant, naming the first offending row.
pub fn load_from_str(input: &str) -> Result<LineItems, EntryLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let mut items = LineItems::default();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row_number = idx + 1;
        let item = result
            .map_err(EntryLoadError::from)
            .and_then(|row| convert_row(row, row_number))
            .inspect_err(|e| warn!(row = row_number, error = %e, "rejected entry"))?;

        match item {
            LineItem::Expense(expense) => items.expenses.push(expense),
            LineItem::Investment(investment) => items.investments.push(investment),
        }
    }

    debug!(
        expenses = items.expenses.len(),
        investments = items.investments.len(),
        "loaded entries"
    );
    Ok(items)
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<LineItems, EntryLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}
