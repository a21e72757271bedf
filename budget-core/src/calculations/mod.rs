//! Calculations over a [`TaxYearTable`](crate::models::TaxYearTable).
//!
//! [`compute_income_breakdown`] and [`compute_income_breakdown_from_gross_amount`]
//! are the entry points used by the application layer. Both evaluate against
//! the built-in table; use [`IncomeTaxCalculator`] directly for any other year.

pub mod common;
pub mod income_tax;
pub mod monthly;
pub mod payroll;

use rust_decimal::Decimal;

pub use income_tax::{IncomeTaxCalculator, TaxAssessment};
pub use monthly::{summarize_month, summarize_plan};
pub use payroll::{PayrollCalculator, PayrollDeductions};

use crate::models::{IncomeBreakdown, IncomeDescription};
use crate::tables::builtin_table;

/// Breakdown of a salary and bonus under the built-in table.
pub fn compute_income_breakdown(income: &IncomeDescription) -> IncomeBreakdown {
    IncomeTaxCalculator::new(builtin_table()).calculate(income)
}

/// Breakdown of a gross amount under the built-in table, reported as salary.
pub fn compute_income_breakdown_from_gross_amount(gross_income: Decimal) -> IncomeBreakdown {
    IncomeTaxCalculator::new(builtin_table()).calculate_from_gross(gross_income)
}
