use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived income figures for one tax year.
///
/// Every field is rounded to cents. The figures are recomputed on every call
/// and carry no identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub annual_salary: Decimal,
    pub annual_bonus: Decimal,
    /// Salary plus bonus.
    pub annual_gross_income: Decimal,
    /// Equal to gross income; no deduction reduces the base in this model.
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
    pub cpp_contribution: Decimal,
    pub ei_premium: Decimal,
    pub total_deductions: Decimal,
    pub annual_net_income: Decimal,
    pub monthly_net_income: Decimal,
}

impl IncomeBreakdown {
    /// Share of gross income taken by all deductions, as a fraction.
    ///
    /// Zero when there is no income.
    pub fn effective_deduction_rate(&self) -> Decimal {
        if self.taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_deductions / self.taxable_income
    }
}
