//! Plain-text rendering of breakdowns and summaries.

use std::fmt;

use budget_core::calculations::common::round_to_cents;
use budget_core::{IncomeBreakdown, PlanSummary, TaxYearTable};
use rust_decimal::Decimal;

fn money(value: Decimal) -> String {
    format!("{:.2}", round_to_cents(value))
}

fn percent(fraction: Decimal) -> String {
    format!("{:.2}%", round_to_cents(fraction * Decimal::ONE_HUNDRED))
}

/// Income breakdown labelled with the table it was computed under.
#[derive(Debug, Clone)]
pub struct BreakdownReport<'a> {
    pub tax_year: i32,
    pub jurisdiction: &'a str,
    pub breakdown: &'a IncomeBreakdown,
}

impl<'a> BreakdownReport<'a> {
    pub fn new(
        table: &'a TaxYearTable,
        breakdown: &'a IncomeBreakdown,
    ) -> Self {
        Self {
            tax_year: table.tax_year,
            jurisdiction: &table.jurisdiction,
            breakdown,
        }
    }
}

impl fmt::Display for BreakdownReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let b = self.breakdown;
        writeln!(f, "Tax year:             {} ({})", self.tax_year, self.jurisdiction)?;
        writeln!(f, "Salary:               {}", money(b.annual_salary))?;
        writeln!(f, "Bonus:                {}", money(b.annual_bonus))?;
        writeln!(f, "Gross income:         {}", money(b.annual_gross_income))?;
        writeln!(f, "Federal tax:          {}", money(b.federal_tax))?;
        writeln!(f, "Provincial tax:       {}", money(b.provincial_tax))?;
        writeln!(f, "CPP contribution:     {}", money(b.cpp_contribution))?;
        writeln!(f, "EI premium:           {}", money(b.ei_premium))?;
        writeln!(f, "Total deductions:     {}", money(b.total_deductions))?;
        writeln!(f, "Deduction rate:       {}", percent(b.effective_deduction_rate()))?;
        writeln!(f, "Net income (annual):  {}", money(b.annual_net_income))?;
        write!(f, "Net income (monthly): {}", money(b.monthly_net_income))
    }
}

/// A plan's breakdown followed by its monthly cash flow.
#[derive(Debug, Clone)]
pub struct SummaryReport<'a> {
    pub table: &'a TaxYearTable,
    pub summary: &'a PlanSummary,
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let monthly = &self.summary.monthly;
        writeln!(f, "Plan:                 {}", self.summary.plan_name)?;
        writeln!(f, "{}", BreakdownReport::new(self.table, &self.summary.breakdown))?;
        writeln!(f)?;
        writeln!(f, "Monthly net income:   {}", money(monthly.monthly_net_income))?;
        writeln!(f, "Expenses:             {}", money(monthly.total_expenses))?;
        writeln!(f, "Investments:          {}", money(monthly.total_investments))?;
        write!(f, "Leftover:             {}", money(monthly.leftover))
    }
}

/// Years with a registered table, one per line, latest marked.
#[derive(Debug, Clone)]
pub struct YearsReport {
    pub years: Vec<i32>,
}

impl fmt::Display for YearsReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let latest = self.years.iter().max().copied();
        let lines: Vec<String> = self
            .years
            .iter()
            .map(|year| {
                if Some(*year) == latest {
                    format!("{year} (latest)")
                } else {
                    year.to_string()
                }
            })
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}
