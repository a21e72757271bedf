//! Monthly cash flow: net income less recurring expenses and investments.

use rust_decimal::Decimal;

use crate::calculations::common::round_to_cents;
use crate::calculations::income_tax::IncomeTaxCalculator;
use crate::models::{
    BudgetPlan, InvestmentContribution, MonthlySummary, PlanSummary, RecurringExpense, TaxYearTable,
};

/// Sums expenses and investments at their monthly equivalents and subtracts
/// them from `monthly_net_income`.
///
/// Sums are taken at full precision and rounded once. The leftover may be
/// negative.
///
/// ```
/// use budget_core::{Frequency, RecurringExpense, summarize_month};
/// use rust_decimal_macros::dec;
///
/// let groceries = RecurringExpense {
///     name: "Groceries".to_string(),
///     amount: dec!(100),
///     frequency: Frequency::BiWeekly,
/// };
/// let summary = summarize_month(dec!(1000), &[groceries], &[]);
///
/// assert_eq!(summary.total_expenses, dec!(216.67));
/// assert_eq!(summary.leftover, dec!(783.33));
/// ```
pub fn summarize_month(
    monthly_net_income: Decimal,
    expenses: &[RecurringExpense],
    investments: &[InvestmentContribution],
) -> MonthlySummary {
    let total_expenses: Decimal = expenses.iter().map(RecurringExpense::monthly_amount).sum();
    let total_investments: Decimal = investments
        .iter()
        .map(InvestmentContribution::monthly_amount)
        .sum();
    let leftover = monthly_net_income - total_expenses - total_investments;

    MonthlySummary {
        monthly_net_income: round_to_cents(monthly_net_income),
        total_expenses: round_to_cents(total_expenses),
        total_investments: round_to_cents(total_investments),
        leftover: round_to_cents(leftover),
    }
}

/// Computes the breakdown for a plan's income and its monthly summary.
pub fn summarize_plan(
    plan: &BudgetPlan,
    table: &TaxYearTable,
) -> PlanSummary {
    let breakdown = IncomeTaxCalculator::new(table).calculate(&plan.income);
    let monthly = summarize_month(
        breakdown.monthly_net_income,
        &plan.expenses,
        &plan.investments,
    );

    PlanSummary {
        plan_name: plan.name.clone(),
        breakdown,
        monthly,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Frequency, IncomeDescription, InvestmentAccount};
    use crate::tables::builtin_table;

    fn expense(
        name: &str,
        amount: Decimal,
        frequency: Frequency,
    ) -> RecurringExpense {
        RecurringExpense {
            name: name.to_string(),
            amount,
            frequency,
        }
    }

    fn investment(
        account: InvestmentAccount,
        amount: Decimal,
        frequency: Frequency,
    ) -> InvestmentContribution {
        InvestmentContribution {
            account,
            amount,
            frequency,
        }
    }

    #[test]
    fn biweekly_expense_uses_exact_multiplier() {
        let summary = summarize_month(
            Decimal::ZERO,
            &[expense("Groceries", dec!(100), Frequency::BiWeekly)],
            &[],
        );

        assert_eq!(summary.total_expenses, dec!(216.67));
        assert_eq!(summary.leftover, dec!(-216.67));
    }

    #[test]
    fn empty_lists_leave_net_income() {
        let summary = summarize_month(dec!(4996.09), &[], &[]);

        assert_eq!(
            summary,
            MonthlySummary {
                monthly_net_income: dec!(4996.09),
                total_expenses: Decimal::ZERO,
                total_investments: Decimal::ZERO,
                leftover: dec!(4996.09),
            }
        );
    }

    #[test]
    fn mixed_frequencies_are_summed_before_rounding() {
        // 3 × 10 × 26 / 12 = 65 exactly, while 3 × round(21.666..) = 65.01
        let expenses = [
            expense("A", dec!(10), Frequency::BiWeekly),
            expense("B", dec!(10), Frequency::BiWeekly),
            expense("C", dec!(10), Frequency::BiWeekly),
            expense("Rent", dec!(1800), Frequency::Monthly),
        ];

        let summary = summarize_month(dec!(3000), &expenses, &[]);

        assert_eq!(summary.total_expenses, dec!(1865.00));
        assert_eq!(summary.leftover, dec!(1135.00));
    }

    #[test]
    fn investments_are_totalled_separately() {
        let investments = [
            investment(InvestmentAccount::Tfsa, dec!(500), Frequency::Monthly),
            investment(InvestmentAccount::Rrsp, dec!(250), Frequency::BiWeekly),
        ];

        let summary = summarize_month(
            dec!(4996.09),
            &[expense("Rent", dec!(2000), Frequency::Monthly)],
            &investments,
        );

        // 500 + 250 × 26 / 12 = 1041.666..
        assert_eq!(summary.total_expenses, dec!(2000.00));
        assert_eq!(summary.total_investments, dec!(1041.67));
        assert_eq!(summary.leftover, dec!(1954.42));
    }

    #[test]
    fn leftover_is_not_clamped() {
        let summary = summarize_month(
            dec!(1000),
            &[expense("Rent", dec!(2500), Frequency::Monthly)],
            &[],
        );

        assert_eq!(summary.leftover, dec!(-1500.00));
    }

    #[test]
    fn summarize_plan_combines_breakdown_and_month() {
        let plan = BudgetPlan {
            name: "Main".to_string(),
            income: IncomeDescription::salary(dec!(80000)),
            expenses: vec![expense("Rent", dec!(2000), Frequency::Monthly)],
            investments: vec![investment(
                InvestmentAccount::Tfsa,
                dec!(500),
                Frequency::Monthly,
            )],
        };

        let summary = summarize_plan(&plan, builtin_table());

        assert_eq!(summary.plan_name, "Main");
        assert_eq!(summary.breakdown.monthly_net_income, dec!(4996.09));
        assert_eq!(summary.monthly.monthly_net_income, dec!(4996.09));
        assert_eq!(summary.monthly.leftover, dec!(2496.09));
    }
}
