//! Net-income derivation for one tax year.
//!
//! The calculator turns a gross annual income into federal tax, provincial
//! tax, CPP contributions and EI premiums, and from those the net income.
//! The quantities depend on one another and are computed in this order:
//!
//! | Step | Quantity |
//! |------|----------|
//! | 1    | Gross income: salary plus bonus (fixed, or percent of salary) |
//! | 2    | CPP contribution (two tiers) and EI premium |
//! | 3    | Federal and provincial marginal bracket tax, before credits |
//! | 4    | Federal credit: lowest rate × (phased personal amount + CPP first tier + EI) |
//! | 5    | Provincial credit: lowest rate × (basic amount + CPP first tier + EI) |
//! | 6    | Provincial surtax on basic tax (two additive tiers) |
//! | 7    | Provincial health premium from income bands |
//! | 8    | Provincial tax reduction, shrinking to zero as liability grows |
//! | 9    | Total deductions, annual and monthly net income |
//! | 10   | Rounding to cents, applied to outputs only |
//!
//! The calculator never fails. Negative inputs are treated as zero, and a
//! gross income too large to represent saturates at [`Decimal::MAX`].
//!
//! # Example
//!
//! ```
//! use budget_core::{BonusKind, IncomeDescription, IncomeTaxCalculator, builtin_table};
//! use rust_decimal_macros::dec;
//!
//! let calculator = IncomeTaxCalculator::new(builtin_table());
//! let breakdown = calculator.calculate(&IncomeDescription::salary(dec!(80000)));
//!
//! assert_eq!(breakdown.federal_tax, dec!(9543.23));
//! assert_eq!(breakdown.provincial_tax, dec!(4934.17));
//! assert_eq!(breakdown.annual_net_income, dec!(59953.08));
//! assert_eq!(breakdown.monthly_net_income, dec!(4996.09));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{floor_at_zero, round_to_cents};
use crate::calculations::payroll::{PayrollCalculator, PayrollDeductions};
use crate::models::{BonusKind, IncomeBreakdown, IncomeDescription, TaxBracket, TaxYearTable};

const MONTHS_PER_YEAR: i64 = 12;

/// Every intermediate figure of one calculation, at full precision.
///
/// [`IncomeBreakdown`] is the rounded, user-facing projection of this.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxAssessment {
    pub gross_income: Decimal,
    pub payroll: PayrollDeductions,

    pub federal_tax_before_credits: Decimal,
    pub federal_personal_amount: Decimal,
    pub federal_credit: Decimal,
    pub federal_tax: Decimal,

    pub provincial_tax_before_credits: Decimal,
    pub provincial_credit: Decimal,
    pub provincial_basic_tax: Decimal,
    pub provincial_surtax: Decimal,
    pub health_premium: Decimal,
    pub tax_reduction: Decimal,
    pub provincial_tax: Decimal,

    pub total_deductions: Decimal,
    pub annual_net_income: Decimal,
    pub monthly_net_income: Decimal,
}

/// Calculator for net income under one [`TaxYearTable`].
///
/// Holds only a shared reference to the table, so it is cheap to create per
/// call and safe to use from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxCalculator<'a> {
    table: &'a TaxYearTable,
}

impl<'a> IncomeTaxCalculator<'a> {
    /// Creates a calculator over `table`.
    ///
    /// The table is expected to have passed [`TaxYearTable::validate`].
    pub fn new(table: &'a TaxYearTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a TaxYearTable {
        self.table
    }

    /// Computes the rounded breakdown for a salary and bonus description.
    pub fn calculate(
        &self,
        income: &IncomeDescription,
    ) -> IncomeBreakdown {
        let salary = clamp_input("yearly_salary", income.yearly_salary);
        let bonus = self.annual_bonus(salary, &income.bonus);

        self.breakdown(salary, bonus)
    }

    /// Computes the rounded breakdown from a known gross figure.
    ///
    /// The gross is reported as salary with no bonus.
    pub fn calculate_from_gross(
        &self,
        gross_income: Decimal,
    ) -> IncomeBreakdown {
        let gross = clamp_input("gross_income", gross_income);

        self.breakdown(gross, Decimal::ZERO)
    }

    /// Runs steps 2 through 9 on a gross income, without rounding.
    pub fn assess(
        &self,
        gross_income: Decimal,
    ) -> TaxAssessment {
        let gross_income = floor_at_zero(gross_income);
        let taxable_income = gross_income;

        let payroll = PayrollCalculator::new(&self.table.cpp, &self.table.ei).calculate(taxable_income);
        let creditable_payroll = payroll.cpp_first_tier + payroll.ei_premium;

        let federal_tax_before_credits =
            bracket_tax(taxable_income, &self.table.federal.brackets);
        let federal_personal_amount = self.federal_personal_amount(taxable_income);
        let federal_credit = lowest_rate(&self.table.federal.brackets)
            * (federal_personal_amount + creditable_payroll);
        let federal_tax = floor_at_zero(federal_tax_before_credits - federal_credit);

        let provincial_tax_before_credits =
            bracket_tax(taxable_income, &self.table.provincial.brackets);
        let provincial_credit = lowest_rate(&self.table.provincial.brackets)
            * (self.table.provincial.basic_personal_amount + creditable_payroll);
        let provincial_basic_tax =
            floor_at_zero(provincial_tax_before_credits - provincial_credit);
        let provincial_surtax = self.provincial_surtax(provincial_basic_tax);
        let health_premium = self.health_premium(taxable_income);

        let before_reduction = provincial_basic_tax + provincial_surtax + health_premium;
        let tax_reduction = self.tax_reduction(before_reduction);
        let provincial_tax = floor_at_zero(before_reduction - tax_reduction);

        let total_deductions = federal_tax + provincial_tax + payroll.cpp_total() + payroll.ei_premium;
        let annual_net_income = floor_at_zero(taxable_income - total_deductions);
        let monthly_net_income = annual_net_income / Decimal::from(MONTHS_PER_YEAR);

        TaxAssessment {
            gross_income,
            payroll,
            federal_tax_before_credits,
            federal_personal_amount,
            federal_credit,
            federal_tax,
            provincial_tax_before_credits,
            provincial_credit,
            provincial_basic_tax,
            provincial_surtax,
            health_premium,
            tax_reduction,
            provincial_tax,
            total_deductions,
            annual_net_income,
            monthly_net_income,
        }
    }

    fn breakdown(
        &self,
        salary: Decimal,
        bonus: Decimal,
    ) -> IncomeBreakdown {
        let gross = salary.saturating_add(bonus);
        let assessment = self.assess(gross);

        debug!(
            tax_year = self.table.tax_year,
            gross = %gross,
            federal_tax = %assessment.federal_tax,
            provincial_tax = %assessment.provincial_tax,
            net = %assessment.annual_net_income,
            "computed income breakdown"
        );

        IncomeBreakdown {
            annual_salary: round_to_cents(salary),
            annual_bonus: round_to_cents(bonus),
            annual_gross_income: round_to_cents(gross),
            taxable_income: round_to_cents(gross),
            federal_tax: round_to_cents(assessment.federal_tax),
            provincial_tax: round_to_cents(assessment.provincial_tax),
            cpp_contribution: round_to_cents(assessment.payroll.cpp_total()),
            ei_premium: round_to_cents(assessment.payroll.ei_premium),
            total_deductions: round_to_cents(assessment.total_deductions),
            annual_net_income: round_to_cents(assessment.annual_net_income),
            monthly_net_income: round_to_cents(assessment.monthly_net_income),
        }
    }

    /// Step 1: the bonus in currency. `None` always yields zero.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    fn annual_bonus(
        &self,
        salary: Decimal,
        bonus: &BonusKind,
    ) -> Decimal {
        match *bonus {
            BonusKind::None => Decimal::ZERO,
            BonusKind::FixedAmount(amount) => clamp_input("bonus_amount", amount),
            BonusKind::PercentOfSalary(percent) => {
                let fraction = clamp_input("bonus_percent", percent) / Decimal::ONE_HUNDRED;
                salary.saturating_mul(fraction)
            }
        }
    }

    /// Step 4: the federal basic personal amount after phase-out.
    fn federal_personal_amount(
        &self,
        income: Decimal,
    ) -> Decimal {
        let amount = &self.table.federal.personal_amount;

        if income <= amount.phase_out_start {
            amount.maximum
        } else if income >= amount.phase_out_end {
            amount.minimum
        } else {
            let progress = (income - amount.phase_out_start)
                / (amount.phase_out_end - amount.phase_out_start);
            amount.maximum - (amount.maximum - amount.minimum) * progress
        }
    }

    /// Step 6: both surtax tiers are levied on the same basic tax and added.
    fn provincial_surtax(
        &self,
        basic_tax: Decimal,
    ) -> Decimal {
        let surtax = &self.table.provincial.surtax;

        floor_at_zero((basic_tax - surtax.first_threshold) * surtax.first_rate)
            + floor_at_zero((basic_tax - surtax.second_threshold) * surtax.second_rate)
    }

    /// Step 7: premium from the highest band whose start lies below income.
    fn health_premium(
        &self,
        income: Decimal,
    ) -> Decimal {
        self.table
            .provincial
            .health_premium
            .iter()
            .rev()
            .find(|band| income > band.from)
            .map_or(Decimal::ZERO, |band| {
                (band.base + band.rate * (income - band.from)).min(band.max)
            })
    }

    /// Step 8: never larger than the liability it reduces.
    fn tax_reduction(
        &self,
        before_reduction: Decimal,
    ) -> Decimal {
        let benefit = Decimal::TWO * self.table.provincial.tax_reduction_base;

        before_reduction.min(floor_at_zero(benefit - before_reduction))
    }
}

/// Standard marginal-bracket tax: each bracket's rate applies only to the
/// slice of income between its lower and upper bound.
fn bracket_tax(
    income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in brackets {
        if income <= lower {
            break;
        }
        let top = bracket.upper_bound.map_or(income, |bound| income.min(bound));
        tax += (top - lower) * bracket.rate;

        match bracket.upper_bound {
            Some(bound) => lower = bound,
            None => break,
        }
    }

    tax
}

fn lowest_rate(brackets: &[TaxBracket]) -> Decimal {
    brackets.first().map_or(Decimal::ZERO, |bracket| bracket.rate)
}

fn clamp_input(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "negative income input treated as zero");
        return Decimal::ZERO;
    }
    value
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{
        CppSchedule, EiSchedule, FederalSchedule, HealthPremiumBand, PersonalAmountPhaseOut,
        ProvincialSchedule, Surtax,
    };
    use crate::tables::builtin_table;

    fn calculator() -> IncomeTaxCalculator<'static> {
        IncomeTaxCalculator::new(builtin_table())
    }

    /// A table with round numbers, for checking the algorithm apart from
    /// any real year's constants.
    fn simple_table() -> TaxYearTable {
        TaxYearTable {
            tax_year: 2000,
            jurisdiction: "XX".to_string(),
            federal: FederalSchedule {
                brackets: vec![
                    TaxBracket::bounded(dec!(10000), dec!(0.10)),
                    TaxBracket::unbounded(dec!(0.20)),
                ],
                personal_amount: PersonalAmountPhaseOut {
                    maximum: dec!(5000),
                    minimum: dec!(3000),
                    phase_out_start: dec!(20000),
                    phase_out_end: dec!(40000),
                },
            },
            provincial: ProvincialSchedule {
                brackets: vec![
                    TaxBracket::bounded(dec!(10000), dec!(0.05)),
                    TaxBracket::unbounded(dec!(0.10)),
                ],
                basic_personal_amount: dec!(4000),
                surtax: Surtax {
                    first_threshold: dec!(1000),
                    first_rate: dec!(0.20),
                    second_threshold: dec!(2000),
                    second_rate: dec!(0.40),
                },
                health_premium: vec![HealthPremiumBand {
                    from: dec!(10000),
                    base: dec!(0),
                    rate: dec!(0.10),
                    max: dec!(100),
                }],
                tax_reduction_base: dec!(50),
            },
            cpp: CppSchedule {
                basic_exemption: dec!(1000),
                first_ceiling: dec!(20000),
                first_rate: dec!(0.05),
                second_ceiling: dec!(30000),
                second_rate: dec!(0.02),
            },
            ei: EiSchedule {
                rate: dec!(0.01),
                max_insurable_earnings: dec!(25000),
            },
        }
    }

    /// Initializes tracing subscriber for tests that exercise log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // bracket_tax tests
    // =========================================================================

    #[test]
    fn bracket_tax_is_zero_for_zero_income() {
        assert_eq!(
            bracket_tax(Decimal::ZERO, &builtin_table().federal.brackets),
            Decimal::ZERO
        );
    }

    #[test]
    fn bracket_tax_within_first_bracket() {
        assert_eq!(
            bracket_tax(dec!(30000), &builtin_table().federal.brackets),
            dec!(4200)
        );
    }

    #[test]
    fn bracket_tax_at_exact_bound_uses_only_lower_brackets() {
        // 58523 × 14%
        assert_eq!(
            bracket_tax(dec!(58523), &builtin_table().federal.brackets),
            dec!(8193.22)
        );
    }

    #[test]
    fn bracket_tax_spans_two_brackets() {
        // 58523 × 14% + 21477 × 20.5%
        assert_eq!(
            bracket_tax(dec!(80000), &builtin_table().federal.brackets),
            dec!(12596.005)
        );
    }

    #[test]
    fn bracket_tax_reaches_open_ended_bracket() {
        assert_eq!(
            bracket_tax(dec!(600000), &builtin_table().federal.brackets),
            dec!(171976.05)
        );
        assert_eq!(
            bracket_tax(dec!(600000), &builtin_table().provincial.brackets),
            dec!(70883.9905)
        );
    }

    // =========================================================================
    // federal_personal_amount tests
    // =========================================================================

    #[test]
    fn personal_amount_is_maximum_at_phase_out_start() {
        assert_eq!(
            calculator().federal_personal_amount(dec!(181440)),
            dec!(16452)
        );
    }

    #[test]
    fn personal_amount_is_minimum_from_phase_out_end() {
        assert_eq!(
            calculator().federal_personal_amount(dec!(258482)),
            dec!(14829)
        );
        assert_eq!(
            calculator().federal_personal_amount(dec!(900000)),
            dec!(14829)
        );
    }

    #[test]
    fn personal_amount_interpolates_linearly() {
        let table = simple_table();
        let calculator = IncomeTaxCalculator::new(&table);

        assert_eq!(calculator.federal_personal_amount(dec!(30000)), dec!(4000));
        assert_eq!(calculator.federal_personal_amount(dec!(35000)), dec!(3500));
    }

    // =========================================================================
    // provincial_surtax tests
    // =========================================================================

    #[test]
    fn surtax_is_zero_below_first_threshold() {
        assert_eq!(calculator().provincial_surtax(dec!(5818)), Decimal::ZERO);
    }

    #[test]
    fn surtax_first_tier_only() {
        // (6818 - 5818) × 20%
        assert_eq!(calculator().provincial_surtax(dec!(6818)), dec!(200));
    }

    #[test]
    fn surtax_tiers_are_additive() {
        // (8446 - 5818) × 20% + (8446 - 7446) × 36%
        assert_eq!(calculator().provincial_surtax(dec!(8446)), dec!(885.6));
    }

    // =========================================================================
    // health_premium tests
    // =========================================================================

    #[test]
    fn health_premium_is_zero_up_to_floor() {
        assert_eq!(calculator().health_premium(dec!(20000)), Decimal::ZERO);
        assert_eq!(calculator().health_premium(dec!(15000)), Decimal::ZERO);
    }

    #[test]
    fn health_premium_ramps_and_plateaus() {
        let calculator = calculator();
        let expected = [
            (dec!(22000), dec!(120)),
            (dec!(25000), dec!(300)),
            (dec!(36000), dec!(300)),
            (dec!(37000), dec!(360)),
            (dec!(38500), dec!(450)),
            (dec!(48300), dec!(525)),
            (dec!(60000), dec!(600)),
            (dec!(72300), dec!(675)),
            (dec!(150000), dec!(750)),
            (dec!(200300), dec!(825)),
            (dec!(200600), dec!(900)),
            (dec!(1000000), dec!(900)),
        ];

        for (income, premium) in expected {
            assert_eq!(
                calculator.health_premium(income),
                premium,
                "premium at {income}"
            );
        }
    }

    // =========================================================================
    // tax_reduction tests
    // =========================================================================

    #[test]
    fn tax_reduction_eliminates_small_liability() {
        assert_eq!(calculator().tax_reduction(dec!(250)), dec!(250));
    }

    #[test]
    fn tax_reduction_shrinks_between_base_and_twice_base() {
        // 2 × 300 - 500
        assert_eq!(calculator().tax_reduction(dec!(500)), dec!(100));
    }

    #[test]
    fn tax_reduction_vanishes_at_twice_base() {
        assert_eq!(calculator().tax_reduction(dec!(600)), Decimal::ZERO);
        assert_eq!(calculator().tax_reduction(dec!(4934.17)), Decimal::ZERO);
    }

    // =========================================================================
    // annual_bonus tests
    // =========================================================================

    #[test]
    fn bonus_none_is_zero() {
        assert_eq!(
            calculator().annual_bonus(dec!(80000), &BonusKind::None),
            Decimal::ZERO
        );
    }

    #[test]
    fn bonus_percent_of_salary() {
        assert_eq!(
            calculator().annual_bonus(dec!(80000), &BonusKind::PercentOfSalary(dec!(12.5))),
            dec!(10000)
        );
    }

    #[test]
    fn bonus_negative_magnitude_is_clamped() {
        let _guard = init_test_tracing();

        assert_eq!(
            calculator().annual_bonus(dec!(80000), &BonusKind::FixedAmount(dec!(-100))),
            Decimal::ZERO
        );
        // Warning is logged (verified by test_writer capturing output)
    }

    // =========================================================================
    // assess tests
    // =========================================================================

    #[test]
    fn assess_simple_table_step_by_step() {
        let table = simple_table();
        let assessment = IncomeTaxCalculator::new(&table).assess(dec!(30000));

        assert_eq!(assessment.payroll.cpp_first_tier, dec!(950));
        assert_eq!(assessment.payroll.cpp_second_tier, dec!(200));
        assert_eq!(assessment.payroll.ei_premium, dec!(250));
        assert_eq!(assessment.federal_tax_before_credits, dec!(5000));
        assert_eq!(assessment.federal_personal_amount, dec!(4000));
        assert_eq!(assessment.federal_credit, dec!(520));
        assert_eq!(assessment.federal_tax, dec!(4480));
        assert_eq!(assessment.provincial_tax_before_credits, dec!(2500));
        assert_eq!(assessment.provincial_credit, dec!(260));
        assert_eq!(assessment.provincial_basic_tax, dec!(2240));
        assert_eq!(assessment.provincial_surtax, dec!(344));
        assert_eq!(assessment.health_premium, dec!(100));
        assert_eq!(assessment.tax_reduction, Decimal::ZERO);
        assert_eq!(assessment.provincial_tax, dec!(2684));
        assert_eq!(assessment.total_deductions, dec!(8564));
        assert_eq!(assessment.annual_net_income, dec!(21436));
        assert_eq!(round_to_cents(assessment.monthly_net_income), dec!(1786.33));
    }

    #[test]
    fn assess_credit_exceeding_tax_floors_at_zero() {
        let assessment = calculator().assess(dec!(10000));

        assert_eq!(assessment.federal_tax, Decimal::ZERO);
        assert_eq!(assessment.provincial_basic_tax, Decimal::ZERO);
        assert_eq!(assessment.provincial_tax, Decimal::ZERO);
    }

    #[test]
    fn assess_credit_uses_first_tier_cpp_only() {
        let assessment = calculator().assess(dec!(80000));

        // 14% × (16452 + 4230.45 + 1123.07)
        assert_eq!(assessment.federal_credit, dec!(3052.7728));
        // 5.05% × (12989 + 4230.45 + 1123.07)
        assert_eq!(assessment.provincial_credit, dec!(926.29726));
    }

    // =========================================================================
    // calculate regression fixtures (2026 table)
    // =========================================================================

    #[test]
    fn calculate_zero_salary_is_all_zero() {
        let result = calculator().calculate(&IncomeDescription::salary(Decimal::ZERO));

        assert_eq!(result, IncomeBreakdown::default());
    }

    #[test]
    fn calculate_salary_80000() {
        let result = calculator().calculate(&IncomeDescription::salary(dec!(80000)));

        assert_eq!(
            result,
            IncomeBreakdown {
                annual_salary: dec!(80000.00),
                annual_bonus: dec!(0.00),
                annual_gross_income: dec!(80000.00),
                taxable_income: dec!(80000.00),
                federal_tax: dec!(9543.23),
                provincial_tax: dec!(4934.17),
                cpp_contribution: dec!(4446.45),
                ei_premium: dec!(1123.07),
                total_deductions: dec!(20046.92),
                annual_net_income: dec!(59953.08),
                monthly_net_income: dec!(4996.09),
            }
        );
    }

    #[test]
    fn calculate_salary_30000() {
        let result = calculator().calculate(&IncomeDescription::salary(dec!(30000)));

        // Health premium sits on its 300 plateau; federal tax is exactly 1607.515.
        assert_eq!(result.cpp_contribution, dec!(1576.75));
        assert_eq!(result.ei_premium, dec!(489.00));
        assert_eq!(result.federal_tax, dec!(1607.52));
        assert_eq!(result.provincial_tax, dec!(1054.74));
        assert_eq!(result.total_deductions, dec!(4728.00));
        assert_eq!(result.annual_net_income, dec!(25272.00));
        assert_eq!(result.monthly_net_income, dec!(2106.00));
    }

    #[test]
    fn calculate_salary_22000_applies_partial_tax_reduction() {
        let assessment = calculator().assess(dec!(22000));
        let result = calculator().calculate(&IncomeDescription::salary(dec!(22000)));

        assert_eq!(assessment.health_premium, dec!(120));
        assert_eq!(assessment.tax_reduction, dec!(98.641675));
        assert_eq!(result.federal_tax, dec!(572.41));
        assert_eq!(result.provincial_tax, dec!(402.72));
        assert_eq!(result.cpp_contribution, dec!(1100.75));
        assert_eq!(result.ei_premium, dec!(358.60));
        assert_eq!(result.total_deductions, dec!(2434.48));
        assert_eq!(result.annual_net_income, dec!(19565.52));
        assert_eq!(result.monthly_net_income, dec!(1630.46));
    }

    #[test]
    fn calculate_salary_500000_with_fixed_bonus() {
        let income = IncomeDescription::new(dec!(500000), BonusKind::FixedAmount(dec!(100000)));

        let assessment = calculator().assess(dec!(600000));
        let result = calculator().calculate(&income);

        assert_eq!(assessment.federal_personal_amount, dec!(14829));
        assert_eq!(assessment.provincial_surtax, dec!(35332.1482144));
        assert_eq!(assessment.health_premium, dec!(900));
        assert_eq!(
            result,
            IncomeBreakdown {
                annual_salary: dec!(500000.00),
                annual_bonus: dec!(100000.00),
                annual_gross_income: dec!(600000.00),
                taxable_income: dec!(600000.00),
                federal_tax: dec!(169150.50),
                provincial_tax: dec!(106189.84),
                cpp_contribution: dec!(4646.45),
                ei_premium: dec!(1123.07),
                total_deductions: dec!(281109.86),
                annual_net_income: dec!(318890.14),
                monthly_net_income: dec!(26574.18),
            }
        );
    }

    #[test]
    fn calculate_salary_220000_inside_personal_amount_phase_out() {
        let result = calculator().calculate(&IncomeDescription::salary(dec!(220000)));

        assert_eq!(result.federal_tax, dec!(45176.28));
        assert_eq!(result.provincial_tax, dec!(28177.36));
        assert_eq!(result.total_deductions, dec!(79123.16));
        assert_eq!(result.annual_net_income, dec!(140876.84));
        assert_eq!(result.monthly_net_income, dec!(11739.74));
    }

    #[test]
    fn calculate_percent_bonus_adds_to_gross() {
        let income = IncomeDescription::new(dec!(50000), BonusKind::PercentOfSalary(dec!(10)));

        let result = calculator().calculate(&income);

        assert_eq!(result.annual_bonus, dec!(5000.00));
        assert_eq!(result.annual_gross_income, dec!(55000.00));
        assert_eq!(result.taxable_income, dec!(55000.00));
    }

    #[test]
    fn calculate_negative_salary_is_treated_as_zero() {
        let _guard = init_test_tracing();

        let result = calculator().calculate(&IncomeDescription::salary(dec!(-40000)));

        assert_eq!(result, IncomeBreakdown::default());
        // Warning is logged
    }

    #[test]
    fn calculate_saturates_at_decimal_max() {
        let percent = IncomeDescription::new(Decimal::MAX, BonusKind::PercentOfSalary(dec!(100)));
        let fixed = IncomeDescription::new(Decimal::MAX, BonusKind::FixedAmount(Decimal::MAX));

        for income in [percent, fixed] {
            let result = calculator().calculate(&income);

            assert_eq!(result.annual_gross_income, Decimal::MAX);
            assert!(result.annual_net_income > Decimal::ZERO);
            assert!(result.total_deductions < result.annual_gross_income);
        }
    }

    #[test]
    fn calculate_float_salary_beyond_decimal_range_taxes_more() {
        let huge = IncomeDescription::from_f64(1e30, "none", 0.0).unwrap();
        let million = IncomeDescription::from_f64(1e6, "none", 0.0).unwrap();

        let huge = calculator().calculate(&huge);
        let million = calculator().calculate(&million);

        assert!(huge.federal_tax >= million.federal_tax);
        assert!(huge.annual_net_income >= million.annual_net_income);
    }

    #[test]
    fn calculate_huge_percent_bonus_does_not_overflow() {
        let income = IncomeDescription::new(dec!(1000000), BonusKind::PercentOfSalary(Decimal::MAX));

        let result = calculator().calculate(&income);

        assert_eq!(result.annual_bonus, Decimal::MAX);
        assert_eq!(result.annual_gross_income, Decimal::MAX);
    }

    // =========================================================================
    // calculate_from_gross tests
    // =========================================================================

    #[test]
    fn calculate_from_gross_reports_gross_as_salary() {
        let from_gross = calculator().calculate_from_gross(dec!(600000));
        let from_parts = calculator().calculate(&IncomeDescription::new(
            dec!(500000),
            BonusKind::FixedAmount(dec!(100000)),
        ));

        assert_eq!(from_gross.annual_salary, dec!(600000.00));
        assert_eq!(from_gross.annual_bonus, Decimal::ZERO);
        assert_eq!(from_gross.total_deductions, from_parts.total_deductions);
        assert_eq!(from_gross.monthly_net_income, from_parts.monthly_net_income);
    }

    #[test]
    fn calculate_from_gross_clamps_negative_amount() {
        let result = calculator().calculate_from_gross(dec!(-1));

        assert_eq!(result, IncomeBreakdown::default());
    }
}
