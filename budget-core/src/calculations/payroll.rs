//! Mandatory payroll deductions: CPP contributions and EI premiums.
//!
//! These are computed before income tax because both feed the non-refundable
//! credits on the federal and provincial returns.
//!
//! | Quantity         | Formula |
//! |------------------|---------|
//! | CPP first tier   | first rate × (income clamped to [exemption, first ceiling] − exemption) |
//! | CPP second tier  | second rate × (income clamped to [first ceiling, second ceiling] − first ceiling) |
//! | EI premium       | rate × min(income, maximum insurable earnings) |
//!
//! # Example
//!
//! ```
//! use budget_core::builtin_table;
//! use budget_core::calculations::PayrollCalculator;
//! use rust_decimal_macros::dec;
//!
//! let table = builtin_table();
//! let payroll = PayrollCalculator::new(&table.cpp, &table.ei).calculate(dec!(80000));
//!
//! assert_eq!(payroll.cpp_first_tier, dec!(4230.45));
//! assert_eq!(payroll.cpp_second_tier, dec!(216.00));
//! assert_eq!(payroll.ei_premium, dec!(1123.07));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{floor_at_zero, portion_between};
use crate::models::{CppSchedule, EiSchedule};

/// Full-precision payroll deductions for one year of income.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayrollDeductions {
    /// Contribution on earnings up to the first ceiling. This is the part
    /// that earns the non-refundable credit.
    pub cpp_first_tier: Decimal,
    /// Contribution on earnings between the two ceilings.
    pub cpp_second_tier: Decimal,
    pub ei_premium: Decimal,
}

impl PayrollDeductions {
    pub fn cpp_total(&self) -> Decimal {
        self.cpp_first_tier + self.cpp_second_tier
    }
}

/// Calculator for CPP and EI deductions under one year's schedules.
#[derive(Debug, Clone)]
pub struct PayrollCalculator<'a> {
    cpp: &'a CppSchedule,
    ei: &'a EiSchedule,
}

impl<'a> PayrollCalculator<'a> {
    pub fn new(
        cpp: &'a CppSchedule,
        ei: &'a EiSchedule,
    ) -> Self {
        Self { cpp, ei }
    }

    /// Computes both deductions for `income`. Negative income is treated as
    /// zero.
    pub fn calculate(
        &self,
        income: Decimal,
    ) -> PayrollDeductions {
        let income = floor_at_zero(income);

        PayrollDeductions {
            cpp_first_tier: self.cpp_first_tier(income),
            cpp_second_tier: self.cpp_second_tier(income),
            ei_premium: self.ei_premium(income),
        }
    }

    fn cpp_first_tier(
        &self,
        income: Decimal,
    ) -> Decimal {
        let pensionable =
            portion_between(income, self.cpp.basic_exemption, self.cpp.first_ceiling);
        pensionable * self.cpp.first_rate
    }

    fn cpp_second_tier(
        &self,
        income: Decimal,
    ) -> Decimal {
        let pensionable = portion_between(income, self.cpp.first_ceiling, self.cpp.second_ceiling);
        pensionable * self.cpp.second_rate
    }

    fn ei_premium(
        &self,
        income: Decimal,
    ) -> Decimal {
        income.min(self.ei.max_insurable_earnings) * self.ei.rate
    }
}
