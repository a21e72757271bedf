use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{IncomeBreakdown, IncomeDescription};

/// Number of named plans a single user may keep.
pub const MAX_PLANS_PER_USER: usize = 5;

const PAY_PERIODS_PER_YEAR: i64 = 26;
const MONTHS_PER_YEAR: i64 = 12;

/// How often a recurring amount is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Monthly,
    BiWeekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::BiWeekly => "biweekly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "biweekly" | "bi-weekly" | "bi_weekly" => Some(Self::BiWeekly),
            _ => None,
        }
    }

    /// Converts an amount paid at this frequency to its monthly equivalent.
    ///
    /// Bi-weekly amounts are scaled by exactly 26/12. The result is not
    /// rounded.
    ///
    /// ```
    /// use budget_core::Frequency;
    /// use rust_decimal_macros::dec;
    ///
    /// let monthly = Frequency::BiWeekly.to_monthly(dec!(100));
    /// assert_eq!(monthly.round_dp(2), dec!(216.67));
    /// ```
    pub fn to_monthly(
        &self,
        amount: Decimal,
    ) -> Decimal {
        match self {
            Self::Monthly => amount,
            Self::BiWeekly => {
                amount * Decimal::from(PAY_PERIODS_PER_YEAR) / Decimal::from(MONTHS_PER_YEAR)
            }
        }
    }
}

/// A recurring expense line in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub frequency: Frequency,
}

impl RecurringExpense {
    pub fn monthly_amount(&self) -> Decimal {
        self.frequency.to_monthly(self.amount)
    }
}

/// Account an investment contribution is directed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentAccount {
    Tfsa,
    Rrsp,
    Fhsa,
    NonRegistered,
}

impl InvestmentAccount {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tfsa => "TFSA",
            Self::Rrsp => "RRSP",
            Self::Fhsa => "FHSA",
            Self::NonRegistered => "NON_REGISTERED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TFSA" => Some(Self::Tfsa),
            "RRSP" => Some(Self::Rrsp),
            "FHSA" => Some(Self::Fhsa),
            "NON_REGISTERED" | "NON-REGISTERED" | "NONREGISTERED" => Some(Self::NonRegistered),
            _ => None,
        }
    }
}

/// A recurring contribution into one investment bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentContribution {
    pub account: InvestmentAccount,
    pub amount: Decimal,
    #[serde(default)]
    pub frequency: Frequency,
}

impl InvestmentContribution {
    pub fn monthly_amount(&self) -> Decimal {
        self.frequency.to_monthly(self.amount)
    }
}

/// A named budget plan: income plus recurring outflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub name: String,
    pub income: IncomeDescription,
    #[serde(default)]
    pub expenses: Vec<RecurringExpense>,
    #[serde(default)]
    pub investments: Vec<InvestmentContribution>,
}

/// Monthly cash flow after expenses and investments, rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub monthly_net_income: Decimal,
    pub total_expenses: Decimal,
    pub total_investments: Decimal,
    /// May be negative when outflows exceed income.
    pub leftover: Decimal,
}

/// Everything shown for one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub plan_name: String,
    pub breakdown: IncomeBreakdown,
    pub monthly: MonthlySummary,
}
