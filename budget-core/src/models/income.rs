use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a plan's bonus is expressed.
///
/// Only the two non-`None` variants carry a magnitude, so a stray value on a
/// "no bonus" plan cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BonusKind {
    #[default]
    None,
    /// A currency amount paid once per year.
    FixedAmount(Decimal),
    /// Percentage points of the yearly salary (10 means 10%).
    PercentOfSalary(Decimal),
}

impl BonusKind {
    /// The code stored alongside a plan's bonus value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FixedAmount(_) => "fixed",
            Self::PercentOfSalary(_) => "percentage",
        }
    }

    /// Rebuilds a bonus from its persisted `(type, value)` pair.
    ///
    /// The type code is matched case-insensitively and a few common spellings
    /// are accepted. The value is ignored for `none`.
    pub fn from_parts(
        bonus_type: &str,
        value: Decimal,
    ) -> Result<Self, IncomeValidationError> {
        match bonus_type.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "fixed" | "fixed_amount" | "amount" => Ok(Self::FixedAmount(value)),
            "percentage" | "percent" | "percent_of_salary" | "%" => {
                Ok(Self::PercentOfSalary(value))
            }
            _ => Err(IncomeValidationError::UnknownBonusType(
                bonus_type.to_string(),
            )),
        }
    }

    /// The stored magnitude, or zero for `None`.
    pub fn magnitude(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::FixedAmount(value) | Self::PercentOfSalary(value) => *value,
        }
    }
}

/// Errors raised by the application layer before an income description is
/// handed to the tax model. The tax model itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncomeValidationError {
    #[error("unknown bonus type '{0}' (expected none, fixed or percentage)")]
    UnknownBonusType(String),

    #[error("yearly salary must be non-negative, got {0}")]
    NegativeSalary(Decimal),

    #[error("yearly salary {salary} exceeds the maximum of {max}")]
    SalaryAboveCeiling { salary: Decimal, max: Decimal },

    #[error("bonus value must be non-negative, got {0}")]
    NegativeBonus(Decimal),

    #[error("fixed bonus {amount} exceeds the maximum of {max}")]
    BonusAboveCeiling { amount: Decimal, max: Decimal },

    #[error("bonus percentage must be between 0 and {max}, got {percent}")]
    BonusPercentOutOfRange { percent: Decimal, max: Decimal },
}

/// Product-level ceilings applied to user-entered income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeLimits {
    pub max_yearly_salary: Decimal,
    pub max_fixed_bonus: Decimal,
    pub max_bonus_percent: Decimal,
}

impl Default for IncomeLimits {
    fn default() -> Self {
        Self {
            max_yearly_salary: Decimal::from(500_000),
            max_fixed_bonus: Decimal::from(500_000),
            max_bonus_percent: Decimal::ONE_HUNDRED,
        }
    }
}

/// A plan's gross income as the user describes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeDescription {
    pub yearly_salary: Decimal,
    #[serde(default)]
    pub bonus: BonusKind,
}

impl IncomeDescription {
    pub fn new(
        yearly_salary: Decimal,
        bonus: BonusKind,
    ) -> Self {
        Self {
            yearly_salary,
            bonus,
        }
    }

    /// Salary only, no bonus.
    pub fn salary(yearly_salary: Decimal) -> Self {
        Self::new(yearly_salary, BonusKind::None)
    }

    /// Builds a description from raw floating-point form values.
    ///
    /// NaN and negative numbers become zero. Positive infinity and values
    /// too large for [`Decimal`] saturate at [`Decimal::MAX`], so a larger
    /// input never describes a smaller income.
    pub fn from_f64(
        yearly_salary: f64,
        bonus_type: &str,
        bonus_value: f64,
    ) -> Result<Self, IncomeValidationError> {
        let bonus = BonusKind::from_parts(bonus_type, coerce_f64(bonus_value))?;
        Ok(Self::new(coerce_f64(yearly_salary), bonus))
    }

    /// Checks the description against product ceilings.
    pub fn validate(
        &self,
        limits: &IncomeLimits,
    ) -> Result<(), IncomeValidationError> {
        if self.yearly_salary < Decimal::ZERO {
            return Err(IncomeValidationError::NegativeSalary(self.yearly_salary));
        }
        if self.yearly_salary > limits.max_yearly_salary {
            return Err(IncomeValidationError::SalaryAboveCeiling {
                salary: self.yearly_salary,
                max: limits.max_yearly_salary,
            });
        }
        match self.bonus {
            BonusKind::None => Ok(()),
            BonusKind::FixedAmount(amount) => {
                if amount < Decimal::ZERO {
                    return Err(IncomeValidationError::NegativeBonus(amount));
                }
                if amount > limits.max_fixed_bonus {
                    return Err(IncomeValidationError::BonusAboveCeiling {
                        amount,
                        max: limits.max_fixed_bonus,
                    });
                }
                Ok(())
            }
            BonusKind::PercentOfSalary(percent) => {
                if percent < Decimal::ZERO || percent > limits.max_bonus_percent {
                    return Err(IncomeValidationError::BonusPercentOutOfRange {
                        percent,
                        max: limits.max_bonus_percent,
                    });
                }
                Ok(())
            }
        }
    }
}

fn coerce_f64(value: f64) -> Decimal {
    if value.is_nan() || value <= 0.0 {
        return Decimal::ZERO;
    }
    match Decimal::from_f64(value) {
        Some(decimal) => decimal,
        // Out of range above; below range it rounds to nothing.
        None if value > 1.0 => Decimal::MAX,
        None => Decimal::ZERO,
    }
}
