use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxBracket;

/// Errors found while validating a tax-year table or looking one up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    #[error("{schedule} schedule has no brackets")]
    NoBrackets { schedule: &'static str },

    #[error("{schedule} bracket {index} upper bound {bound} does not exceed the previous bound")]
    NonIncreasingBound {
        schedule: &'static str,
        index: usize,
        bound: Decimal,
    },

    #[error("{schedule} bracket {index} must have an upper bound; only the last bracket is open-ended")]
    UnboundedInnerBracket { schedule: &'static str, index: usize },

    #[error("{schedule} top bracket must be open-ended")]
    BoundedTopBracket { schedule: &'static str },

    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: String, value: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("personal amount phase-out is inverted: {0}")]
    InvalidPhaseOut(String),

    #[error("CPP ceilings must satisfy exemption < first ceiling < second ceiling")]
    InvalidCppCeilings,

    #[error("surtax second threshold {second} must exceed first threshold {first}")]
    InvalidSurtaxThresholds { first: Decimal, second: Decimal },

    #[error("health premium band {index} is out of order or exceeds its own maximum")]
    InvalidHealthPremiumBand { index: usize },

    #[error("no tax table for year {year}; available: {available:?}")]
    UnknownYear { year: i32, available: Vec<i32> },
}

/// Basic personal amount that shrinks linearly between two income levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalAmountPhaseOut {
    pub maximum: Decimal,
    pub minimum: Decimal,
    pub phase_out_start: Decimal,
    pub phase_out_end: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalSchedule {
    pub brackets: Vec<TaxBracket>,
    pub personal_amount: PersonalAmountPhaseOut,
}

/// Two-tier surtax levied on provincial basic tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surtax {
    pub first_threshold: Decimal,
    pub first_rate: Decimal,
    pub second_threshold: Decimal,
    pub second_rate: Decimal,
}

/// One step of the health premium schedule.
///
/// Applies to income strictly above `from`: the premium is
/// `base + rate * (income - from)`, capped at `max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPremiumBand {
    pub from: Decimal,
    pub base: Decimal,
    pub rate: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvincialSchedule {
    pub brackets: Vec<TaxBracket>,
    pub basic_personal_amount: Decimal,
    pub surtax: Surtax,
    pub health_premium: Vec<HealthPremiumBand>,
    /// Half of the largest reduction available; the benefit is twice this.
    pub tax_reduction_base: Decimal,
}

/// Canada Pension Plan contribution schedule (employee share).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CppSchedule {
    pub basic_exemption: Decimal,
    /// Year's maximum pensionable earnings.
    pub first_ceiling: Decimal,
    pub first_rate: Decimal,
    /// Year's additional maximum pensionable earnings.
    pub second_ceiling: Decimal,
    pub second_rate: Decimal,
}

/// Employment Insurance premium schedule (employee share).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EiSchedule {
    pub rate: Decimal,
    pub max_insurable_earnings: Decimal,
}

/// Every constant the tax model needs for one year and jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearTable {
    pub tax_year: i32,
    pub jurisdiction: String,
    pub federal: FederalSchedule,
    pub provincial: ProvincialSchedule,
    pub cpp: CppSchedule,
    pub ei: EiSchedule,
}

impl TaxYearTable {
    /// Checks the table for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxTableError`] found.
    pub fn validate(&self) -> Result<(), TaxTableError> {
        validate_brackets("federal", &self.federal.brackets)?;
        validate_brackets("provincial", &self.provincial.brackets)?;

        let phase_out = &self.federal.personal_amount;
        non_negative("federal.personal_amount.minimum", phase_out.minimum)?;
        if phase_out.minimum > phase_out.maximum {
            return Err(TaxTableError::InvalidPhaseOut(format!(
                "minimum {} exceeds maximum {}",
                phase_out.minimum, phase_out.maximum
            )));
        }
        if phase_out.phase_out_start >= phase_out.phase_out_end {
            return Err(TaxTableError::InvalidPhaseOut(format!(
                "start {} is not below end {}",
                phase_out.phase_out_start, phase_out.phase_out_end
            )));
        }

        let provincial = &self.provincial;
        non_negative(
            "provincial.basic_personal_amount",
            provincial.basic_personal_amount,
        )?;
        non_negative("provincial.tax_reduction_base", provincial.tax_reduction_base)?;
        rate("provincial.surtax.first_rate", provincial.surtax.first_rate)?;
        rate("provincial.surtax.second_rate", provincial.surtax.second_rate)?;
        non_negative(
            "provincial.surtax.first_threshold",
            provincial.surtax.first_threshold,
        )?;
        if provincial.surtax.second_threshold <= provincial.surtax.first_threshold {
            return Err(TaxTableError::InvalidSurtaxThresholds {
                first: provincial.surtax.first_threshold,
                second: provincial.surtax.second_threshold,
            });
        }
        validate_health_premium(&provincial.health_premium)?;

        let cpp = &self.cpp;
        non_negative("cpp.basic_exemption", cpp.basic_exemption)?;
        rate("cpp.first_rate", cpp.first_rate)?;
        rate("cpp.second_rate", cpp.second_rate)?;
        if !(cpp.basic_exemption < cpp.first_ceiling && cpp.first_ceiling < cpp.second_ceiling) {
            return Err(TaxTableError::InvalidCppCeilings);
        }

        rate("ei.rate", self.ei.rate)?;
        non_negative("ei.max_insurable_earnings", self.ei.max_insurable_earnings)?;

        Ok(())
    }
}

fn validate_brackets(
    schedule: &'static str,
    brackets: &[TaxBracket],
) -> Result<(), TaxTableError> {
    let Some((top, inner)) = brackets.split_last() else {
        return Err(TaxTableError::NoBrackets { schedule });
    };

    let mut previous = Decimal::ZERO;
    for (index, bracket) in inner.iter().enumerate() {
        rate(&format!("{schedule} bracket {index} rate"), bracket.rate)?;
        let bound = bracket
            .upper_bound
            .ok_or(TaxTableError::UnboundedInnerBracket { schedule, index })?;
        if bound <= previous {
            return Err(TaxTableError::NonIncreasingBound {
                schedule,
                index,
                bound,
            });
        }
        previous = bound;
    }

    rate(&format!("{schedule} bracket {} rate", inner.len()), top.rate)?;
    if top.upper_bound.is_some() {
        return Err(TaxTableError::BoundedTopBracket { schedule });
    }
    Ok(())
}

fn validate_health_premium(bands: &[HealthPremiumBand]) -> Result<(), TaxTableError> {
    let mut previous: Option<&HealthPremiumBand> = None;
    for (index, band) in bands.iter().enumerate() {
        rate(&format!("health premium band {index} rate"), band.rate)?;
        let ordered = previous.is_none_or(|p| band.from > p.from && band.base >= p.max);
        if band.from < Decimal::ZERO || band.base < Decimal::ZERO || band.base > band.max || !ordered
        {
            return Err(TaxTableError::InvalidHealthPremiumBand { index });
        }
        previous = Some(band);
    }
    Ok(())
}

fn rate(
    field: &str,
    value: Decimal,
) -> Result<(), TaxTableError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(TaxTableError::RateOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxTableError> {
    if value < Decimal::ZERO {
        return Err(TaxTableError::NegativeAmount { field, value });
    }
    Ok(())
}
