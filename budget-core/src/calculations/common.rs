//! Small numeric helpers shared by the tax model and the monthly summary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole cents, with midpoints going away from zero.
///
/// Only output figures are rounded; intermediate values keep full precision.
///
/// # Arguments
///
/// * `value` - The amount to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use budget_core::calculations::common::round_to_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_to_cents(dec!(1607.515)), dec!(1607.52));
/// assert_eq!(round_to_cents(dec!(-0.125)), dec!(-0.13));
/// assert_eq!(round_to_cents(dec!(216.6666)), dec!(216.67));
/// ```
pub fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero when it is negative.
///
/// # Arguments
///
/// * `value` - The amount to clamp
///
/// # Returns
///
/// `value` when it is zero or positive, otherwise zero.
///
/// # Examples
///
/// ```
/// use budget_core::calculations::common::floor_at_zero;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(floor_at_zero(dec!(-12.50)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(12.50)), dec!(12.50));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// The part of `value` that falls inside `[lower, upper]`, measured from
/// `lower`.
///
/// # Arguments
///
/// * `value` - The income being sliced
/// * `lower` - Where the slice starts
/// * `upper` - Where the slice ends
///
/// # Returns
///
/// `min(value, upper) - lower`, or zero when `value` is at or below `lower`.
///
/// # Examples
///
/// ```
/// use budget_core::calculations::common::portion_between;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(portion_between(dec!(80000), dec!(3500), dec!(74600)), dec!(71100));
/// assert_eq!(portion_between(dec!(2000), dec!(3500), dec!(74600)), dec!(0));
/// ```
pub fn portion_between(
    value: Decimal,
    lower: Decimal,
    upper: Decimal,
) -> Decimal {
    floor_at_zero(value.min(upper) - lower)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_to_cents tests
    // =========================================================================

    #[test]
    fn round_to_cents_rounds_down_below_midpoint() {
        assert_eq!(round_to_cents(dec!(4996.0849)), dec!(4996.08));
    }

    #[test]
    fn round_to_cents_rounds_midpoint_away_from_zero() {
        assert_eq!(round_to_cents(dec!(0.005)), dec!(0.01));
        assert_eq!(round_to_cents(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn round_to_cents_handles_repeating_division() {
        let monthly = dec!(100) * dec!(26) / dec!(12);

        assert_eq!(round_to_cents(monthly), dec!(216.67));
    }

    #[test]
    fn round_to_cents_keeps_whole_amounts() {
        assert_eq!(round_to_cents(dec!(1123.07)), dec!(1123.07));
        assert_eq!(round_to_cents(Decimal::ZERO), dec!(0.00));
    }

    // =========================================================================
    // floor_at_zero tests
    // =========================================================================

    #[test]
    fn floor_at_zero_clamps_negative_values() {
        assert_eq!(floor_at_zero(dec!(-12.5)), Decimal::ZERO);
    }

    #[test]
    fn floor_at_zero_keeps_positive_values() {
        assert_eq!(floor_at_zero(dec!(12.5)), dec!(12.5));
    }

    // =========================================================================
    // portion_between tests
    // =========================================================================

    #[test]
    fn portion_between_is_zero_below_lower_bound() {
        assert_eq!(portion_between(dec!(100), dec!(200), dec!(300)), Decimal::ZERO);
    }

    #[test]
    fn portion_between_measures_from_lower_bound() {
        assert_eq!(portion_between(dec!(250), dec!(200), dec!(300)), dec!(50));
    }

    #[test]
    fn portion_between_caps_at_upper_bound() {
        assert_eq!(portion_between(dec!(1000), dec!(200), dec!(300)), dec!(100));
    }
}
