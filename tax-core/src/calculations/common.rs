//! Arithmetic shared by the slab, relief and formatting code.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, halves away from zero.
///
/// This is the display precision for every amount; the engine itself keeps
/// exact values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(617.254)), dec!(617.25));
/// assert_eq!(round_half_up(dec!(617.255)), dec!(617.26));
/// assert_eq!(round_half_up(dec!(-617.255)), dec!(-617.26));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(0), dec!(-75000)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// `amount × rate_percent / 100`, exactly.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(12345), 5), dec!(617.25));
/// ```
pub fn percent_of(
    amount: Decimal,
    rate_percent: u32,
) -> Decimal {
    amount * Decimal::from(rate_percent) / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(3800.004)), dec!(3800.00));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(24.685)), dec!(24.69));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-24.685)), dec!(-24.69));
    }

    #[test]
    fn round_half_up_carries_into_integer_part() {
        assert_eq!(round_half_up(dec!(99999.999)), dec!(100000.00));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(400000), dec!(325000)), dec!(400000));
        assert_eq!(max(dec!(325000), dec!(400000)), dec!(400000));
    }

    #[test]
    fn max_clamps_negative_to_zero() {
        assert_eq!(max(Decimal::ZERO, dec!(-75000)), Decimal::ZERO);
    }

    // =========================================================================
    // percent_of tests
    // =========================================================================

    #[test]
    fn percent_of_whole_rate() {
        assert_eq!(percent_of(dec!(400000), 5), dec!(20000));
        assert_eq!(percent_of(dec!(95000), 4), dec!(3800));
    }

    #[test]
    fn percent_of_keeps_fractions() {
        assert_eq!(percent_of(dec!(1), 15), dec!(0.15));
    }

    #[test]
    fn percent_of_zero_rate_is_zero() {
        assert_eq!(percent_of(dec!(400000), 0), Decimal::ZERO);
    }
}
