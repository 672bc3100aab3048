//! Shared arithmetic helpers for salary calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to two decimal places, half away from zero.
///
/// Applied once to each reported amount, never to intermediate sums.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1900000.004)), dec!(1900000.00));
/// assert_eq!(round_half_up(dec!(1900000.005)), dec!(1900000.01));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-4300000)), dec!(0));
/// assert_eq!(non_negative(dec!(7100000)), dec!(7100000));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
