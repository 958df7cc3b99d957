//! Common utility functions for salary calculations.
//!
//! Shared rounding helpers used by the calculator. All
//! arithmetic is exact decimal arithmetic, so no epsilon correction is
//! needed before rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(1.005)), dec!(1.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}
