//! Common utility functions for bill calculations.
//!
//! This module provides the small decimal helpers shared by the derivation
//! and validation code: rounding, checked summing and "present and
//! non-zero" filtering of optional amounts.

use rust_decimal::Decimal;

/// The factor between a ratio and a percentage.
pub const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(55.555)), dec!(55.56));
/// assert_eq!(round_half_up(dec!(11.1111)), dec!(11.11));
/// assert_eq!(round_half_up(dec!(-16.665)), dec!(-16.67)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Sums a sequence of amounts, returning `None` on overflow.
///
/// # Arguments
///
/// * `amounts` - The amounts to add, in any order
///
/// # Returns
///
/// The exact sum, zero for an empty sequence, or `None` when an intermediate
/// sum does not fit in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use split_core::calculations::common::checked_sum;
///
/// assert_eq!(checked_sum([dec!(20), dec!(30)]), Some(dec!(50)));
/// assert_eq!(checked_sum(Vec::<Decimal>::new()), Some(Decimal::ZERO));
/// assert_eq!(checked_sum([Decimal::MAX, dec!(1)]), None);
/// ```
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(amount))
}

/// Sums a sequence of amounts, clamping at [`Decimal::MAX`] / [`Decimal::MIN`].
///
/// Use this after [`checked_sum`] reported an overflow, to learn which way the
/// sum ran off.
///
/// # Arguments
///
/// * `amounts` - The amounts to add, in order
///
/// # Returns
///
/// The sum, saturated at the bound it crossed.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use split_core::calculations::common::saturating_sum;
///
/// assert_eq!(saturating_sum([dec!(20), dec!(30)]), dec!(50));
/// assert_eq!(saturating_sum([Decimal::MAX, dec!(1)]), Decimal::MAX);
/// assert_eq!(saturating_sum([Decimal::MIN, dec!(-1)]), Decimal::MIN);
/// ```
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |sum, amount| sum.saturating_add(amount))
}

/// Keeps an amount only when it is present and not zero.
///
/// Both an empty field and an explicit zero count as "not provided" for the
/// purpose of choosing a derivation branch.
///
/// # Arguments
///
/// * `value` - An optional form amount
///
/// # Returns
///
/// `value` unchanged unless it holds zero (at any scale).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::calculations::common::non_zero;
///
/// assert_eq!(non_zero(Some(dec!(90))), Some(dec!(90)));
/// assert_eq!(non_zero(Some(dec!(0.00))), None);
/// assert_eq!(non_zero(None), None);
/// ```
pub fn non_zero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}
