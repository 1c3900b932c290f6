//! Display rules for derived values.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Formats a tax percentage without the `%` sign.
///
/// Whole numbers are shown without decimals, anything else with exactly two.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::format::format_percentage;
///
/// assert_eq!(format_percentage(dec!(10.000)), "10");
/// assert_eq!(format_percentage(dec!(100) / dec!(9)), "11.11");
/// ```
pub fn format_percentage(percentage: Decimal) -> String {
    if percentage.fract().is_zero() {
        percentage.trunc().normalize().to_string()
    } else {
        format_money(percentage)
    }
}

/// Formats an amount with exactly two decimals, rounding half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::format::format_money;
///
/// assert_eq!(format_money(dec!(55)), "55.00");
/// assert_eq!(format_money(dec!(55.555)), "55.56");
/// ```
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = round_half_up(amount);
    rounded.rescale(2);
    rounded.to_string()
}
