//! Normalization of raw numeric text into form values.
//!
//! Text coming from an input widget is never an error: anything that is not
//! a number becomes "no value".

use rust_decimal::Decimal;

/// Trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Converts raw field text into an optional amount.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and scientific
/// notation (e.g. `"1.5e2"`). Returns `None` for empty or whitespace-only
/// input, and for text that is not a number (logs a warning), never zero.
/// A non-zero number too small for 28 decimal places is stored as zero with
/// a warning.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::input::normalize_amount;
///
/// assert_eq!(normalize_amount("1,234.56"), Some(dec!(1234.56)));
/// assert_eq!(normalize_amount(""), None);
/// assert_eq!(normalize_amount("twelve"), None);
/// ```
pub fn normalize_amount(raw: &str) -> Option<Decimal> {
    let normalized = normalize_amount_input(raw);
    if normalized.is_empty() {
        return None;
    }

    let amount = normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_or_else(
            |e| {
                tracing::warn!(input = %raw, "invalid amount, treating as empty: {}", e);
                None
            },
            Some,
        )?;

    if underflowed_to_zero(&normalized, amount) {
        tracing::warn!(
            input = %raw,
            "amount is below the smallest representable value, stored as 0"
        );
    }
    Some(amount)
}

/// Returns `true` when `amount` parsed as zero although the mantissa in
/// `normalized` has a non-zero digit (more than 28 fractional digits).
fn underflowed_to_zero(
    normalized: &str,
    amount: Decimal,
) -> bool {
    let mantissa = normalized
        .split(['e', 'E'])
        .next()
        .unwrap_or(normalized);
    amount.is_zero() && mantissa.chars().any(|c| matches!(c, '1'..='9'))
}

/// Formats an optional amount for display, using "—" when `None`.
pub fn opt_amount_display(amount: &Option<Decimal>) -> String {
    amount
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn normalize_amount_accepts_comma_thousands_separator() {
        assert_eq!(normalize_amount("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(normalize_amount("1,234,567.89"), Some(dec!(1234567.89)));
    }

    #[test]
    fn normalize_amount_trims_whitespace() {
        assert_eq!(normalize_amount("  123.45  "), Some(dec!(123.45)));
    }

    #[test]
    fn normalize_amount_empty_is_no_value_not_zero() {
        assert_eq!(normalize_amount(""), None);
        assert_eq!(normalize_amount("   "), None);
    }

    #[test]
    fn normalize_amount_invalid_is_no_value() {
        assert_eq!(normalize_amount("abc"), None);
        assert_eq!(normalize_amount("12abc"), None);
        assert_eq!(normalize_amount("NaN"), None);
        assert_eq!(normalize_amount("Infinity"), None);
    }

    #[test]
    fn normalize_amount_keeps_explicit_zero() {
        assert_eq!(normalize_amount("0"), Some(dec!(0)));
    }

    #[test]
    fn normalize_amount_accepts_negative_values() {
        assert_eq!(normalize_amount("-5.25"), Some(dec!(-5.25)));
    }

    #[test]
    fn normalize_amount_accepts_scientific_notation() {
        assert_eq!(normalize_amount("1.5e2"), Some(dec!(150)));
    }

    #[test]
    fn normalize_amount_too_precise_is_stored_as_zero() {
        let tiny = format!("0.{}1", "0".repeat(40));

        assert_eq!(normalize_amount(&tiny), Some(Decimal::ZERO));
        assert!(underflowed_to_zero(&tiny, Decimal::ZERO));
    }

    #[test]
    fn underflowed_to_zero_ignores_real_zeros() {
        assert!(!underflowed_to_zero("0", Decimal::ZERO));
        assert!(!underflowed_to_zero("0.000", Decimal::ZERO));
        assert!(!underflowed_to_zero("0e5", Decimal::ZERO));
        assert!(!underflowed_to_zero("-0.0", Decimal::ZERO));
        assert!(!underflowed_to_zero("12", dec!(12)));
    }

    #[test]
    fn opt_amount_display_uses_dash_for_empty() {
        assert_eq!(opt_amount_display(&None), "—");
        assert_eq!(opt_amount_display(&Some(dec!(12.50))), "12.50");
    }
}
