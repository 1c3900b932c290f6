//! Derivation of the effective tax percentage and the payable total.
//!
//! # Algorithm
//!
//! The tax percentage is chosen by the first matching branch:
//!
//! | Step | Condition | Tax percentage |
//! |------|-----------|----------------|
//! | 1 | bill amount empty or zero | none |
//! | 2 | bill without taxes present and non-zero | `(bill - subtotal) × 100 / subtotal` |
//! | 3 | itemized taxes sum `> 0` | `taxes × 100 / (bill - taxes)` |
//! | 4 | otherwise | none |
//!
//! In step 3 an implied subtotal of zero or less (taxes at or above the bill
//! amount) yields no percentage; validation reports it separately.
//!
//! The charges are then summed and, when a percentage exists and the sum is
//! positive, the proportional tax is added on top.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use split_core::calculations::recompute;
//! use split_core::{AmountLine, BillForm, TaxSource};
//!
//! let form = BillForm {
//!     bill_amount: Some(dec!(110)),
//!     taxes: vec![AmountLine::new(dec!(10))],
//!     charges: vec![AmountLine::new(dec!(20)), AmountLine::new(dec!(30))],
//!     ..BillForm::default()
//! };
//!
//! let derived = recompute(&form);
//!
//! assert_eq!(derived.tax_percentage, Some(dec!(10)));
//! assert_eq!(derived.tax_source, Some(TaxSource::ItemizedTaxes));
//! assert_eq!(derived.total_payable, dec!(55));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{ONE_HUNDRED, checked_sum, non_zero, saturating_sum};
use crate::models::{BillForm, Derived, LineCollection, TaxSource};

/// Recomputes every derived value from the current form.
///
/// This is a pure function of `form`: calling it twice on the same input
/// returns equal results.
pub fn recompute(form: &BillForm) -> Derived {
    let (tax_percentage, tax_source) = match tax_percentage(form) {
        Some((percentage, source)) => (Some(percentage), Some(source)),
        None => (None, None),
    };

    let charges_subtotal = charges_subtotal(form);
    let charges_tax = charges_tax(charges_subtotal, tax_percentage);

    let derived = Derived {
        tax_percentage,
        tax_source,
        charges_subtotal,
        charges_tax,
        total_payable: charges_subtotal + charges_tax,
    };
    debug!(
        tax_percentage = ?derived.tax_percentage,
        total_payable = %derived.total_payable,
        "recomputed bill"
    );
    derived
}

/// Sum of the itemized taxes when the itemized branch is in effect.
///
/// Returns `Some` only when the bill amount is present and non-zero, the bill
/// without taxes is empty or zero, and the taxes add up to more than zero.
/// Validation uses this to flag degenerate input. An overflowing sum is
/// saturated, so it always reaches the bill amount.
pub(crate) fn itemized_taxes_in_effect(form: &BillForm) -> Option<(Decimal, Decimal)> {
    let bill_amount = non_zero(form.bill_amount)?;
    if non_zero(form.bill_without_taxes).is_some() {
        return None;
    }
    let taxes_sum = entered_sum(form, LineCollection::Taxes);
    (taxes_sum > Decimal::ZERO).then_some((bill_amount, taxes_sum))
}

/// Sum of the entered amounts of `collection`, saturating on overflow.
fn entered_sum(
    form: &BillForm,
    collection: LineCollection,
) -> Decimal {
    checked_sum(form.entered_amounts(collection)).unwrap_or_else(|| {
        let saturated = saturating_sum(form.entered_amounts(collection));
        warn!(%collection, %saturated, "amounts overflowed, saturating");
        saturated
    })
}

/// Picks the derivation branch and computes the tax percentage.
fn tax_percentage(form: &BillForm) -> Option<(Decimal, TaxSource)> {
    let bill_amount = non_zero(form.bill_amount)?;

    if let Some(subtotal) = non_zero(form.bill_without_taxes) {
        return percentage_from_subtotal(bill_amount, subtotal)
            .map(|percentage| (percentage, TaxSource::BillWithoutTaxes));
    }

    let (bill_amount, taxes_sum) = itemized_taxes_in_effect(form)?;
    percentage_from_itemized_taxes(bill_amount, taxes_sum)
        .map(|percentage| (percentage, TaxSource::ItemizedTaxes))
}

/// `(bill - subtotal) × 100 / subtotal`, `None` on overflow.
fn percentage_from_subtotal(
    bill_amount: Decimal,
    subtotal: Decimal,
) -> Option<Decimal> {
    let percentage = bill_amount
        .checked_sub(subtotal)
        .and_then(|tax| tax.checked_mul(ONE_HUNDRED))
        .and_then(|scaled| scaled.checked_div(subtotal));

    if percentage.is_none() {
        warn!(%bill_amount, %subtotal, "tax percentage overflowed");
    }
    percentage
}

/// `taxes × 100 / (bill - taxes)`, `None` when the implied subtotal is not
/// positive or on overflow.
fn percentage_from_itemized_taxes(
    bill_amount: Decimal,
    taxes_sum: Decimal,
) -> Option<Decimal> {
    let Some(implied_subtotal) = bill_amount.checked_sub(taxes_sum) else {
        warn!(%bill_amount, %taxes_sum, "implied subtotal overflowed");
        return None;
    };
    if implied_subtotal <= Decimal::ZERO {
        warn!(
            %bill_amount,
            %taxes_sum,
            "itemized taxes reach the bill amount, no tax percentage"
        );
        return None;
    }

    let percentage = taxes_sum
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(implied_subtotal));
    if percentage.is_none() {
        warn!(%taxes_sum, %implied_subtotal, "tax percentage overflowed");
    }
    percentage
}

/// Sum of all entered charges.
fn charges_subtotal(form: &BillForm) -> Decimal {
    entered_sum(form, LineCollection::Charges)
}

/// Tax owed on top of the charges.
///
/// Zero when there is no percentage, when the subtotal is not positive, or
/// when applying the percentage would overflow the total.
fn charges_tax(
    charges_subtotal: Decimal,
    tax_percentage: Option<Decimal>,
) -> Decimal {
    let Some(percentage) = tax_percentage else {
        return Decimal::ZERO;
    };
    if charges_subtotal <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    charges_subtotal
        .checked_mul(percentage)
        .and_then(|scaled| scaled.checked_div(ONE_HUNDRED))
        .filter(|tax| charges_subtotal.checked_add(*tax).is_some())
        .unwrap_or_else(|| {
            warn!(%charges_subtotal, %percentage, "charges tax overflowed, ignoring tax");
            Decimal::ZERO
        })
}
