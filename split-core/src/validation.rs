//! Field-scoped validation of a [`BillForm`].
//!
//! Validation is advisory: it never prevents an edit or a recompute. Errors
//! are returned in a fixed order (bill amount first, then bill without
//! taxes, then tax lines).

use tracing::trace;

use crate::calculations::derivation::itemized_taxes_in_effect;
use crate::models::{BillForm, FieldPath, ValidationError, ValidationRule};

/// Checks the form against every rule and returns all violations.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::{BillForm, FieldPath, ValidationRule, validate};
///
/// let form = BillForm {
///     bill_amount: Some(dec!(100)),
///     bill_without_taxes: Some(dec!(120)),
///     ..BillForm::default()
/// };
///
/// let errors = validate(&form);
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].field, FieldPath::BillWithoutTaxes);
/// assert_eq!(errors[0].rule, ValidationRule::SubtotalExceedsBill);
/// ```
pub fn validate(form: &BillForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if form.bill_amount.is_none() {
        errors.push(ValidationError::new(
            FieldPath::BillAmount,
            ValidationRule::BillAmountRequired,
        ));
    }

    if form.bill_without_taxes.is_some() && form.has_itemized_taxes() {
        errors.push(ValidationError::new(
            FieldPath::BillWithoutTaxes,
            ValidationRule::MutuallyExclusiveTaxInputs,
        ));
    }

    if let (Some(bill_amount), Some(subtotal)) = (form.bill_amount, form.bill_without_taxes) {
        if subtotal > bill_amount {
            errors.push(ValidationError::new(
                FieldPath::BillWithoutTaxes,
                ValidationRule::SubtotalExceedsBill,
            ));
        }
    }

    if let Some(index) = degenerate_tax_line(form) {
        errors.push(ValidationError::new(
            FieldPath::Tax(index),
            ValidationRule::TaxesExceedBill,
        ));
    }

    trace!(count = errors.len(), "validated bill form");
    errors
}

/// Index of the last filled tax line when itemized taxes reach the bill amount.
fn degenerate_tax_line(form: &BillForm) -> Option<usize> {
    let (bill_amount, taxes_sum) = itemized_taxes_in_effect(form)?;
    if taxes_sum < bill_amount {
        return None;
    }
    form.taxes.iter().rposition(|line| !line.is_blank())
}
