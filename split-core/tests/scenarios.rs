//! End-to-end behaviour of a bill splitting session driven the way a front
//! end drives it: raw text edits followed by reads of the derived values.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use split_core::calculations::common::round_half_up;
use split_core::format::{format_money, format_percentage};
use split_core::{
    AmountLine, BillForm, BillSplitter, FieldPath, LineCollection, TaxSource, ValidationRule,
    recompute, validate,
};

fn session(edits: &[(FieldPath, &str)]) -> BillSplitter {
    let mut splitter = BillSplitter::new();
    for (field, raw) in edits {
        if let Some((collection, index)) = field.as_line() {
            while splitter.form().lines(collection).len() <= index {
                splitter.append_line(collection);
            }
        }
        splitter
            .set_field_text(*field, raw)
            .expect("line was appended above");
    }
    splitter
}

fn rules_on(
    splitter: &BillSplitter,
    field: FieldPath,
) -> Vec<ValidationRule> {
    splitter.errors_for(field).map(|e| e.rule).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn subtotal_derives_percentage_and_total() {
    let splitter = session(&[
        (FieldPath::BillAmount, "100"),
        (FieldPath::BillWithoutTaxes, "90"),
        (FieldPath::Charge(0), "50"),
    ]);
    let derived = splitter.derived();

    assert_eq!(derived.tax_source, Some(TaxSource::BillWithoutTaxes));
    assert_eq!(derived.tax_percentage.map(round_half_up), Some(dec!(11.11)));
    assert_eq!(round_half_up(derived.total_payable), dec!(55.56));
    assert_eq!(format_percentage(derived.tax_percentage.unwrap()), "11.11");
    assert_eq!(format_money(derived.total_payable), "55.56");
    assert!(splitter.errors().is_empty());
}

#[test]
fn itemized_tax_derives_percentage_and_total() {
    let splitter = session(&[
        (FieldPath::BillAmount, "110"),
        (FieldPath::Tax(0), "10"),
        (FieldPath::Charge(0), "20"),
        (FieldPath::Charge(1), "30"),
    ]);
    let derived = splitter.derived();

    assert_eq!(derived.tax_source, Some(TaxSource::ItemizedTaxes));
    assert_eq!(derived.tax_percentage, Some(dec!(10)));
    assert_eq!(derived.charges_subtotal, dec!(50));
    assert_eq!(derived.total_payable, dec!(55));
    assert_eq!(format_percentage(derived.tax_percentage.unwrap()), "10");
    assert_eq!(format_money(derived.total_payable), "55.00");
}

#[test]
fn missing_bill_leaves_charges_untaxed() {
    let splitter = session(&[(FieldPath::Charge(0), "40")]);

    assert_eq!(splitter.derived().tax_percentage, None);
    assert_eq!(splitter.derived().total_payable, dec!(40));
    assert_eq!(
        rules_on(&splitter, FieldPath::BillAmount),
        vec![ValidationRule::BillAmountRequired]
    );
}

#[test]
fn subtotal_above_bill_is_flagged_but_still_computed() {
    let splitter = session(&[
        (FieldPath::BillAmount, "100"),
        (FieldPath::BillWithoutTaxes, "120"),
    ]);

    assert_eq!(
        rules_on(&splitter, FieldPath::BillWithoutTaxes),
        vec![ValidationRule::SubtotalExceedsBill]
    );
    assert_eq!(
        splitter.derived().tax_percentage.map(round_half_up),
        Some(dec!(-16.67))
    );
}

#[test]
fn both_tax_inputs_are_flagged_and_subtotal_wins() {
    let splitter = session(&[
        (FieldPath::BillAmount, "60"),
        (FieldPath::BillWithoutTaxes, "50"),
        (FieldPath::Tax(0), "10"),
    ]);

    assert_eq!(
        rules_on(&splitter, FieldPath::BillWithoutTaxes),
        vec![ValidationRule::MutuallyExclusiveTaxInputs]
    );
    assert_eq!(splitter.derived().tax_source, Some(TaxSource::BillWithoutTaxes));
    assert_eq!(splitter.derived().tax_percentage, Some(dec!(20)));
}

#[test]
fn reset_returns_to_defaults() {
    let mut splitter = session(&[
        (FieldPath::BillAmount, "110"),
        (FieldPath::Tax(1), "10"),
        (FieldPath::Charge(2), "30"),
    ]);

    splitter.reset();

    assert_eq!(
        splitter.form(),
        &BillForm {
            bill_amount: None,
            bill_without_taxes: None,
            taxes: vec![AmountLine::BLANK],
            charges: vec![AmountLine::BLANK],
        }
    );
    assert_eq!(splitter.derived().tax_percentage, None);
    assert_eq!(splitter.derived().total_payable, Decimal::ZERO);
}

#[test]
fn itemized_taxes_reaching_bill_are_flagged_without_percentage() {
    let splitter = session(&[
        (FieldPath::BillAmount, "50"),
        (FieldPath::Tax(0), "20"),
        (FieldPath::Tax(1), "30"),
        (FieldPath::Charge(0), "10"),
    ]);

    assert_eq!(
        rules_on(&splitter, FieldPath::Tax(1)),
        vec![ValidationRule::TaxesExceedBill]
    );
    assert_eq!(splitter.derived().tax_percentage, None);
    assert_eq!(splitter.derived().total_payable, dec!(10));
}

// =============================================================================
// Properties
// =============================================================================

fn sample_forms() -> Vec<BillForm> {
    let amounts = [None, Some(dec!(0)), Some(dec!(45.5)), Some(dec!(100)), Some(dec!(130))];
    let mut forms = Vec::new();
    for bill_amount in amounts {
        for bill_without_taxes in amounts {
            for tax in amounts {
                forms.push(BillForm {
                    bill_amount,
                    bill_without_taxes,
                    taxes: vec![AmountLine { amount: tax }, AmountLine::BLANK],
                    charges: vec![AmountLine::new(dec!(25)), AmountLine { amount: tax }],
                });
            }
        }
    }
    forms
}

#[test]
fn recompute_is_idempotent_for_all_samples() {
    for form in sample_forms() {
        assert_eq!(recompute(&form), recompute(&form), "form: {form:?}");
    }
}

#[test]
fn subtotal_takes_precedence_whenever_present() {
    for form in sample_forms() {
        let subtotal_applies = form.bill_amount.is_some_and(|v| !v.is_zero())
            && form.bill_without_taxes.is_some_and(|v| !v.is_zero());
        if !subtotal_applies {
            continue;
        }

        let without_taxes = BillForm {
            taxes: vec![AmountLine::BLANK],
            ..form.clone()
        };

        assert_eq!(
            recompute(&form).tax_percentage,
            recompute(&without_taxes).tax_percentage,
            "form: {form:?}"
        );
    }
}

#[test]
fn absent_or_zero_bill_never_taxes_charges() {
    for form in sample_forms() {
        if form.bill_amount.is_some_and(|v| !v.is_zero()) {
            continue;
        }
        let charges_sum: Decimal = form.entered_amounts(LineCollection::Charges).sum();

        let derived = recompute(&form);

        assert_eq!(derived.tax_percentage, None, "form: {form:?}");
        assert_eq!(derived.total_payable, charges_sum, "form: {form:?}");
    }
}

#[test]
fn exclusivity_flag_matches_filled_inputs() {
    for form in sample_forms() {
        let expected = form.bill_without_taxes.is_some() && form.has_itemized_taxes();

        let flagged = validate(&form)
            .iter()
            .any(|e| e.rule == ValidationRule::MutuallyExclusiveTaxInputs);

        assert_eq!(flagged, expected, "form: {form:?}");
    }
}

#[test]
fn bound_flag_matches_subtotal_above_bill() {
    for form in sample_forms() {
        let expected = matches!(
            (form.bill_amount, form.bill_without_taxes),
            (Some(bill), Some(subtotal)) if subtotal > bill
        );

        let flagged = validate(&form)
            .iter()
            .any(|e| e.rule == ValidationRule::SubtotalExceedsBill);

        assert_eq!(flagged, expected, "form: {form:?}");
    }
}

#[test]
fn reset_after_any_sample_yields_empty_outputs() {
    for form in sample_forms() {
        let mut splitter = BillSplitter::from_form(form);

        splitter.reset();

        assert_eq!(splitter.form(), &BillForm::default());
        assert_eq!(splitter.derived().tax_percentage, None);
        assert_eq!(splitter.derived().total_payable, Decimal::ZERO);
    }
}
