use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which input produced the effective tax percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxSource {
    /// Derived from the bill amount and the pre-tax subtotal.
    BillWithoutTaxes,
    /// Derived from the bill amount and the sum of itemized taxes.
    ItemizedTaxes,
}

/// Values computed from a [`BillForm`](super::BillForm) after every edit.
///
/// Never stored by the user; always recomputed from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    /// Effective tax rate as a percent, `None` when it cannot be determined.
    pub tax_percentage: Option<Decimal>,

    /// Branch that produced `tax_percentage`.
    pub tax_source: Option<TaxSource>,

    /// Sum of all entered charge amounts.
    pub charges_subtotal: Decimal,

    /// Tax applied on top of `charges_subtotal`.
    pub charges_tax: Decimal,

    /// `charges_subtotal + charges_tax`.
    pub total_payable: Decimal,
}

impl Default for Derived {
    fn default() -> Self {
        Self {
            tax_percentage: None,
            tax_source: None,
            charges_subtotal: Decimal::ZERO,
            charges_tax: Decimal::ZERO,
            total_payable: Decimal::ZERO,
        }
    }
}
