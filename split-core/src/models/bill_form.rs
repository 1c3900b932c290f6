use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single itemized amount: one tax line or one charge line.
///
/// `None` means the input slot is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountLine {
    pub amount: Option<Decimal>,
}

impl AmountLine {
    /// A line with no amount entered.
    pub const BLANK: Self = Self { amount: None };

    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.amount.is_none()
    }
}

/// The two growable line lists on a [`BillForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCollection {
    Taxes,
    Charges,
}

impl LineCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Taxes => "taxes",
            Self::Charges => "charges",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "taxes" | "tax" => Some(Self::Taxes),
            "charges" | "charge" => Some(Self::Charges),
            _ => None,
        }
    }
}

impl fmt::Display for LineCollection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw user input for one bill.
///
/// Every amount is optional; the form is valid to hold in any partially
/// filled state. Both line lists always contain at least one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillForm {
    /// Total on the receipt, tax included.
    pub bill_amount: Option<Decimal>,

    /// Pre-tax subtotal, an alternative to itemized taxes.
    pub bill_without_taxes: Option<Decimal>,

    /// Itemized tax amounts in display order.
    pub taxes: Vec<AmountLine>,

    /// Amounts owed by the party settling up, in display order.
    pub charges: Vec<AmountLine>,
}

impl Default for BillForm {
    fn default() -> Self {
        Self {
            bill_amount: None,
            bill_without_taxes: None,
            taxes: vec![AmountLine::BLANK],
            charges: vec![AmountLine::BLANK],
        }
    }
}

impl BillForm {
    pub fn lines(
        &self,
        collection: LineCollection,
    ) -> &[AmountLine] {
        match collection {
            LineCollection::Taxes => &self.taxes,
            LineCollection::Charges => &self.charges,
        }
    }

    pub(crate) fn lines_mut(
        &mut self,
        collection: LineCollection,
    ) -> &mut Vec<AmountLine> {
        match collection {
            LineCollection::Taxes => &mut self.taxes,
            LineCollection::Charges => &mut self.charges,
        }
    }

    /// Returns `true` if at least one tax line holds an amount.
    pub fn has_itemized_taxes(&self) -> bool {
        self.taxes.iter().any(|line| !line.is_blank())
    }

    /// Iterates the non-empty amounts of a collection in display order.
    pub fn entered_amounts(
        &self,
        collection: LineCollection,
    ) -> impl Iterator<Item = Decimal> + '_ {
        self.lines(collection).iter().filter_map(|line| line.amount)
    }
}
