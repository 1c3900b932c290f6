use std::fmt;

use serde::{Deserialize, Serialize};

use super::FieldPath;

/// The rule a [`ValidationError`] was raised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationRule {
    /// Bill without taxes and itemized taxes are both filled.
    MutuallyExclusiveTaxInputs,
    /// Bill without taxes is higher than the bill amount.
    SubtotalExceedsBill,
    /// Bill amount is missing.
    BillAmountRequired,
    /// Itemized taxes add up to the bill amount or more.
    TaxesExceedBill,
}

impl ValidationRule {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MutuallyExclusiveTaxInputs => {
                "You can only fill either 'Bill without taxes' or individual tax amounts, not both."
            }
            Self::SubtotalExceedsBill => "Bill without taxes cannot be higher than total bill amount.",
            Self::BillAmountRequired => "Bill amount is required.",
            Self::TaxesExceedBill => "Taxes cannot add up to the total bill amount or more.",
        }
    }
}

/// An advisory, field-scoped problem with the current form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: FieldPath,
    pub rule: ValidationRule,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        field: FieldPath,
        rule: ValidationRule,
    ) -> Self {
        Self {
            field,
            rule,
            message: rule.message().to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
