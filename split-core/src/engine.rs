//! The per-session derivation engine.
//!
//! [`BillSplitter`] owns one [`BillForm`] and keeps the derived values and
//! validation errors in step with it. Every command takes `&mut self`, so an
//! edit and the recompute that follows it always run as one step.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::calculations::recompute;
use crate::input::normalize_amount;
use crate::models::{
    AmountLine, BillForm, Derived, FieldPath, LineCollection, Snapshot, ValidationError,
};
use crate::validation::validate;

/// Errors raised by commands that address a field which does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A line path pointed past the end of its collection.
    #[error("{collection} has {len} line(s), there is no line {index}")]
    LineOutOfRange {
        collection: LineCollection,
        index: usize,
        len: usize,
    },
}

/// Interactive bill calculator for a single session.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::{BillSplitter, FieldPath};
///
/// let mut splitter = BillSplitter::new();
/// splitter.set_field_text(FieldPath::BillAmount, "110").unwrap();
/// splitter.set_field_text(FieldPath::Tax(0), "10").unwrap();
/// splitter.set_field_text(FieldPath::Charge(0), "50").unwrap();
///
/// assert_eq!(splitter.derived().tax_percentage, Some(dec!(10)));
/// assert_eq!(splitter.derived().total_payable, dec!(55));
/// assert!(splitter.errors().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BillSplitter {
    form: BillForm,
    derived: Derived,
    errors: Vec<ValidationError>,
}

impl Default for BillSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl BillSplitter {
    /// Creates a session with an all-empty form.
    pub fn new() -> Self {
        Self::from_form(BillForm::default())
    }

    /// Creates a session from an existing form, computing its outputs.
    ///
    /// An empty tax or charge list gets one blank line.
    pub fn from_form(mut form: BillForm) -> Self {
        for collection in [LineCollection::Taxes, LineCollection::Charges] {
            let lines = form.lines_mut(collection);
            if lines.is_empty() {
                lines.push(AmountLine::BLANK);
            }
        }
        let mut splitter = Self {
            form,
            derived: Derived::default(),
            errors: Vec::new(),
        };
        splitter.refresh();
        splitter
    }

    pub fn form(&self) -> &BillForm {
        &self.form
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    /// Validation errors for the current form.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors attached to one field.
    pub fn errors_for(
        &self,
        field: FieldPath,
    ) -> impl Iterator<Item = &ValidationError> + '_ {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Stores `value` at `field` (or clears it when `None`) and recomputes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LineOutOfRange`] when `field` names a line that
    /// does not exist. The form is left unchanged.
    pub fn set_field(
        &mut self,
        field: FieldPath,
        value: Option<Decimal>,
    ) -> Result<(), EngineError> {
        *self.slot_mut(field)? = value;
        debug!(%field, ?value, "field updated");
        self.refresh();
        Ok(())
    }

    /// Normalizes raw input text and stores it at `field`.
    ///
    /// Empty or non-numeric text clears the field.
    ///
    /// # Errors
    ///
    /// Same as [`BillSplitter::set_field`].
    pub fn set_field_text(
        &mut self,
        field: FieldPath,
        raw: &str,
    ) -> Result<(), EngineError> {
        self.set_field(field, normalize_amount(raw))
    }

    /// Appends a blank line to `collection` and returns its index.
    pub fn append_line(
        &mut self,
        collection: LineCollection,
    ) -> usize {
        let lines = self.form.lines_mut(collection);
        lines.push(AmountLine::BLANK);
        let index = lines.len() - 1;
        debug!(%collection, index, "line appended");
        self.refresh();
        index
    }

    /// Restores the all-empty form and clears every derived value.
    pub fn reset(&mut self) {
        self.form = BillForm::default();
        info!("bill form reset");
        self.refresh();
    }

    /// Re-runs validation on the current form.
    pub fn validate(&self) -> Vec<ValidationError> {
        validate(&self.form)
    }

    /// Copies the current form, derived values and errors.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            form: self.form.clone(),
            derived: self.derived.clone(),
            errors: self.errors.clone(),
        }
    }

    fn slot_mut(
        &mut self,
        field: FieldPath,
    ) -> Result<&mut Option<Decimal>, EngineError> {
        match field.as_line() {
            None if field == FieldPath::BillAmount => Ok(&mut self.form.bill_amount),
            None => Ok(&mut self.form.bill_without_taxes),
            Some((collection, index)) => {
                let lines = self.form.lines_mut(collection);
                let len = lines.len();
                lines
                    .get_mut(index)
                    .map(|line| &mut line.amount)
                    .ok_or(EngineError::LineOutOfRange {
                        collection,
                        index,
                        len,
                    })
            }
        }
    }

    fn refresh(&mut self) {
        self.derived = recompute(&self.form);
        self.errors = validate(&self.form);
    }
}
