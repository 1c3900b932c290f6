mod bill_form;
mod derived;
mod field_path;
mod snapshot;
mod validation_error;

pub use bill_form::{AmountLine, BillForm, LineCollection};
pub use derived::{Derived, TaxSource};
pub use field_path::{FieldPath, FieldPathError};
pub use snapshot::Snapshot;
pub use validation_error::{ValidationError, ValidationRule};
