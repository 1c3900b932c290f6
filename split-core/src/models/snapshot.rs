use serde::{Deserialize, Serialize};

use super::{BillForm, Derived, ValidationError};

/// Read-only view of a session after the latest command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub form: BillForm,
    pub derived: Derived,
    pub errors: Vec<ValidationError>,
}

impl Snapshot {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
