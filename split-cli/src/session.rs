//! Session state for the bill splitter front end.
//!
//! Wraps the engine with the front-end policy of keeping one blank line at
//! the end of the tax and charge lists.

use split_core::{BillSplitter, EngineError, FieldPath, Snapshot};
use tracing::debug;

use crate::command::Edit;
use crate::config::SessionConfig;

/// One user's bill, edited through [`Edit`] commands.
#[derive(Debug, Clone)]
pub struct Session {
    splitter: BillSplitter,
    auto_append_lines: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            splitter: BillSplitter::new(),
            auto_append_lines: config.auto_append_lines,
        }
    }

    pub fn splitter(&self) -> &BillSplitter {
        &self.splitter
    }

    pub fn snapshot(&self) -> Snapshot {
        self.splitter.snapshot()
    }

    /// Applies one edit and recomputes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when a `Set` addresses a line that does not
    /// exist.
    pub fn apply(
        &mut self,
        edit: &Edit,
    ) -> Result<(), EngineError> {
        match edit {
            Edit::Set { field, raw } => {
                self.splitter.set_field_text(*field, raw)?;
                self.keep_trailing_blank_line(*field);
            }
            Edit::Append(collection) => {
                self.splitter.append_line(*collection);
            }
            Edit::Reset => self.splitter.reset(),
        }
        Ok(())
    }

    /// Appends a blank line after `field` when it is the filled last line.
    fn keep_trailing_blank_line(
        &mut self,
        field: FieldPath,
    ) {
        if !self.auto_append_lines {
            return;
        }
        let Some((collection, index)) = field.as_line() else {
            return;
        };
        let lines = self.splitter.form().lines(collection);
        if index + 1 == lines.len() && !lines[index].is_blank() {
            let new_index = self.splitter.append_line(collection);
            debug!(%collection, new_index, "kept a trailing blank line");
        }
    }
}
