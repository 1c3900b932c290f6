//! CSV edit logs: a recorded sequence of form edits that can be replayed
//! into a [`Session`].
//!
//! ## CSV Format
//!
//! Headers are matched by name and are case-sensitive.
//!
//! | Column   | Required | Notes                                                   |
//! |----------|----------|---------------------------------------------------------|
//! | `action` | yes      | One of: `set`, `append`, `reset`                        |
//! | `field`  | no       | Field path for `set`, `taxes`/`charges` for `append`    |
//! | `value`  | no       | Raw text for `set`; leave empty to clear the field      |
//!
//! ### Example
//!
//! ```csv
//! action,field,value
//! set,billAmount,110
//! set,taxes[0].amount,10
//! append,charges,
//! set,charges[0].amount,20
//! set,charges[1].amount,30
//! ```

use std::path::Path;

use serde::Deserialize;
use split_core::{EngineError, LineCollection};
use thiserror::Error;
use tracing::info;

use crate::command::Edit;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Action {
    Set,
    Append,
    Reset,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    action: Action,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or replaying an edit log.
///
/// `row` is 1-based and does not count the header.
#[derive(Debug, Error)]
pub enum EditLogError {
    #[error("cannot read edit log: {0}")]
    Io(#[from] std::io::Error),

    /// Bad structure, missing column or unknown action.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("row {row}: '{action}' needs a field")]
    MissingField { action: &'static str, row: usize },

    #[error("row {row}: unknown field '{field}'")]
    InvalidField { field: String, row: usize },

    #[error("row {row}: {source}")]
    Replay {
        row: usize,
        #[source]
        source: EngineError,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into an [`Edit`].
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Edit, EditLogError> {
    let field = row.field.filter(|f| !f.trim().is_empty());

    match row.action {
        Action::Reset => Ok(Edit::Reset),
        Action::Append => {
            let name = field.ok_or(EditLogError::MissingField {
                action: "append",
                row: row_number,
            })?;
            LineCollection::parse(&name)
                .map(Edit::Append)
                .ok_or(EditLogError::InvalidField {
                    field: name,
                    row: row_number,
                })
        }
        Action::Set => {
            let name = field.ok_or(EditLogError::MissingField {
                action: "set",
                row: row_number,
            })?;
            let field = name.parse().map_err(|_| EditLogError::InvalidField {
                field: name.clone(),
                row: row_number,
            })?;
            Ok(Edit::Set {
                field,
                raw: row.value.unwrap_or_default(),
            })
        }
    }
}

/// Parse CSV text and return the edits in file order.
///
/// # Errors
///
/// * [`EditLogError::Parse`] – if the CSV is structurally invalid or a row
///   has an unknown action.
/// * [`EditLogError::MissingField`] / [`EditLogError::InvalidField`] – if a
///   row does not name a usable field.
pub fn load_from_str(input: &str) -> Result<Vec<Edit>, EditLogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true) // trailing empty columns may be omitted
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Edit>, EditLogError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Applies `edits` to `session` in order, stopping at the first failure.
///
/// Edits before the failing row stay applied.
pub fn replay(
    session: &mut Session,
    edits: &[Edit],
) -> Result<(), EditLogError> {
    for (idx, edit) in edits.iter().enumerate() {
        session
            .apply(edit)
            .map_err(|source| EditLogError::Replay {
                row: idx + 1,
                source,
            })?;
    }
    info!(edits = edits.len(), "edit log replayed");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
