//! Parser for the interactive prompt.
//!
//! One command per line. Keywords are case-insensitive; field paths are
//! written as `billAmount`, `billWithoutTaxes`, `taxes[i].amount` or
//! `charges[i].amount`.
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `set <field> [=] [value]` | store a value, no value clears the field |
//! | `<field> = [value]` | same as `set` |
//! | `append taxes\|charges` | add a blank line |
//! | `reset` | clear the whole form |
//! | `show` | print the current bill |
//! | `validate` | print validation errors only |
//! | `log <filter>` | change the log level |
//! | `help` | list commands |
//! | `quit` / `exit` | leave |

use std::sync::LazyLock;

use regex::Regex;
use split_core::{FieldPath, FieldPathError, LineCollection};
use thiserror::Error;

static SET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:set)\s+([^\s=]+)\s*(?:=\s*)?(.*)$").expect("valid regex")
});

static ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]+(?:\[\s*\d+\s*\])?(?:\.amount)?)\s*=\s*(.*)$").expect("valid regex")
});

/// A command that changes the bill form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Store raw text at a field; the engine normalizes it.
    Set { field: FieldPath, raw: String },
    Append(LineCollection),
    Reset,
}

/// Anything the prompt accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(Edit),
    Show,
    Validate,
    Log(String),
    Help,
    Quit,
}

/// Errors for input the prompt cannot understand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error(transparent)]
    Field(#[from] FieldPathError),

    #[error("unknown line list '{0}', expected 'taxes' or 'charges'")]
    Collection(String),
}

/// Help text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  set <field> [value]     store a value (no value clears the field)
  <field> = [value]       same as set
  append taxes|charges    add a blank line
  reset                   clear the whole bill
  show                    print the bill
  validate                print validation errors
  log <filter>            change log level (e.g. debug)
  help                    this text
  quit                    leave
Fields: billAmount, billWithoutTaxes, taxes[i].amount, charges[i].amount";

fn set_command(
    field: &str,
    raw: Option<&str>,
) -> Result<Command, CommandError> {
    Ok(Command::Edit(Edit::Set {
        field: field.parse()?,
        raw: raw.unwrap_or_default().trim().to_string(),
    }))
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if let Some(caps) = SET_RE.captures(line) {
        return set_command(&caps[1], caps.get(2).map(|m| m.as_str())).map(Some);
    }
    if let Some(caps) = ASSIGN_RE.captures(line) {
        return set_command(&caps[1], caps.get(2).map(|m| m.as_str())).map(Some);
    }

    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
    let argument = words.next();

    let command = match keyword.as_str() {
        "set" => {
            return Err(CommandError::MissingArgument {
                command: "set",
                argument: "a field",
            });
        }
        "append" | "add" => {
            let name = argument.ok_or(CommandError::MissingArgument {
                command: "append",
                argument: "'taxes' or 'charges'",
            })?;
            let collection = LineCollection::parse(name)
                .ok_or_else(|| CommandError::Collection(name.to_string()))?;
            Command::Edit(Edit::Append(collection))
        }
        "reset" | "clear" => Command::Edit(Edit::Reset),
        "show" | "print" => Command::Show,
        "validate" | "errors" => Command::Validate,
        "log" => {
            let filter = argument.ok_or(CommandError::MissingArgument {
                command: "log",
                argument: "a level",
            })?;
            Command::Log(filter.to_string())
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(line.to_string())),
    };
    Ok(Some(command))
}
