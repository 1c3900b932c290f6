//! The interactive prompt loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, warn};

use crate::command::{self, Command, HELP};
use crate::logging;
use crate::render::{ErrorsView, SnapshotView};
use crate::session::Session;

const PROMPT: &str = "split> ";

/// Reads commands from `input` until `quit` or end of input, printing the
/// bill after every edit.
///
/// Bad commands and edits are reported on `output` and never end the loop.
///
/// # Errors
///
/// Returns an error only when reading `input` or writing `output` fails.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> Result<()> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(session, command, &mut output)?,
            Err(error) => {
                debug!(input = %line, %error, "rejected command");
                writeln!(output, "error: {error}")?;
            }
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

fn execute<W: Write>(
    session: &mut Session,
    command: Command,
    output: &mut W,
) -> Result<()> {
    match command {
        Command::Edit(edit) => match session.apply(&edit) {
            Ok(()) => write!(output, "{}", SnapshotView(&session.snapshot()))?,
            Err(error) => {
                warn!(?edit, %error, "edit rejected");
                writeln!(output, "error: {error}")?;
            }
        },
        Command::Show => write!(output, "{}", SnapshotView(&session.snapshot()))?,
        Command::Validate => write!(output, "{}", ErrorsView(session.splitter().errors()))?,
        Command::Log(filter) => match logging::set_log_level(&filter) {
            Ok(()) => writeln!(output, "log level set to '{filter}'")?,
            Err(error) => writeln!(output, "error: {error:#}")?,
        },
        Command::Help => writeln!(output, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}
