use std::io::{BufRead, Write};

use csvjoin_error::Result;
use tracing::debug;

use crate::command::Command;
use crate::config::JoinConfig;
use crate::orchestrator::{JoinOutcome, join_files};

pub const PROMPT: &str = "Enter the joining command below:";
pub const WRONG_COMMAND: &str = "Wrong joining command, try again!";

/// Prompt for join commands until one succeeds.
///
/// Lines that aren't a join command and joins that fail are reported to
/// `output`, then the prompt is shown again. Returns `None` when `input` runs
/// out before a join succeeds.
pub fn run_prompt<R, W>(
    mut input: R,
    mut output: W,
    config: &JoinConfig,
) -> Result<Option<JoinOutcome>>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        writeln!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("prompt input closed");
            return Ok(None);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                debug!(%e, "rejected prompt input");
                writeln!(output, "{WRONG_COMMAND}")?;
                writeln!(output)?;
                continue;
            }
        };

        debug!(%command, "running prompt command");

        let Command::Join {
            left,
            right,
            column,
            join_type,
        } = command;
        match join_files(left.as_str(), right.as_str(), &column, &join_type, config) {
            Ok(outcome) => return Ok(Some(outcome)),
            Err(e) => {
                writeln!(output, "ERROR: {e}")?;
                writeln!(output)?;
            }
        }
    }
}
