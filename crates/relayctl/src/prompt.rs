//! The read-eval-print loop around a [`ControlInterpretor`].

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::info;

use crate::interpretor::{ControlInterpretor, TerminationReason};

/// How the loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptExit {
  /// Input ran out.
  EndOfInput,
  Terminated(TerminationReason),
}

/// Feed lines from `input` to the interpretor until input ends or the session
/// terminates, writing each result to `output`.
///
/// # Errors
/// Returns an error if reading input or writing output fails.
pub fn run_prompt<R, W>(
  interpretor: &ControlInterpretor,
  mut input: R,
  mut output: W,
  prompt: &str,
) -> Result<PromptExit>
where
  R: BufRead,
  W: Write,
{
  let mut line = String::new();
  loop {
    write!(output, "{prompt}").context("failed to write prompt")?;
    output.flush().context("failed to flush prompt")?;

    line.clear();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
      return Ok(PromptExit::EndOfInput);
    }
    if line.trim().is_empty() {
      continue;
    }

    match interpretor.run_command(&line) {
      Ok(result) => {
        if result.is_empty() {
          continue;
        }
        output
          .write_all(result.as_bytes())
          .context("failed to write result")?;
        if !result.ends_with('\n') {
          writeln!(output).context("failed to write result")?;
        }
      }
      Err(terminated) => {
        info!("{terminated}");
        return Ok(PromptExit::Terminated(terminated.reason));
      }
    }
  }
}
