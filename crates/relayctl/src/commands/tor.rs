//! Handlers for commands that map onto controller requests.

use log::debug;

use crate::commands::{ParsedCommand, render_failure};
use crate::interpretor::{ControlInterpretor, SessionTerminated};
use crate::style::Style;
use crate::texts::help;
use crate::utils::error_messages;

fn usage_error(interpretor: &ControlInterpretor, command: &ParsedCommand<'_>) -> String {
  let usage = help::topic(&command.name).map_or(command.name.as_str(), |(usage, _)| usage);
  interpretor
    .palette()
    .error(error_messages::missing_arguments(&command.name, usage))
}

pub(super) fn getinfo(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  if command.args.is_empty() {
    return Ok(usage_error(interpretor, command));
  }

  let values = match interpretor.controller().get_info(&command.args) {
    Ok(values) => values,
    Err(err) => return render_failure(interpretor, err),
  };

  let palette = interpretor.palette();
  let lines: Vec<String> = command
    .args
    .iter()
    .filter_map(|name| values.iter().find(|(key, _)| key == name))
    .map(|(_, value)| palette.paint_lines(Style::Normal, value))
    .collect();
  Ok(lines.join("\n"))
}

pub(super) fn getconf(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  if command.args.is_empty() {
    return Ok(usage_error(interpretor, command));
  }

  let entries = match interpretor.controller().get_conf_map(&command.args) {
    Ok(entries) => entries,
    Err(err) => return render_failure(interpretor, err),
  };

  let palette = interpretor.palette();
  let mut out = String::new();
  for (key, values) in entries {
    out.push_str(&palette.label(&key));
    out.push_str(&palette.normal(format!(" => {}", values.join(" "))));
    out.push('\n');
  }
  Ok(out)
}

pub(super) fn setconf(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  apply_options(interpretor, command, false)
}

pub(super) fn resetconf(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  apply_options(interpretor, command, true)
}

fn apply_options(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
  reset: bool,
) -> Result<String, SessionTerminated> {
  if command.args.is_empty() {
    return Ok(usage_error(interpretor, command));
  }

  let pairs = match parse_options(command.rest) {
    Ok(pairs) => pairs,
    Err(err) => {
      let message = error_messages::unbalanced_quotes(err);
      return Ok(interpretor.palette().error(message));
    }
  };

  debug!("applying {} option(s), reset={reset}", pairs.len());
  match interpretor.controller().set_options(&pairs, reset) {
    Ok(()) => Ok(String::new()),
    Err(err) => render_failure(interpretor, err),
  }
}

/// Split `Key=value Other="quoted value" Bare` into ordered pairs. A bare key
/// carries no value.
pub(crate) fn parse_options(
  rest: &str,
) -> Result<Vec<(String, Option<String>)>, shell_words::ParseError> {
  Ok(
    shell_words::split(rest)?
      .into_iter()
      .map(|token| match token.split_once('=') {
        Some((key, value)) => (key.to_string(), Some(value.to_string())),
        None => (token, None),
      })
      .collect(),
  )
}

pub(super) fn setevents(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  let listener = interpretor.event_listener();
  if let Err(err) = interpretor
    .controller()
    .add_event_listener(listener, &command.args)
  {
    return render_failure(interpretor, err);
  }

  let message = if command.args.is_empty() {
    "Disabled event listening".to_string()
  } else {
    format!("Listing for {} events", command.args.join(", "))
  };
  Ok(format!("{}\n", interpretor.palette().normal(message)))
}

pub(super) fn raw(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  match interpretor.controller().msg(command.line) {
    Ok(response) => Ok(interpretor.palette().paint_lines(Style::Normal, &response)),
    Err(err) => render_failure(interpretor, err),
  }
}
