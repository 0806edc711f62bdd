//! Command parsing and dispatch.
//!
//! A line is parsed once into a [`ParsedCommand`] and routed on its
//! [`CommandKind`]. Unknown slash commands are rejected; everything else that
//! isn't recognized goes to the controller untouched.

mod events;
mod help;
mod info;
mod tor;

use log::{debug, warn};

use crate::controller::ControllerError;
use crate::interpretor::{ControlInterpretor, SessionTerminated};
use crate::utils::error_messages;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
  Quit,
  Help,
  Events,
  Info,
  GetInfo,
  GetConf,
  SetConf,
  ResetConf,
  SetEvents,
  /// Slash prefixed but not one of ours.
  Unrecognized,
  /// Passed to the controller verbatim.
  Raw,
}

/// Recognized command tokens, matched case-insensitively.
const COMMAND_TABLE: &[(&str, CommandKind)] = &[
  ("/QUIT", CommandKind::Quit),
  ("QUIT", CommandKind::Quit),
  ("/HELP", CommandKind::Help),
  ("/EVENTS", CommandKind::Events),
  ("/INFO", CommandKind::Info),
  ("GETINFO", CommandKind::GetInfo),
  ("GETCONF", CommandKind::GetConf),
  ("SETCONF", CommandKind::SetConf),
  ("RESETCONF", CommandKind::ResetConf),
  ("SETEVENTS", CommandKind::SetEvents),
];

type Handler = fn(&ControlInterpretor, &ParsedCommand<'_>) -> Result<String, SessionTerminated>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
  pub kind: CommandKind,
  /// Uppercased command token, e.g. `/HELP` or `GETINFO`.
  pub name: String,
  /// Whitespace separated arguments, case preserved.
  pub args: Vec<&'a str>,
  /// Everything after the command token, trimmed.
  pub rest: &'a str,
  /// The whole trimmed line.
  pub line: &'a str,
}

#[must_use]
pub fn parse(line: &str) -> ParsedCommand<'_> {
  let line = line.trim();
  let (token, rest) = match line.split_once(char::is_whitespace) {
    Some((token, rest)) => (token, rest.trim()),
    None => (line, ""),
  };
  let name = token.to_ascii_uppercase();

  let kind = COMMAND_TABLE
    .iter()
    .find(|(candidate, _)| *candidate == name)
    .map(|(_, kind)| *kind)
    .unwrap_or(if token.starts_with('/') {
      CommandKind::Unrecognized
    } else {
      CommandKind::Raw
    });

  ParsedCommand {
    kind,
    name,
    args: rest.split_whitespace().collect(),
    rest,
    line,
  }
}

fn handler_for(kind: CommandKind) -> Handler {
  match kind {
    CommandKind::Quit => quit,
    CommandKind::Help => help::run,
    CommandKind::Events => events::run,
    CommandKind::Info => info::run,
    CommandKind::GetInfo => tor::getinfo,
    CommandKind::GetConf => tor::getconf,
    CommandKind::SetConf => tor::setconf,
    CommandKind::ResetConf => tor::resetconf,
    CommandKind::SetEvents => tor::setevents,
    CommandKind::Unrecognized => unrecognized,
    CommandKind::Raw => tor::raw,
  }
}

/// Run `line` against the interpretor's controller.
///
/// # Errors
/// Returns [`SessionTerminated`] for quit requests and when the connection
/// drops mid-command. Every other failure is rendered into the output.
pub fn dispatch(interpretor: &ControlInterpretor, line: &str) -> Result<String, SessionTerminated> {
  let command = parse(line);
  debug!("dispatching {:?} ({} args)", command.kind, command.args.len());
  handler_for(command.kind)(interpretor, &command)
}

fn quit(_: &ControlInterpretor, _: &ParsedCommand<'_>) -> Result<String, SessionTerminated> {
  Err(SessionTerminated::quit())
}

fn unrecognized(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  let token = command.line.split_whitespace().next().unwrap_or_default();
  let message = error_messages::unrecognized_command(token);
  Ok(format!("{}\n", interpretor.palette().error(message)))
}

/// Render a controller failure as an error line, except a dropped
/// connection which ends the session.
pub(crate) fn render_failure(
  interpretor: &ControlInterpretor,
  err: ControllerError,
) -> Result<String, SessionTerminated> {
  match err {
    ControllerError::SocketClosed => Err(SessionTerminated::disconnected()),
    err => {
      warn!("controller request failed: {err}");
      Ok(interpretor.palette().error(err))
    }
  }
}

/// Treat a failed lookup as missing data unless the connection dropped.
pub(crate) fn optional<T>(
  result: Result<T, ControllerError>,
) -> Result<Option<T>, SessionTerminated> {
  match result {
    Ok(value) => Ok(Some(value)),
    Err(ControllerError::SocketClosed) => Err(SessionTerminated::disconnected()),
    Err(err) => {
      debug!("optional lookup failed: {err}");
      Ok(None)
    }
  }
}
