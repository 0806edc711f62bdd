use crate::commands::ParsedCommand;
use crate::interpretor::{ControlInterpretor, SessionTerminated};

pub(super) fn run(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  Ok(interpretor.events().render(interpretor.palette(), &command.args))
}
