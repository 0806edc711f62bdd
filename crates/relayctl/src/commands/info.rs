use crate::commands::{ParsedCommand, optional};
use crate::controller::{ControllerError, RouterStatus};
use crate::interpretor::{ControlInterpretor, SessionTerminated};
use crate::resolver::{ResolveError, resolve_fingerprint};
use crate::utils::error_messages;

const PUBLISHED_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

pub(super) fn run(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  let palette = interpretor.palette();
  let controller = interpretor.controller();
  let identifier = command.args.first().copied().unwrap_or_default();

  let fingerprint = match resolve_fingerprint(identifier, controller) {
    Ok(fingerprint) => fingerprint,
    Err(ResolveError::SocketClosed) => return Err(SessionTerminated::disconnected()),
    Err(err) => return Ok(format!("{}\n", palette.error(err))),
  };

  let status: RouterStatus = match controller.get_network_status(&fingerprint) {
    Ok(status) => status,
    Err(ControllerError::SocketClosed) => return Err(SessionTerminated::disconnected()),
    Err(err) => {
      let message = error_messages::consensus_unavailable(&fingerprint, err);
      return Ok(format!("{}\n", palette.error(message)));
    }
  };

  let server_desc = optional(controller.get_server_descriptor(&fingerprint))?;
  let micro_desc = optional(controller.get_microdescriptor(&fingerprint))?.flatten();
  let country = optional(controller.get_info_value(&format!("ip-to-country/{}", status.address)))?
    .filter(|country| !country.is_empty());

  let locale = country.map(|country| format!(" ({country})")).unwrap_or_default();
  let exit_policy = server_desc
    .as_ref()
    .map(|desc| desc.exit_policy.clone())
    .or_else(|| micro_desc.map(|desc| desc.exit_policy))
    .unwrap_or_else(|| "Unknown".to_string());

  let mut fields: Vec<(&str, String)> = vec![
    (
      "address: ",
      format!("{}:{}{locale}", status.address, status.or_port),
    ),
    (
      "published: ",
      status.published.format(PUBLISHED_FORMAT).to_string(),
    ),
  ];

  if let Some(desc) = &server_desc {
    if let Some(platform) = &desc.platform {
      fields.push(("os: ", platform.clone()));
    }
    if let Some(version) = &desc.tor_version {
      fields.push(("version: ", version.clone()));
    }
  }

  fields.push(("flags: ", status.flags.join(", ")));
  fields.push(("exit policy: ", exit_policy));

  if let Some(contact) = server_desc.as_ref().and_then(|desc| desc.contact.as_deref()) {
    fields.push(("contact: ", deobfuscate_contact(contact)));
  }

  let mut out = format!("{} ({fingerprint})\n", status.nickname);
  for (label, value) in fields {
    out.push_str(&palette.label(label));
    out.push_str(&value);
    out.push('\n');
  }
  Ok(out)
}

/// Undo the most common address obscuring, `arma at mit dot edu`.
fn deobfuscate_contact(contact: &str) -> String {
  let mut contact = contact.to_string();
  for alias in [" at ", " AT "] {
    contact = contact.replace(alias, "@");
  }
  for alias in [" dot ", " DOT "] {
    contact = contact.replace(alias, ".");
  }
  contact
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn contact_aliases_are_replaced() {
    assert_eq!(deobfuscate_contact("arma at mit dot edu"), "arma@mit.edu");
    assert_eq!(deobfuscate_contact("1024D/28988BF5 arma mit edu"), "1024D/28988BF5 arma mit edu");
  }
}
