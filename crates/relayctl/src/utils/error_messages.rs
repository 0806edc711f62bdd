//! Common error messages used across the interpretor.
//! Centralizes operator-facing failure text so commands and tests agree on it.

use std::fmt::Display;

// Relay lookup errors
pub(crate) const OWN_FINGERPRINT_UNKNOWN: &str =
  "Unable to determine our own fingerprint. Is tor running as a relay?";

pub(crate) fn nickname_not_found(nickname: &str) -> String {
  format!("Unable to find a relay with the nickname of '{nickname}'")
}

pub(crate) fn invalid_address(address: &str) -> String {
  format!("'{address}' isn't a valid IPv4 address")
}

pub(crate) fn invalid_port(port: &str) -> String {
  format!("'{port}' isn't a valid port")
}

pub(crate) fn no_relay_at(target: &str) -> String {
  format!("No relays found at {target}")
}

pub(crate) fn multiple_relays_at(target: &str, candidates: &[(String, u16, String)]) -> String {
  let mut message =
    format!("There are multiple relays at {target}, include a port to specify which.\n");
  for (i, (address, port, fingerprint)) in candidates.iter().enumerate() {
    message.push_str(&format!(
      "\n  {}. {address}:{port}, fingerprint: {fingerprint}",
      i + 1
    ));
  }
  message
}

pub(crate) fn unrecognized_identifier(identifier: &str) -> String {
  format!("'{identifier}' isn't a fingerprint, nickname, or IP address")
}

pub(crate) fn relay_status_failed(message: impl Display) -> String {
  format!("Unable to list relays: {message}")
}

// Dispatcher errors
pub(crate) fn unrecognized_command(token: &str) -> String {
  format!("'{token}' isn't a recognized command")
}

pub(crate) fn missing_arguments(command: &str, usage: &str) -> String {
  format!("{command} requires arguments, usage: {usage}")
}

pub(crate) fn consensus_unavailable(fingerprint: &str, message: impl Display) -> String {
  format!("Unable to find consensus information for {fingerprint}: {message}")
}

pub(crate) fn unbalanced_quotes(message: impl Display) -> String {
  format!("Unable to parse arguments: {message}")
}
