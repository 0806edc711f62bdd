//! Turns whatever the operator typed for a relay into its fingerprint.
//!
//! Strategies are tried in a fixed order: empty input means ourselves, then
//! a literal fingerprint, a nickname, and finally an IPv4 address with an
//! optional ORPort. A 40 character hex string is always a fingerprint even
//! if it could pass for something else.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use thiserror::Error;

use crate::controller::{Controller, ControllerError};
use crate::utils::error_messages;

static FINGERPRINT_RE: OnceLock<Regex> = OnceLock::new();
static NICKNAME_RE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// The identifier could not be mapped to exactly one relay.
  #[error("{0}")]
  Unresolved(String),
  /// The connection dropped during a lookup.
  #[error("control socket is closed")]
  SocketClosed,
}

/// A lookup failure becomes `message`, unless the connection dropped.
fn lookup_failed(err: &ControllerError, message: impl Into<String>) -> ResolveError {
  match err {
    ControllerError::SocketClosed => ResolveError::SocketClosed,
    _ => ResolveError::Unresolved(message.into()),
  }
}

#[must_use]
pub fn is_fingerprint(value: &str) -> bool {
  FINGERPRINT_RE
    .get_or_init(|| Regex::new(r"^[0-9a-fA-F]{40}$").expect("valid regex"))
    .is_match(value)
}

#[must_use]
pub fn is_nickname(value: &str) -> bool {
  NICKNAME_RE
    .get_or_init(|| Regex::new(r"^[a-zA-Z0-9]{1,19}$").expect("valid regex"))
    .is_match(value)
}

/// Dotted quad with every octet in `0..=255` and no leading zeros.
#[must_use]
pub fn is_ipv4_address(value: &str) -> bool {
  let octets: Vec<&str> = value.split('.').collect();
  octets.len() == 4
    && octets.iter().all(|octet| {
      !octet.is_empty()
        && octet.len() <= 3
        && octet.bytes().all(|b| b.is_ascii_digit())
        && (octet.len() == 1 || !octet.starts_with('0'))
        && octet.parse::<u8>().is_ok()
    })
}

/// Port in `1..=65535`, digits only.
#[must_use]
pub fn parse_port(value: &str) -> Option<u16> {
  if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  value.parse::<u16>().ok().filter(|port| *port != 0)
}

/// Resolve `identifier` to an uppercase fingerprint.
///
/// # Errors
/// Returns [`ResolveError::Unresolved`] when the identifier is malformed,
/// matches no relay, or matches several relays at one address, and
/// [`ResolveError::SocketClosed`] when the connection drops mid-lookup.
pub fn resolve_fingerprint<C>(identifier: &str, controller: &C) -> Result<String, ResolveError>
where
  C: Controller + ?Sized,
{
  if identifier.is_empty() {
    debug!("resolving our own fingerprint");
    return controller
      .get_info_value("fingerprint")
      .map(|fingerprint| fingerprint.to_ascii_uppercase())
      .map_err(|err| lookup_failed(&err, error_messages::OWN_FINGERPRINT_UNKNOWN));
  }

  if is_fingerprint(identifier) {
    return Ok(identifier.to_ascii_uppercase());
  }

  if is_nickname(identifier) {
    debug!("resolving nickname {identifier}");
    return controller
      .get_network_status(identifier)
      .map(|status| status.fingerprint.to_ascii_uppercase())
      .map_err(|err| lookup_failed(&err, error_messages::nickname_not_found(identifier)));
  }

  if identifier.contains(':') || is_ipv4_address(identifier) {
    return resolve_address(identifier, controller);
  }

  Err(ResolveError::Unresolved(error_messages::unrecognized_identifier(identifier)))
}

fn resolve_address<C>(identifier: &str, controller: &C) -> Result<String, ResolveError>
where
  C: Controller + ?Sized,
{
  let (address, port) = match identifier.split_once(':') {
    Some((address, port)) => (address, Some(port)),
    None => (identifier, None),
  };

  if !is_ipv4_address(address) {
    return Err(ResolveError::Unresolved(error_messages::invalid_address(address)));
  }

  let or_port = match port {
    None | Some("") => None,
    Some(port) => {
      let port = parse_port(port)
        .ok_or_else(|| ResolveError::Unresolved(error_messages::invalid_port(port)))?;
      Some(port)
    }
  };

  debug!("resolving relays at {identifier}");
  let statuses = controller
    .get_network_statuses()
    .map_err(|err| lookup_failed(&err, error_messages::relay_status_failed(&err)))?;

  let mut matches: Vec<(String, u16, String)> = Vec::new();
  for status in statuses {
    if status.address != address || or_port.is_some_and(|port| port != status.or_port) {
      continue;
    }
    // one candidate per ORPort, the first entry listed wins
    if !matches.iter().any(|(_, seen, _)| *seen == status.or_port) {
      let fingerprint = status.fingerprint.to_ascii_uppercase();
      matches.push((status.address, status.or_port, fingerprint));
    }
  }

  match matches.len() {
    0 => Err(ResolveError::Unresolved(error_messages::no_relay_at(identifier))),
    1 => Ok(matches.remove(0).2),
    _ => Err(ResolveError::Unresolved(error_messages::multiple_relays_at(identifier, &matches))),
  }
}
