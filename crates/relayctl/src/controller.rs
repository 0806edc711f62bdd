//! The control connection as seen by the interpretor.
//!
//! The interpretor never talks to a socket. Whatever owns the connection
//! implements [`Controller`] and hands the interpretor a reference to it,
//! which also makes test doubles trivial to substitute.

use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Failure reported by the controller for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
  /// The remote end rejected or failed the request.
  #[error("{0}")]
  Operation(String),
  /// The requested item (descriptor, status entry, info key) is not known.
  #[error("{0}")]
  Unavailable(String),
  /// The connection dropped while the request was in flight.
  #[error("control socket is closed")]
  SocketClosed,
}

/// One router status entry from the consensus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterStatus {
  pub nickname: String,
  pub fingerprint: String,
  pub address: String,
  pub or_port: u16,
  pub published: NaiveDateTime,
  pub flags: Vec<String>,
}

/// The subset of a relay's server descriptor the interpretor displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerDescriptor {
  pub platform: Option<String>,
  pub tor_version: Option<String>,
  pub contact: Option<String>,
  /// Condensed exit policy, e.g. `reject 1-65535`.
  pub exit_policy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Microdescriptor {
  /// Condensed exit policy, e.g. `accept 80,443`.
  pub exit_policy: String,
}

/// Decoded payload of an asynchronous event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBody {
  Bandwidth { read: u64, written: u64 },
  Generic,
}

/// An asynchronous event pushed by the remote end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEvent {
  pub event_type: String,
  /// The reply line as received, status code included.
  pub raw: String,
  pub body: EventBody,
}

impl ControlEvent {
  #[must_use]
  pub fn bandwidth(read: u64, written: u64) -> Self {
    Self {
      event_type: "BW".to_string(),
      raw: format!("650 BW {read} {written}"),
      body: EventBody::Bandwidth { read, written },
    }
  }

  /// Decode a single `650` reply line such as `650 BW 15 25`.
  ///
  /// Returns `None` for lines without an event type.
  #[must_use]
  pub fn from_line(line: &str) -> Option<Self> {
    let raw = line.trim_end_matches(['\r', '\n']);
    let content = strip_status_code(raw);
    let mut words = content.split_whitespace();
    let event_type = words.next()?.to_string();

    let body = match (event_type.as_str(), words.next(), words.next(), words.next()) {
      ("BW", Some(read), Some(written), None) => match (read.parse(), written.parse()) {
        (Ok(read), Ok(written)) => EventBody::Bandwidth { read, written },
        _ => EventBody::Generic,
      },
      _ => EventBody::Generic,
    };

    Some(Self {
      event_type,
      raw: raw.to_string(),
      body,
    })
  }

  /// Event content without the leading status code.
  #[must_use]
  pub fn content(&self) -> &str {
    strip_status_code(&self.raw)
  }
}

fn strip_status_code(line: &str) -> &str {
  let bytes = line.as_bytes();
  if bytes.len() >= 4
    && bytes[..3].iter().all(u8::is_ascii_digit)
    && matches!(bytes[3], b' ' | b'-' | b'+')
  {
    &line[4..]
  } else {
    line
  }
}

/// Callback invoked by the controller for every subscribed event. It may be
/// called from any thread.
pub type EventListener = Arc<dyn Fn(ControlEvent) + Send + Sync>;

/// Requests the interpretor issues against a live control connection.
///
/// Mapping results are ordered the way the request named the keys.
pub trait Controller: Send + Sync {
  fn is_alive(&self) -> bool;

  fn get_info(&self, names: &[&str]) -> Result<Vec<(String, String)>, ControllerError>;

  fn get_conf_map(&self, names: &[&str]) -> Result<Vec<(String, Vec<String>)>, ControllerError>;

  /// Apply options in order. An absent value resets the option to its default.
  fn set_options(
    &self,
    pairs: &[(String, Option<String>)],
    reset: bool,
  ) -> Result<(), ControllerError>;

  /// Subscribe `listener` to exactly `event_types`, replacing whatever it was
  /// subscribed to before.
  fn add_event_listener(
    &self,
    listener: EventListener,
    event_types: &[&str],
  ) -> Result<(), ControllerError>;

  fn get_network_status(&self, relay: &str) -> Result<RouterStatus, ControllerError>;

  fn get_network_statuses(&self) -> Result<Vec<RouterStatus>, ControllerError>;

  fn get_server_descriptor(&self, fingerprint: &str) -> Result<ServerDescriptor, ControllerError>;

  fn get_microdescriptor(
    &self,
    fingerprint: &str,
  ) -> Result<Option<Microdescriptor>, ControllerError>;

  /// Send a raw command and return the reply text.
  fn msg(&self, command: &str) -> Result<String, ControllerError>;

  /// Single-key convenience over [`Controller::get_info`].
  fn get_info_value(&self, name: &str) -> Result<String, ControllerError> {
    self
      .get_info(&[name])?
      .into_iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value)
      .ok_or_else(|| ControllerError::Unavailable(format!("GETINFO reply lacks '{name}'")))
  }
}
