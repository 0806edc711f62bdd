//! The interpretor session: one controller, one event log.

use std::fmt;
use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::commands;
use crate::controller::{ControlEvent, Controller, EventListener};
use crate::event_log::EventLog;
use crate::style::Palette;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminationReason {
  /// The operator asked to leave.
  Quit,
  /// The control connection is gone.
  Disconnected,
}

impl fmt::Display for TerminationReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TerminationReason::Quit => f.write_str("quit requested"),
      TerminationReason::Disconnected => f.write_str("control connection closed"),
    }
  }
}

/// The session is over. Callers must stop issuing commands once they see it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("session terminated: {reason}")]
pub struct SessionTerminated {
  pub reason: TerminationReason,
}

impl SessionTerminated {
  #[must_use]
  pub fn quit() -> Self {
    Self {
      reason: TerminationReason::Quit,
    }
  }

  #[must_use]
  pub fn disconnected() -> Self {
    Self {
      reason: TerminationReason::Disconnected,
    }
  }
}

/// Interprets operator input against a connected controller.
pub struct ControlInterpretor {
  controller: Arc<dyn Controller>,
  events: EventLog,
  listener: EventListener,
  palette: Palette,
}

impl ControlInterpretor {
  pub fn new(controller: Arc<dyn Controller>) -> Self {
    let events = EventLog::new();
    let sink = events.sink();
    let listener: EventListener = Arc::new(move |event: ControlEvent| sink.push(&event));
    Self {
      controller,
      events,
      listener,
      palette: Palette::default(),
    }
  }

  #[must_use]
  pub fn with_palette(mut self, palette: Palette) -> Self {
    self.palette = palette;
    self
  }

  /// Run one line of input and return its styled output.
  ///
  /// # Errors
  /// Returns [`SessionTerminated`] when the operator quits or the
  /// controller is no longer connected.
  pub fn run_command(&self, line: &str) -> Result<String, SessionTerminated> {
    if !self.controller.is_alive() {
      info!("control connection is closed, ending session");
      return Err(SessionTerminated::disconnected());
    }
    commands::dispatch(self, line)
  }

  /// Log an event delivered by the controller. Safe to call from any thread.
  pub fn register_event(&self, event: ControlEvent) {
    self.events.append(&event);
  }

  /// The callback handed to the controller on `SETEVENTS`. The same
  /// instance is returned on every call.
  #[must_use]
  pub fn event_listener(&self) -> EventListener {
    Arc::clone(&self.listener)
  }

  #[must_use]
  pub fn events(&self) -> &EventLog {
    &self.events
  }

  #[must_use]
  pub fn palette(&self) -> Palette {
    self.palette
  }

  pub(crate) fn controller(&self) -> &dyn Controller {
    self.controller.as_ref()
  }
}
