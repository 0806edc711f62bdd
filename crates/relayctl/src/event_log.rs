//! Session log of asynchronous events.
//!
//! Events are produced on whatever thread the controller delivers them from
//! and consumed by `/events` on the command path. Producers only push into a
//! channel; readers drain it into the ordered buffer under a lock, so appends
//! never wait on a render in progress.

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;

use crate::controller::{ControlEvent, EventBody};
use crate::style::Palette;

/// One formatted event, immutable once logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
  /// Arrival order, starting at zero.
  pub sequence: u64,
  pub event_type: String,
  /// Display text, unstyled.
  pub line: String,
}

#[derive(Debug)]
struct Pending {
  event_type: String,
  line: String,
}

/// Cloneable producer handle. This is what the controller callback holds.
#[derive(Clone, Debug)]
pub struct EventSink {
  tx: Sender<Pending>,
}

impl EventSink {
  pub fn push(&self, event: &ControlEvent) {
    let pending = Pending {
      event_type: event.event_type.clone(),
      line: format_event(event),
    };
    // The receiving end lives as long as the log; a failed send means the
    // session is gone and the event has nowhere to go.
    let _ = self.tx.send(pending);
  }
}

/// Append-only, arrival-ordered event log.
#[derive(Debug)]
pub struct EventLog {
  sink: EventSink,
  rx: Receiver<Pending>,
  records: Mutex<Vec<EventRecord>>,
}

impl Default for EventLog {
  fn default() -> Self {
    let (tx, rx) = unbounded();
    Self {
      sink: EventSink { tx },
      rx,
      records: Mutex::new(Vec::new()),
    }
  }
}

impl EventLog {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn sink(&self) -> EventSink {
    self.sink.clone()
  }

  pub fn append(&self, event: &ControlEvent) {
    self.sink.push(event);
  }

  /// Snapshot of everything logged so far.
  #[must_use]
  pub fn records(&self) -> Vec<EventRecord> {
    let mut records = self.records.lock();
    self.drain_into(&mut records);
    records.clone()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    let mut records = self.records.lock();
    self.drain_into(&mut records);
    records.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Render every record as a styled line, oldest first. The output always
  /// ends with a newline, so an empty log renders as `"\n"`.
  ///
  /// A non-empty `event_types` restricts the output to those types.
  #[must_use]
  pub fn render(&self, palette: Palette, event_types: &[&str]) -> String {
    let mut records = self.records.lock();
    self.drain_into(&mut records);

    let lines: Vec<String> = records
      .iter()
      .filter(|record| {
        event_types.is_empty()
          || event_types
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(&record.event_type))
      })
      .map(|record| palette.normal(&record.line))
      .collect();

    format!("{}\n", lines.join("\n"))
  }

  fn drain_into(&self, records: &mut Vec<EventRecord>) {
    while let Ok(pending) = self.rx.try_recv() {
      let sequence = records.len() as u64;
      records.push(EventRecord {
        sequence,
        event_type: pending.event_type,
        line: pending.line,
      });
    }
  }
}

/// Display text for one event.
#[must_use]
pub fn format_event(event: &ControlEvent) -> String {
  match event.body {
    EventBody::Bandwidth { read, written } => format!("BW {read} {written}"),
    EventBody::Generic => event.content().to_string(),
  }
}
