#![allow(dead_code)]
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use parking_lot::Mutex;
use relayctl::controller::{Microdescriptor, RouterStatus, ServerDescriptor};
use relayctl::{Controller, ControllerError, EventListener};

pub const FINGERPRINT: &str = "9695DFC35FFEB861329B9F1AB04C46397020CE31";

/// A recorded `set_options` call.
pub type SetOptionsCall = (Vec<(String, Option<String>)>, bool);

/// In-memory controller that records every request it receives.
pub struct FakeController {
  alive: AtomicBool,
  calls: Mutex<Vec<String>>,
  info: Mutex<Vec<(String, String)>>,
  info_error: Mutex<Option<ControllerError>>,
  info_requests: Mutex<Vec<Vec<String>>>,
  conf: Mutex<Vec<(String, Vec<String>)>>,
  conf_error: Mutex<Option<ControllerError>>,
  conf_requests: Mutex<Vec<Vec<String>>>,
  set_error: Mutex<Option<ControllerError>>,
  set_requests: Mutex<Vec<SetOptionsCall>>,
  listener_error: Mutex<Option<ControllerError>>,
  listeners: Mutex<Vec<(EventListener, Vec<String>)>>,
  statuses: Mutex<Vec<RouterStatus>>,
  status_error: Mutex<Option<ControllerError>>,
  server_descriptors: Mutex<Vec<(String, ServerDescriptor)>>,
  microdescriptors: Mutex<Vec<(String, Microdescriptor)>>,
  msg_reply: Mutex<Result<String, ControllerError>>,
  msg_requests: Mutex<Vec<String>>,
}

impl Default for FakeController {
  fn default() -> Self {
    Self {
      alive: AtomicBool::new(true),
      calls: Mutex::new(Vec::new()),
      info: Mutex::new(Vec::new()),
      info_error: Mutex::new(None),
      info_requests: Mutex::new(Vec::new()),
      conf: Mutex::new(Vec::new()),
      conf_error: Mutex::new(None),
      conf_requests: Mutex::new(Vec::new()),
      set_error: Mutex::new(None),
      set_requests: Mutex::new(Vec::new()),
      listener_error: Mutex::new(None),
      listeners: Mutex::new(Vec::new()),
      statuses: Mutex::new(Vec::new()),
      status_error: Mutex::new(None),
      server_descriptors: Mutex::new(Vec::new()),
      microdescriptors: Mutex::new(Vec::new()),
      msg_reply: Mutex::new(Ok(String::new())),
      msg_requests: Mutex::new(Vec::new()),
    }
  }
}

impl FakeController {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn set_alive(&self, alive: bool) {
    self.alive.store(alive, Ordering::SeqCst);
  }

  pub fn add_info(&self, key: &str, value: &str) {
    self.info.lock().push((key.to_string(), value.to_string()));
  }

  pub fn fail_info(&self, err: ControllerError) {
    *self.info_error.lock() = Some(err);
  }

  pub fn add_conf(&self, key: &str, values: &[&str]) {
    self.conf.lock().push((
      key.to_string(),
      values.iter().map(|v| (*v).to_string()).collect(),
    ));
  }

  pub fn fail_conf(&self, err: ControllerError) {
    *self.conf_error.lock() = Some(err);
  }

  pub fn fail_set_options(&self, err: ControllerError) {
    *self.set_error.lock() = Some(err);
  }

  pub fn fail_listener(&self, err: ControllerError) {
    *self.listener_error.lock() = Some(err);
  }

  pub fn add_status(&self, status: RouterStatus) {
    self.statuses.lock().push(status);
  }

  /// Fail both single and bulk network status lookups.
  pub fn fail_statuses(&self, err: ControllerError) {
    *self.status_error.lock() = Some(err);
  }

  pub fn add_server_descriptor(&self, fingerprint: &str, desc: ServerDescriptor) {
    self
      .server_descriptors
      .lock()
      .push((fingerprint.to_string(), desc));
  }

  pub fn add_microdescriptor(&self, fingerprint: &str, desc: Microdescriptor) {
    self
      .microdescriptors
      .lock()
      .push((fingerprint.to_string(), desc));
  }

  pub fn reply_to_msg(&self, reply: Result<String, ControllerError>) {
    *self.msg_reply.lock() = reply;
  }

  /// Names of every controller method called, in order.
  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  pub fn info_requests(&self) -> Vec<Vec<String>> {
    self.info_requests.lock().clone()
  }

  pub fn conf_requests(&self) -> Vec<Vec<String>> {
    self.conf_requests.lock().clone()
  }

  pub fn set_requests(&self) -> Vec<SetOptionsCall> {
    self.set_requests.lock().clone()
  }

  pub fn msg_requests(&self) -> Vec<String> {
    self.msg_requests.lock().clone()
  }

  pub fn listeners(&self) -> Vec<(EventListener, Vec<String>)> {
    self.listeners.lock().clone()
  }

  fn record(&self, call: &str) {
    self.calls.lock().push(call.to_string());
  }
}

fn owned(names: &[&str]) -> Vec<String> {
  names.iter().map(|name| (*name).to_string()).collect()
}

impl Controller for FakeController {
  fn is_alive(&self) -> bool {
    self.alive.load(Ordering::SeqCst)
  }

  fn get_info(&self, names: &[&str]) -> Result<Vec<(String, String)>, ControllerError> {
    self.record("get_info");
    self.info_requests.lock().push(owned(names));
    if let Some(err) = self.info_error.lock().clone() {
      return Err(err);
    }
    let info = self.info.lock();
    names
      .iter()
      .map(|name| {
        info
          .iter()
          .find(|(key, _)| key == name)
          .cloned()
          .ok_or_else(|| ControllerError::Operation(format!("Unrecognized key \"{name}\"")))
      })
      .collect()
  }

  fn get_conf_map(&self, names: &[&str]) -> Result<Vec<(String, Vec<String>)>, ControllerError> {
    self.record("get_conf_map");
    self.conf_requests.lock().push(owned(names));
    if let Some(err) = self.conf_error.lock().clone() {
      return Err(err);
    }
    let conf = self.conf.lock();
    Ok(
      names
        .iter()
        .filter_map(|name| conf.iter().find(|(key, _)| key == name).cloned())
        .collect(),
    )
  }

  fn set_options(
    &self,
    pairs: &[(String, Option<String>)],
    reset: bool,
  ) -> Result<(), ControllerError> {
    self.record("set_options");
    self.set_requests.lock().push((pairs.to_vec(), reset));
    match self.set_error.lock().clone() {
      Some(err) => Err(err),
      None => Ok(()),
    }
  }

  fn add_event_listener(
    &self,
    listener: EventListener,
    event_types: &[&str],
  ) -> Result<(), ControllerError> {
    self.record("add_event_listener");
    if let Some(err) = self.listener_error.lock().clone() {
      return Err(err);
    }
    let mut listeners = self.listeners.lock();
    listeners.retain(|(existing, _)| !Arc::ptr_eq(existing, &listener));
    listeners.push((listener, owned(event_types)));
    Ok(())
  }

  fn get_network_status(&self, relay: &str) -> Result<RouterStatus, ControllerError> {
    self.record("get_network_status");
    if let Some(err) = self.status_error.lock().clone() {
      return Err(err);
    }
    self
      .statuses
      .lock()
      .iter()
      .find(|status| status.nickname == relay || status.fingerprint == relay)
      .cloned()
      .ok_or_else(|| ControllerError::Unavailable(format!("no status entry for {relay}")))
  }

  fn get_network_statuses(&self) -> Result<Vec<RouterStatus>, ControllerError> {
    self.record("get_network_statuses");
    if let Some(err) = self.status_error.lock().clone() {
      return Err(err);
    }
    Ok(self.statuses.lock().clone())
  }

  fn get_server_descriptor(&self, fingerprint: &str) -> Result<ServerDescriptor, ControllerError> {
    self.record("get_server_descriptor");
    self
      .server_descriptors
      .lock()
      .iter()
      .find(|(fp, _)| fp == fingerprint)
      .map(|(_, desc)| desc.clone())
      .ok_or_else(|| ControllerError::Unavailable(format!("no descriptor for {fingerprint}")))
  }

  fn get_microdescriptor(
    &self,
    fingerprint: &str,
  ) -> Result<Option<Microdescriptor>, ControllerError> {
    self.record("get_microdescriptor");
    Ok(
      self
        .microdescriptors
        .lock()
        .iter()
        .find(|(fp, _)| fp == fingerprint)
        .map(|(_, desc)| desc.clone()),
    )
  }

  fn msg(&self, command: &str) -> Result<String, ControllerError> {
    self.record("msg");
    self.msg_requests.lock().push(command.to_string());
    self.msg_reply.lock().clone()
  }
}

pub fn router_status(
  nickname: &str,
  fingerprint: &str,
  address: &str,
  or_port: u16,
) -> RouterStatus {
  RouterStatus {
    nickname: nickname.to_string(),
    fingerprint: fingerprint.to_string(),
    address: address.to_string(),
    or_port,
    published: NaiveDate::from_ymd_opt(2014, 5, 5)
      .and_then(|date| date.and_hms_opt(5, 52, 5))
      .expect("valid timestamp"),
    flags: Vec::new(),
  }
}

/// The moria1 directory authority as it appeared in May 2014.
pub fn moria1() -> (RouterStatus, ServerDescriptor) {
  let mut status = router_status("moria1", FINGERPRINT, "128.31.0.34", 9101);
  status.flags = [
    "Authority", "Fast", "Guard", "HSDir", "Named", "Running", "Stable", "V2Dir", "Valid",
  ]
  .iter()
  .map(|flag| (*flag).to_string())
  .collect();

  let desc = ServerDescriptor {
    platform: Some("Linux".to_string()),
    tor_version: Some("0.2.5.3-alpha-dev".to_string()),
    contact: Some("1024D/28988BF5 arma mit edu".to_string()),
    exit_policy: "reject 1-65535".to_string(),
  };
  (status, desc)
}
