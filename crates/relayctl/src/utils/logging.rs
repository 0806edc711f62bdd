//! Diagnostic logging setup.
//!
//! Diagnostics go through the `log` facade to stderr and never mix with
//! command output. `RUST_LOG` overrides the configured level.

use env_logger::{Builder, Env};

pub fn init(default_level: &str) {
  let env = Env::default().default_filter_or(default_level);
  // A second init (tests, embedding hosts) keeps the first logger.
  let _ = Builder::from_env(env)
    .format_timestamp(None)
    .format_target(false)
    .try_init();
}
