use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

pub mod commands;
pub mod config;
pub mod controller;
pub mod event_log;
pub mod interpretor;
pub mod prompt;
pub mod resolver;
pub mod style;
pub mod texts;
pub mod utils;

pub use controller::{ControlEvent, Controller, ControllerError, EventListener};
pub use interpretor::{ControlInterpretor, SessionTerminated, TerminationReason};
pub use prompt::PromptExit;
pub use style::{Palette, Style};

use crate::config::load_config;

/// relayctl - talk to a relay's control port interactively.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  /// Config file layered over the defaults and the global config
  #[arg(long)]
  pub config: Option<PathBuf>,
  /// Disable ANSI colors in command output
  #[arg(long)]
  pub no_color: bool,
  /// Log filter used when RUST_LOG is unset, e.g. `debug`
  #[arg(long)]
  pub log_level: Option<String>,
}

pub fn parse() -> Cli {
  Cli::parse()
}

/// Run an interactive session on stdin/stdout against an already connected
/// controller. Returns once input ends or the session terminates.
///
/// # Errors
/// Returns an error when the configuration cannot be loaded or terminal IO
/// fails.
pub fn run(controller: Arc<dyn Controller>, cli: &Cli) -> Result<PromptExit> {
  let cfg = load_config(cli.config.as_deref())?;
  let log_level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
  utils::logging::init(log_level);

  let palette = Palette::from_color_flag(cfg.color && !cli.no_color);
  let interpretor = ControlInterpretor::new(controller).with_palette(palette);

  let stdin = std::io::stdin();
  prompt::run_prompt(
    &interpretor,
    stdin.lock(),
    anstream::stdout(),
    &cfg.prompt,
  )
}
