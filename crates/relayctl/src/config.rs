use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;
use serde::Deserialize;
use toml::Value as TomlValue;

/// Known top-level config keys.
const KNOWN_KEYS: &[&str] = &["prompt", "color", "log_level"];

// Embed repository defaults
const DEFAULT_TOML: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/relayctl.toml"));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromptConfig {
  /// Shown before every line of input.
  pub prompt: String,
  /// Style output with ANSI colors.
  pub color: bool,
  /// Default `env_logger` filter when `RUST_LOG` is unset.
  pub log_level: String,
}

fn merge_values(base: &mut TomlValue, overlay: TomlValue) {
  match (base, overlay) {
    (TomlValue::Table(base_tbl), TomlValue::Table(overlay_tbl)) => {
      for (k, v) in overlay_tbl {
        match base_tbl.get_mut(&k) {
          Some(existing) => merge_values(existing, v),
          None => {
            base_tbl.insert(k, v);
          }
        }
      }
    }
    // Scalars and arrays: last wins
    (base_slot, new_v) => *base_slot = new_v,
  }
}

/// Warn about unknown keys so typos don't go unnoticed. Unknown keys are
/// dropped from the merged config.
fn warn_unknown_keys(val: &mut TomlValue, file_path: &Path) {
  let TomlValue::Table(table) = val else {
    return;
  };

  let unknown: Vec<String> = table
    .keys()
    .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
    .cloned()
    .collect();

  for key in unknown {
    eprintln!(
      "{}: unknown config key '{}' in {} (known keys: {})",
      "warning".yellow(),
      key,
      file_path.display(),
      KNOWN_KEYS.join(", ")
    );
    table.remove(&key);
  }
}

fn read_layer(path: &Path) -> Result<TomlValue> {
  let data =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let mut val: TomlValue =
    toml::from_str(&data).with_context(|| format!("invalid TOML in {}", path.display()))?;
  warn_unknown_keys(&mut val, path);
  Ok(val)
}

/// Load and merge configuration from defaults, the global file and an
/// optional explicit file, in that order.
///
/// # Errors
/// Returns an error if a config file cannot be read or parsed as valid TOML,
/// or if the merged result has the wrong shape.
pub fn load_config(explicit: Option<&Path>) -> Result<PromptConfig> {
  let mut merged: TomlValue =
    toml::from_str(DEFAULT_TOML).context("invalid embedded default config")?;

  let xdg = xdg::BaseDirectories::with_prefix("relayctl");
  if let Some(global_path) = xdg.find_config_file("relayctl.toml") {
    merge_values(&mut merged, read_layer(&global_path)?);
  }

  if let Some(path) = explicit {
    merge_values(&mut merged, read_layer(path)?);
  }

  PromptConfig::deserialize(merged).context("failed to parse merged config")
}
