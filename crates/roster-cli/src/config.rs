//! Settings loaded from the optional TOML file and `ROSTER_*` variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

const DEFAULT_STORE_PATH: &str = "~/.local/share/roster/roster.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite file holding the roster.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  /// Where tracing output goes. Defaults to `roster.log` beside the store.
  #[serde(default)]
  pub log_path: Option<PathBuf>,

  /// Directory exports and templates are written to from the TUI.
  #[serde(default)]
  pub export_dir: Option<PathBuf>,
}

fn default_store_path() -> PathBuf { PathBuf::from(DEFAULT_STORE_PATH) }

impl Settings {
  /// Layer the config file (if present) under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER"))
      .build()
      .context("failed to read config file")?;
    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;

    settings.store_path = expand_tilde(&settings.store_path);
    settings.log_path = settings.log_path.as_deref().map(expand_tilde);
    settings.export_dir = settings.export_dir.as_deref().map(expand_tilde);
    Ok(settings)
  }

  pub fn log_path(&self) -> PathBuf {
    self
      .log_path
      .clone()
      .unwrap_or_else(|| self.store_path.with_file_name("roster.log"))
  }

  pub fn export_dir(&self) -> PathBuf {
    self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_uses_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/roster.toml")).unwrap();
    assert!(settings.store_path.ends_with("roster/roster.db"));
    assert_eq!(settings.log_path(), settings.store_path.with_file_name("roster.log"));
    assert_eq!(settings.export_dir(), PathBuf::from("."));
  }

  #[test]
  fn tilde_expands_only_at_start() {
    let plain = Path::new("/var/lib/roster.db");
    assert_eq!(expand_tilde(plain), plain);
    let odd = Path::new("data/~/roster.db");
    assert_eq!(expand_tilde(odd), odd);
  }
}
