//! Configuration for symver
//!
//! An optional `symver.toml` (or `.symver.toml`) next to the working
//! directory supplies defaults the command line would otherwise have to
//! repeat: the library name used when guessing release names, and whether
//! updates should fail on an ABI break.
//!
//! ```toml
//! [library]
//! name = "libx"
//!
//! [update]
//! care = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, ResultExt, SymverResult};

const CONFIG_CANDIDATES: &[&str] = &["symver.toml", ".symver.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymverConfig {
  #[serde(default)]
  pub library: LibraryConfig,
  #[serde(default)]
  pub update: UpdateConfig,
}

/// Library identity defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryConfig {
  /// Library name used as the release-name prefix fallback (e.g. "libx")
  #[serde(default)]
  pub name: Option<String>,
}

/// Defaults for the update command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateConfig {
  /// Fail instead of collapsing history when an update breaks the ABI
  #[serde(default)]
  pub care: bool,
}

impl SymverConfig {
  /// Load the configuration from `dir`, searching `symver.toml` then
  /// `.symver.toml`; absence of both is not an error
  pub fn load(dir: &Path) -> SymverResult<Option<SymverConfig>> {
    for candidate in CONFIG_CANDIDATES {
      let path = dir.join(candidate);
      if !path.is_file() {
        continue;
      }
      let text =
        fs::read_to_string(&path).with_context(|| format!("Failed to read configuration '{}'", path.display()))?;
      let config = toml_edit::de::from_str(&text).map_err(|e| ConfigError::Invalid {
        path: path.clone(),
        message: e.to_string(),
      })?;
      return Ok(Some(config));
    }
    Ok(None)
  }

  /// Like `load`, but a missing file yields the defaults
  pub fn load_or_default(dir: &Path) -> SymverResult<SymverConfig> {
    Ok(Self::load(dir)?.unwrap_or_default())
  }
}
