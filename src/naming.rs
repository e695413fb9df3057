//! Release-name derivation
//!
//! A new release name is a prefix (usually the library name, e.g. `LIBX`)
//! plus a version suffix (e.g. `_1_2_3`). Callers rarely supply both, so
//! `guess_name` fills the gaps from whatever is available: the previous
//! release, the set of existing names, or the guessed latest release.

use crate::core::error::{SymverError, SymverResult};
use crate::heuristics::{self, split_release_name, version_suffix};
use crate::model::Map;
use crate::resolve::{self, SuffixOrder};
use crate::ui::reporter::Reporter;

/// Partial information available for naming a new release
///
/// Fields left `None` are derived; see `guess_name` for the fallback order.
#[derive(Debug, Clone, Default)]
pub struct NameHints {
  /// The new release breaks the ABI; bumps CUR instead of AGE
  pub abi_break: bool,
  /// Full literal name for the new release, used verbatim (uppercased)
  /// when prefix and suffix are not both known
  pub new_release: Option<String>,
  /// The prefix to use (library name)
  pub new_prefix: Option<String>,
  /// The suffix to use (version part, like `_1_0_0`)
  pub new_suffix: Option<String>,
  /// The version components of the new release
  pub new_version: Option<Vec<u64>>,
  /// The name of the previous release
  pub prev_release: Option<String>,
  /// The previous release prefix (library name)
  pub prev_prefix: Option<String>,
  /// The version components of the previous release
  pub prev_version: Option<Vec<u64>>,
}

/// Guess the name for a new release
///
/// Prefix fallback order: explicit prefix, the previous release's parsed
/// prefix, the caller-supplied previous prefix, the longest common prefix
/// of all existing names (version tail stripped), the guessed latest
/// release's prefix. Suffix fallback order: explicit suffix, the explicit
/// new version, the previous version (possibly taken from the guessed
/// latest release) bumped according to `abi_break`. Failing either half is
/// fatal.
pub fn guess_name(map: &Map, hints: &NameHints, order: SuffixOrder, reporter: &Reporter) -> SymverResult<String> {
  let mut new_prefix = hints.new_prefix.clone();
  let mut new_suffix = hints.new_suffix.clone();
  let mut prev_version = hints.prev_version.clone();

  // If the two required parts were given, just combine and return
  if let Some(prefix) = &new_prefix {
    if let Some(suffix) = &new_suffix {
      reporter.debug("[guess]: Two parts found, using them");
      return Ok(prefix.to_uppercase() + suffix);
    }
    if let Some(version) = &hints.new_version {
      reporter.debug("[guess]: Prefix and version found, using them");
      return Ok(prefix.to_uppercase() + &version_suffix(version));
    }
  }

  // A full name that could not be split into parts is used as given
  if let Some(name) = &hints.new_release {
    reporter.debug("[guess]: New release found, using it");
    return Ok(name.to_uppercase());
  }

  if let Some(prev) = &hints.prev_release {
    reporter.debug("[guess]: Previous release found");
    let info = heuristics::release_info(prev, reporter)?;
    if new_prefix.is_none() && !info.prefix.is_empty() {
      new_prefix = Some(info.prefix);
    }
    if prev_version.is_none() && !info.version.is_empty() {
      prev_version = Some(info.version);
    }
  }

  if new_prefix.is_none() {
    if let Some(prefix) = &hints.prev_prefix {
      reporter.debug("[guess]: Using previous prefix as the new");
      new_prefix = Some(prefix.clone());
    } else if !map.releases.is_empty() {
      reporter.debug("[guess]: Trying to find common prefix");
      let common = common_prefix(map);
      if common.is_empty() {
        reporter.debug("[guess]: Using prefix from latest");
        if let Some(latest) = resolve::guess_latest_release(map, order, reporter)? {
          new_prefix = Some(latest.info.prefix);
        }
      } else {
        reporter.debug("[guess]: Common prefix found");
        let (stripped, _) = split_release_name(&common);
        if !stripped.is_empty() {
          new_prefix = Some(stripped.to_string());
        }
      }
    }
  }

  if new_suffix.is_none() {
    reporter.debug("[guess]: Guessing new suffix");

    if let Some(version) = &hints.new_version {
      reporter.debug("[guess]: Using new version to make suffix");
      new_suffix = Some(version_suffix(version));
    } else if prev_version.is_none() {
      reporter.debug("[guess]: Guessing latest release to make suffix");
      if let Some(latest) = resolve::guess_latest_release(map, order, reporter)? {
        if !latest.info.version.is_empty() {
          reporter.debug("[guess]: Got suffix from latest");
          prev_version = Some(latest.info.version);
        }
      }
    }

    if new_suffix.is_none() {
      if let Some(version) = &prev_version {
        reporter.debug("[guess]: Bumping release");
        let bumped = heuristics::bump_version(version, hints.abi_break);
        new_suffix = Some(version_suffix(&bumped));
      }
    }
  }

  match (new_prefix, new_suffix) {
    (Some(prefix), Some(suffix)) if !prefix.is_empty() => Ok(prefix.to_uppercase() + &suffix),
    _ => Err(SymverError::Naming {
      message: "Insufficient information to guess the new release name. Releases found do not have version information."
        .to_string(),
    }),
  }
}

/// Longest common prefix of all release names
///
/// The LCP of a string set equals the LCP of its lexicographic minimum and
/// maximum, so only those two are compared.
fn common_prefix(map: &Map) -> String {
  let names = map.releases.iter().map(|release| release.name.as_str());
  let (Some(min), Some(max)) = (names.clone().min(), names.max()) else {
    return String::new();
  };
  min
    .chars()
    .zip(max.chars())
    .take_while(|(a, b)| a == b)
    .map(|(a, _)| a)
    .collect()
}
