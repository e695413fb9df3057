//! Version-string heuristics
//!
//! Pure helpers that extract and bump the CUR/AGE/REV triple used in
//! release names like `LIBX_1_0_0`. Everything here operates on strings
//! and integer lists; no part of the release graph is touched.

use crate::core::error::{SymverError, SymverResult};
use crate::ui::reporter::Reporter;

/// The parts of a release name
///
/// `suffix` is the canonical re-join of the version components
/// (`_CUR_AGE_REV`, or shorter), not the raw text that followed the
/// prefix in the original name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
  pub prefix: String,
  pub suffix: String,
  pub version: Vec<u64>,
}

/// Parse the numeric components out of a version string
///
/// The string is split into maximal alphanumeric runs; everything else is a
/// separator, so `0_1_2` and `0.1.2` both work. A run that is not a number
/// is a fatal error. Fewer than 2 runs or more than 3 only warn.
pub fn version_from_string(version_string: &str, reporter: &Reporter) -> SymverResult<Vec<u64>> {
  let runs: Vec<&str> = version_string
    .split(|c: char| !c.is_ascii_alphanumeric())
    .filter(|run| !run.is_empty())
    .collect();

  if runs.is_empty() {
    return Err(SymverError::Version {
      message: format!(
        "Could not get version parts from '{}'. Provide digits separated by non-alphanumeric characters (e.g. 0_1_2 or 0.1.2).",
        version_string
      ),
    });
  }
  if runs.len() < 2 {
    reporter.warning("Provide at least a major and a minor version digit (e.g. '1.2.3' or '1_2')");
  }
  if runs.len() > 3 {
    reporter.warning("Version has too many parts; provide 3 or less (e.g. '0.1.2')");
  }

  runs
    .iter()
    .map(|run| {
      run.parse::<u64>().map_err(|_| SymverError::Version {
        message: format!("Version part '{}' in '{}' is not a number", run, version_string),
      })
    })
    .collect()
}

/// Split a release name into its prefix and version tail
///
/// The tail starts at the first run of one-or-more underscores followed by
/// digits. A name with no such run but with trailing underscores has those
/// stripped from the prefix. Returns `(prefix, tail)`; the tail is empty
/// when the name carries no version information.
pub fn split_release_name(name: &str) -> (&str, &str) {
  let bytes = name.as_bytes();
  let mut i = 0;
  while i < bytes.len() {
    if bytes[i] == b'_' {
      let mut j = i;
      while j < bytes.len() && bytes[j] == b'_' {
        j += 1;
      }
      if j < bytes.len() && bytes[j].is_ascii_digit() {
        return (&name[..i], &name[i..]);
      }
      if j == bytes.len() {
        return (&name[..i], "");
      }
      i = j;
    } else {
      i += 1;
    }
  }
  (name, "")
}

/// Extract prefix, canonical suffix, and version components from a release name
pub fn release_info(name: &str, reporter: &Reporter) -> SymverResult<ReleaseInfo> {
  let (prefix, tail) = split_release_name(name);

  let version = if tail.is_empty() {
    Vec::new()
  } else {
    version_from_string(tail, reporter)?
  };

  Ok(ReleaseInfo {
    prefix: prefix.to_string(),
    suffix: version_suffix(&version),
    version,
  })
}

/// Join version components into the canonical `_CUR_AGE_REV` suffix
pub fn version_suffix(version: &[u64]) -> String {
  version.iter().map(|part| format!("_{}", part)).collect()
}

/// Bump a version depending on whether the ABI was broken
///
/// On an ABI break CUR is incremented and every remaining component is set
/// to zero. Otherwise CUR is kept, AGE is incremented, and everything from
/// REV onward is set to zero. Works with versions shorter than 3 components.
pub fn bump_version(version: &[u64], abi_break: bool) -> Vec<u64> {
  let mut bumped = Vec::with_capacity(version.len());
  if abi_break {
    if let Some(cur) = version.first() {
      bumped.push(cur + 1);
    }
    bumped.resize(version.len(), 0);
  } else {
    if let Some(cur) = version.first() {
      bumped.push(*cur);
    }
    if let Some(age) = version.get(1) {
      bumped.push(age + 1);
    }
    bumped.resize(version.len(), 0);
  }
  bumped
}
