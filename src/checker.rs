//! Structural checks over a parsed map
//!
//! Everything reported here is a warning: the map stays usable and the run
//! continues. The only way this module fails is by relaying a resolver
//! error while computing the dependency-chain listing.

use serde::Serialize;

use crate::core::error::SymverResult;
use crate::model::Map;
use crate::resolve;
use crate::ui::reporter::Reporter;

/// Duplicated symbols within one (release, scope) entry
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateSymbols {
  pub release: String,
  pub scope: String,
  pub symbols: Vec<String>,
}

/// A (release, scope) location
#[derive(Debug, Clone, Serialize)]
pub struct ScopeLocation {
  pub release: String,
  pub scope: String,
}

/// Findings of a structural check, serializable for `--json` output
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
  /// Duplicated symbols per release and scope
  pub duplicates: Vec<DuplicateSymbols>,
  /// Every place the `*` wildcard appeared
  pub wildcards: Vec<ScopeLocation>,
  /// Releases holding the local wildcard with no predecessor
  pub base_candidates: Vec<String>,
  /// Scopes that are neither `global` nor `local`
  pub unknown_scopes: Vec<ScopeLocation>,
  /// The dependency chains, most recent release first
  pub chains: Vec<Vec<String>>,
}

/// Check the map structure, reporting findings as warnings
pub fn check(map: &Map, reporter: &Reporter) -> SymverResult<CheckReport> {
  let mut duplicates = Vec::new();
  let mut wildcards = Vec::new();
  let mut base_candidates = Vec::new();
  let mut unknown_scopes = Vec::new();

  for (release, scoped) in map.duplicates() {
    reporter.warning(format!("Duplicates found in release '{}':", release));
    for (scope, symbols) in scoped {
      reporter.warning(format!("    {}:", scope));
      for symbol in &symbols {
        reporter.warning(format!("        {}", symbol));
      }
      duplicates.push(DuplicateSymbols {
        release: release.clone(),
        scope,
        symbols,
      });
    }
  }

  for release in &map.releases {
    for (scope, symbols) in &release.symbols {
      match scope.as_str() {
        "local" => {
          if symbols.iter().any(|s| s == "*") {
            reporter.info(format!("{} contains the local '*' wildcard", release.name));
            if release.previous.is_empty() {
              reporter.info(format!("{} seems to be the base version", release.name));
              base_candidates.push(release.name.clone());
            } else {
              reporter.warning(format!(
                "{} should not contain the local wildcard because it is not the base version (it refers to version {} as its predecessor)",
                release.name, release.previous
              ));
            }
            wildcards.push(ScopeLocation {
              release: release.name.clone(),
              scope: scope.clone(),
            });
          }
        }
        "global" => {
          if symbols.iter().any(|s| s == "*") {
            reporter.warning(format!(
              "{} contains the '*' wildcard in global scope. It is probably exporting symbols it should not.",
              release.name
            ));
            wildcards.push(ScopeLocation {
              release: release.name.clone(),
              scope: scope.clone(),
            });
          }
        }
        _ => {
          reporter.warning(format!(
            "{} contains unknown scope named {} (different from 'global' and 'local')",
            release.name, scope
          ));
          unknown_scopes.push(ScopeLocation {
            release: release.name.clone(),
            scope: scope.clone(),
          });
        }
      }
    }
  }

  if wildcards.is_empty() {
    reporter.warning("The '*' wildcard was not found");
  } else if wildcards.len() > 1 {
    reporter.warning("The '*' wildcard was found in more than one place:");
    for location in &wildcards {
      reporter.warning(format!("    {}: in '{}'", location.release, location.scope));
    }
  }

  if base_candidates.is_empty() {
    reporter.warning("No base version release found");
  } else if base_candidates.len() > 1 {
    reporter.warning(
      "More than one release seems the base version (contains the local wildcard and does not have a predecessor version):",
    );
    for name in &base_candidates {
      reporter.warning(format!("    {}", name));
    }
  }

  let chains = resolve::dependencies(map)?;
  reporter.info("Found dependencies:");
  for chain in &chains {
    reporter.info(format!("    {}", chain.join("->")));
  }

  Ok(CheckReport {
    duplicates,
    wildcards,
    base_candidates,
    unknown_scopes,
    chains,
  })
}
