//! Symbol-diff and map-update policy
//!
//! Given the current map and a new flat set of exported symbols, decide how
//! the release graph must change:
//!
//! - only additions: append one new release holding the added symbols,
//!   linked to the current latest release (ABI-compatible update);
//! - any removal: collapse the whole history into a single new base
//!   release (ABI break), unless the caller asked to fail on breaks.
//!
//! After mutation the map is re-checked and re-linearized so the new
//! release's dependency chain leads the output.

use std::collections::BTreeSet;

use crate::checker;
use crate::core::error::{SymverError, SymverResult};
use crate::model::{Map, Release};
use crate::naming::{self, NameHints};
use crate::resolve::{self, SuffixOrder};
use crate::ui::reporter::Reporter;

/// How the supplied symbol list relates to the current map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
  /// The list is the complete new set; diff against the current globals
  Replace,
  /// Every supplied symbol is added
  Add,
  /// Every supplied symbol is removed
  Remove,
}

/// Outcome of an update
#[derive(Debug)]
pub struct UpdateOutcome {
  /// The updated (or rebuilt) map
  pub map: Map,
  /// Symbols added, sorted and deduplicated
  pub added: Vec<String>,
  /// Symbols removed, sorted and deduplicated
  pub removed: Vec<String>,
  /// Name of the release created, `None` when nothing changed
  pub release: Option<String>,
  /// The update removed exported symbols and collapsed history
  pub abi_break: bool,
}

/// Update a map against a new symbol list
///
/// `care` makes an ABI break fatal before any mutation. `prev_prefix` is an
/// optional library-name fallback for release naming (usually from the
/// configuration file).
pub fn update_map(
  map: Map,
  new_symbols: &[String],
  mode: UpdateMode,
  care: bool,
  prev_prefix: Option<&str>,
  order: SuffixOrder,
  reporter: &Reporter,
) -> SymverResult<UpdateOutcome> {
  let all_symbols = map.all_global_symbols();
  let new_set: BTreeSet<&str> = new_symbols.iter().map(String::as_str).collect();

  let mut added: BTreeSet<String> = BTreeSet::new();
  let mut removed: BTreeSet<String> = BTreeSet::new();

  match mode {
    UpdateMode::Replace => {
      for symbol in &new_set {
        if !all_symbols.contains(*symbol) {
          added.insert((*symbol).to_string());
        }
      }
      for symbol in &all_symbols {
        if !new_set.contains(symbol.as_str()) {
          removed.insert(symbol.clone());
        }
      }
    }
    UpdateMode::Add => {
      for symbol in new_symbols {
        if all_symbols.contains(symbol) {
          reporter.warning(format!(
            "The symbol '{}' is already present in a previous version. Keep the previous implementation to not break ABI.",
            symbol
          ));
        }
        added.insert(symbol.clone());
      }
    }
    UpdateMode::Remove => {
      for symbol in new_symbols {
        if all_symbols.contains(symbol) {
          removed.insert(symbol.clone());
        } else {
          reporter.warning(format!("Requested to remove '{}', but not found.", symbol));
        }
      }
    }
  }

  // Guessed before the nothing-to-do return: heads that cannot be parsed
  // are an error even when the symbol sets match
  let latest = resolve::guess_latest_release(&map, order, reporter)?;

  if added.is_empty() && removed.is_empty() {
    return Ok(UpdateOutcome {
      map,
      added: Vec::new(),
      removed: Vec::new(),
      release: None,
      abi_break: false,
    });
  }

  let hints = NameHints {
    abi_break: !removed.is_empty(),
    prev_prefix: prev_prefix.map(String::from),
    ..NameHints::default()
  };

  let (mut map, name) = if removed.is_empty() {
    // Additive, ABI-compatible update: one new release on top
    let Some(latest) = latest else {
      return Err(SymverError::Naming {
        message: "Insufficient information to name the new release: no release carries version information."
          .to_string(),
      });
    };
    let name = naming::guess_name(&map, &hints, order, reporter)?;
    let mut release = Release::new(name.clone());
    release.previous = latest.name;
    release
      .symbols
      .push(("global".to_string(), added.iter().cloned().collect()));

    let mut map = map;
    map.releases.push(release);
    (map, name)
  } else {
    // ABI break: history collapses into a single new base release
    if care {
      return Err(SymverError::AbiBreak {
        removed: removed.iter().cloned().collect(),
      });
    }
    reporter.warning("ABI break detected: symbols were removed.");

    let name = naming::guess_name(&map, &hints, order, reporter)?;
    let mut globals: BTreeSet<String> = all_symbols;
    globals.extend(added.iter().cloned());
    for symbol in &removed {
      globals.remove(symbol);
    }
    if globals.remove("*") {
      reporter.warning("Wildcard '*' found in global. Removed to avoid exporting unexpected symbols.");
    }

    let mut release = Release::new(name.clone());
    release.symbols.push(("global".to_string(), globals.into_iter().collect()));
    release.symbols.push(("local".to_string(), vec!["*".to_string()]));

    let mut rebuilt = Map::new();
    rebuilt.filename = map.filename.clone();
    rebuilt.releases.push(release);
    (rebuilt, name)
  };

  checker::check(&map, reporter)?;

  let chains = resolve::dependencies(&map)?;
  let chain = chains
    .iter()
    .find(|chain| chain.first().map(String::as_str) == Some(name.as_str()))
    .cloned()
    .unwrap_or_else(|| vec![name.clone()]);
  map.releases = relinearize(std::mem::take(&mut map.releases), &chain);

  Ok(UpdateOutcome {
    map,
    added: added.into_iter().collect(),
    abi_break: !removed.is_empty(),
    removed: removed.into_iter().collect(),
    release: Some(name),
  })
}

/// Reorder releases so the target chain leads the output
///
/// Chain members come first, in chain order (head first); the remaining
/// releases follow sorted by name descending.
pub fn relinearize(releases: Vec<Release>, chain: &[String]) -> Vec<Release> {
  let mut rest = releases;
  let mut ordered = Vec::with_capacity(rest.len());
  for name in chain {
    if let Some(position) = rest.iter().position(|release| release.name == *name) {
      ordered.push(rest.remove(position));
    }
  }
  rest.sort_by(|a, b| b.name.cmp(&a.name));
  ordered.extend(rest);
  ordered
}

/// Build a brand-new map holding a single base release
///
/// Returns `None` when the symbol list is empty (a warning is reported and
/// the caller writes nothing).
pub fn new_map(
  symbols: &[String],
  hints: &NameHints,
  order: SuffixOrder,
  reporter: &Reporter,
) -> SymverResult<Option<(Map, String)>> {
  if symbols.is_empty() {
    reporter.warning("No valid symbols provided. Nothing done.");
    return Ok(None);
  }

  let mut map = Map::new();
  let name = naming::guess_name(&map, hints, order, reporter)?;

  let mut release = Release::new(name.clone());
  release.symbols.push(("global".to_string(), symbols.to_vec()));
  release.symbols.push(("local".to_string(), vec!["*".to_string()]));
  map.releases.push(release);

  checker::check(&map, reporter)?;
  let chain = vec![name.clone()];
  map.releases = relinearize(std::mem::take(&mut map.releases), &chain);

  Ok(Some((map, name)))
}
