//! In-memory model of a linker version script
//!
//! A `Map` owns an ordered sequence of `Release` values. Release order is
//! meaningful for output only; semantics come from the `previous` links,
//! which stay plain name strings resolved against the owning map each time
//! they are needed (release lists get rebuilt and reordered, so a direct
//! reference would dangle silently).
//!
//! `Display` renders the canonical script text. Rendering never mutates the
//! model: symbol lists are sorted on a copy.

use std::collections::BTreeSet;
use std::fmt;

/// One named version node in a script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Release {
  /// Unique-by-convention identifier (e.g. `LIBX_1_0_0`); uniqueness is
  /// only warned about, never enforced
  pub name: String,
  /// Name of the release this one depends on; empty for a base release
  pub previous: String,
  /// (visibility scope, symbols) pairs in source order. The same scope
  /// name may legally appear more than once; duplicate symbols are
  /// detected, not prevented
  pub symbols: Vec<(String, Vec<String>)>,
}

impl Release {
  pub fn new(name: impl Into<String>) -> Self {
    Release {
      name: name.into(),
      ..Release::default()
    }
  }

  /// Duplicated symbol names, reported per scope entry
  ///
  /// Returns one `(scope, duplicates)` pair for every scope entry that
  /// repeats at least one symbol; the duplicates are sorted and deduplicated.
  pub fn duplicates(&self) -> Vec<(String, Vec<String>)> {
    let mut result = Vec::new();
    for (scope, symbols) in &self.symbols {
      let mut seen = BTreeSet::new();
      let mut dups = BTreeSet::new();
      for symbol in symbols {
        if !seen.insert(symbol.as_str()) {
          dups.insert(symbol.clone());
        }
      }
      if !dups.is_empty() {
        result.push((scope.clone(), dups.into_iter().collect()));
      }
    }
    result
  }
}

impl fmt::Display for Release {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.name)?;
    writeln!(f, "{{")?;
    for (scope, symbols) in &self.symbols {
      let mut sorted = symbols.clone();
      sorted.sort();
      writeln!(f, "    {}:", scope)?;
      for symbol in &sorted {
        writeln!(f, "        {};", symbol)?;
      }
    }
    writeln!(f, "}} {};", self.previous)
  }
}

/// A whole version script
#[derive(Debug, Clone, Default)]
pub struct Map {
  /// The name (path) of the file this map was read from; empty for maps
  /// built from scratch
  pub filename: String,
  /// The releases, exclusively owned by this map
  pub releases: Vec<Release>,
}

impl Map {
  pub fn new() -> Self {
    Map::default()
  }

  /// All symbols in `global` scopes across all releases
  ///
  /// Scope names are matched case-insensitively here.
  pub fn all_global_symbols(&self) -> BTreeSet<String> {
    let mut symbols = BTreeSet::new();
    for release in &self.releases {
      for (scope, scope_symbols) in &release.symbols {
        if scope.eq_ignore_ascii_case("global") {
          symbols.extend(scope_symbols.iter().cloned());
        }
      }
    }
    symbols
  }

  /// Duplicated symbols for each release that has any
  pub fn duplicates(&self) -> Vec<(String, Vec<(String, Vec<String>)>)> {
    self
      .releases
      .iter()
      .filter_map(|release| {
        let dups = release.duplicates();
        if dups.is_empty() {
          None
        } else {
          Some((release.name.clone(), dups))
        }
      })
      .collect()
  }
}

impl fmt::Display for Map {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for release in &self.releases {
      writeln!(f, "{}", release)?;
    }
    Ok(())
  }
}
