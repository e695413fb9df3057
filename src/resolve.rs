//! Dependency-chain resolution over `previous` links
//!
//! Releases reference their predecessor by name only. This module walks
//! those weak references, producing one chain per release that no other
//! release links to, and detects the conditions that make a map unusable:
//! a dangling `previous`, a name defined twice, or a cycle.

use std::collections::HashSet;

use crate::core::error::{ResolveError, SymverResult};
use crate::heuristics::{self, ReleaseInfo};
use crate::model::Map;
use crate::ui::reporter::Reporter;

/// Construct the dependency chains of a map
///
/// One chain per release not already absorbed into a longer chain,
/// processed in map order, each running from the most recent release down
/// to a release with an empty `previous`. A chain whose head turns out to
/// be an interior node of a later chain is dropped from the result.
pub fn dependencies(map: &Map) -> SymverResult<Vec<Vec<String>>> {
  let mut solved: HashSet<String> = HashSet::new();
  let mut chains: Vec<Vec<String>> = Vec::new();

  for release in &map.releases {
    if solved.contains(&release.name) {
      continue;
    }

    let mut chain = vec![release.name.clone()];
    let mut dep = release.previous.clone();
    while !dep.is_empty() {
      if chain.contains(&dep) {
        let mut path = chain;
        path.push(dep);
        return Err(ResolveError::Cycle { path }.into());
      }
      chain.push(dep.clone());

      if solved.contains(&dep) {
        // The earlier chain headed by this release is subsumed
        chains.retain(|existing| existing.first() != Some(&dep));
      } else {
        solved.insert(dep.clone());
      }
      dep = lookup_previous(map, &dep)?;
    }
    solved.insert(release.name.clone());
    chains.push(chain);
  }

  Ok(chains)
}

fn lookup_previous(map: &Map, name: &str) -> SymverResult<String> {
  let mut found = map.releases.iter().filter(|release| release.name == name);
  let Some(first) = found.next() else {
    return Err(
      ResolveError::NotFound {
        name: name.to_string(),
      }
      .into(),
    );
  };
  if found.next().is_some() {
    return Err(
      ResolveError::DefinedTwice {
        name: name.to_string(),
      }
      .into(),
    );
  }
  Ok(first.previous.clone())
}

/// How candidate heads are ranked when guessing the latest release
///
/// `Lexicographic` compares the canonical version suffixes as strings, so
/// `_9_0_0` ranks above `_10_0_0`. That matches the historical behavior
/// and stays the default; `Numeric` compares the parsed components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixOrder {
  #[default]
  Lexicographic,
  Numeric,
}

impl SuffixOrder {
  /// Does `candidate` rank above `best`?
  fn ranks_above(self, candidate: &ReleaseInfo, best: &ReleaseInfo) -> bool {
    match self {
      SuffixOrder::Lexicographic => candidate.suffix > best.suffix,
      SuffixOrder::Numeric => candidate.version > best.version,
    }
  }

  /// Does `candidate` rank above the `_0_0_0` baseline?
  fn beats_baseline(self, candidate: &ReleaseInfo) -> bool {
    match self {
      SuffixOrder::Lexicographic => candidate.suffix.as_str() > "_0_0_0",
      SuffixOrder::Numeric => !candidate.version.is_empty() && candidate.version.as_slice() > [0, 0, 0].as_slice(),
    }
  }
}

/// The guessed latest release of a map
#[derive(Debug, Clone)]
pub struct LatestRelease {
  pub name: String,
  pub info: ReleaseInfo,
}

/// Guess the latest release from the chain heads
///
/// Every chain head is parsed with `release_info` and the one whose suffix
/// ranks greatest is kept. Returns `None` when no head beats the `_0_0_0`
/// baseline, i.e. the map carries no usable version information.
pub fn guess_latest_release(map: &Map, order: SuffixOrder, reporter: &Reporter) -> SymverResult<Option<LatestRelease>> {
  let chains = dependencies(map)?;

  let mut best: Option<LatestRelease> = None;
  for chain in &chains {
    let Some(head) = chain.first() else {
      continue;
    };
    let info = heuristics::release_info(head, reporter)?;
    let beats = match &best {
      Some(current) => order.ranks_above(&info, &current.info),
      None => order.beats_baseline(&info),
    };
    if beats {
      best = Some(LatestRelease {
        name: head.clone(),
        info,
      });
    }
  }

  Ok(best)
}
