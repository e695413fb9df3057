//! Update command implementation
//!
//! Reads the current map, diffs it against the supplied symbol list, and
//! writes the rewritten script. Fatal conditions surface before any file
//! is touched; a dry run stops right before writing.

use chrono::Utc;
use serde::Serialize;
use std::path::Path;

use crate::commands::output::{backup_if_same_file, warn_if_overwriting, write_script};
use crate::commands::read_script_lines;
use crate::core::config::SymverConfig;
use crate::core::error::SymverResult;
use crate::resolve::SuffixOrder;
use crate::symbols::{clean_symbols, read_symbol_lines};
use crate::ui::reporter::Reporter;
use crate::update::{UpdateMode, UpdateOutcome, update_map};
use crate::{checker, script};

const UPDATE_HEADER: &str = "# This map file was automatically updated\n\n";

/// Report printed by the update command
#[derive(Debug, Serialize)]
struct UpdateReport<'a> {
  command: &'static str,
  file: String,
  added: &'a [String],
  removed: &'a [String],
  abi_break: bool,
  release: Option<&'a str>,
  generated_at: String,
}

/// Run the update command
#[allow(clippy::too_many_arguments)]
pub fn run_update(
  file: &Path,
  out: Option<&Path>,
  input: Option<&Path>,
  mode: UpdateMode,
  care: bool,
  dry: bool,
  json: bool,
  reporter: &Reporter,
) -> SymverResult<()> {
  let config = SymverConfig::load_or_default(Path::new("."))?;
  let care = care || config.update.care;

  if let Some(out) = out {
    warn_if_overwriting(out, reporter);
    if let Some(input) = input {
      backup_if_same_file("--out", out, "--in", input, dry, reporter)?;
    }
    backup_if_same_file("--out", out, "file", file, dry, reporter)?;
  }

  let lines = read_script_lines(file)?;
  let map = script::parse(&file.to_string_lossy(), &lines, reporter)?;
  checker::check(&map, reporter)?;

  let new_symbols = clean_symbols(&read_symbol_lines(input)?);

  let outcome = update_map(
    map,
    &new_symbols,
    mode,
    care,
    config.library.name.as_deref(),
    SuffixOrder::default(),
    reporter,
  )?;

  if json {
    let report = UpdateReport {
      command: "update",
      file: file.display().to_string(),
      added: &outcome.added,
      removed: &outcome.removed,
      abi_break: outcome.abi_break,
      release: outcome.release.as_deref(),
      generated_at: Utc::now().to_rfc3339(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_update_report(&outcome);
  }

  if outcome.release.is_none() {
    return Ok(());
  }

  if dry {
    if !json {
      println!("This is a dry run, the files were not modified.");
    }
    return Ok(());
  }

  write_script(out, UPDATE_HEADER, &outcome.map)
}

fn print_update_report(outcome: &UpdateOutcome) {
  if !outcome.added.is_empty() {
    println!("Added:");
    for symbol in &outcome.added {
      println!("    {}", symbol);
    }
    println!();
  }

  if !outcome.removed.is_empty() {
    println!("Removed:");
    for symbol in &outcome.removed {
      println!("    {}", symbol);
    }
    println!();
  }

  if outcome.release.is_none() {
    println!("No symbols added or removed. Nothing done.");
    return;
  }

  if outcome.abi_break {
    println!("Merging all symbols in a single new release");
  }
}
