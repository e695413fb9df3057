//! Check command implementation
//!
//! Runs the structural checker and dependency resolver standalone and
//! prints the findings, without rewriting anything.

use std::path::Path;

use crate::checker::{self, CheckReport};
use crate::commands::read_script_lines;
use crate::core::error::SymverResult;
use crate::script;
use crate::ui::reporter::Reporter;

/// Run the check command
pub fn run_check(file: &Path, json: bool, reporter: &Reporter) -> SymverResult<()> {
  let lines = read_script_lines(file)?;
  let map = script::parse(&file.to_string_lossy(), &lines, reporter)?;
  let report = checker::check(&map, reporter)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_check_report(file, map.releases.len(), &report);
  }

  Ok(())
}

fn print_check_report(file: &Path, release_count: usize, report: &CheckReport) {
  println!("📋 Structural checks for '{}'", file.display());
  println!();
  println!(
    "   {} release(s), {} dependency chain(s)",
    release_count,
    report.chains.len()
  );
  println!();

  let mut findings = 0;

  for duplicate in &report.duplicates {
    findings += 1;
    println!(
      "⚠️  Duplicated symbols in '{}' ({}): {}",
      duplicate.release,
      duplicate.scope,
      duplicate.symbols.join(", ")
    );
  }

  for location in &report.unknown_scopes {
    findings += 1;
    println!("⚠️  Unknown scope '{}' in '{}'", location.scope, location.release);
  }

  match report.wildcards.len() {
    0 => {
      findings += 1;
      println!("⚠️  The '*' wildcard was not found");
    }
    1 => {}
    _ => {
      findings += 1;
      println!("⚠️  The '*' wildcard was found in more than one place:");
      for location in &report.wildcards {
        println!("      {}: in '{}'", location.release, location.scope);
      }
    }
  }

  match report.base_candidates.len() {
    0 => {
      findings += 1;
      println!("⚠️  No base version release found");
    }
    1 => println!("✅ Base version: {}", report.base_candidates[0]),
    _ => {
      findings += 1;
      println!("⚠️  More than one release seems the base version:");
      for name in &report.base_candidates {
        println!("      {}", name);
      }
    }
  }

  println!();
  println!("Dependency chains:");
  for chain in &report.chains {
    println!("    {}", chain.join(" -> "));
  }
  println!();

  if findings == 0 {
    println!("✅ No structural issues found");
  } else {
    println!("⚠️  {} issue(s) found", findings);
  }
}
