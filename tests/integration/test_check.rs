//! Integration tests for `symver check`

use crate::helpers::{BASIC_MAP, TestDir, run_symver, run_symver_ok};
use anyhow::Result;

#[test]
fn clean_map_passes() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;

  let output = run_symver_ok(&dir.path, &["check", "libx.map"], None)?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("No structural issues found"));
  assert!(stdout.contains("Base version: LIBX_1_0_0"));
  assert!(stdout.contains("LIBX_1_1_0 -> LIBX_1_0_0"));

  Ok(())
}

#[test]
fn structural_problems_are_warnings_not_errors() -> Result<()> {
  let dir = TestDir::new()?;
  let map = "REL_1_0_0\n{\n    global:\n        foo;\n        foo;\n        *;\n    internal:\n        bar;\n} ;\n";
  dir.write_file("libx.map", map)?;

  let output = run_symver_ok(&dir.path, &["check", "libx.map"], None)?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Duplicated symbols in 'REL_1_0_0'"));
  assert!(stdout.contains("Unknown scope 'internal'"));
  assert!(stdout.contains("No base version release found"));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("[WARNING]"));

  Ok(())
}

#[test]
fn json_report_carries_the_findings() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;

  let output = run_symver_ok(&dir.path, &["check", "--json", "libx.map"], None)?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  assert_eq!(json["base_candidates"][0], "LIBX_1_0_0");
  assert_eq!(json["chains"][0][0], "LIBX_1_1_0");
  assert_eq!(json["wildcards"][0]["scope"], "local");
  assert!(json["duplicates"].as_array().unwrap().is_empty());

  Ok(())
}

#[test]
fn syntax_error_reports_exact_position() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("bad.map", "REL {\n  sym\n}\n")?;

  let output = run_symver(&dir.path, &["check", "bad.map"], None)?;

  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("In file bad.map, line 3, column 1: Missing ';' or ':' after 'sym'"));
  assert!(stderr.contains("}\n^"));

  Ok(())
}

#[test]
fn dangling_previous_is_fatal() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("bad.map", "REL\n{\n    global:\n        foo;\n} GONE;\n")?;

  let output = run_symver(&dir.path, &["check", "bad.map"], None)?;

  assert_eq!(output.status.code(), Some(3));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Release 'GONE' not found"));

  Ok(())
}

#[test]
fn circular_dependency_is_fatal_with_full_path() -> Result<()> {
  let dir = TestDir::new()?;
  let map = "A\n{\n    global:\n        foo;\n} B;\n\nB\n{\n    global:\n        bar;\n} A;\n";
  dir.write_file("cyclic.map", map)?;

  let output = run_symver(&dir.path, &["check", "cyclic.map"], None)?;

  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Circular dependency detected!"));
  assert!(stderr.contains("A->B->A"));

  Ok(())
}

#[test]
fn missing_file_is_a_system_error() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_symver(&dir.path, &["check", "nope.map"], None)?;

  assert_eq!(output.status.code(), Some(2));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read 'nope.map'"));

  Ok(())
}
