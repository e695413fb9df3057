//! Integration tests for `symver update`

use crate::helpers::{BASIC_MAP, TestDir, run_symver, run_symver_ok};
use anyhow::Result;

#[test]
fn additive_update_appends_a_release() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;
  dir.write_file("symbols.txt", "foo bar baz qux\n")?;

  let output = run_symver_ok(
    &dir.path,
    &["update", "-s", "-i", "symbols.txt", "-o", "out.map", "libx.map"],
    None,
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Added:"));
  assert!(stdout.contains("qux"));
  assert!(!stdout.contains("Removed:"));

  let written = dir.read_file("out.map")?;
  assert!(written.starts_with("# This map file was automatically updated\n\n"));
  assert!(written.contains("LIBX_1_2_0\n{\n    global:\n        qux;\n} LIBX_1_1_0;\n"));
  // The new release's chain leads the output
  let new_pos = written.find("LIBX_1_2_0").unwrap();
  let base_pos = written.find("LIBX_1_0_0").unwrap();
  assert!(new_pos < base_pos);

  Ok(())
}

#[test]
fn breaking_update_collapses_history() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;
  dir.write_file("symbols.txt", "foo\n")?;

  let output = run_symver_ok(
    &dir.path,
    &["update", "-s", "-i", "symbols.txt", "-o", "out.map", "libx.map"],
    None,
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Removed:"));
  assert!(stdout.contains("Merging all symbols in a single new release"));

  let written = dir.read_file("out.map")?;
  assert!(written.contains("LIBX_2_0_0"));
  assert!(!written.contains("LIBX_1_0_0"));
  assert!(written.contains("    local:\n        *;\n} ;\n"));

  Ok(())
}

#[test]
fn care_flag_fails_on_break_without_writing() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;
  dir.write_file("symbols.txt", "foo\n")?;

  let output = run_symver(
    &dir.path,
    &["update", "-s", "-c", "-i", "symbols.txt", "-o", "out.map", "libx.map"],
    None,
  )?;

  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("ABI break detected"));
  assert!(!dir.file_exists("out.map"));

  Ok(())
}

#[test]
fn add_mode_reads_symbols_from_stdin() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;

  run_symver_ok(&dir.path, &["update", "-a", "-o", "out.map", "libx.map"], Some("qux\n"))?;

  let written = dir.read_file("out.map")?;
  assert!(written.contains("qux;"));
  assert!(written.contains("LIBX_1_2_0"));

  Ok(())
}

#[test]
fn remove_mode_breaks_the_abi() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;
  dir.write_file("symbols.txt", "baz\n")?;

  let output = run_symver_ok(
    &dir.path,
    &["update", "-r", "-i", "symbols.txt", "-o", "out.map", "libx.map"],
    None,
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Removed:"));

  let written = dir.read_file("out.map")?;
  assert!(written.contains("LIBX_2_0_0"));
  assert!(written.contains("foo;"));
  assert!(!written.contains("baz;"));

  Ok(())
}

#[test]
fn identical_symbols_do_nothing() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;
  dir.write_file("symbols.txt", "foo bar baz\n")?;

  let output = run_symver_ok(
    &dir.path,
    &["update", "-s", "-i", "symbols.txt", "-o", "out.map", "libx.map"],
    None,
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("No symbols added or removed. Nothing done."));
  assert!(!dir.file_exists("out.map"));

  Ok(())
}

#[test]
fn dry_run_never_writes() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;
  dir.write_file("symbols.txt", "foo bar baz qux\n")?;

  let output = run_symver_ok(
    &dir.path,
    &["update", "-s", "-d", "-i", "symbols.txt", "-o", "out.map", "libx.map"],
    None,
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("dry run"));
  assert!(!dir.file_exists("out.map"));

  Ok(())
}

#[test]
fn same_input_and_output_creates_a_backup() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;
  dir.write_file("symbols.txt", "foo bar baz qux\n")?;

  run_symver_ok(
    &dir.path,
    &["update", "-s", "-i", "symbols.txt", "-o", "libx.map", "libx.map"],
    None,
  )?;

  assert_eq!(dir.read_file("libx.map.old")?, BASIC_MAP);
  assert!(dir.read_file("libx.map")?.contains("LIBX_1_2_0"));

  Ok(())
}

#[test]
fn json_report_is_valid_json() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;
  dir.write_file("symbols.txt", "foo bar baz qux\n")?;

  let output = run_symver_ok(
    &dir.path,
    &["update", "-s", "--json", "-i", "symbols.txt", "-o", "out.map", "libx.map"],
    None,
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  assert_eq!(json["command"], "update");
  assert_eq!(json["added"][0], "qux");
  assert_eq!(json["abi_break"], false);
  assert_eq!(json["release"], "LIBX_1_2_0");

  Ok(())
}

#[test]
fn mode_flags_are_required_and_exclusive() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("libx.map", BASIC_MAP)?;

  let missing = run_symver(&dir.path, &["update", "libx.map"], Some(""))?;
  assert!(!missing.status.success());

  let both = run_symver(&dir.path, &["update", "-a", "-r", "libx.map"], Some(""))?;
  assert!(!both.status.success());

  Ok(())
}

#[test]
fn care_default_comes_from_config_file() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("symver.toml", "[update]\ncare = true\n")?;
  dir.write_file("libx.map", BASIC_MAP)?;
  dir.write_file("symbols.txt", "foo\n")?;

  let output = run_symver(
    &dir.path,
    &["update", "-s", "-i", "symbols.txt", "-o", "out.map", "libx.map"],
    None,
  )?;

  assert_eq!(output.status.code(), Some(3));
  assert!(!dir.file_exists("out.map"));

  Ok(())
}
