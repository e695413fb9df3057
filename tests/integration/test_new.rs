//! Integration tests for `symver new`

use crate::helpers::{TestDir, run_symver, run_symver_ok};
use anyhow::Result;

#[test]
fn creates_a_script_from_name_and_version() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("symbols.txt", "foo bar\n")?;

  run_symver_ok(
    &dir.path,
    &["new", "-n", "libx", "-v", "1_0_0", "-i", "symbols.txt", "-o", "libx.map"],
    None,
  )?;

  let written = dir.read_file("libx.map")?;
  assert!(written.starts_with("# This map file was created with symver\n\n"));
  assert!(written.contains("LIBX_1_0_0\n{\n"));
  assert!(written.contains("    global:\n        bar;\n        foo;\n"));
  assert!(written.contains("    local:\n        *;\n"));
  assert!(written.ends_with("} ;\n\n"));

  Ok(())
}

#[test]
fn created_script_parses_back() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("symbols.txt", "foo bar\n")?;

  run_symver_ok(
    &dir.path,
    &["new", "-r", "LIBX_1_0_0", "-i", "symbols.txt", "-o", "libx.map"],
    None,
  )?;
  run_symver_ok(&dir.path, &["check", "libx.map"], None)?;

  Ok(())
}

#[test]
fn release_argument_without_version_is_used_verbatim() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("symbols.txt", "foo\n")?;

  run_symver_ok(
    &dir.path,
    &["new", "-r", "libx_base", "-i", "symbols.txt", "-o", "libx.map"],
    None,
  )?;

  assert!(dir.read_file("libx.map")?.contains("LIBX_BASE\n{\n"));

  Ok(())
}

#[test]
fn symbols_come_from_stdin_without_input_file() -> Result<()> {
  let dir = TestDir::new()?;

  run_symver_ok(
    &dir.path,
    &["new", "-n", "libx", "-v", "1_0", "-o", "libx.map"],
    Some("foo\nbar\n"),
  )?;

  assert!(dir.read_file("libx.map")?.contains("LIBX_1_0\n{\n"));

  Ok(())
}

#[test]
fn missing_name_and_release_is_a_user_error() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_symver(&dir.path, &["new", "-o", "libx.map"], Some("foo\n"))?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("release name or name and version"));
  assert!(!dir.file_exists("libx.map"));

  Ok(())
}

#[test]
fn library_name_can_come_from_config() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("symver.toml", "[library]\nname = \"libx\"\n")?;

  run_symver_ok(&dir.path, &["new", "-v", "2_0_0", "-o", "libx.map"], Some("foo\n"))?;

  assert!(dir.read_file("libx.map")?.contains("LIBX_2_0_0\n{\n"));

  Ok(())
}

#[test]
fn empty_symbol_list_writes_nothing() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_symver_ok(
    &dir.path,
    &["new", "-n", "libx", "-v", "1_0_0", "-o", "libx.map"],
    Some("\n"),
  )?;

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No valid symbols provided"));
  assert!(!dir.file_exists("libx.map"));

  Ok(())
}

#[test]
fn dry_run_writes_nothing() -> Result<()> {
  let dir = TestDir::new()?;

  run_symver_ok(
    &dir.path,
    &["new", "-d", "-n", "libx", "-v", "1_0_0", "-o", "libx.map"],
    Some("foo\n"),
  )?;

  assert!(!dir.file_exists("libx.map"));

  Ok(())
}

#[test]
fn bad_version_string_fails() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_symver(
    &dir.path,
    &["new", "-n", "libx", "-v", "one.two", "-o", "libx.map"],
    Some("foo\n"),
  )?;

  assert_eq!(output.status.code(), Some(3));
  assert!(!dir.file_exists("libx.map"));

  Ok(())
}
