//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A temporary directory holding map and symbol files for one test
pub struct TestDir {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestDir {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Write a file into the directory, returning its full path
  pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
    let file_path = self.path.join(name);
    std::fs::write(&file_path, content).with_context(|| format!("Failed to write {}", name))?;
    Ok(file_path)
  }

  /// Read a file from the directory
  pub fn read_file(&self, name: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(name)).with_context(|| format!("Failed to read {}", name))
  }

  /// Check if a file exists in the directory
  pub fn file_exists(&self, name: &str) -> bool {
    self.path.join(name).exists()
  }
}

/// A two-release map: LIBX_1_0_0 (base, exports foo and bar) and
/// LIBX_1_1_0 (exports baz)
pub const BASIC_MAP: &str = "LIBX_1_0_0\n{\n    global:\n        bar;\n        foo;\n    local:\n        *;\n} ;\n\nLIBX_1_1_0\n{\n    global:\n        baz;\n} LIBX_1_0_0;\n";

/// Run the symver CLI, returning the raw output regardless of exit status
pub fn run_symver(cwd: &Path, args: &[&str], stdin: Option<&str>) -> Result<Output> {
  let symver_bin = env!("CARGO_BIN_EXE_symver");

  let mut command = Command::new(symver_bin);
  command.current_dir(cwd).args(args);

  let output = match stdin {
    Some(text) => {
      command.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());
      let mut child = command.spawn().context("Failed to run symver")?;
      // The child may validate arguments and exit before reading stdin; a
      // resulting BrokenPipe is expected and not a test failure.
      match child.stdin.as_mut().context("Failed to open stdin")?.write_all(text.as_bytes()) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
        Err(e) => return Err(e.into()),
      }
      child.wait_with_output()?
    }
    None => command.stdin(Stdio::null()).output().context("Failed to run symver")?,
  };

  Ok(output)
}

/// Run the symver CLI and fail the test if it exits non-zero
pub fn run_symver_ok(cwd: &Path, args: &[&str], stdin: Option<&str>) -> Result<Output> {
  let output = run_symver(cwd, args, stdin)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "symver command failed: symver {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
