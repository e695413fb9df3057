//! File-safety glue shared by the writing commands
//!
//! Covers the overwrite warning, the same-file backup copy, and the final
//! script write.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::error::{ResultExt, SymverResult};
use crate::model::Map;
use crate::ui::reporter::Reporter;

/// Warn when the output file already exists
pub fn warn_if_overwriting(out: &Path, reporter: &Reporter) {
  if out.is_file() {
    reporter.warning(format!("Overwriting existing file '{}'", out.display()));
  }
}

/// Check if output and input are the same file; create a backup if so
///
/// `out_arg` and `in_arg` name the options the paths came from, for the
/// warning text. The backup is skipped on a dry run.
pub fn backup_if_same_file(
  out_arg: &str,
  out: &Path,
  in_arg: &str,
  input: &Path,
  dry: bool,
  reporter: &Reporter,
) -> SymverResult<()> {
  if !out.is_file() || !input.is_file() {
    return Ok(());
  }
  let same = match (fs::canonicalize(out), fs::canonicalize(input)) {
    (Ok(out), Ok(input)) => out == input,
    _ => false,
  };
  if !same {
    return Ok(());
  }

  reporter.warning(format!("Given paths in '{}' and '{}' are the same.", out_arg, in_arg));
  if dry {
    return Ok(());
  }

  let backup = std::path::PathBuf::from(format!("{}.old", input.display()));
  reporter.warning(format!("Copying '{}' to '{}'.", input.display(), backup.display()));
  fs::copy(input, &backup).with_context(|| {
    format!(
      "Could not copy '{}' to '{}'. Aborting.",
      input.display(),
      backup.display()
    )
  })?;
  Ok(())
}

/// Write the serialized map to the output file, or stdout when none given
pub fn write_script(out: Option<&Path>, header: &str, map: &Map) -> SymverResult<()> {
  match out {
    Some(path) => {
      let mut file = fs::File::create(path).with_context(|| format!("Failed to write '{}'", path.display()))?;
      write!(file, "{}{}", header, map).with_context(|| format!("Failed to write '{}'", path.display()))?;
    }
    None => {
      print!("{}{}", header, map);
    }
  }
  Ok(())
}
