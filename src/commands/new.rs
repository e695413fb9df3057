//! New command implementation
//!
//! Creates a version script from scratch: a single base release holding
//! the supplied symbols in `global` and the `*` wildcard in `local`.

use chrono::Utc;
use serde::Serialize;
use std::path::Path;

use crate::commands::output::{backup_if_same_file, warn_if_overwriting, write_script};
use crate::core::config::SymverConfig;
use crate::core::error::{SymverError, SymverResult};
use crate::heuristics;
use crate::naming::NameHints;
use crate::resolve::SuffixOrder;
use crate::symbols::{clean_symbols, read_symbol_lines};
use crate::ui::reporter::Reporter;
use crate::update::new_map;

const NEW_HEADER: &str = "# This map file was created with symver\n\n";

/// Report printed by the new command
#[derive(Debug, Serialize)]
struct NewReport<'a> {
  command: &'static str,
  release: &'a str,
  symbols: usize,
  generated_at: String,
}

/// Run the new command
#[allow(clippy::too_many_arguments)]
pub fn run_new(
  out: Option<&Path>,
  input: Option<&Path>,
  name: Option<&str>,
  version: Option<&str>,
  release: Option<&str>,
  dry: bool,
  json: bool,
  reporter: &Reporter,
) -> SymverResult<()> {
  let config = SymverConfig::load_or_default(Path::new("."))?;

  if let Some(out) = out {
    warn_if_overwriting(out, reporter);
    if let Some(input) = input {
      backup_if_same_file("--out", out, "--in", input, dry, reporter)?;
    }
  }

  let name = name.or(config.library.name.as_deref());
  let hints = if let Some(release) = release {
    let info = heuristics::release_info(release, reporter)?;
    NameHints {
      new_release: Some(release.to_string()),
      new_prefix: (!info.prefix.is_empty()).then_some(info.prefix),
      new_version: (!info.version.is_empty()).then_some(info.version),
      ..NameHints::default()
    }
  } else if let (Some(name), Some(version)) = (name, version) {
    NameHints {
      new_prefix: Some(name.to_string()),
      new_version: Some(heuristics::version_from_string(version, reporter)?),
      ..NameHints::default()
    }
  } else {
    return Err(SymverError::with_help(
      "It is necessary to provide either release name or name and version",
      "Pass -r LIBX_1_0_0, or -n libx -v 1_0_0 (the library name may also come from symver.toml).",
    ));
  };

  let symbols = clean_symbols(&read_symbol_lines(input)?);

  let Some((map, release_name)) = new_map(&symbols, &hints, SuffixOrder::default(), reporter)? else {
    return Ok(());
  };

  if json {
    let report = NewReport {
      command: "new",
      release: &release_name,
      symbols: symbols.len(),
      generated_at: Utc::now().to_rfc3339(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
  }

  if dry {
    if !json {
      println!("This is a dry run, the files were not modified.");
    }
    return Ok(());
  }

  write_script(out, NEW_HEADER, &map)
}
