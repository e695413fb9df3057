//! CLI commands for symver
//!
//! This module contains all user-facing command implementations:
//!
//! - **update**: diff a map file against a new symbol list and rewrite it
//! - **new**: create a map file from scratch
//! - **check**: run the structural checker and report findings
//! - **graph**: print dependency chains or export Graphviz DOT
//!
//! All commands accept a `&Reporter` so warnings share one sink and one
//! verbosity threshold.

pub mod check;
pub mod graph;
pub mod new;
pub mod output;
pub mod update;

pub use check::run_check;
pub use graph::run_graph;
pub use new::run_new;
pub use update::run_update;

use std::fs;
use std::path::Path;

use crate::core::error::{ResultExt, SymverResult};

/// Read a script file as lines, without trailing newlines
pub fn read_script_lines(path: &Path) -> SymverResult<Vec<String>> {
  let text = fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
  Ok(text.lines().map(String::from).collect())
}
