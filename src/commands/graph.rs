//! Graph command implementation
//!
//! Prints the dependency chains of a map, or exports the release graph as
//! Graphviz DOT.

use chrono::Utc;
use serde::Serialize;
use std::path::Path;

use crate::commands::read_script_lines;
use crate::core::error::SymverResult;
use crate::graph::release_graph::ReleaseGraph;
use crate::resolve::{self, SuffixOrder};
use crate::script;
use crate::ui::reporter::Reporter;

/// Report printed by the graph command
#[derive(Debug, Serialize)]
struct GraphReport<'a> {
  command: &'static str,
  file: String,
  chains: &'a [Vec<String>],
  latest: Option<&'a str>,
  generated_at: String,
}

/// Run the graph command
pub fn run_graph(file: &Path, dot: bool, json: bool, reporter: &Reporter) -> SymverResult<()> {
  let lines = read_script_lines(file)?;
  let map = script::parse(&file.to_string_lossy(), &lines, reporter)?;

  let chains = resolve::dependencies(&map)?;
  let latest = resolve::guess_latest_release(&map, SuffixOrder::default(), reporter)?;
  let graph = ReleaseGraph::build(&map);

  if dot {
    println!("{}", graph.to_dot());
    return Ok(());
  }

  if json {
    let report = GraphReport {
      command: "graph",
      file: file.display().to_string(),
      chains: &chains,
      latest: latest.as_ref().map(|l| l.name.as_str()),
      generated_at: Utc::now().to_rfc3339(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  println!(
    "{} release(s) in {} dependency chain(s)",
    graph.release_count(),
    chains.len()
  );
  println!();
  println!("Dependency chains:");
  for chain in &chains {
    println!("    {}", chain.join(" -> "));
  }
  println!();
  match latest {
    Some(latest) => println!("Latest release: {}", latest.name),
    None => println!("Latest release: unknown (no version information in chain heads)"),
  }

  Ok(())
}
