//! Release dependency graph built on petgraph
//!
//! A directed graph over the releases of a map: `A → B` means "A names B
//! as its previous release". Used by the graph command for Graphviz
//! export; chain listings come from the resolver, which keeps its own
//! walk so its error semantics stay exact.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::model::Map;

/// A release node in the dependency graph
#[derive(Debug, Clone)]
pub struct ReleaseNode {
  pub name: String,
  /// The release has no predecessor
  pub is_base: bool,
}

/// Directed release graph
pub struct ReleaseGraph {
  graph: DiGraph<ReleaseNode, ()>,
}

impl ReleaseGraph {
  /// Build the graph from a map
  ///
  /// Call after the resolver has validated the map; an edge whose target
  /// name is absent is silently skipped here.
  pub fn build(map: &Map) -> Self {
    let mut graph = DiGraph::new();
    let mut name_to_node: HashMap<&str, NodeIndex> = HashMap::new();

    for release in &map.releases {
      let index = graph.add_node(ReleaseNode {
        name: release.name.clone(),
        is_base: release.previous.is_empty(),
      });
      name_to_node.entry(release.name.as_str()).or_insert(index);
    }

    for release in &map.releases {
      if release.previous.is_empty() {
        continue;
      }
      if let (Some(&from), Some(&to)) = (
        name_to_node.get(release.name.as_str()),
        name_to_node.get(release.previous.as_str()),
      ) {
        graph.add_edge(from, to, ());
      }
    }

    ReleaseGraph { graph }
  }

  /// Number of releases in the graph
  pub fn release_count(&self) -> usize {
    self.graph.node_count()
  }

  /// Export the graph in Graphviz DOT format
  ///
  /// # Example
  /// ```bash
  /// symver graph --dot libx.map > graph.dot
  /// dot -Tpng graph.dot -o graph.png
  /// ```
  pub fn to_dot(&self) -> String {
    use petgraph::dot::{Config, Dot};

    let dot = Dot::with_attr_getters(
      &self.graph,
      &[Config::EdgeNoLabel, Config::NodeNoLabel],
      &|_, _| String::new(),
      &|_, (_idx, node)| {
        if node.is_base {
          format!("label=\"{}\" shape=box style=filled fillcolor=lightblue", node.name)
        } else {
          format!("label=\"{}\" shape=ellipse", node.name)
        }
      },
    );

    format!("{:?}", dot)
  }
}
