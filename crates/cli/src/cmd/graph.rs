//! Implementation of the `kiln graph` command.
//!
//! Prints the dependency graph discovered from a target. The graph is shown
//! even when it contains a cycle, which makes this the tool for finding one.

use anyhow::Result;
use serde::Serialize;

use kiln_lib::{DependencyResolver, Target};

use crate::config::Project;
use crate::observer::format_graph;
use crate::output::{OutputFormat, print_json};

#[derive(Serialize)]
struct GraphNode<'a> {
  target: &'a Target,
  produced: bool,
  dependencies: Vec<&'a Target>,
}

pub fn cmd_graph(project: &Project, target: Target, output: OutputFormat) -> Result<()> {
  let graph = DependencyResolver::new(&project.registry).discover(&target);

  if output.is_json() {
    let nodes: Vec<GraphNode<'_>> = graph
      .targets()
      .map(|t| GraphNode {
        target: t,
        produced: project.registry.produces(t),
        dependencies: graph.dependencies(t).into_iter().flatten().collect(),
      })
      .collect();
    return print_json(&nodes);
  }

  print!("{}", format_graph(&graph));
  Ok(())
}
