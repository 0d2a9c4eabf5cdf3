//! Terminal observer for builds.
//!
//! Prints each action as it starts and, in verbose mode, the discovered
//! dependency graph before anything runs.

use owo_colors::{OwoColorize, Stream};

use kiln_lib::{Action, BuildObserver, DependencyGraph};

use crate::output::{print_header, symbols};

pub struct ConsoleObserver {
  show_graph: bool,
}

impl ConsoleObserver {
  pub fn new(show_graph: bool) -> Self {
    Self { show_graph }
  }
}

impl BuildObserver for ConsoleObserver {
  fn on_graph(&self, graph: &DependencyGraph) {
    if !self.show_graph {
      return;
    }
    print_header("DEPENDENCY GRAPH");
    print!("{}", format_graph(graph));
    print_header("COMMANDS");
  }

  fn on_action(&self, action: &Action) {
    println!(
      "{} {}",
      symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
      action
    );
  }
}

/// Render a graph as `target:` lines followed by indented dependencies.
pub fn format_graph(graph: &DependencyGraph) -> String {
  let mut out = String::new();
  for target in graph.targets() {
    out.push_str(&format!("{}:\n", target));
    for dep in graph.dependencies(target).into_iter().flatten() {
      out.push_str(&format!("    {}\n", dep));
    }
  }
  out
}
