//! Build observers.
//!
//! An observer is handed to the resolver and the executor explicitly. It gets
//! the discovered dependency graph once, before anything runs, and each leaf
//! action right before it runs. Observers are for diagnostics only and cannot
//! influence the build.

use tracing::{debug, info};

use crate::action::Action;
use crate::resolve::DependencyGraph;

pub trait BuildObserver {
  /// Called once with the fully discovered graph, before execution begins.
  fn on_graph(&self, _graph: &DependencyGraph) {}

  /// Called immediately before a command or directory action runs.
  fn on_action(&self, _action: &Action) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl BuildObserver for NullObserver {}

/// Observer that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl BuildObserver for LogObserver {
  fn on_graph(&self, graph: &DependencyGraph) {
    debug!(targets = graph.len(), "dependency graph discovered");
    for target in graph.targets() {
      let deps: Vec<String> = graph
        .dependencies(target)
        .map(|deps| deps.iter().map(ToString::to_string).collect())
        .unwrap_or_default();
      debug!(target = %target, deps = ?deps, "graph node");
    }
  }

  fn on_action(&self, action: &Action) {
    info!(action = %action, "running");
  }
}
