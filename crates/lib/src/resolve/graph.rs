//! Dependency graph discovery and ordering.
//!
//! The graph is discovered on demand from a single root: the registry is asked
//! for each target's prerequisites, and any prerequisite not seen before is
//! queued for expansion. The worklist is FIFO, so node order (and therefore
//! every tie-break in the topological sort) is stable across runs.

use std::collections::{BTreeSet, HashMap, VecDeque};

use petgraph::Direction;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::trace;

use crate::recipe::RecipeRegistry;
use crate::target::Target;

use super::types::ResolveError;

/// Targets reachable from a root, with edges from each dependency to its dependent.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
  /// The underlying graph. An edge `d -> t` means `d` must finish before `t`.
  graph: DiGraph<Target, ()>,

  /// Map from target to node index.
  nodes: HashMap<Target, NodeIndex>,

  /// Recorded direct dependencies of every expanded target.
  dependencies: HashMap<Target, BTreeSet<Target>>,
}

impl DependencyGraph {
  /// Discover every target reachable from `root` through `registry`.
  ///
  /// Targets no recipe matches are recorded with an empty dependency set.
  /// Discovery terminates only if the set of reachable targets is finite.
  pub fn discover(root: &Target, registry: &RecipeRegistry) -> Self {
    let mut dag = Self::default();
    let mut frontier = VecDeque::new();

    dag.insert_node(root);
    frontier.push_back(root.clone());

    while let Some(target) = frontier.pop_front() {
      let deps = registry.dependencies_of(&target);
      let dependent_idx = dag.nodes[&target];

      trace!(target = %target, deps = deps.len(), "expanding target");

      for dep in &deps {
        let (dep_idx, is_new) = dag.insert_node(dep);
        if is_new {
          frontier.push_back(dep.clone());
        }
        // Edge from dependency to dependent
        dag.graph.add_edge(dep_idx, dependent_idx, ());
      }

      dag.dependencies.insert(target, deps);
    }

    dag
  }

  /// Add a node for `target` unless it already has one.
  fn insert_node(&mut self, target: &Target) -> (NodeIndex, bool) {
    if let Some(&idx) = self.nodes.get(target) {
      return (idx, false);
    }
    let idx = self.graph.add_node(target.clone());
    self.nodes.insert(target.clone(), idx);
    (idx, true)
  }

  /// Number of discovered targets.
  pub fn len(&self) -> usize {
    self.graph.node_count()
  }

  pub fn is_empty(&self) -> bool {
    self.graph.node_count() == 0
  }

  pub fn contains(&self, target: &Target) -> bool {
    self.nodes.contains_key(target)
  }

  /// All targets in first-seen order.
  pub fn targets(&self) -> impl Iterator<Item = &Target> {
    self.graph.node_indices().map(|idx| &self.graph[idx])
  }

  /// Recorded direct dependencies of `target`.
  pub fn dependencies(&self, target: &Target) -> Option<&BTreeSet<Target>> {
    self.dependencies.get(target)
  }

  /// Targets that directly depend on `target`, in first-seen order.
  pub fn dependents(&self, target: &Target) -> Vec<&Target> {
    let Some(&idx) = self.nodes.get(target) else {
      return Vec::new();
    };

    let mut dependents: Vec<NodeIndex> = self.graph.neighbors_directed(idx, Direction::Outgoing).collect();
    dependents.sort();
    dependents.into_iter().map(|idx| &self.graph[idx]).collect()
  }

  /// Targets ordered so that every dependency precedes its dependents.
  ///
  /// # Errors
  ///
  /// Returns [`ResolveError::Cycle`] if the graph is not a DAG. A target that
  /// depends on itself is a cycle.
  pub fn topological_order(&self) -> Result<Vec<&Target>, ResolveError> {
    let sorted = toposort(&self.graph, None).map_err(|cycle| self.cycle_error(cycle.node_id()))?;
    Ok(sorted.into_iter().map(|idx| &self.graph[idx]).collect())
  }

  /// Describe the strongly connected component containing `node`.
  fn cycle_error(&self, node: NodeIndex) -> ResolveError {
    let mut members = tarjan_scc(&self.graph)
      .into_iter()
      .find(|component| component.contains(&node))
      .unwrap_or_else(|| vec![node]);
    members.sort();

    ResolveError::Cycle {
      target: self.graph[node].clone(),
      members: members.into_iter().map(|idx| self.graph[idx].clone()).collect(),
    }
  }
}
