//! Dependency resolution.
//!
//! Turns one root target plus a [`RecipeRegistry`] into a linear plan:
//! 1. Discover every reachable target ([`DependencyGraph::discover`])
//! 2. Hand the graph to the observer
//! 3. Topologically sort it, failing on cycles
//! 4. Emit a [`BuildStep`] for every sorted target that has a recipe
//!
//! Targets without a recipe are leaves. They never become steps and are
//! assumed to exist; unless [`ResolveOptions::check_leaves`] is set, a missing
//! leaf only shows up when the step reading it fails.
//!
//! Every reachable target with a recipe is scheduled. Existing, up-to-date
//! artifacts are not skipped.

pub mod graph;
pub mod types;

use tracing::{debug, info};

use crate::observer::{BuildObserver, NullObserver};
use crate::recipe::RecipeRegistry;
use crate::target::Target;

pub use graph::DependencyGraph;
pub use types::{BuildStep, Plan, ResolveError, ResolveOptions};

/// Resolves a root target into an ordered [`Plan`].
pub struct DependencyResolver<'a> {
  registry: &'a RecipeRegistry,
  observer: &'a dyn BuildObserver,
  options: ResolveOptions,
}

impl<'a> DependencyResolver<'a> {
  pub fn new(registry: &'a RecipeRegistry) -> Self {
    Self {
      registry,
      observer: &NullObserver,
      options: ResolveOptions::default(),
    }
  }

  pub fn with_observer(mut self, observer: &'a dyn BuildObserver) -> Self {
    self.observer = observer;
    self
  }

  pub fn with_options(mut self, options: ResolveOptions) -> Self {
    self.options = options;
    self
  }

  /// Discover the dependency graph reachable from `root`.
  pub fn discover(&self, root: &Target) -> DependencyGraph {
    let graph = DependencyGraph::discover(root, self.registry);
    info!(root = %root, targets = graph.len(), "discovered dependency graph");
    graph
  }

  /// Resolve `root` into an ordered plan.
  ///
  /// # Errors
  ///
  /// - [`ResolveError::Cycle`] if the reachable graph has a cycle
  /// - [`ResolveError::UnresolvedLeaf`] if leaf checking is enabled and a leaf
  ///   does not exist
  pub fn solve(&self, root: Target) -> Result<Plan, ResolveError> {
    let graph = self.discover(&root);
    self.observer.on_graph(&graph);

    if self.options.check_leaves {
      self.check_leaves(&graph)?;
    }

    let mut steps = Vec::new();
    for target in graph.topological_order()? {
      let Some(recipe) = self.registry.resolve(target) else {
        debug!(target = %target, "leaf target, no step emitted");
        continue;
      };

      steps.push(BuildStep {
        target: target.clone(),
        action: recipe.action_for(target),
        dependencies: graph.dependencies(target).cloned().unwrap_or_default(),
      });
    }

    info!(root = %root, steps = steps.len(), "resolved build plan");

    Ok(Plan { root, steps })
  }

  /// Fail on the first leaf (in discovery order) that does not exist.
  fn check_leaves(&self, graph: &DependencyGraph) -> Result<(), ResolveError> {
    for target in graph.targets() {
      if self.registry.produces(target) || target.exists() {
        continue;
      }

      return Err(ResolveError::UnresolvedLeaf {
        target: target.clone(),
        required_by: graph.dependents(target).into_iter().cloned().collect(),
      });
    }
    Ok(())
  }
}

/// Resolve `root` against `registry` with default options and no observer.
pub fn solve_plan(root: Target, registry: &RecipeRegistry) -> Result<Plan, ResolveError> {
  DependencyResolver::new(registry).solve(root)
}
