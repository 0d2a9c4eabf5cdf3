//! Types for dependency resolution.
//!
//! This module defines the resolved plan, its steps, resolver options and the
//! errors a solve can fail with.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::Action;
use crate::target::Target;

/// Errors that can occur while resolving a plan.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// The discovered graph is not a DAG.
  ///
  /// `target` is where the sort detected the cycle; `members` is every target
  /// in the same strongly connected component, in discovery order.
  #[error("dependency cycle detected at {target} (cycle members: {})", join_targets(.members))]
  Cycle { target: Target, members: Vec<Target> },

  /// A leaf prerequisite that no recipe produces and that does not exist.
  ///
  /// Only reported when [`ResolveOptions::check_leaves`] is enabled.
  #[error("no recipe produces {target} and it does not exist (required by {})", join_targets(.required_by))]
  UnresolvedLeaf { target: Target, required_by: Vec<Target> },
}

fn join_targets(targets: &[Target]) -> String {
  targets.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Resolver configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
  /// Fail the solve when a leaf target does not exist.
  ///
  /// Off by default: a missing leaf normally surfaces later, when the step
  /// that reads it fails.
  pub check_leaves: bool,
}

/// One resolved unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
  /// The target this step produces.
  pub target: Target,

  /// The action producing it.
  pub action: Action,

  /// Direct dependencies recorded during discovery. Kept for tracing only;
  /// ordering is already fixed by the step's position in the plan.
  pub dependencies: BTreeSet<Target>,
}

/// An ordered, dependency-respecting list of build steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
  /// The target the plan was solved for.
  pub root: Target,

  /// Steps in execution order.
  pub steps: Vec<BuildStep>,
}

impl Plan {
  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, BuildStep> {
    self.steps.iter()
  }

  /// Targets produced by the plan, in execution order.
  pub fn targets(&self) -> impl Iterator<Item = &Target> {
    self.steps.iter().map(|step| &step.target)
  }

  /// Index of the step producing `target`.
  pub fn position(&self, target: &Target) -> Option<usize> {
    self.steps.iter().position(|step| &step.target == target)
  }
}

impl<'a> IntoIterator for &'a Plan {
  type Item = &'a BuildStep;
  type IntoIter = std::slice::Iter<'a, BuildStep>;

  fn into_iter(self) -> Self::IntoIter {
    self.steps.iter()
  }
}
