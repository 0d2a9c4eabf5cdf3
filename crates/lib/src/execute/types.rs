//! Types for plan execution.
//!
//! This module defines the error type, summary and configuration for running
//! a resolved plan.

use thiserror::Error;

use crate::action::ActionError;
use crate::target::Target;

/// Errors that can occur while executing a plan.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// A step's action failed. Steps after it were not run.
  #[error("step for {target} failed after {completed} completed step(s): {source}")]
  StepFailed {
    target: Target,
    completed: usize,
    #[source]
    source: ActionError,
  },
}

impl ExecuteError {
  /// The target whose step failed.
  pub fn target(&self) -> &Target {
    match self {
      ExecuteError::StepFailed { target, .. } => target,
    }
  }
}

/// Outcome of a successful plan execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteSummary {
  /// Targets whose steps ran, in execution order.
  pub completed: Vec<Target>,
}

impl ExecuteSummary {
  pub fn len(&self) -> usize {
    self.completed.len()
  }

  pub fn is_empty(&self) -> bool {
    self.completed.is_empty()
  }
}

/// Configuration for plan execution.
#[derive(Debug, Clone, Default)]
pub struct ExecuteConfig {
  /// Shell to use for command actions.
  /// If None, uses /bin/sh (Unix) or powershell.exe (Windows).
  pub shell: Option<String>,

  /// Report every action to the observer without running anything.
  pub dry_run: bool,
}
