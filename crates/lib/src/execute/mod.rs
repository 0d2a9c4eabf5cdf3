//! Plan execution.
//!
//! Steps run one at a time, in plan order. The first failing step aborts the
//! run: its target and the underlying failure are returned, and no later step
//! is started. Independent steps are not run concurrently.

pub mod types;

use tracing::{debug, error, info};

use crate::action::{CommandRunner, ShellRunner};
use crate::observer::{BuildObserver, NullObserver};
use crate::resolve::Plan;

pub use types::{ExecuteConfig, ExecuteError, ExecuteSummary};

/// Runs the steps of a [`Plan`].
pub struct Executor<'a> {
  runner: &'a dyn CommandRunner,
  observer: &'a dyn BuildObserver,
  dry_run: bool,
}

impl<'a> Executor<'a> {
  pub fn new(runner: &'a dyn CommandRunner) -> Self {
    Self {
      runner,
      observer: &NullObserver,
      dry_run: false,
    }
  }

  pub fn with_observer(mut self, observer: &'a dyn BuildObserver) -> Self {
    self.observer = observer;
    self
  }

  pub fn dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  /// Execute every step of `plan` in order, stopping at the first failure.
  pub fn execute(&self, plan: &Plan) -> Result<ExecuteSummary, ExecuteError> {
    info!(root = %plan.root, steps = plan.len(), dry_run = self.dry_run, "starting plan execution");

    let mut summary = ExecuteSummary::default();

    for (index, step) in plan.iter().enumerate() {
      debug!(step = index, target = %step.target, "executing step");

      if self.dry_run {
        for action in step.action.leaves() {
          self.observer.on_action(action);
        }
      } else if let Err(source) = step.action.run(self.runner, self.observer) {
        error!(target = %step.target, error = %source, "step failed");
        return Err(ExecuteError::StepFailed {
          target: step.target.clone(),
          completed: summary.completed.len(),
          source,
        });
      }

      summary.completed.push(step.target.clone());
    }

    info!(completed = summary.len(), "plan execution complete");

    Ok(summary)
  }
}

/// Execute `plan` through the system shell described by `config`.
pub fn execute_plan(
  plan: &Plan,
  config: &ExecuteConfig,
  observer: &dyn BuildObserver,
) -> Result<ExecuteSummary, ExecuteError> {
  let runner = ShellRunner::with_shell(config.shell.clone());
  Executor::new(&runner)
    .with_observer(observer)
    .dry_run(config.dry_run)
    .execute(plan)
}
