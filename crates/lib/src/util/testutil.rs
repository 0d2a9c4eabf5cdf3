//! Test utilities for kiln-lib.
//!
//! Recording stand-ins for the command runner and observer, plus
//! cross-platform shell snippets for tests that spawn real commands.

use std::cell::RefCell;
use std::path::Path;

use crate::action::{Action, ActionError, CommandRunner};
use crate::observer::BuildObserver;
use crate::resolve::DependencyGraph;
use crate::target::Target;

/// Records every command instead of running it. Optionally fails on one command.
#[derive(Default)]
pub struct RecordingRunner {
  commands: RefCell<Vec<String>>,
  fail_on: Option<String>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Report `CommandFailed` (exit code 1) when `cmd` is run.
  pub fn failing_on(mut self, cmd: &str) -> Self {
    self.fail_on = Some(cmd.to_string());
    self
  }

  pub fn commands(&self) -> Vec<String> {
    self.commands.borrow().clone()
  }
}

impl CommandRunner for RecordingRunner {
  fn run(&self, cmd: &str) -> Result<(), ActionError> {
    self.commands.borrow_mut().push(cmd.to_string());

    if self.fail_on.as_deref() == Some(cmd) {
      return Err(ActionError::CommandFailed {
        cmd: cmd.to_string(),
        code: Some(1),
      });
    }
    Ok(())
  }
}

/// Records the graphs and actions it is shown.
#[derive(Default)]
pub struct RecordingObserver {
  graphs: RefCell<Vec<Vec<Target>>>,
  actions: RefCell<Vec<Action>>,
}

impl RecordingObserver {
  pub fn new() -> Self {
    Self::default()
  }

  /// Targets of each observed graph, in discovery order.
  pub fn graphs(&self) -> Vec<Vec<Target>> {
    self.graphs.borrow().clone()
  }

  pub fn actions(&self) -> Vec<Action> {
    self.actions.borrow().clone()
  }
}

impl BuildObserver for RecordingObserver {
  fn on_graph(&self, graph: &DependencyGraph) {
    self.graphs.borrow_mut().push(graph.targets().cloned().collect());
  }

  fn on_action(&self, action: &Action) {
    self.actions.borrow_mut().push(action.clone());
  }
}

/// Returns a shell command that creates an empty file at `path`.
#[cfg(unix)]
pub fn touch_cmd(path: &Path) -> String {
  format!("touch '{}'", path.display())
}

#[cfg(windows)]
pub fn touch_cmd(path: &Path) -> String {
  format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", path.display())
}
