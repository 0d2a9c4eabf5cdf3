//! Actions and their execution.
//!
//! Actions are the primitive effects a recipe attaches to a target: running an
//! external command, creating output directories, or a sequence of either.
//! Running an action always yields a `Result`; a failing command is never
//! treated as success.
//!
//! Process spawning sits behind the [`CommandRunner`] trait so the core only
//! depends on "run this command and tell me whether it worked". The default
//! implementation is [`ShellRunner`].

pub mod actions;
mod types;

pub use types::*;

pub use actions::cmd::ShellRunner;

use tracing::debug;

use crate::observer::BuildObserver;

/// Capability to run a single external command and report its outcome.
pub trait CommandRunner {
  fn run(&self, cmd: &str) -> Result<(), ActionError>;
}

impl Action {
  /// Perform the effect.
  ///
  /// The observer sees every leaf action immediately before it runs. Lists
  /// stop at the first failing member and return its error.
  pub fn run(&self, runner: &dyn CommandRunner, observer: &dyn BuildObserver) -> Result<(), ActionError> {
    match self {
      Action::Command(cmd) => {
        observer.on_action(self);
        runner.run(cmd)
      }

      Action::EnsurePath(path) => {
        observer.on_action(self);
        actions::ensure_path::ensure_parent(path)
      }

      Action::List(actions) => {
        for (index, action) in actions.iter().enumerate() {
          if let Err(e) = action.run(runner, observer) {
            debug!(index, total = actions.len(), "action list stopped at failing member");
            return Err(e);
          }
        }
        Ok(())
      }
    }
  }
}
