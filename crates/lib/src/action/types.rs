use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An executable effect produced by a recipe for one target.
///
/// Actions are plain data until they are run, so a whole plan can be built,
/// inspected and serialized before anything touches the filesystem.
///
/// # Variants
///
/// - [`Command`](Action::Command): run one external command through the shell
/// - [`List`](Action::List): run a sequence of actions, stopping at the first failure
/// - [`EnsurePath`](Action::EnsurePath): create the parent directories of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
  /// A single command string, handed to a [`CommandRunner`](super::CommandRunner).
  Command(String),
  /// Sub-actions executed strictly in order.
  List(Vec<Action>),
  /// Create the parent directory hierarchy of this path before it is written.
  EnsurePath(PathBuf),
}

impl Action {
  pub fn command(cmd: impl Into<String>) -> Self {
    Action::Command(cmd.into())
  }

  pub fn ensure_path(path: impl AsRef<Path>) -> Self {
    Action::EnsurePath(path.as_ref().to_path_buf())
  }

  pub fn list(actions: impl IntoIterator<Item = Action>) -> Self {
    Action::List(actions.into_iter().collect())
  }

  /// Iterate over the leaf actions (everything except `List`) in execution order.
  pub fn leaves(&self) -> Vec<&Action> {
    let mut leaves = Vec::new();
    collect_leaves(self, &mut leaves);
    leaves
  }
}

impl std::fmt::Display for Action {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Action::Command(cmd) => write!(f, "{}", cmd),
      Action::EnsurePath(path) => write!(f, "mkdir -p {}", parent_or_self(path).display()),
      Action::List(actions) => {
        for (i, action) in actions.iter().enumerate() {
          if i > 0 {
            write!(f, " && ")?;
          }
          write!(f, "{}", action)?;
        }
        Ok(())
      }
    }
  }
}

fn collect_leaves<'a>(action: &'a Action, leaves: &mut Vec<&'a Action>) {
  match action {
    Action::List(actions) => {
      for action in actions {
        collect_leaves(action, leaves);
      }
    }
    leaf => leaves.push(leaf),
  }
}

pub(crate) fn parent_or_self(path: &Path) -> &Path {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  }
}

/// Errors produced while running an action.
#[derive(Debug, Error)]
pub enum ActionError {
  /// The command ran but reported failure.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CommandFailed { cmd: String, code: Option<i32> },

  /// The command could not be started at all.
  #[error("failed to spawn `{shell}` for command: {cmd}")]
  Spawn {
    cmd: String,
    shell: String,
    #[source]
    source: std::io::Error,
  },

  /// Creating an output directory failed.
  #[error("failed to create directory {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
