//! Command action implementation.
//!
//! Runs a command string through the platform shell and turns its exit status
//! into a `Result`. The command inherits the caller's environment, working
//! directory and stdio, the same way a classic `make` recipe line does.

use std::process::Command;

use tracing::{debug, info, warn};

use crate::action::{ActionError, CommandRunner};

/// Runs commands through a system shell.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
  /// Shell override. `None` uses `/bin/sh` (Unix) or `powershell.exe` (Windows).
  shell: Option<String>,
}

impl ShellRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_shell(shell: Option<String>) -> Self {
    Self { shell }
  }
}

impl CommandRunner for ShellRunner {
  fn run(&self, cmd: &str) -> Result<(), ActionError> {
    info!(cmd = %cmd, "executing command");

    let (shell_cmd, shell_args) = get_shell(self.shell.as_deref());

    debug!(shell = %shell_cmd, "spawning process");

    let status = Command::new(&shell_cmd)
      .args(&shell_args)
      .arg(cmd)
      .status()
      .map_err(|source| ActionError::Spawn {
        cmd: cmd.to_string(),
        shell: shell_cmd.clone(),
        source,
      })?;

    if !status.success() {
      warn!(cmd = %cmd, code = ?status.code(), "command failed");
      return Err(ActionError::CommandFailed {
        cmd: cmd.to_string(),
        code: status.code(),
      });
    }

    Ok(())
  }
}

/// Get the shell command and arguments for the current platform.
///
/// Returns `(shell_command, shell_args)` where the command string is appended
/// after `shell_args`.
fn get_shell(override_shell: Option<&str>) -> (String, Vec<String>) {
  if let Some(shell) = override_shell {
    let args = if shell.contains("powershell") || shell.contains("pwsh") {
      vec!["-NoProfile".to_string(), "-Command".to_string()]
    } else if shell.contains("cmd") {
      vec!["/C".to_string()]
    } else {
      // Assume Unix-style shell (bash, sh, zsh, etc.)
      vec!["-c".to_string()]
    };
    return (shell.to_string(), args);
  }

  #[cfg(unix)]
  {
    ("/bin/sh".to_string(), vec!["-c".to_string()])
  }

  #[cfg(windows)]
  {
    (
      "powershell.exe".to_string(),
      vec![
        "-NoProfile".to_string(),
        "-ExecutionPolicy".to_string(),
        "Bypass".to_string(),
        "-Command".to_string(),
      ],
    )
  }
}
