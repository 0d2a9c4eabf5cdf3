use std::cell::RefCell;

use kiln_lib::{Action, ActionError, CommandRunner, FnRecipe, RecipeRegistry, Target};

/// Records commands instead of running them; fails on one chosen command.
#[derive(Default)]
pub struct FakeRunner {
  commands: RefCell<Vec<String>>,
  fail_on: Option<String>,
}

impl FakeRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn failing_on(cmd: &str) -> Self {
    Self {
      commands: RefCell::default(),
      fail_on: Some(cmd.to_string()),
    }
  }

  pub fn commands(&self) -> Vec<String> {
    self.commands.borrow().clone()
  }
}

impl CommandRunner for FakeRunner {
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

/// A phony rule `target: deps` whose action is `make <target>`.
pub fn phony(target: &str, deps: &[&str]) -> FnRecipe {
  FnRecipe::exact(
    Target::name(target),
    deps.iter().map(|dep| Target::name(*dep)).collect::<Vec<_>>(),
    Action::command(format!("make {}", target)),
  )
}

pub fn phony_registry(rules: &[(&str, &[&str])]) -> RecipeRegistry {
  let mut registry = RecipeRegistry::new();
  for (target, deps) in rules {
    registry.push(phony(target, deps));
  }
  registry
}
