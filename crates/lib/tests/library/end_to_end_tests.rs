use std::fs;

use tempfile::TempDir;

use kiln_lib::execute::ExecuteError;
use kiln_lib::recipe::c::{CProjectConfig, c_project_registry};
use kiln_lib::{
  Action, ActionError, DependencyResolver, Executor, FnRecipe, RecipeRegistry, ResolveError, Target,
  resolve::solve_plan,
};

use super::common::{FakeRunner, phony_registry};

fn compile_rule() -> FnRecipe {
  FnRecipe::new(
    "compile",
    |target| {
      target
        .as_path()
        .is_some_and(|path| path.extension().is_some_and(|ext| ext == "o"))
    },
    |target| target.as_path().map(|path| Target::path(path.with_extension("c"))),
    |target| {
      let object = target.as_path().map(|p| p.display().to_string()).unwrap_or_default();
      let source = object.replace(".o", ".c");
      Action::command(format!("cc -c {} -o {}", source, object))
    },
  )
}

fn link_rule() -> FnRecipe {
  FnRecipe::exact(
    Target::path("program"),
    [Target::path("main.o")],
    Action::command("cc main.o -o program"),
  )
}

#[test]
fn compile_and_link_program() {
  let registry = RecipeRegistry::new().with(compile_rule()).with(link_rule());

  let plan = solve_plan(Target::path("program"), &registry).unwrap();

  assert_eq!(plan.len(), 2);
  assert_eq!(plan.steps[0].target, Target::path("main.o"));
  assert_eq!(plan.steps[0].action, Action::command("cc -c main.c -o main.o"));
  assert_eq!(plan.steps[1].target, Target::path("program"));
  assert_eq!(plan.steps[1].action, Action::command("cc main.o -o program"));
  assert_eq!(plan.position(&Target::path("main.c")), None);

  let runner = FakeRunner::new();
  Executor::new(&runner).execute(&plan).unwrap();
  assert_eq!(runner.commands(), vec!["cc -c main.c -o main.o", "cc main.o -o program"]);
}

#[test]
fn shared_dependency_is_built_once() {
  let registry = phony_registry(&[
    ("all", &["app", "tests"]),
    ("app", &["core"]),
    ("tests", &["core"]),
    ("core", &[]),
  ]);

  let plan = solve_plan(Target::name("all"), &registry).unwrap();

  let targets: Vec<_> = plan.targets().cloned().collect();
  assert_eq!(targets.len(), 4);
  assert_eq!(targets.first(), Some(&Target::name("core")));
  assert_eq!(targets.last(), Some(&Target::name("all")));
}

#[test]
fn leaves_never_become_steps() {
  let registry = phony_registry(&[("all", &["generated", "vendored"]), ("generated", &["vendored"])]);

  let plan = solve_plan(Target::name("all"), &registry).unwrap();

  assert_eq!(
    plan.targets().cloned().collect::<Vec<_>>(),
    vec![Target::name("generated"), Target::name("all")]
  );
}

#[test]
fn mutual_dependency_fails_solve() {
  let registry = phony_registry(&[("a", &["b"]), ("b", &["a"])]);

  let err = solve_plan(Target::name("a"), &registry).unwrap_err();

  assert!(matches!(err, ResolveError::Cycle { ref members, .. } if members.len() == 2));
  assert!(err.to_string().contains("name:a"));
}

#[test]
fn earlier_recipe_wins() {
  let registry = RecipeRegistry::new()
    .with(FnRecipe::exact(Target::name("x"), [], Action::command("first")))
    .with(FnRecipe::exact(
      Target::name("x"),
      [Target::name("never")],
      Action::command("second"),
    ));

  let plan = solve_plan(Target::name("x"), &registry).unwrap();

  assert_eq!(plan.len(), 1);
  assert_eq!(plan.steps[0].action, Action::command("first"));
  assert!(plan.steps[0].dependencies.is_empty());
}

#[test]
fn third_step_never_runs_after_failure() {
  let registry = phony_registry(&[("three", &["two"]), ("two", &["one"]), ("one", &[])]);
  let plan = solve_plan(Target::name("three"), &registry).unwrap();
  let runner = FakeRunner::failing_on("make two");

  let err = Executor::new(&runner).execute(&plan).unwrap_err();

  assert_eq!(runner.commands(), vec!["make one", "make two"]);
  let ExecuteError::StepFailed { target, completed, source } = err;
  assert_eq!(target, Target::name("two"));
  assert_eq!(completed, 1);
  assert!(matches!(source, ActionError::CommandFailed { code: Some(1), .. }));
}

#[test]
fn c_project_plan() {
  let temp_dir = TempDir::new().unwrap();
  let src = temp_dir.path().join("src");
  fs::create_dir_all(src.join("lib")).unwrap();
  fs::write(src.join("main.c"), "").unwrap();
  fs::write(src.join("lib/util.c"), "").unwrap();

  let config = CProjectConfig {
    cc: "cc".to_string(),
    cflags: String::new(),
    ldflags: String::new(),
    src_dir: src.clone(),
    build_dir: temp_dir.path().join("build"),
    program: "app".to_string(),
  };
  let registry = c_project_registry(&config);

  let plan = DependencyResolver::new(&registry).solve(config.main_target()).unwrap();

  let build = temp_dir.path().join("build");
  assert_eq!(plan.len(), 3);
  assert_eq!(plan.steps[2].target, Target::path(build.join("app")));
  for object in [build.join("main.o"), build.join("lib/util.o")] {
    let index = plan.position(&Target::path(&object)).unwrap();
    assert!(index < 2);
  }
  assert_eq!(plan.position(&Target::path(src.join("main.c"))), None);

  let runner = FakeRunner::new();
  Executor::new(&runner).execute(&plan).unwrap();

  // Output directories are created by the EnsurePath actions, not the runner.
  assert!(build.join("lib").is_dir());
  let commands = runner.commands();
  assert_eq!(commands.len(), 3);
  assert!(commands[2].starts_with("cc "));
  assert!(commands[2].ends_with(&format!("-o {}", build.join("app").display())));
}
