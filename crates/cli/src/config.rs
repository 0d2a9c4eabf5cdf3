//! Project configuration from command-line flags and environment.
//!
//! Every flag can also be set through an environment variable; the compiler
//! flags honour the conventional `CC`, `CFLAGS` and `LDFLAGS`.

use std::path::PathBuf;

use clap::Args;

use kiln_lib::recipe::c::{CProjectConfig, c_project_registry};
use kiln_lib::{Action, ExecuteConfig, FnRecipe, RecipeRegistry, ResolveOptions, Target};

/// Name of the phony target that stands for the whole project.
pub const ALL_TARGET: &str = "all";

#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
  /// Directory holding the C sources
  #[arg(long, global = true, env = "KILN_SRC_DIR", default_value = "./src")]
  pub src_dir: PathBuf,

  /// Directory receiving objects and the program
  #[arg(long, global = true, env = "KILN_BUILD_DIR", default_value = "./build")]
  pub build_dir: PathBuf,

  /// File name of the linked program
  #[arg(long, global = true, env = "KILN_PROGRAM", default_value = "out")]
  pub program: String,

  /// C compiler
  #[arg(long, global = true, env = "CC", default_value = "gcc")]
  pub cc: String,

  /// Flags for compiling and linking
  #[arg(long, global = true, env = "CFLAGS", default_value = "-g -O2 -Werror", allow_hyphen_values = true)]
  pub cflags: String,

  /// Flags for linking only
  #[arg(long, global = true, env = "LDFLAGS", default_value = "-lm", allow_hyphen_values = true)]
  pub ldflags: String,

  /// Shell used to run commands (default: /bin/sh, or powershell.exe on Windows)
  #[arg(long, global = true, env = "KILN_SHELL")]
  pub shell: Option<String>,

  /// Fail before running anything if a source file is missing
  #[arg(long, global = true)]
  pub check_leaves: bool,
}

/// Target selection shared by the subcommands.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
  /// Target to build (default: the program)
  pub target: Option<String>,

  /// Treat TARGET as a phony name instead of a path
  #[arg(long)]
  pub name: bool,
}

/// Everything a command needs to resolve and run a build.
pub struct Project {
  pub config: CProjectConfig,
  pub registry: RecipeRegistry,
  pub resolve: ResolveOptions,
  pub execute: ExecuteConfig,
}

impl Project {
  pub fn from_args(args: &ProjectArgs) -> Self {
    let config = CProjectConfig {
      cc: args.cc.clone(),
      cflags: args.cflags.clone(),
      ldflags: args.ldflags.clone(),
      src_dir: args.src_dir.clone(),
      build_dir: args.build_dir.clone(),
      program: args.program.clone(),
    };

    let registry = c_project_registry(&config).with(FnRecipe::exact(
      Target::name(ALL_TARGET),
      [config.main_target()],
      Action::list([]),
    ));

    Self {
      registry,
      resolve: ResolveOptions {
        check_leaves: args.check_leaves,
      },
      execute: ExecuteConfig {
        shell: args.shell.clone(),
        dry_run: false,
      },
      config,
    }
  }

  /// The target selected on the command line, or the program.
  pub fn target(&self, args: &TargetArgs) -> Target {
    match (&args.target, args.name) {
      (Some(name), true) => Target::name(name),
      (Some(path), false) => Target::path(path),
      (None, _) => self.config.main_target(),
    }
  }
}
