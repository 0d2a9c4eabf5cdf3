mod cmd;
mod config;
mod observer;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_build, cmd_graph, cmd_plan};
use config::{Project, ProjectArgs, TargetArgs};
use output::OutputFormat;

/// kiln - A minimal dependency-driven build tool for C projects
#[derive(Parser)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  project: ProjectArgs,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build a target and everything it depends on
  Build {
    #[command(flatten)]
    target: TargetArgs,

    /// Print commands without running them
    #[arg(short = 'n', long)]
    dry_run: bool,
  },

  /// Show the ordered build steps for a target
  Plan {
    #[command(flatten)]
    target: TargetArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Show the dependency graph discovered from a target
  Graph {
    #[command(flatten)]
    target: TargetArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let project = Project::from_args(&cli.project);

  match cli.command {
    Commands::Build { target, dry_run } => cmd_build(&project, project.target(&target), dry_run, cli.verbose),
    Commands::Plan { target, output } => cmd_plan(&project, project.target(&target), output),
    Commands::Graph { target, output } => cmd_graph(&project, project.target(&target), output),
  }
}
