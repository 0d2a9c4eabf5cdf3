//! Implementation of the `kiln build` command.
//!
//! Resolves the selected target into a plan and runs it step by step,
//! stopping at the first failing step.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use kiln_lib::execute::{ExecuteConfig, execute_plan};
use kiln_lib::{DependencyResolver, Target};

use crate::config::Project;
use crate::observer::ConsoleObserver;
use crate::output::{format_duration, print_error, print_info, print_stat, print_success};

pub fn cmd_build(project: &Project, target: Target, dry_run: bool, verbose: bool) -> Result<()> {
  let start = Instant::now();
  let observer = ConsoleObserver::new(verbose);

  let plan = DependencyResolver::new(&project.registry)
    .with_observer(&observer)
    .with_options(project.resolve)
    .solve(target.clone())
    .with_context(|| format!("Failed to resolve {}", target))?;

  if plan.is_empty() {
    print_info(&format!("Nothing to build for {}", target));
    return Ok(());
  }

  debug!(target = %target, steps = plan.len(), dry_run, "running build plan");

  let config = ExecuteConfig {
    dry_run,
    ..project.execute.clone()
  };

  let summary = match execute_plan(&plan, &config, &observer) {
    Ok(summary) => summary,
    Err(e) => {
      print_error(&format!("Build failed at {}", e.target()));
      return Err(e).context("Build failed");
    }
  };

  println!();
  if dry_run {
    print_info("Dry run - no commands executed");
  } else {
    print_success(&format!("Built {}", target));
  }
  print_stat("Steps", &summary.len().to_string());
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
