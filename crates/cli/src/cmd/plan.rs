//! Implementation of the `kiln plan` command.
//!
//! Prints the ordered build steps for a target without running them.

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use kiln_lib::{DependencyResolver, Plan, Target};

use crate::config::Project;
use crate::output::{OutputFormat, print_info, print_json};

pub fn cmd_plan(project: &Project, target: Target, output: OutputFormat) -> Result<()> {
  let plan = DependencyResolver::new(&project.registry)
    .with_options(project.resolve)
    .solve(target.clone())
    .with_context(|| format!("Failed to resolve {}", target))?;

  if output.is_json() {
    return print_json(&plan);
  }

  if plan.is_empty() {
    print_info(&format!("Nothing to build for {}", target));
    return Ok(());
  }

  print!("{}", format_plan(&plan));
  Ok(())
}

fn format_plan(plan: &Plan) -> String {
  let mut out = String::new();
  for (index, step) in plan.iter().enumerate() {
    out.push_str(&format!("{:>3}. {}\n", index + 1, step.target));
    for action in step.action.leaves() {
      let line = action.to_string();
      out.push_str(&format!(
        "       {}\n",
        line.if_supports_color(Stream::Stdout, |s| s.dimmed())
      ));
    }
  }
  out
}
