//! kiln-lib: dependency resolution and scheduling core for kiln
//!
//! This crate provides the pieces of a minimal `make`-style build engine:
//! - `Target`: identity of a file or phony milestone
//! - `Action`: an executable effect that reports success or failure
//! - `Recipe` / `RecipeRegistry`: rules mapping targets to prerequisites and actions
//! - `DependencyResolver`: on-demand graph discovery and topological planning
//! - `Executor`: sequential, fail-fast plan execution
//! - `BuildObserver`: optional diagnostics hook
//!
//! ```no_run
//! use kiln_lib::execute::{ExecuteConfig, execute_plan};
//! use kiln_lib::observer::LogObserver;
//! use kiln_lib::recipe::c::{CProjectConfig, c_project_registry};
//! use kiln_lib::resolve::DependencyResolver;
//!
//! let config = CProjectConfig::default();
//! let registry = c_project_registry(&config);
//! let plan = DependencyResolver::new(&registry).solve(config.main_target())?;
//! execute_plan(&plan, &ExecuteConfig::default(), &LogObserver)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod action;
pub mod execute;
pub mod observer;
pub mod recipe;
pub mod resolve;
pub mod target;

#[cfg(test)]
mod util;

pub use action::{Action, ActionError, CommandRunner, ShellRunner};
pub use execute::{ExecuteConfig, ExecuteError, ExecuteSummary, Executor};
pub use observer::{BuildObserver, LogObserver, NullObserver};
pub use recipe::{FnRecipe, Recipe, RecipeRegistry};
pub use resolve::{BuildStep, DependencyGraph, DependencyResolver, Plan, ResolveError, ResolveOptions};
pub use target::Target;
