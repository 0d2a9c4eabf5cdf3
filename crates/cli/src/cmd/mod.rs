mod build;
mod graph;
mod plan;

pub use build::cmd_build;
pub use graph::cmd_graph;
pub use plan::cmd_plan;
