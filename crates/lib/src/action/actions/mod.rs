//! Concrete action implementations.
//!
//! - [`cmd`] - Shell command execution ([`ShellRunner`](cmd::ShellRunner))
//! - [`ensure_path`] - Output directory creation

pub mod cmd;
pub mod ensure_path;
