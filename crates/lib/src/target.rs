//! Build targets.
//!
//! A [`Target`] is the identity of something the build can produce or assume
//! already exists. Targets are plain values: equality, hashing and ordering are
//! all derived from the variant plus its payload, so they always agree and a
//! target can be used as a graph node or set member directly.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Identity of a buildable (or pre-existing) thing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
  /// A file on disk, identified by its (lexically normalized) path.
  Path(PathBuf),
  /// A phony milestone identified by an opaque name.
  Name(String),
}

impl Target {
  /// Create a path target.
  ///
  /// The path is normalized lexically so that `./build/main.o` and
  /// `build/main.o` name the same target. Nothing is resolved against the
  /// filesystem.
  pub fn path(path: impl AsRef<Path>) -> Self {
    Target::Path(normalize(path.as_ref()))
  }

  /// Create a phony (name) target.
  pub fn name(name: impl Into<String>) -> Self {
    Target::Name(name.into())
  }

  /// The filesystem path of a path target.
  pub fn as_path(&self) -> Option<&Path> {
    match self {
      Target::Path(path) => Some(path),
      Target::Name(_) => None,
    }
  }

  /// Probe whether the artifact is already present.
  ///
  /// Path targets check the filesystem. Name targets are always present: once
  /// the step producing them (if any) has run, they are satisfied by definition.
  ///
  /// The resolver does not consult this to skip work; every reachable target
  /// with a recipe is scheduled regardless of freshness. It is only used for
  /// the opt-in leaf check in [`ResolveOptions`](crate::resolve::ResolveOptions).
  pub fn exists(&self) -> bool {
    match self {
      Target::Path(path) => path.exists(),
      Target::Name(_) => true,
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Target::Path(path) => write!(f, "path:{}", path.display()),
      Target::Name(name) => write!(f, "name:{}", name),
    }
  }
}

/// Drop `.` components; `..` is kept since it cannot be folded without the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
  let normalized: PathBuf = path
    .components()
    .filter(|component| !matches!(component, Component::CurDir))
    .collect();

  if normalized.as_os_str().is_empty() {
    PathBuf::from(".")
  } else {
    normalized
  }
}
