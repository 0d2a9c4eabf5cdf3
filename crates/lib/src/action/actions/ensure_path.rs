//! EnsurePath action implementation.

use std::path::Path;

use tracing::debug;

use crate::action::ActionError;
use crate::action::types::parent_or_self;

/// Create every missing directory above `path`. Existing directories are fine.
pub fn ensure_parent(path: &Path) -> Result<(), ActionError> {
  let dir = parent_or_self(path);

  debug!(dir = %dir.display(), "ensuring output directory");

  std::fs::create_dir_all(dir).map_err(|source| ActionError::Io {
    path: dir.to_path_buf(),
    source,
  })
}
