//! Recipes for a conventional C project.
//!
//! Sources live under `src_dir` and are mirrored into `build_dir`:
//! `src/util/math.c` compiles to `build/util/math.o`, and every object found
//! this way is linked into a single program at `build_dir/program`.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::action::Action;
use crate::recipe::{Recipe, RecipeRegistry, assert_produces};
use crate::target::{Target, normalize};

/// Toolchain and layout settings for a C project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CProjectConfig {
  /// C compiler (and linker driver).
  pub cc: String,
  /// Flags passed to both compile and link commands.
  pub cflags: String,
  /// Flags passed only to the link command.
  pub ldflags: String,
  /// Root of the `.c` sources.
  pub src_dir: PathBuf,
  /// Root of the mirrored `.o` files and the program.
  pub build_dir: PathBuf,
  /// File name of the linked program inside `build_dir`.
  pub program: String,
}

impl Default for CProjectConfig {
  fn default() -> Self {
    Self {
      cc: "gcc".to_string(),
      cflags: "-g -O2 -Werror".to_string(),
      ldflags: "-lm".to_string(),
      src_dir: PathBuf::from("./src"),
      build_dir: PathBuf::from("./build"),
      program: "out".to_string(),
    }
  }
}

impl CProjectConfig {
  /// The program target: `build_dir/program`.
  pub fn main_target(&self) -> Target {
    Target::path(self.build_dir.join(&self.program))
  }
}

/// Registry for a C project: the link rule first, then the compile rule.
pub fn c_project_registry(config: &CProjectConfig) -> RecipeRegistry {
  RecipeRegistry::new()
    .with(ProgramRecipe::new(config))
    .with(ObjectRecipe::new(config))
}

/// Compiles `build_dir/**/X.o` from `src_dir/**/X.c`.
#[derive(Debug, Clone)]
pub struct ObjectRecipe {
  cc: String,
  cflags: String,
  src_dir: PathBuf,
  build_dir: PathBuf,
}

impl ObjectRecipe {
  pub fn new(config: &CProjectConfig) -> Self {
    Self {
      cc: config.cc.clone(),
      cflags: config.cflags.clone(),
      src_dir: project_dir(&config.src_dir),
      build_dir: project_dir(&config.build_dir),
    }
  }

  /// The source file an object is compiled from.
  fn source_for(&self, object: &Path) -> Option<PathBuf> {
    let relative = object.strip_prefix(&self.build_dir).ok()?;
    Some(self.src_dir.join(relative).with_extension("c"))
  }
}

impl Recipe for ObjectRecipe {
  fn name(&self) -> &str {
    "c-object"
  }

  /// Any `.o` path below the build directory.
  fn matches(&self, target: &Target) -> bool {
    target
      .as_path()
      .is_some_and(|path| path.extension().is_some_and(|ext| ext == "o") && is_below(path, &self.build_dir))
  }

  fn dependencies_of(&self, target: &Target) -> BTreeSet<Target> {
    assert_produces(self, target);
    target
      .as_path()
      .and_then(|path| self.source_for(path))
      .map(Target::path)
      .into_iter()
      .collect()
  }

  fn action_for(&self, target: &Target) -> Action {
    assert_produces(self, target);
    let Some((object, source)) = target.as_path().and_then(|p| Some((p, self.source_for(p)?))) else {
      unreachable!("matched object targets are paths below the build directory");
    };

    let source = quote_word(&display_absolute(&source));
    let output = quote_word(&display_absolute(object));
    let cmd = join_command([
      self.cc.as_str(),
      self.cflags.as_str(),
      "-c",
      source.as_str(),
      "-o",
      output.as_str(),
    ]);

    Action::list([Action::ensure_path(object), Action::command(cmd)])
  }
}

/// Links every object mirrored from the source tree into one program.
///
/// The source tree is scanned once, the first time the recipe is asked for
/// the program's dependencies or action, and the result is kept for the
/// lifetime of the recipe.
#[derive(Debug)]
pub struct ProgramRecipe {
  cc: String,
  cflags: String,
  ldflags: String,
  src_dir: PathBuf,
  build_dir: PathBuf,
  program: PathBuf,
  objects: OnceCell<BTreeSet<Target>>,
}

impl ProgramRecipe {
  pub fn new(config: &CProjectConfig) -> Self {
    Self {
      cc: config.cc.clone(),
      cflags: config.cflags.clone(),
      ldflags: config.ldflags.clone(),
      src_dir: project_dir(&config.src_dir),
      build_dir: project_dir(&config.build_dir),
      program: normalize(&config.build_dir.join(&config.program)),
      objects: OnceCell::new(),
    }
  }

  /// Object targets for every `.c` file under the source directory.
  pub fn object_files(&self) -> &BTreeSet<Target> {
    self.objects.get_or_init(|| self.scan_sources())
  }

  fn scan_sources(&self) -> BTreeSet<Target> {
    let mut objects = BTreeSet::new();

    let root = walk_root(&self.src_dir);

    for entry in WalkDir::new(root).sort_by_file_name() {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!(src_dir = %self.src_dir.display(), error = %e, "skipping unreadable source entry");
          continue;
        }
      };

      let path = entry.path();
      if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "c") {
        continue;
      }

      if let Ok(relative) = path.strip_prefix(root) {
        objects.insert(Target::path(self.build_dir.join(relative).with_extension("o")));
      }
    }

    debug!(src_dir = %self.src_dir.display(), count = objects.len(), "scanned C sources");
    objects
  }
}

impl Recipe for ProgramRecipe {
  fn name(&self) -> &str {
    "c-program"
  }

  fn matches(&self, target: &Target) -> bool {
    target.as_path() == Some(self.program.as_path())
  }

  fn dependencies_of(&self, target: &Target) -> BTreeSet<Target> {
    assert_produces(self, target);
    self.object_files().clone()
  }

  fn action_for(&self, target: &Target) -> Action {
    assert_produces(self, target);

    let objects: Vec<String> = self
      .object_files()
      .iter()
      .filter_map(Target::as_path)
      .map(|object| quote_word(&display_absolute(object)))
      .collect();
    let program = quote_word(&display_absolute(&self.program));

    let mut parts = vec![self.cc.as_str(), self.cflags.as_str()];
    parts.extend(objects.iter().map(String::as_str));
    parts.extend(["-o", program.as_str(), self.ldflags.as_str()]);

    Action::list([Action::ensure_path(&self.program), Action::command(join_command(parts))])
  }
}

/// Absolute form of `path` for command lines; falls back to the path as given.
fn display_absolute(path: &Path) -> String {
  match std::path::absolute(path) {
    Ok(absolute) => dunce::simplified(&absolute).display().to_string(),
    Err(_) => path.display().to_string(),
  }
}

/// A project directory with `.` components removed.
///
/// The current directory becomes the empty path, which every relative path
/// starts with and which `join` leaves untouched.
fn project_dir(dir: &Path) -> PathBuf {
  let dir = normalize(dir);
  if dir == Path::new(".") {
    PathBuf::new()
  } else {
    dir
  }
}

/// Whether `path` lies inside `dir`. Only relative paths lie inside the
/// current directory.
fn is_below(path: &Path, dir: &Path) -> bool {
  if dir.as_os_str().is_empty() {
    path.is_relative()
  } else {
    path.starts_with(dir)
  }
}

fn walk_root(dir: &Path) -> &Path {
  if dir.as_os_str().is_empty() {
    Path::new(".")
  } else {
    dir
  }
}

/// Quote a path for the shell command line when it holds anything beyond
/// plain path characters.
///
/// Single quotes work for both `sh` and PowerShell; an embedded quote is
/// escaped the way each shell expects.
fn quote_word(word: &str) -> String {
  let plain = |c: char| c.is_ascii_alphanumeric() || "/._-+,:@%=".contains(c) || (cfg!(windows) && c == '\\');
  if !word.is_empty() && word.chars().all(plain) {
    return word.to_string();
  }

  let escaped = if cfg!(windows) {
    word.replace('\'', "''")
  } else {
    word.replace('\'', r"'\''")
  };
  format!("'{}'", escaped)
}

/// Join command words, skipping empty ones (e.g. unset flags).
fn join_command<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
  parts
    .into_iter()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
