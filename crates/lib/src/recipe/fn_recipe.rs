use std::collections::BTreeSet;

use crate::action::Action;
use crate::recipe::{Recipe, assert_produces};
use crate::target::Target;

type MatchFn = Box<dyn Fn(&Target) -> bool>;
type DepsFn = Box<dyn Fn(&Target) -> BTreeSet<Target>>;
type ActionFn = Box<dyn Fn(&Target) -> Action>;

/// A recipe assembled from closures.
///
/// Handy for one-off rules (phony aggregates, generated files) that do not
/// warrant their own type.
pub struct FnRecipe {
  name: String,
  matches: MatchFn,
  dependencies: DepsFn,
  action: ActionFn,
}

impl FnRecipe {
  pub fn new<M, D, I, A>(name: impl Into<String>, matches: M, dependencies: D, action: A) -> Self
  where
    M: Fn(&Target) -> bool + 'static,
    D: Fn(&Target) -> I + 'static,
    I: IntoIterator<Item = Target>,
    A: Fn(&Target) -> Action + 'static,
  {
    Self {
      name: name.into(),
      matches: Box::new(matches),
      dependencies: Box::new(move |target: &Target| -> BTreeSet<Target> {
        dependencies(target).into_iter().collect()
      }),
      action: Box::new(action),
    }
  }

  /// A rule for exactly one target with fixed prerequisites and action.
  pub fn exact(target: Target, dependencies: impl IntoIterator<Item = Target>, action: Action) -> Self {
    let dependencies: BTreeSet<Target> = dependencies.into_iter().collect();
    let name = target.to_string();
    let owned = target.clone();

    Self::new(
      name,
      move |candidate| *candidate == owned,
      move |_| dependencies.clone(),
      move |_| action.clone(),
    )
  }
}

impl Recipe for FnRecipe {
  fn name(&self) -> &str {
    &self.name
  }

  fn matches(&self, target: &Target) -> bool {
    (self.matches)(target)
  }

  fn dependencies_of(&self, target: &Target) -> BTreeSet<Target> {
    assert_produces(self, target);
    (self.dependencies)(target)
  }

  fn action_for(&self, target: &Target) -> Action {
    assert_produces(self, target);
    (self.action)(target)
  }
}

impl std::fmt::Debug for FnRecipe {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FnRecipe").field("name", &self.name).finish_non_exhaustive()
  }
}
