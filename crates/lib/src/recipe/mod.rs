//! Recipes and the recipe registry.
//!
//! A [`Recipe`] is a rule: it recognizes a (possibly unbounded) set of targets
//! through a predicate and, for each recognized target, yields its
//! prerequisites and the action that produces it. Matching is a predicate
//! rather than a key lookup, so a single recipe can cover e.g. every `.o` path,
//! like a pattern rule in `make`.
//!
//! The [`RecipeRegistry`] keeps recipes in registration order and resolves a
//! target to the *first* recipe that matches it. Later recipes matching the same
//! target are never consulted.

pub mod c;
mod fn_recipe;

use std::collections::BTreeSet;
use std::fmt;

use crate::action::Action;
use crate::target::Target;

pub use fn_recipe::FnRecipe;

/// A production rule.
///
/// `dependencies_of` and `action_for` may only be called for targets the recipe
/// claims through `matches`. Calling them with any other target is a
/// programming error and implementations panic (see [`assert_produces`]).
///
/// Recipes may memoize expensive derived state internally (for example a scan
/// of the source tree), which is why every method takes `&self`.
pub trait Recipe {
  /// Short human-readable name used in logs and errors.
  fn name(&self) -> &str;

  /// Whether this recipe produces `target`.
  fn matches(&self, target: &Target) -> bool;

  /// Direct prerequisites of `target`.
  fn dependencies_of(&self, target: &Target) -> BTreeSet<Target>;

  /// The action that produces `target` once its prerequisites exist.
  fn action_for(&self, target: &Target) -> Action;
}

/// Panic unless `recipe` matches `target`.
///
/// Recipes call this at the top of `dependencies_of` and `action_for`.
#[track_caller]
pub fn assert_produces<R: Recipe + ?Sized>(recipe: &R, target: &Target) {
  assert!(
    recipe.matches(target),
    "recipe `{}` queried for {} which it does not produce",
    recipe.name(),
    target
  );
}

/// Ordered collection of recipes with first-match resolution.
#[derive(Default)]
pub struct RecipeRegistry {
  recipes: Vec<Box<dyn Recipe>>,
}

impl RecipeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a recipe, builder style.
  pub fn with(mut self, recipe: impl Recipe + 'static) -> Self {
    self.push(recipe);
    self
  }

  /// Append a recipe. It has lower priority than every recipe already registered.
  pub fn push(&mut self, recipe: impl Recipe + 'static) {
    self.recipes.push(Box::new(recipe));
  }

  pub fn len(&self) -> usize {
    self.recipes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.recipes.is_empty()
  }

  /// Recipe names in priority order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.recipes.iter().map(|recipe| recipe.name())
  }

  /// The first registered recipe that matches `target`.
  pub fn resolve(&self, target: &Target) -> Option<&dyn Recipe> {
    self
      .recipes
      .iter()
      .find(|recipe| recipe.matches(target))
      .map(|recipe| recipe.as_ref())
  }

  /// Whether any recipe produces `target`. Targets without one are leaves.
  pub fn produces(&self, target: &Target) -> bool {
    self.resolve(target).is_some()
  }

  /// Direct prerequisites of `target` according to its owning recipe.
  ///
  /// A target no recipe matches is a leaf and has no prerequisites.
  pub fn dependencies_of(&self, target: &Target) -> BTreeSet<Target> {
    match self.resolve(target) {
      Some(recipe) => recipe.dependencies_of(target),
      None => BTreeSet::new(),
    }
  }
}

impl fmt::Debug for RecipeRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.names()).finish()
  }
}
