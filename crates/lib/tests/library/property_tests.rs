use std::collections::HashSet;

use proptest::prelude::*;

use kiln_lib::resolve::solve_plan;
use kiln_lib::{Action, FnRecipe, RecipeRegistry, Target};

/// A random acyclic rule set over nodes `n0..nN`.
///
/// Node `i` may only depend on nodes with a larger index, which rules out
/// cycles. Nodes flagged as leaves get no recipe.
#[derive(Debug, Clone)]
struct RuleSet {
  deps: Vec<Vec<usize>>,
  leaves: Vec<bool>,
}

fn node(i: usize) -> Target {
  Target::name(format!("n{}", i))
}

fn rule_set() -> impl Strategy<Value = RuleSet> {
  (1usize..12).prop_flat_map(|n| {
    let deps = (0..n)
      .map(|i| proptest::sample::subsequence((i + 1..n).collect::<Vec<_>>(), 0..=(n - i - 1)))
      .collect::<Vec<_>>();
    let leaves = proptest::collection::vec(any::<bool>(), n);
    (deps, leaves).prop_map(|(deps, mut leaves)| {
      // The root always has a recipe.
      leaves[0] = false;
      RuleSet { deps, leaves }
    })
  })
}

fn registry_for(rules: &RuleSet) -> RecipeRegistry {
  let mut registry = RecipeRegistry::new();
  for (i, deps) in rules.deps.iter().enumerate() {
    if rules.leaves[i] {
      continue;
    }
    registry.push(FnRecipe::exact(
      node(i),
      deps.iter().map(|&d| node(d)).collect::<Vec<_>>(),
      Action::command(format!("build n{}", i)),
    ));
  }
  registry
}

proptest! {
  #[test]
  fn dependencies_precede_dependents(rules in rule_set()) {
    let registry = registry_for(&rules);
    let plan = solve_plan(node(0), &registry).unwrap();

    for (index, step) in plan.iter().enumerate() {
      for dep in &step.dependencies {
        if let Some(dep_index) = plan.position(dep) {
          prop_assert!(dep_index < index, "{} scheduled after its dependent {}", dep, step.target);
        }
      }
    }
  }

  #[test]
  fn no_target_is_scheduled_twice(rules in rule_set()) {
    let registry = registry_for(&rules);
    let plan = solve_plan(node(0), &registry).unwrap();

    let unique: HashSet<_> = plan.targets().collect();
    prop_assert_eq!(unique.len(), plan.len());
  }

  #[test]
  fn leaves_are_never_scheduled(rules in rule_set()) {
    let registry = registry_for(&rules);
    let plan = solve_plan(node(0), &registry).unwrap();

    for target in plan.targets() {
      prop_assert!(registry.produces(target));
    }
    prop_assert_eq!(plan.steps.last().map(|step| &step.target), Some(&node(0)));
  }

  #[test]
  fn solving_is_deterministic(rules in rule_set()) {
    let registry = registry_for(&rules);
    let first = solve_plan(node(0), &registry).unwrap();
    let second = solve_plan(node(0), &registry).unwrap();

    prop_assert_eq!(first, second);
  }
}
