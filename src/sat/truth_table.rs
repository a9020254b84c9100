//! Exhaustive truth-table oracle.
//!
//! Exponential in the variable count; intended for small formulas and as
//! ground truth when cross-checking the clause-based solvers.

use std::collections::BTreeSet;

use crate::formula::{Assignment, Formula};

/// The first satisfying assignment in enumeration order, if any.
///
/// Variables are enumerated in sorted order, least-significant bit first, so
/// the result is deterministic.
pub fn satisfying_assignment(formula: &Formula) -> Option<Assignment> {
    let vars = formula.vars();
    let found = all_assignments(&vars).find(|candidate| formula.eval(candidate));
    found
}

pub fn is_satisfiable(formula: &Formula) -> bool {
    satisfying_assignment(formula).is_some()
}

pub fn is_tautology(formula: &Formula) -> bool {
    let vars = formula.vars();
    let result = all_assignments(&vars).all(|candidate| formula.eval(&candidate));
    result
}

pub fn is_contradiction(formula: &Formula) -> bool {
    !is_satisfiable(formula)
}

/// Whether two formulas agree on every assignment over their combined
/// variables.
pub fn equivalent(f: &Formula, g: &Formula) -> bool {
    let vars: BTreeSet<String> = f.vars().into_iter().chain(g.vars()).collect();
    let vars: Vec<String> = vars.into_iter().collect();
    let result = all_assignments(&vars).all(|candidate| f.eval(&candidate) == g.eval(&candidate));
    result
}

/// Iterate every assignment over the given variables.
fn all_assignments(vars: &[String]) -> impl Iterator<Item = Assignment> + '_ {
    assert!(vars.len() < 64, "truth table over {} variables", vars.len());
    let count: u64 = 1 << vars.len();
    (0..count).map(move |mask| {
        vars.iter()
            .enumerate()
            .map(|(bit, var)| (var.clone(), mask >> bit & 1 == 1))
            .collect()
    })
}
