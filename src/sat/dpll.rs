//! DPLL satisfiability over clause form.
//!
//! Classic backtracking search: tautology removal up front, then repeated
//! unit propagation and pure-literal elimination, branching on the first
//! literal of the shortest remaining clause (true first, then false).
//! Recursion depth is bounded by the variable count. No clause learning.

use indexmap::IndexMap;
use log::trace;

use super::clause::{Clause, CnfFormula};
use crate::formula::Assignment;

/// Solve a CNF formula, returning a total witness over its variables on
/// success.
pub fn dpll(cnf: &CnfFormula) -> Option<Assignment> {
    let clauses: Vec<Clause> = cnf
        .clauses
        .iter()
        .filter(|clause| !clause.is_tautology())
        .cloned()
        .collect();
    let mut model = Assignment::new();
    if !solve(clauses, &mut model) {
        return None;
    }
    // Variables eliminated before the search bottomed out are free; fix them
    // so the witness is total.
    for var in cnf.vars() {
        if model.lookup(&var).is_none() {
            model.set(var, false);
        }
    }
    Some(model)
}

fn solve(mut clauses: Vec<Clause>, model: &mut Assignment) -> bool {
    loop {
        if clauses.is_empty() {
            return true;
        }
        if clauses.iter().any(Clause::is_empty) {
            return false;
        }
        if let Some(lit) = clauses
            .iter()
            .find(|clause| clause.len() == 1)
            .map(|clause| clause.literals()[0].clone())
        {
            trace!("unit propagation: {}", lit);
            assign(&mut clauses, model, &lit.var, !lit.negated);
            continue;
        }
        if let Some((var, value)) = find_pure_literal(&clauses) {
            trace!("pure literal: {} = {}", var, value);
            assign(&mut clauses, model, &var, value);
            continue;
        }
        break;
    }

    let branch_lit = match clauses.iter().min_by_key(|clause| clause.len()) {
        Some(clause) => clause.literals()[0].clone(),
        // Unreachable: the empty clause set returns above.
        None => return true,
    };
    trace!("branching on {}", branch_lit);
    for value in [!branch_lit.negated, branch_lit.negated] {
        let mut branch_clauses = clauses.clone();
        let mut branch_model = model.clone();
        assign(&mut branch_clauses, &mut branch_model, &branch_lit.var, value);
        if solve(branch_clauses, &mut branch_model) {
            *model = branch_model;
            return true;
        }
    }
    false
}

/// Fix a variable: satisfied clauses disappear, falsified literals shrink.
fn assign(clauses: &mut Vec<Clause>, model: &mut Assignment, var: &str, value: bool) {
    model.set(var.to_string(), value);
    clauses.retain(|clause| {
        !clause
            .literals()
            .iter()
            .any(|lit| lit.var == var && lit.negated != value)
    });
    for clause in clauses.iter_mut() {
        clause.remove_var(var);
    }
}

/// A variable appearing with only one polarity can be fixed to that polarity
/// without losing satisfiability.
fn find_pure_literal(clauses: &[Clause]) -> Option<(String, bool)> {
    let mut seen: IndexMap<&str, (bool, bool)> = IndexMap::new();
    for clause in clauses {
        for lit in clause.literals() {
            let entry = seen.entry(lit.var.as_str()).or_insert((false, false));
            if lit.negated {
                entry.1 = true;
            } else {
                entry.0 = true;
            }
        }
    }
    seen.iter()
        .find(|(_, (pos, neg))| pos != neg)
        .map(|(var, (pos, _))| (var.to_string(), *pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Formula;
    use crate::sat::clause::Lit;

    fn cnf_of(formula: &Formula) -> CnfFormula {
        CnfFormula::from_formula(formula).unwrap()
    }

    #[test]
    fn test_contradiction_has_no_witness() {
        let f = Formula::var("A").and(Formula::var("A").negate());
        assert_eq!(dpll(&cnf_of(&f)), None);
    }

    #[test]
    fn test_tautology_has_total_witness() {
        let f = Formula::var("A").or(Formula::var("A").negate());
        // Simplification collapses this to TRUE; build the clause directly to
        // exercise the solver.
        let cnf = CnfFormula::new(vec![Clause::new(vec![
            Lit::positive("A"),
            Lit::negative("A"),
        ])]);
        let model = dpll(&cnf).unwrap();
        assert!(model.lookup("A").is_some());
        assert!(f.eval(&model));
    }

    #[test]
    fn test_unit_propagation_chain() {
        // A, !A | B, !B | C forces A, B, C all true.
        let cnf = CnfFormula::new(vec![
            Clause::new(vec![Lit::positive("A")]),
            Clause::new(vec![Lit::negative("A"), Lit::positive("B")]),
            Clause::new(vec![Lit::negative("B"), Lit::positive("C")]),
        ]);
        let model = dpll(&cnf).unwrap();
        assert!(model.get("A") && model.get("B") && model.get("C"));
    }

    #[test]
    fn test_pure_literal_elimination() {
        // B occurs only positively; fixing it true satisfies both clauses.
        let cnf = CnfFormula::new(vec![
            Clause::new(vec![Lit::positive("A"), Lit::positive("B")]),
            Clause::new(vec![Lit::negative("A"), Lit::positive("B")]),
        ]);
        let model = dpll(&cnf).unwrap();
        assert!(model.get("B"));
    }

    #[test]
    fn test_requires_backtracking() {
        // (A | B) & (A | !B) & (!A | B) is satisfiable only with A=B=true.
        let cnf = CnfFormula::new(vec![
            Clause::new(vec![Lit::positive("A"), Lit::positive("B")]),
            Clause::new(vec![Lit::positive("A"), Lit::negative("B")]),
            Clause::new(vec![Lit::negative("A"), Lit::positive("B")]),
        ]);
        let model = dpll(&cnf).unwrap();
        assert!(model.get("A") && model.get("B"));
    }

    #[test]
    fn test_unsatisfiable_core() {
        // All four polarity combinations over A, B.
        let cnf = CnfFormula::new(vec![
            Clause::new(vec![Lit::positive("A"), Lit::positive("B")]),
            Clause::new(vec![Lit::positive("A"), Lit::negative("B")]),
            Clause::new(vec![Lit::negative("A"), Lit::positive("B")]),
            Clause::new(vec![Lit::negative("A"), Lit::negative("B")]),
        ]);
        assert_eq!(dpll(&cnf), None);
    }

    #[test]
    fn test_witness_satisfies_original_formula() {
        let f = Formula::var("A")
            .implies(Formula::var("B"))
            .and(Formula::var("A").or(Formula::var("C")));
        let model = dpll(&cnf_of(&f)).unwrap();
        assert!(f.eval(&model));
    }
}
