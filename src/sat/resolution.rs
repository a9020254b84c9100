//! Satisfiability by resolution saturation.
//!
//! Repeatedly resolves clause pairs sharing a variable with opposite polarity
//! until the empty clause appears (unsatisfiable) or no new resolvent can be
//! added (satisfiable by saturation). Independent of DPLL by construction;
//! used for cross-validation, not performance.

use std::collections::HashSet;

use log::trace;

use super::clause::{Clause, CnfFormula, Lit};

/// Decide satisfiability by saturating the clause set under resolution.
pub fn resolution_satisfiable(cnf: &CnfFormula) -> bool {
    let mut clauses: Vec<Clause> = Vec::new();
    let mut seen: HashSet<Clause> = HashSet::new();
    for clause in &cnf.clauses {
        if clause.is_tautology() || seen.contains(clause) {
            continue;
        }
        if clause.is_empty() {
            return false;
        }
        seen.insert(clause.clone());
        clauses.push(clause.clone());
    }

    loop {
        let mut fresh = Vec::new();
        for i in 0..clauses.len() {
            for j in (i + 1)..clauses.len() {
                for resolvent in resolvents(&clauses[i], &clauses[j]) {
                    if resolvent.is_empty() {
                        trace!("empty clause from {} and {}", clauses[i], clauses[j]);
                        return false;
                    }
                    if resolvent.is_tautology() || seen.contains(&resolvent) {
                        continue;
                    }
                    seen.insert(resolvent.clone());
                    fresh.push(resolvent);
                }
            }
        }
        if fresh.is_empty() {
            return true;
        }
        trace!("saturation round added {} resolvents", fresh.len());
        clauses.extend(fresh);
    }
}

/// All resolvents of a clause pair, one per complementary literal pair.
fn resolvents(c1: &Clause, c2: &Clause) -> Vec<Clause> {
    let mut out = Vec::new();
    for lit in c1.literals() {
        let complement = lit.complement();
        if !c2.contains(&complement) {
            continue;
        }
        let mut literals: Vec<Lit> = c1
            .literals()
            .iter()
            .filter(|l| **l != *lit)
            .cloned()
            .collect();
        literals.extend(c2.literals().iter().filter(|l| **l != complement).cloned());
        out.push(Clause::new(literals));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolvent_of_units_is_empty() {
        let cnf = CnfFormula::new(vec![
            Clause::new(vec![Lit::positive("A")]),
            Clause::new(vec![Lit::negative("A")]),
        ]);
        assert!(!resolution_satisfiable(&cnf));
    }

    #[test]
    fn test_saturation_without_contradiction() {
        let cnf = CnfFormula::new(vec![
            Clause::new(vec![Lit::positive("A"), Lit::positive("B")]),
            Clause::new(vec![Lit::negative("A"), Lit::positive("C")]),
        ]);
        assert!(resolution_satisfiable(&cnf));
    }

    #[test]
    fn test_empty_formula_is_satisfiable() {
        assert!(resolution_satisfiable(&CnfFormula::default()));
    }

    #[test]
    fn test_input_empty_clause_is_unsatisfiable() {
        let cnf = CnfFormula::new(vec![Clause::empty()]);
        assert!(!resolution_satisfiable(&cnf));
    }

    #[test]
    fn test_deep_refutation() {
        // A, !A | B, !B | C, !C — refutation needs a resolution chain.
        let cnf = CnfFormula::new(vec![
            Clause::new(vec![Lit::positive("A")]),
            Clause::new(vec![Lit::negative("A"), Lit::positive("B")]),
            Clause::new(vec![Lit::negative("B"), Lit::positive("C")]),
            Clause::new(vec![Lit::negative("C")]),
        ]);
        assert!(!resolution_satisfiable(&cnf));
    }

    #[test]
    fn test_tautological_resolvents_are_discarded() {
        // Resolving (A | B) with (!A | !B) yields only tautologies; the set
        // saturates and stays satisfiable.
        let cnf = CnfFormula::new(vec![
            Clause::new(vec![Lit::positive("A"), Lit::positive("B")]),
            Clause::new(vec![Lit::negative("A"), Lit::negative("B")]),
        ]);
        assert!(resolution_satisfiable(&cnf));
    }
}
