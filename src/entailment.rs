//! Refutation-based entailment over a propositional knowledge base.
//!
//! `KB ⊨ goal` holds iff `KB ∧ !goal` is unsatisfiable. The knowledge base
//! is a list of formulas read as an implicit conjunction.

use log::warn;

use crate::formula::{Assignment, Formula};
use crate::sat::clause::CnfFormula;
use crate::sat::dpll::dpll;

/// Result of an entailment query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entailment {
    pub entailed: bool,
    /// On non-entailment, an assignment satisfying `KB ∧ !goal`.
    pub counter_model: Option<Assignment>,
}

impl Entailment {
    /// The fail-closed outcome: not entailed, no model.
    fn closed() -> Self {
        Entailment {
            entailed: false,
            counter_model: None,
        }
    }
}

/// Decide whether the knowledge base entails the goal.
///
/// Degenerate inputs fail closed: an empty knowledge base and a CNF
/// conversion failure both report not-entailed with no counter-model, so one
/// malformed formula cannot abort the caller.
pub fn entails(kb: &[Formula], goal: &Formula) -> Entailment {
    let conjunction = match kb.iter().cloned().reduce(|acc, f| acc.and(f)) {
        Some(conjunction) => conjunction,
        None => return Entailment::closed(),
    };
    let refutation = conjunction.and(goal.clone().negate());

    let cnf = match CnfFormula::from_formula(&refutation) {
        Ok(cnf) => cnf,
        Err(err) => {
            warn!("CNF conversion failed, reporting not entailed: {}", err);
            return Entailment::closed();
        }
    };

    match dpll(&cnf) {
        None => Entailment {
            entailed: true,
            counter_model: None,
        },
        Some(model) => Entailment {
            entailed: false,
            counter_model: Some(model),
        },
    }
}
