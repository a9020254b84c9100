//! Literals, clauses, and CNF formulas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{PropLogicError, Result};
use crate::formula::Formula;
use crate::rewrite::{simplify, to_cnf};

/// A literal: a variable or its negation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lit {
    pub var: String,
    pub negated: bool,
}

impl Lit {
    pub fn positive(var: impl Into<String>) -> Self {
        Lit {
            var: var.into(),
            negated: false,
        }
    }

    pub fn negative(var: impl Into<String>) -> Self {
        Lit {
            var: var.into(),
            negated: true,
        }
    }

    /// The literal with the opposite polarity on the same variable.
    pub fn complement(&self) -> Lit {
        Lit {
            var: self.var.clone(),
            negated: !self.negated,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        write!(f, "{}", self.var)
    }
}

/// A disjunction of literals with set semantics: literals are kept sorted and
/// deduplicated, so structurally different builds of the same clause compare
/// equal. The empty clause is unsatisfiable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    literals: Vec<Lit>,
}

impl Clause {
    pub fn new(mut literals: Vec<Lit>) -> Self {
        literals.sort();
        literals.dedup();
        Clause { literals }
    }

    pub fn empty() -> Self {
        Clause::default()
    }

    pub fn literals(&self) -> &[Lit] {
        &self.literals
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn contains(&self, lit: &Lit) -> bool {
        self.literals.binary_search(lit).is_ok()
    }

    /// A clause containing a variable in both polarities is always true.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|lit| !lit.negated && self.contains(&lit.complement()))
    }

    /// Drop every literal over the given variable, preserving order.
    pub fn remove_var(&mut self, var: &str) {
        self.literals.retain(|lit| lit.var != var);
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "⊥");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// A conjunction of clauses. The empty formula is trivially true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnfFormula {
    pub clauses: Vec<Clause>,
}

impl CnfFormula {
    pub fn new(clauses: Vec<Clause>) -> Self {
        CnfFormula { clauses }
    }

    /// Flatten a formula into clause form.
    ///
    /// The formula is simplified and converted through NNF/CNF first. After
    /// that every disjunct must be a plain or negated variable; anything else
    /// is an internal invariant violation reported as an error so callers can
    /// fail closed.
    pub fn from_formula(formula: &Formula) -> Result<CnfFormula> {
        let simplified = simplify(formula);
        match simplified {
            Formula::True => return Ok(CnfFormula::default()),
            Formula::False => return Ok(CnfFormula::new(vec![Clause::empty()])),
            _ => {}
        }
        let cnf = to_cnf(&simplified);
        let mut clauses = Vec::new();
        for conjunct in conjuncts(&cnf) {
            let mut literals = Vec::new();
            let mut tautological = false;
            for disjunct in disjuncts(conjunct) {
                match disjunct {
                    Formula::Var(name) => literals.push(Lit::positive(name.clone())),
                    Formula::Not(inner) => match inner.as_ref() {
                        Formula::Var(name) => literals.push(Lit::negative(name.clone())),
                        other => {
                            return Err(PropLogicError::CnfConversion(format!(
                                "negation of a non-variable after NNF: !{}",
                                other
                            )))
                        }
                    },
                    Formula::True => tautological = true,
                    Formula::False => {}
                    other => {
                        return Err(PropLogicError::CnfConversion(format!(
                            "expected a literal after distribution, found {}",
                            other
                        )))
                    }
                }
            }
            if !tautological {
                clauses.push(Clause::new(literals));
            }
        }
        Ok(CnfFormula::new(clauses))
    }

    /// All variable names across the clauses, deduplicated and sorted.
    pub fn vars(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self
            .clauses
            .iter()
            .flat_map(|c| c.literals().iter().map(|l| &l.var))
            .collect();
        names.into_iter().cloned().collect()
    }
}

impl fmt::Display for CnfFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "⊤");
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " ∧ ")?;
            }
            write!(f, "({})", clause)?;
        }
        Ok(())
    }
}

/// Flatten nested conjunctions into their conjunct list.
fn conjuncts(formula: &Formula) -> Vec<&Formula> {
    let mut out = Vec::new();
    fn walk<'a>(f: &'a Formula, out: &mut Vec<&'a Formula>) {
        match f {
            Formula::And(l, r) => {
                walk(l, out);
                walk(r, out);
            }
            other => out.push(other),
        }
    }
    walk(formula, &mut out);
    out
}

/// Flatten nested disjunctions into their disjunct list.
fn disjuncts(formula: &Formula) -> Vec<&Formula> {
    let mut out = Vec::new();
    fn walk<'a>(f: &'a Formula, out: &mut Vec<&'a Formula>) {
        match f {
            Formula::Or(l, r) => {
                walk(l, out);
                walk(r, out);
            }
            other => out.push(other),
        }
    }
    walk(formula, &mut out);
    out
}
