//! Pluggable satisfiability strategies and the threshold-based front-end.
//!
//! The backend is an explicit strategy value handed to the `Solver` rather
//! than a global registry, so the formula layer never depends on a concrete
//! solver and there is no initialization order to get wrong.

use log::warn;

use super::clause::CnfFormula;
use super::dpll::dpll;
use super::resolution::resolution_satisfiable;
use super::truth_table;
use crate::formula::{Assignment, Formula};

/// Outcome of a satisfiability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatResult {
    pub satisfiable: bool,
    /// A witness assignment when the strategy produces one.
    pub model: Option<Assignment>,
}

impl SatResult {
    pub fn unsat() -> Self {
        SatResult {
            satisfiable: false,
            model: None,
        }
    }

    pub fn sat(model: Option<Assignment>) -> Self {
        SatResult {
            satisfiable: true,
            model,
        }
    }
}

/// A satisfiability backend over clause form.
pub trait SatStrategy {
    fn name(&self) -> &'static str;
    fn solve(&self, cnf: &CnfFormula) -> SatResult;
}

/// DPLL backend; produces a witness on satisfiable input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dpll;

impl SatStrategy for Dpll {
    fn name(&self) -> &'static str {
        "dpll"
    }

    fn solve(&self, cnf: &CnfFormula) -> SatResult {
        match dpll(cnf) {
            Some(model) => SatResult::sat(Some(model)),
            None => SatResult::unsat(),
        }
    }
}

/// Resolution backend; decides satisfiability but produces no witness.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolution;

impl SatStrategy for Resolution {
    fn name(&self) -> &'static str {
        "resolution"
    }

    fn solve(&self, cnf: &CnfFormula) -> SatResult {
        if resolution_satisfiable(cnf) {
            SatResult::sat(None)
        } else {
            SatResult::unsat()
        }
    }
}

/// Threshold policy: the truth table is exact and cheap for small formulas,
/// so it handles anything at or below the variable-count threshold; larger
/// formulas go to the injected backend.
pub struct Solver {
    threshold: usize,
    backend: Box<dyn SatStrategy>,
}

impl Solver {
    pub const DEFAULT_VAR_THRESHOLD: usize = 8;

    pub fn new(threshold: usize, backend: Box<dyn SatStrategy>) -> Self {
        Solver { threshold, backend }
    }

    pub fn check(&self, formula: &Formula) -> SatResult {
        let vars = formula.vars();
        if vars.len() <= self.threshold {
            return match truth_table::satisfying_assignment(formula) {
                Some(model) => SatResult::sat(Some(model)),
                None => SatResult::unsat(),
            };
        }
        match CnfFormula::from_formula(formula) {
            Ok(cnf) => self.backend.solve(&cnf),
            Err(err) => {
                // Fail closed: a conversion failure must not take the caller
                // down, and must not claim satisfiability it cannot show.
                warn!("CNF conversion failed, reporting unsatisfiable: {}", err);
                SatResult::unsat()
            }
        }
    }

    pub fn is_satisfiable(&self, formula: &Formula) -> bool {
        self.check(formula).satisfiable
    }

    pub fn is_tautology(&self, formula: &Formula) -> bool {
        !self.check(&formula.clone().negate()).satisfiable
    }

    pub fn is_contradiction(&self, formula: &Formula) -> bool {
        !self.check(formula).satisfiable
    }
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new(Self::DEFAULT_VAR_THRESHOLD, Box::new(Dpll))
    }
}
