//! Satisfiability: clause form, the truth-table oracle, DPLL, resolution,
//! and the strategy-based solver front-end.

pub mod clause;
pub mod dpll;
pub mod resolution;
pub mod solver;
pub mod truth_table;

#[cfg(test)]
mod proptest_tests;

pub use clause::{Clause, CnfFormula, Lit};
pub use dpll::dpll;
pub use resolution::resolution_satisfiable;
pub use solver::{Dpll, Resolution, SatResult, SatStrategy, Solver};
