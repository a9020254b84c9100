//! Propositional logic toolkit: formulas, parsing, rewriting,
//! satisfiability, entailment, and a forward-chaining rule engine.
//!
//! The pipeline runs text to verdict: [`parse`] builds a [`Formula`],
//! [`rewrite`] normalizes it (simplified, NNF, CNF, DNF), the [`sat`] layer
//! decides satisfiability by truth table, DPLL, or resolution behind a
//! pluggable [`sat::Solver`], and [`entails`] answers knowledge-base queries
//! by refutation. The [`engine`] module adds forward chaining over a fact
//! base with explanation trees, and [`json`] gives every user-facing
//! structure a versioned wire form.
//!
//! ```
//! use proplogic::{entails, parse};
//!
//! let kb = vec![parse("Rain => Wet").unwrap(), parse("Rain").unwrap()];
//! let verdict = entails(&kb, &parse("Wet").unwrap());
//! assert!(verdict.entailed);
//! ```

pub mod engine;
pub mod entailment;
pub mod error;
pub mod formula;
pub mod json;
pub mod parser;
pub mod rewrite;
pub mod sat;

pub use engine::{Engine, Explain, FactBase, QueryResult, Rule};
pub use entailment::{entails, Entailment};
pub use error::{PropLogicError, Result};
pub use formula::{Assignment, Formula};
pub use json::{dump_rules, load_rules, ExplainJson, RuleJson, RULE_FORMAT_VERSION};
pub use parser::{parse, parse_with_mode, ParseMode};
pub use rewrite::{simplify, to_cnf, to_dnf, to_nnf};
pub use sat::{Clause, CnfFormula, Lit, SatResult, SatStrategy, Solver};
