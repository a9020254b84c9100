//! Explanation trees for successful queries.
//!
//! An explanation mirrors the structure of the queried formula: composite
//! nodes carry a short rationale and one child per subformula that mattered,
//! variable leaves say whether the fact was asserted directly or derived via
//! a rule. Trees are built on demand and never cached.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::Engine;
use crate::formula::Formula;

/// Cycle guard: rule sets with mutually supporting facts would otherwise
/// recurse forever through the supporting-rule search.
const MAX_DEPTH: usize = 64;

/// One node of an explanation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explain {
    /// Rendered form of the subexpression this node explains.
    pub expr: String,
    /// Truth value of that subexpression under the current facts.
    pub value: bool,
    /// Short rationale for the value.
    pub why: String,
    pub children: Vec<Explain>,
}

impl Explain {
    fn leaf(expr: impl Into<String>, value: bool, why: impl Into<String>) -> Self {
        Explain {
            expr: expr.into(),
            value,
            why: why.into(),
            children: Vec::new(),
        }
    }

    fn node(
        expr: impl Into<String>,
        value: bool,
        why: impl Into<String>,
        children: Vec<Explain>,
    ) -> Self {
        Explain {
            expr: expr.into(),
            value,
            why: why.into(),
            children,
        }
    }

    /// Render the tree as indented text, one node per line. The output is
    /// deterministic for a given engine state.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, indent: usize) {
        for _ in 0..indent {
            out.push_str("  ");
        }
        out.push_str(&format!("{} = {} [{}]\n", self.expr, self.value, self.why));
        for child in &self.children {
            child.render_into(out, indent + 1);
        }
    }
}

impl fmt::Display for Explain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Outcome of `Engine::query`: the goal's truth value, plus an explanation
/// tree when the goal holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub holds: bool,
    pub explanation: Option<Explain>,
}

impl Engine {
    /// Build the explanation for a formula against the current facts.
    pub(crate) fn explain(
        &self,
        formula: &Formula,
        visited: &mut HashSet<String>,
        depth: usize,
    ) -> Explain {
        let facts = self.facts().assignment();
        let value = formula.eval(facts);
        if depth >= MAX_DEPTH {
            return Explain::leaf(formula.to_string(), value, "depth limit reached");
        }
        match formula {
            Formula::True => Explain::leaf("TRUE", true, "constant"),
            Formula::False => Explain::leaf("FALSE", false, "constant"),
            Formula::Var(name) => self.explain_var(name, visited, depth),
            Formula::Not(inner) => {
                let child = self.explain(inner, visited, depth + 1);
                let why = if value { "inner false" } else { "inner true" };
                Explain::node(formula.to_string(), value, why, vec![child])
            }
            Formula::And(lhs, rhs) => {
                let left = self.explain(lhs, visited, depth + 1);
                let right = self.explain(rhs, visited, depth + 1);
                let why = match (left.value, right.value) {
                    (true, true) => "both true",
                    (false, true) => "left false",
                    (true, false) => "right false",
                    (false, false) => "both false",
                };
                Explain::node(formula.to_string(), value, why, vec![left, right])
            }
            Formula::Or(lhs, rhs) => {
                let left = self.explain(lhs, visited, depth + 1);
                let right = self.explain(rhs, visited, depth + 1);
                let why = match (left.value, right.value) {
                    (true, true) => "both true",
                    (true, false) => "left true",
                    (false, true) => "right true",
                    (false, false) => "both false",
                };
                Explain::node(formula.to_string(), value, why, vec![left, right])
            }
            Formula::Implies(lhs, rhs) => {
                let left = self.explain(lhs, visited, depth + 1);
                let right = self.explain(rhs, visited, depth + 1);
                let why = if value {
                    "implication holds"
                } else {
                    "antecedent true, consequent false"
                };
                Explain::node(formula.to_string(), value, why, vec![left, right])
            }
            Formula::Iff(lhs, rhs) => {
                let left = self.explain(lhs, visited, depth + 1);
                let right = self.explain(rhs, visited, depth + 1);
                let why = if value { "both sides agree" } else { "sides differ" };
                Explain::node(formula.to_string(), value, why, vec![left, right])
            }
            Formula::Group(inner) => self.explain(inner, visited, depth + 1),
        }
    }

    /// Explain a single variable. A true variable supported by a rule whose
    /// antecedent currently holds is reported as derived, with the
    /// antecedent's explanation as a child; otherwise it was asserted.
    fn explain_var(&self, name: &str, visited: &mut HashSet<String>, depth: usize) -> Explain {
        let facts = self.facts();
        if !facts.is_true(name) {
            return Explain::leaf(name, false, "not established");
        }
        if !visited.insert(name.to_string()) {
            // Already on the path: report the fact without re-deriving it.
            return Explain::leaf(format!("fact: {}=true", name), true, "asserted");
        }
        let supporting = self
            .rules()
            .iter()
            .find(|r| r.then == name && r.when.eval(facts.assignment()));
        let explain = match supporting {
            Some(rule) => {
                let antecedent = self.explain(&rule.when, visited, depth + 1);
                Explain::node(
                    name,
                    true,
                    format!("derived via rule {}", rule.id),
                    vec![
                        antecedent,
                        Explain::leaf(format!("fact: {}=true", name), true, "derived"),
                    ],
                )
            }
            None => Explain::leaf(format!("fact: {}=true", name), true, "asserted"),
        };
        visited.remove(name);
        explain
    }
}
