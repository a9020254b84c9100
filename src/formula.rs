//! Propositional formula algebra.
//!
//! `Formula` is a closed sum type over the propositional connectives, compared
//! structurally and never mutated after construction. All operations here are
//! pure: evaluation, variable collection, and the canonical string rendering
//! that round-trips through the parser.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// A propositional formula.
///
/// `Group` records explicit parentheses from the source text. It participates
/// in structural equality like any other variant; only simplification unwraps
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    True,
    False,
    Var(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    Group(Box<Formula>),
}

impl Formula {
    /// Create a variable formula.
    pub fn var(name: impl Into<String>) -> Formula {
        Formula::Var(name.into())
    }

    /// Negate this formula.
    pub fn negate(self) -> Formula {
        Formula::Not(Box::new(self))
    }

    /// Conjoin with another formula.
    pub fn and(self, other: Formula) -> Formula {
        Formula::And(Box::new(self), Box::new(other))
    }

    /// Disjoin with another formula.
    pub fn or(self, other: Formula) -> Formula {
        Formula::Or(Box::new(self), Box::new(other))
    }

    /// Build the implication `self => other`.
    pub fn implies(self, other: Formula) -> Formula {
        Formula::Implies(Box::new(self), Box::new(other))
    }

    /// Build the biconditional `self <=> other`.
    pub fn iff(self, other: Formula) -> Formula {
        Formula::Iff(Box::new(self), Box::new(other))
    }

    /// Wrap in an explicit parenthesis group.
    pub fn group(self) -> Formula {
        Formula::Group(Box::new(self))
    }

    /// The contrapositive of `self => other`, i.e. `!other => !self`.
    pub fn contrapositive(self, other: Formula) -> Formula {
        other.negate().implies(self.negate())
    }

    /// Evaluate under an assignment. Total: a variable absent from the
    /// assignment evaluates to false by definition, never an error.
    pub fn eval(&self, facts: &Assignment) -> bool {
        match self {
            Formula::True => true,
            Formula::False => false,
            Formula::Var(name) => facts.get(name),
            Formula::Not(inner) => !inner.eval(facts),
            Formula::And(l, r) => l.eval(facts) && r.eval(facts),
            Formula::Or(l, r) => l.eval(facts) || r.eval(facts),
            Formula::Implies(l, r) => !l.eval(facts) || r.eval(facts),
            Formula::Iff(l, r) => l.eval(facts) == r.eval(facts),
            Formula::Group(inner) => inner.eval(facts),
        }
    }

    /// All variable names in the formula, deduplicated and sorted.
    pub fn vars(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_vars(&mut names);
        names.into_iter().collect()
    }

    fn collect_vars(&self, names: &mut BTreeSet<String>) {
        match self {
            Formula::True | Formula::False => {}
            Formula::Var(name) => {
                names.insert(name.clone());
            }
            Formula::Not(inner) | Formula::Group(inner) => inner.collect_vars(names),
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Iff(l, r) => {
                l.collect_vars(names);
                r.collect_vars(names);
            }
        }
    }
}

/// Canonical rendering: binary connectives fully parenthesized, `!` binding
/// tightest. The output parses back to the same formula modulo simplification.
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::True => write!(f, "TRUE"),
            Formula::False => write!(f, "FALSE"),
            Formula::Var(name) => write!(f, "{}", name),
            Formula::Not(inner) => write!(f, "!{}", inner),
            Formula::And(l, r) => write!(f, "({} & {})", l, r),
            Formula::Or(l, r) => write!(f, "({} | {})", l, r),
            Formula::Implies(l, r) => write!(f, "({} => {})", l, r),
            Formula::Iff(l, r) => write!(f, "({} <=> {})", l, r),
            Formula::Group(inner) => write!(f, "({})", inner),
        }
    }
}

impl Not for Formula {
    type Output = Formula;
    fn not(self) -> Formula {
        self.negate()
    }
}

impl BitAnd for Formula {
    type Output = Formula;
    fn bitand(self, other: Formula) -> Formula {
        self.and(other)
    }
}

impl BitOr for Formula {
    type Output = Formula;
    fn bitor(self, other: Formula) -> Formula {
        self.or(other)
    }
}

/// A mapping from variable names to truth values.
///
/// Insertion order is preserved so iteration is deterministic. Lookup of an
/// absent variable yields false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    values: IndexMap<String, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Assignment::default()
    }

    /// Truth value of a variable; absent variables are false.
    pub fn get(&self, var: &str) -> bool {
        self.values.get(var).copied().unwrap_or(false)
    }

    /// Truth value of a variable, distinguishing absent from false.
    pub fn lookup(&self, var: &str) -> Option<bool> {
        self.values.get(var).copied()
    }

    pub fn set(&mut self, var: impl Into<String>, value: bool) {
        self.values.insert(var.into(), value);
    }

    /// Remove a variable, preserving the order of the rest.
    pub fn unset(&mut self, var: &str) -> Option<bool> {
        self.values.shift_remove(var)
    }

    pub fn contains(&self, var: &str) -> bool {
        self.values.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Assignment {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_defaults_absent_to_false() {
        let f = Formula::var("A").and(Formula::var("B"));
        let mut facts = Assignment::new();
        facts.set("A", true);
        assert!(!f.eval(&facts));
        facts.set("B", true);
        assert!(f.eval(&facts));
    }

    #[test]
    fn test_eval_connectives() {
        let mut facts = Assignment::new();
        facts.set("A", true);
        facts.set("B", false);
        let a = Formula::var("A");
        let b = Formula::var("B");
        assert!(a.clone().or(b.clone()).eval(&facts));
        assert!(!a.clone().iff(b.clone()).eval(&facts));
        assert!(b.clone().implies(a.clone()).eval(&facts));
        assert!(!a.clone().implies(b.clone()).eval(&facts));
        assert!(a.negate().iff(b).eval(&facts));
    }

    #[test]
    fn test_vars_sorted_and_deduplicated() {
        let f = Formula::var("C")
            .and(Formula::var("A"))
            .or(Formula::var("C").implies(Formula::var("B")));
        assert_eq!(f.vars(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_display_is_fully_parenthesized() {
        let f = Formula::var("A").and(Formula::var("B").or(Formula::var("C").negate()));
        assert_eq!(f.to_string(), "(A & (B | !C))");
        assert_eq!(Formula::True.iff(Formula::False).to_string(), "(TRUE <=> FALSE)");
    }

    #[test]
    fn test_group_not_transparent_to_equality() {
        let plain = Formula::var("A");
        let grouped = Formula::var("A").group();
        assert_ne!(plain, grouped);
    }

    #[test]
    fn test_contrapositive() {
        let f = Formula::var("A");
        let g = Formula::var("B");
        let contra = f.contrapositive(g);
        assert_eq!(contra.to_string(), "(!B => !A)");
    }

    #[test]
    fn test_operator_sugar() {
        let f = !Formula::var("A") & (Formula::var("B") | Formula::var("C"));
        assert_eq!(f.to_string(), "(!A & (B | C))");
    }
}
