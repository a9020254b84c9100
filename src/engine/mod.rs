//! Forward-chaining rule engine over a propositional fact base.
//!
//! Rules are `when => then` with `then` restricted to a single variable.
//! Inference is monotonic by convention: retracting a fact never retracts
//! what was already derived from it; callers rebuild the engine for that.

mod explain;

pub use explain::{Explain, QueryResult};

use log::debug;
use std::collections::HashSet;

use crate::formula::{Assignment, Formula};
use crate::sat::truth_table;

/// A production rule: when the antecedent holds, the consequent variable
/// becomes true.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub when: Formula,
    pub then: String,
}

impl Rule {
    pub fn new(id: impl Into<String>, when: Formula, then: impl Into<String>) -> Self {
        Rule {
            id: id.into(),
            when,
            then: then.into(),
        }
    }
}

/// Rule equality is semantic on the antecedent: two rules with the same id
/// and consequent are equal when their `when` formulas are truth-table
/// equivalent, regardless of structure.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.then == other.then
            && truth_table::equivalent(&self.when, &other.when)
    }
}

/// A mutable variable-to-truth store. Reading an absent variable yields
/// false, never an error.
#[derive(Debug, Clone, Default)]
pub struct FactBase {
    facts: Assignment,
}

impl FactBase {
    pub fn new() -> Self {
        FactBase::default()
    }

    /// Set a fact true.
    pub fn assert_fact(&mut self, var: &str) {
        self.facts.set(var, true);
    }

    /// Remove a fact. Non-transitive: facts derived from it stay.
    pub fn retract(&mut self, var: &str) {
        self.facts.unset(var);
    }

    pub fn is_true(&self, var: &str) -> bool {
        self.facts.get(var)
    }

    pub fn contains(&self, var: &str) -> bool {
        self.facts.contains(var)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// View as an assignment for formula evaluation.
    pub fn assignment(&self) -> &Assignment {
        &self.facts
    }
}

/// The inference engine: a fact base plus an ordered rule list.
///
/// Not internally synchronized; share across threads only behind external
/// locking.
#[derive(Debug, Default)]
pub struct Engine {
    facts: FactBase,
    rules: Vec<Rule>,
    /// Ids of rules that have fired; a rule fires at most once ever.
    fired: HashSet<String>,
}

impl Engine {
    pub fn new() -> Self {
        Engine::default()
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn facts(&self) -> &FactBase {
        &self.facts
    }

    pub fn assert_fact(&mut self, var: &str) {
        self.facts.assert_fact(var);
    }

    pub fn retract(&mut self, var: &str) {
        self.facts.retract(var);
    }

    /// Evaluate every rule once, in declaration order, returning the ids
    /// that fired. A rule fires iff its antecedent holds, its consequent is
    /// not already true, and it has never fired before. Firings take effect
    /// immediately, so later rules in the same pass see the new facts.
    pub fn fire_once(&mut self) -> Vec<String> {
        let mut fired = Vec::new();
        for idx in 0..self.rules.len() {
            let (id, then) = {
                let rule = &self.rules[idx];
                if self.fired.contains(&rule.id) || self.facts.is_true(&rule.then) {
                    continue;
                }
                if !rule.when.eval(self.facts.assignment()) {
                    continue;
                }
                (rule.id.clone(), rule.then.clone())
            };
            debug!("rule {} fired: {} := true", id, then);
            self.facts.assert_fact(&then);
            self.fired.insert(id.clone());
            fired.push(id);
        }
        fired
    }

    /// Repeat `fire_once` until an empty pass or the iteration cap,
    /// whichever comes first, accumulating fired rule ids. The cap is the
    /// only defense against pathological rule sets; there is no cycle
    /// detection.
    pub fn run_to_fixpoint(&mut self, max_iters: usize) -> Vec<String> {
        let mut all_fired = Vec::new();
        for pass in 0..max_iters {
            let fired = self.fire_once();
            if fired.is_empty() {
                debug!("fixpoint reached after {} passes", pass);
                break;
            }
            all_fired.extend(fired);
        }
        all_fired
    }

    /// Evaluate a goal against the current facts. On success the result
    /// carries a freshly built explanation tree; the tree is never cached
    /// and never mutated afterwards.
    pub fn query(&self, goal: &Formula) -> QueryResult {
        let holds = goal.eval(self.facts.assignment());
        let explanation = if holds {
            let mut visited = HashSet::new();
            Some(self.explain(goal, &mut visited, 0))
        } else {
            None
        };
        QueryResult { holds, explanation }
    }
}
