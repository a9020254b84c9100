//! Formula rewriting: simplification and the normal forms.
//!
//! All transformations preserve semantic equivalence but not minimality. CNF
//! and DNF conversion distribute directly over the NNF tree with no
//! definitional (Tseitin-style) fallback, so adversarial nested-biconditional
//! input can blow up exponentially; callers accept that cost.

use crate::formula::Formula;

/// Simplify to a fixpoint.
///
/// Each pass rewrites bottom-up: constant folding, double-negation
/// elimination, idempotence, complements, absorption, identity, domination,
/// and unwrapping of parenthesis groups. One rewrite can expose another, so
/// passes repeat until nothing changes. Every rule strictly shrinks the tree,
/// which bounds the loop.
pub fn simplify(formula: &Formula) -> Formula {
    let mut current = formula.clone();
    loop {
        let next = simplify_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn simplify_pass(formula: &Formula) -> Formula {
    match formula {
        Formula::True | Formula::False | Formula::Var(_) => formula.clone(),
        Formula::Group(inner) => simplify_pass(inner),
        Formula::Not(inner) => {
            let inner = simplify_pass(inner);
            match inner {
                Formula::True => Formula::False,
                Formula::False => Formula::True,
                Formula::Not(f) => *f,
                other => other.negate(),
            }
        }
        Formula::And(l, r) => simplify_and(simplify_pass(l), simplify_pass(r)),
        Formula::Or(l, r) => simplify_or(simplify_pass(l), simplify_pass(r)),
        Formula::Implies(l, r) => simplify_implies(simplify_pass(l), simplify_pass(r)),
        Formula::Iff(l, r) => simplify_iff(simplify_pass(l), simplify_pass(r)),
    }
}

/// Whether one formula is the negation of the other.
fn complementary(a: &Formula, b: &Formula) -> bool {
    matches!(a, Formula::Not(inner) if **inner == *b)
        || matches!(b, Formula::Not(inner) if **inner == *a)
}

fn simplify_and(l: Formula, r: Formula) -> Formula {
    if l == Formula::False || r == Formula::False {
        return Formula::False;
    }
    if l == Formula::True {
        return r;
    }
    if r == Formula::True {
        return l;
    }
    if l == r {
        return l;
    }
    if complementary(&l, &r) {
        return Formula::False;
    }
    // Absorption: A & (A | B) = A
    if let Formula::Or(a, b) = &r {
        if **a == l || **b == l {
            return l;
        }
    }
    if let Formula::Or(a, b) = &l {
        if **a == r || **b == r {
            return r;
        }
    }
    l.and(r)
}

fn simplify_or(l: Formula, r: Formula) -> Formula {
    if l == Formula::True || r == Formula::True {
        return Formula::True;
    }
    if l == Formula::False {
        return r;
    }
    if r == Formula::False {
        return l;
    }
    if l == r {
        return l;
    }
    if complementary(&l, &r) {
        return Formula::True;
    }
    // Absorption: A | (A & B) = A
    if let Formula::And(a, b) = &r {
        if **a == l || **b == l {
            return l;
        }
    }
    if let Formula::And(a, b) = &l {
        if **a == r || **b == r {
            return r;
        }
    }
    l.or(r)
}

fn simplify_implies(l: Formula, r: Formula) -> Formula {
    if l == Formula::False || r == Formula::True {
        return Formula::True;
    }
    if l == Formula::True {
        return r;
    }
    if r == Formula::False {
        // Leaves a possible double negation; the fixpoint loop collapses it.
        return l.negate();
    }
    if l == r {
        return Formula::True;
    }
    l.implies(r)
}

fn simplify_iff(l: Formula, r: Formula) -> Formula {
    if l == Formula::True {
        return r;
    }
    if r == Formula::True {
        return l;
    }
    if l == Formula::False {
        return r.negate();
    }
    if r == Formula::False {
        return l.negate();
    }
    if l == r {
        return Formula::True;
    }
    if complementary(&l, &r) {
        return Formula::False;
    }
    l.iff(r)
}

/// Negation normal form: implication and biconditional eliminated, negation
/// pushed onto variables via De Morgan, double negation collapsed.
pub fn to_nnf(formula: &Formula) -> Formula {
    nnf(formula, false)
}

fn nnf(formula: &Formula, negated: bool) -> Formula {
    match (formula, negated) {
        (Formula::True, false) | (Formula::False, true) => Formula::True,
        (Formula::True, true) | (Formula::False, false) => Formula::False,
        (Formula::Var(name), false) => Formula::var(name.clone()),
        (Formula::Var(name), true) => Formula::var(name.clone()).negate(),
        (Formula::Group(inner), neg) => nnf(inner, neg),
        (Formula::Not(inner), neg) => nnf(inner, !neg),
        (Formula::And(l, r), false) => nnf(l, false).and(nnf(r, false)),
        // De Morgan: !(A & B) = !A | !B
        (Formula::And(l, r), true) => nnf(l, true).or(nnf(r, true)),
        (Formula::Or(l, r), false) => nnf(l, false).or(nnf(r, false)),
        // De Morgan: !(A | B) = !A & !B
        (Formula::Or(l, r), true) => nnf(l, true).and(nnf(r, true)),
        // A => B = !A | B
        (Formula::Implies(l, r), false) => nnf(l, true).or(nnf(r, false)),
        // !(A => B) = A & !B
        (Formula::Implies(l, r), true) => nnf(l, false).and(nnf(r, true)),
        // A <=> B = (!A | B) & (A | !B)
        (Formula::Iff(l, r), false) => {
            let forward = nnf(l, true).or(nnf(r, false));
            let backward = nnf(l, false).or(nnf(r, true));
            forward.and(backward)
        }
        // !(A <=> B) = (A & !B) | (!A & B)
        (Formula::Iff(l, r), true) => {
            let left = nnf(l, false).and(nnf(r, true));
            let right = nnf(l, true).and(nnf(r, false));
            left.or(right)
        }
    }
}

/// Conjunctive normal form: NNF, then Or distributed over And bottom-up.
pub fn to_cnf(formula: &Formula) -> Formula {
    distribute_cnf(to_nnf(formula))
}

fn distribute_cnf(formula: Formula) -> Formula {
    match formula {
        Formula::And(l, r) => distribute_cnf(*l).and(distribute_cnf(*r)),
        Formula::Or(l, r) => distribute_or(distribute_cnf(*l), distribute_cnf(*r)),
        other => other,
    }
}

fn distribute_or(l: Formula, r: Formula) -> Formula {
    match (l, r) {
        (Formula::And(a, b), r) => distribute_or(*a, r.clone()).and(distribute_or(*b, r)),
        (l, Formula::And(a, b)) => distribute_or(l.clone(), *a).and(distribute_or(l, *b)),
        (l, r) => l.or(r),
    }
}

/// Disjunctive normal form: NNF, then And distributed over Or bottom-up.
pub fn to_dnf(formula: &Formula) -> Formula {
    distribute_dnf(to_nnf(formula))
}

fn distribute_dnf(formula: Formula) -> Formula {
    match formula {
        Formula::Or(l, r) => distribute_dnf(*l).or(distribute_dnf(*r)),
        Formula::And(l, r) => distribute_and(distribute_dnf(*l), distribute_dnf(*r)),
        other => other,
    }
}

fn distribute_and(l: Formula, r: Formula) -> Formula {
    match (l, r) {
        (Formula::Or(a, b), r) => distribute_and(*a, r.clone()).or(distribute_and(*b, r)),
        (l, Formula::Or(a, b)) => distribute_and(l.clone(), *a).or(distribute_and(l, *b)),
        (l, r) => l.and(r),
    }
}
