//! Property-based cross-checks between the three satisfiability deciders
//! and the rewriting transforms, using proptest.

use proptest::prelude::*;

use super::clause::CnfFormula;
use super::dpll::dpll;
use super::resolution::resolution_satisfiable;
use super::truth_table;
use crate::formula::Formula;
use crate::parser::parse;
use crate::rewrite::{simplify, to_cnf, to_dnf, to_nnf};

const VAR_POOL: [&str; 4] = ["A", "B", "C", "D"];

/// Random formula of bounded depth over a small variable pool. Depth stays
/// low because the resolution cross-check saturates the full clause set.
fn arb_formula(depth: u32) -> BoxedStrategy<Formula> {
    let leaf = prop_oneof![
        4 => (0..VAR_POOL.len()).prop_map(|i| Formula::var(VAR_POOL[i])),
        1 => Just(Formula::True),
        1 => Just(Formula::False),
    ];
    if depth == 0 {
        leaf.boxed()
    } else {
        let sub = arb_formula(depth - 1);
        prop_oneof![
            2 => leaf,
            2 => sub.clone().prop_map(|f| f.negate()),
            2 => (sub.clone(), sub.clone()).prop_map(|(a, b)| a.and(b)),
            2 => (sub.clone(), sub.clone()).prop_map(|(a, b)| a.or(b)),
            1 => (sub.clone(), sub.clone()).prop_map(|(a, b)| a.implies(b)),
            1 => (sub.clone(), sub).prop_map(|(a, b)| a.iff(b)),
        ]
        .boxed()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn solvers_agree(f in arb_formula(3)) {
        let ground_truth = truth_table::is_satisfiable(&f);
        let cnf = CnfFormula::from_formula(&f).expect("CNF conversion");
        prop_assert_eq!(dpll(&cnf).is_some(), ground_truth);
        prop_assert_eq!(resolution_satisfiable(&cnf), ground_truth);
    }

    #[test]
    fn dpll_witness_satisfies_formula(f in arb_formula(3)) {
        let cnf = CnfFormula::from_formula(&f).expect("CNF conversion");
        if let Some(model) = dpll(&cnf) {
            prop_assert!(f.eval(&model));
        }
    }

    #[test]
    fn transforms_preserve_equivalence(f in arb_formula(3)) {
        prop_assert!(truth_table::equivalent(&f, &simplify(&f)));
        prop_assert!(truth_table::equivalent(&f, &to_nnf(&f)));
        prop_assert!(truth_table::equivalent(&f, &to_cnf(&f)));
        prop_assert!(truth_table::equivalent(&f, &to_dnf(&f)));
    }

    #[test]
    fn double_negation(f in arb_formula(3)) {
        prop_assert!(truth_table::equivalent(&f, &f.clone().negate().negate()));
    }

    #[test]
    fn de_morgan(f in arb_formula(2), g in arb_formula(2)) {
        let lhs = f.clone().and(g.clone()).negate();
        let rhs = f.clone().negate().or(g.clone().negate());
        prop_assert!(truth_table::equivalent(&lhs, &rhs));

        let lhs = f.clone().or(g.clone()).negate();
        let rhs = f.negate().and(g.negate());
        prop_assert!(truth_table::equivalent(&lhs, &rhs));
    }

    #[test]
    fn tautology_duality(f in arb_formula(3)) {
        prop_assert_eq!(
            truth_table::is_tautology(&f),
            !truth_table::is_satisfiable(&f.clone().negate())
        );
        prop_assert_eq!(
            truth_table::is_contradiction(&f),
            !truth_table::is_satisfiable(&f)
        );
    }

    #[test]
    fn display_round_trips_through_parser(f in arb_formula(3)) {
        let reparsed = parse(&f.to_string()).expect("canonical form parses");
        prop_assert_eq!(reparsed, simplify(&f));
    }
}
