//! End-to-end solver properties, cross-checked against a brute-force
//! enumeration on small instances.

use clausal::sat::cnf::Cnf;
use clausal::sat::constraints;
use clausal::sat::restarter::Restarter;
use clausal::sat::solver::{self, Outcome, Solver};
use clausal::sat::variable_selection::FixedOrder;
use proptest::prelude::*;

/// Restarts on every conflict, so the restart path runs constantly even on
/// instances far too small for the default Luby schedule to fire.
#[derive(Debug, Clone, Copy, Default)]
struct EveryConflict(usize);

impl Restarter for EveryConflict {
    fn new() -> Self {
        Self::default()
    }

    fn should_restart(&mut self) -> bool {
        self.0 += 1;
        true
    }

    fn num_restarts(&self) -> usize {
        self.0
    }
}

fn cnf_of(clauses: &[Vec<i32>]) -> Cnf {
    let mut cnf = Cnf::new();
    for clause in clauses {
        cnf.add_clause(clause.iter().copied()).unwrap();
    }
    cnf
}

/// Exhaustive satisfiability check, usable up to ~20 variables.
fn brute_force_sat(clauses: &[Vec<i32>], num_vars: u32) -> bool {
    assert!(num_vars <= 20);
    (0_u32..1 << num_vars).any(|bits| {
        clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let var = lit.unsigned_abs();
                let value = bits >> (var - 1) & 1 == 1;
                value == lit.is_positive()
            })
        })
    })
}

#[test]
fn satisfiable_model_satisfies_every_clause() {
    let clauses = vec![
        vec![1, 2, -3],
        vec![-1, 3],
        vec![2, 3, 4],
        vec![-4, -2],
        vec![1, -2],
    ];
    let cnf = cnf_of(&clauses);
    let outcome = solver::solve(&cnf);
    let model = outcome.model().expect("satisfiable");
    assert!(cnf.is_satisfied_by(model));
}

#[test]
fn only_model_is_both_true() {
    let cnf = cnf_of(&[vec![1, 2], vec![-1, 2], vec![1, -2]]);
    let model = solver::solve(&cnf).model().cloned().expect("satisfiable");
    assert!(model.value(1));
    assert!(model.value(2));
}

#[test]
fn unit_contradiction_is_unsat() {
    let cnf = cnf_of(&[vec![1], vec![-1]]);
    assert_eq!(solver::solve(&cnf), Outcome::Unsat);
}

#[test]
fn exactly_one_of_four() {
    let mut cnf = Cnf::new();
    constraints::exactly_one(&mut cnf, &[1, 2, 3, 4]).unwrap();
    let model = solver::solve(&cnf).model().cloned().expect("satisfiable");
    let true_count = (1..=4).filter(|&v| model.value(v)).count();
    assert_eq!(true_count, 1);
}

#[test]
fn empty_clause_set_is_sat() {
    assert!(solver::solve(&Cnf::new()).is_sat());
}

#[test]
fn empty_clause_is_unsat() {
    let mut cnf = Cnf::new();
    cnf.add_clause([]).unwrap();
    assert_eq!(solver::solve(&cnf), Outcome::Unsat);
}

/// Pigeonhole: `holes + 1` pigeons into `holes` holes, one hole each.
fn pigeonhole(holes: i32) -> Cnf {
    let mut cnf = Cnf::new();
    let var = |pigeon: i32, hole: i32| (pigeon - 1) * holes + hole;
    for pigeon in 1..=holes + 1 {
        let hole_vars: Vec<i32> = (1..=holes).map(|h| var(pigeon, h)).collect();
        constraints::at_least_one(&mut cnf, &hole_vars).unwrap();
    }
    for hole in 1..=holes {
        let pigeon_vars: Vec<i32> = (1..=holes + 1).map(|p| var(p, hole)).collect();
        constraints::at_most_one(&mut cnf, &pigeon_vars).unwrap();
    }
    cnf
}

#[test]
fn pigeonhole_is_unsat() {
    for holes in 2..=4 {
        assert_eq!(solver::solve(&pigeonhole(holes)), Outcome::Unsat);
    }
}

#[test]
fn aggressive_restarts_preserve_unsat() {
    // Conflicts whose backjumps land at level 0 coincide with restarts here;
    // the forced literals must still propagate into the final contradiction.
    let cnf = cnf_of(&[
        vec![1, 2],
        vec![1, -2],
        vec![3, 4],
        vec![3, -4],
        vec![-1, -3],
    ]);
    let outcome = Solver::<FixedOrder, EveryConflict>::new(&cnf).solve();
    assert_eq!(outcome, Outcome::Unsat);

    let mut solver = Solver::<FixedOrder, EveryConflict>::new(&pigeonhole(3));
    assert_eq!(solver.solve(), Outcome::Unsat);
    assert!(solver.stats().restarts > 0);
}

#[test]
fn aggressive_restarts_find_satisfying_models() {
    // Deciding 1 false conflicts immediately, so the unit 1 is learned and
    // a restart fires with it still queued; the rest of the model must then
    // arrive by propagation alone.
    let cnf = cnf_of(&[vec![1, 2], vec![1, -2], vec![-1, 3], vec![-1, -3, 2]]);
    let mut solver = Solver::<FixedOrder, EveryConflict>::new(&cnf);
    let outcome = solver.solve();
    let model = outcome.model().expect("satisfiable");
    assert!(cnf.is_satisfied_by(model));
    assert!(solver.stats().restarts > 0);
}

#[test]
fn unsat_stays_unsat_under_added_clauses() {
    let mut clauses = vec![vec![1], vec![-1]];
    assert_eq!(solver::solve(&cnf_of(&clauses)), Outcome::Unsat);
    clauses.push(vec![2, 3]);
    assert_eq!(solver::solve(&cnf_of(&clauses)), Outcome::Unsat);
}

#[test]
fn independent_engines_agree() {
    let clauses = vec![vec![1, -2, 3], vec![-1, 2], vec![-3, -2], vec![1, 3]];
    let cnf = cnf_of(&clauses);
    let mut first_engine: Solver = Solver::new(&cnf);
    let mut second_engine: Solver = Solver::new(&cnf);
    let first = first_engine.solve();
    let second = second_engine.solve();
    assert_eq!(first.is_sat(), second.is_sat());
    if let Some(model) = second.model() {
        assert!(cnf.is_satisfied_by(model));
    }
}

#[test]
fn agrees_with_brute_force_on_fixed_instances() {
    let fixtures: Vec<(Vec<Vec<i32>>, u32)> = vec![
        (vec![vec![1, 2], vec![-1, -2]], 2),
        (vec![vec![1], vec![-1, 2], vec![-2, 3], vec![-1, -3]], 3),
        (
            vec![vec![1, 2, 3], vec![-1, -2], vec![-1, -3], vec![-2, -3], vec![-1], vec![-2], vec![-3]],
            3,
        ),
        (vec![vec![-1, 2], vec![-2, 1], vec![1, 2]], 2),
    ];
    for (clauses, num_vars) in fixtures {
        let expected = brute_force_sat(&clauses, num_vars);
        let outcome = solver::solve(&cnf_of(&clauses));
        assert_eq!(outcome.is_sat(), expected, "clauses: {clauses:?}");
        if let Some(model) = outcome.model() {
            assert!(cnf_of(&clauses).is_satisfied_by(model));
        }
    }
}

fn arb_clauses(max_vars: u32) -> impl Strategy<Value = Vec<Vec<i32>>> {
    let max = i32::try_from(max_vars).unwrap();
    let literal = (1..=max).prop_flat_map(|v| prop_oneof![Just(v), Just(-v)]);
    let clause = prop::collection::vec(literal, 1..=3);
    prop::collection::vec(clause, 1..=24)
}

proptest! {
    #[test]
    fn random_instances_match_brute_force(clauses in arb_clauses(8)) {
        let cnf = cnf_of(&clauses);
        let outcome = solver::solve(&cnf);
        prop_assert_eq!(outcome.is_sat(), brute_force_sat(&clauses, 8));
        if let Some(model) = outcome.model() {
            prop_assert!(cnf.is_satisfied_by(model));
        }
    }
}
