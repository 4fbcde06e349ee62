#![warn(clippy::all, clippy::pedantic)]
//! First-UIP conflict analysis.
//!
//! Starting from the conflicting clause, resolution walks the trail
//! backwards through reason clauses until exactly one literal of the
//! current decision level remains: the first unique implication point.
//! The result is an asserting clause that becomes unit after backtracking
//! to the second-highest level it mentions.

use crate::sat::clause::{Clause, LiteralVec};
use crate::sat::literal::{Literal, Variable};
use crate::sat::trail::{Reason, Trail};
use rustc_hash::FxHashSet;
use smallvec::smallvec;

/// Outcome of analysing one conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// The learned clause. Slot 0 holds the asserting literal; slot 1 (if
    /// present) a literal of the backtrack level, so both watched slots
    /// behave after the jump.
    pub literals: LiteralVec,
    pub backtrack_level: u32,
    /// Number of distinct decision levels in the clause.
    pub lbd: u32,
    /// Variables touched by the resolution, for activity bumping.
    pub bumped: Vec<Variable>,
}

/// Derives the first-UIP clause for the conflict at `db[conflict]`.
///
/// Must only be called with `current_level > 0`; a conflict at level 0 is
/// already a proof of unsatisfiability.
#[must_use]
pub fn analyze(db: &[Clause], trail: &Trail, current_level: u32, conflict: usize) -> Analysis {
    debug_assert!(current_level > 0);

    let mut seen = vec![false; trail.num_vars() as usize + 1];
    // Slot 0 is reserved for the asserting literal.
    let mut learnt: LiteralVec = smallvec![Literal::default()];
    let mut bumped = Vec::new();
    let mut unresolved = 0_usize;
    let mut trail_idx = trail.len();
    let mut clause_idx = conflict;
    let mut first = true;

    let resolved = loop {
        // The first clause is the conflict itself and contributes every
        // literal; reason clauses store their propagated literal (the one
        // being resolved away) at slot 0 and contribute the rest.
        for &q in db[clause_idx].iter().skip(usize::from(!first)) {
            let var = q.variable();
            if seen[var as usize] || trail.level_of(var) == 0 {
                continue;
            }
            seen[var as usize] = true;
            bumped.push(var);
            if trail.level_of(var) >= current_level {
                unresolved += 1;
            } else {
                learnt.push(q);
            }
        }
        first = false;

        // Most recent trail literal still participating in the conflict.
        loop {
            trail_idx -= 1;
            if seen[trail.step(trail_idx).lit.variable() as usize] {
                break;
            }
        }
        let step = trail.step(trail_idx);
        seen[step.lit.variable() as usize] = false;
        unresolved -= 1;

        if unresolved == 0 {
            break step.lit;
        }
        clause_idx = match step.reason {
            Reason::Clause(c) => c,
            // The decision is the oldest current-level literal, so the
            // counter reaches zero at or before it.
            Reason::Decision => unreachable!("resolved past the decision literal"),
        };
    };

    learnt[0] = resolved.negated();

    let backtrack_level = if learnt.len() == 1 {
        0
    } else {
        // Pull the deepest remaining literal into the second watched slot.
        let mut deepest = 1;
        for i in 2..learnt.len() {
            if trail.level_of(learnt[i].variable()) > trail.level_of(learnt[deepest].variable()) {
                deepest = i;
            }
        }
        learnt.swap(1, deepest);
        trail.level_of(learnt[1].variable())
    };

    #[allow(clippy::cast_possible_truncation)]
    let lbd = learnt
        .iter()
        .map(|l| trail.level_of(l.variable()))
        .collect::<FxHashSet<_>>()
        .len() as u32;

    Analysis {
        literals: learnt,
        backtrack_level,
        lbd,
        bumped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(lits: &[i32]) -> Clause {
        Clause::new(lits.iter().map(|&l| Literal::from_dimacs(l)).collect())
    }

    fn lit(value: i32) -> Literal {
        Literal::from_dimacs(value)
    }

    #[test]
    fn conflict_with_decision_learns_its_negation() {
        // Decide 1; clause (2 -1) propagates 2; clause (-1 -2) conflicts.
        // Reason clauses keep their propagated literal in slot 0.
        let db = vec![clause(&[2, -1]), clause(&[-1, -2])];
        let mut trail = Trail::new(2);
        trail.push(lit(1), 1, Reason::Decision);
        trail.push(lit(2), 1, Reason::Clause(0));

        let analysis = analyze(&db, &trail, 1, 1);
        assert_eq!(analysis.literals.as_slice(), &[lit(-1)]);
        assert_eq!(analysis.backtrack_level, 0);
        assert_eq!(analysis.lbd, 1);
    }

    #[test]
    fn asserting_clause_spans_two_levels() {
        // Decide 1 at level 1, decide 3 at level 2; (-1 -3 4) propagates 4,
        // (-3 -4) conflicts. First UIP resolution yields (-3 v -1)
        // backtracking to level 1.
        let db = vec![clause(&[-1, -3, 4]), clause(&[-3, -4])];
        let mut trail = Trail::new(4);
        trail.push(lit(1), 1, Reason::Decision);
        trail.push(lit(3), 2, Reason::Decision);
        trail.push(lit(4), 2, Reason::Clause(0));

        // Reason clauses keep their propagated literal in slot 0.
        let mut db = db;
        db[0].swap(0, 2);

        let analysis = analyze(&db, &trail, 2, 1);
        assert_eq!(analysis.literals[0], lit(-3));
        assert_eq!(analysis.literals.len(), 2);
        assert_eq!(analysis.literals[1], lit(-1));
        assert_eq!(analysis.backtrack_level, 1);
        assert_eq!(analysis.lbd, 2);
    }
}
