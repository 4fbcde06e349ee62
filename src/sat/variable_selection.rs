#![warn(clippy::all, clippy::pedantic)]
//! Decision variable selection.
//!
//! The default policy is VSIDS: every variable carries an activity score,
//! variables involved in conflicts are bumped, and all scores decay
//! multiplicatively (implemented as a growing bump increment). Selection is
//! a lazy max-heap: stale entries are skipped on pop, and backtracking
//! re-inserts unassigned variables.
//!
//! Both policies are fully deterministic for a fixed input clause order;
//! activity ties break toward the smallest variable id.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::literal::Variable;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

pub trait VariableSelection {
    fn new(num_vars: Variable, clauses: &[Clause]) -> Self;

    /// Picks an unassigned variable, or `None` when all are assigned.
    fn pick(&mut self, assignment: &Assignment) -> Option<Variable>;

    fn bump(&mut self, var: Variable);

    /// Called once per conflict.
    fn decay(&mut self);

    /// Re-enters a variable into consideration after backtracking.
    fn on_unassign(&mut self, var: Variable);
}

const DECAY: f64 = 0.95;
const RESCALE_LIMIT: f64 = 1e100;

type HeapEntry = (OrderedFloat<f64>, Reverse<Variable>);

#[derive(Debug, Clone, Default)]
pub struct Vsids {
    activity: Vec<f64>,
    heap: BinaryHeap<HeapEntry>,
    inc: f64,
}

impl Vsids {
    fn push(&mut self, var: Variable) {
        self.heap
            .push((OrderedFloat(self.activity[var as usize]), Reverse(var)));
    }

    /// Scales everything down before the increment overflows. All heap
    /// entries go stale at once, so the heap is rebuilt.
    fn rescale(&mut self) {
        for a in &mut self.activity {
            *a /= RESCALE_LIMIT;
        }
        self.inc /= RESCALE_LIMIT;
        self.heap.clear();
        #[allow(clippy::cast_possible_truncation)]
        for var in 1..self.activity.len() as Variable {
            self.push(var);
        }
    }
}

impl VariableSelection for Vsids {
    fn new(num_vars: Variable, clauses: &[Clause]) -> Self {
        // Initial activity is the occurrence count in the input clauses.
        let mut activity = vec![0.0; num_vars as usize + 1];
        for clause in clauses {
            for &lit in clause.iter() {
                activity[lit.variable() as usize] += 1.0;
            }
        }

        let mut vsids = Self {
            activity,
            heap: BinaryHeap::with_capacity(num_vars as usize),
            inc: 1.0,
        };
        for var in 1..=num_vars {
            vsids.push(var);
        }
        vsids
    }

    fn pick(&mut self, assignment: &Assignment) -> Option<Variable> {
        while let Some((key, Reverse(var))) = self.heap.pop() {
            if key.0 != self.activity[var as usize] {
                // Stale entry from before a bump or rescale.
                continue;
            }
            if assignment.is_assigned(var) {
                continue;
            }
            return Some(var);
        }
        None
    }

    fn bump(&mut self, var: Variable) {
        self.activity[var as usize] += self.inc;
        if self.activity[var as usize] > RESCALE_LIMIT {
            self.rescale();
        } else {
            self.push(var);
        }
    }

    fn decay(&mut self) {
        self.inc /= DECAY;
    }

    fn on_unassign(&mut self, var: Variable) {
        self.push(var);
    }
}

/// Simplest deterministic policy: the lowest-numbered unassigned variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrder {
    num_vars: Variable,
}

impl VariableSelection for FixedOrder {
    fn new(num_vars: Variable, _clauses: &[Clause]) -> Self {
        Self { num_vars }
    }

    fn pick(&mut self, assignment: &Assignment) -> Option<Variable> {
        (1..=self.num_vars).find(|&var| !assignment.is_assigned(var))
    }

    fn bump(&mut self, _var: Variable) {}

    fn decay(&mut self) {}

    fn on_unassign(&mut self, _var: Variable) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::Literal;

    fn clause(lits: &[i32]) -> Clause {
        Clause::new(lits.iter().map(|&l| Literal::from_dimacs(l)).collect())
    }

    #[test]
    fn vsids_prefers_frequent_variables() {
        let clauses = vec![clause(&[1, 2]), clause(&[2, 3]), clause(&[-2])];
        let mut vsids = Vsids::new(3, &clauses);
        let assignment = Assignment::new(3);
        assert_eq!(vsids.pick(&assignment), Some(2));
    }

    #[test]
    fn vsids_ties_break_toward_smaller_ids() {
        let clauses = vec![clause(&[1, 2, 3])];
        let mut vsids = Vsids::new(3, &clauses);
        let assignment = Assignment::new(3);
        assert_eq!(vsids.pick(&assignment), Some(1));
    }

    #[test]
    fn vsids_bump_overtakes() {
        let clauses = vec![clause(&[1, 2])];
        let mut vsids = Vsids::new(2, &clauses);
        vsids.bump(2);
        let assignment = Assignment::new(2);
        assert_eq!(vsids.pick(&assignment), Some(2));
    }

    #[test]
    fn unassign_reinserts() {
        let clauses = vec![clause(&[1])];
        let mut vsids = Vsids::new(1, &clauses);
        let mut assignment = Assignment::new(1);
        assert_eq!(vsids.pick(&assignment), Some(1));
        assignment.assign(Literal::new(1, true));
        assert_eq!(vsids.pick(&assignment), None);
        assignment.unassign(1);
        vsids.on_unassign(1);
        assert_eq!(vsids.pick(&assignment), Some(1));
    }

    #[test]
    fn fixed_order_scans_by_id() {
        let mut fixed = FixedOrder::new(3, &[]);
        let mut assignment = Assignment::new(3);
        assignment.assign(Literal::new(1, true));
        assert_eq!(fixed.pick(&assignment), Some(2));
    }
}
