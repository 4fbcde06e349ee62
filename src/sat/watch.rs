#![warn(clippy::all, clippy::pedantic)]
//! Per-literal watch lists.
//!
//! Each clause of length two or more watches its literals at positions 0
//! and 1. When a literal becomes false the solver only visits the clauses
//! watching it instead of rescanning the whole database.

use crate::sat::clause::Clause;
use crate::sat::literal::{Literal, Variable};
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;

type WatchList = SmallVec<[usize; 6]>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchLists(Vec<WatchList>);

impl WatchLists {
    #[must_use]
    pub fn new(num_vars: Variable) -> Self {
        Self(vec![WatchList::new(); 2 * num_vars as usize + 2])
    }

    /// Registers `clause` (stored at `idx`) under its two watched slots.
    pub fn attach(&mut self, clause: &Clause, idx: usize) {
        debug_assert!(clause.len() >= 2, "unit clauses are never watched");
        debug_assert_ne!(clause[0], clause[1]);
        self[clause[0]].push(idx);
        self[clause[1]].push(idx);
    }

    /// Removes `idx` from the lists of both watched literals.
    pub fn detach(&mut self, first: Literal, second: Literal, idx: usize) {
        self[first].retain(|&mut c| c != idx);
        self[second].retain(|&mut c| c != idx);
    }
}

impl Index<Literal> for WatchLists {
    type Output = WatchList;

    fn index(&self, lit: Literal) -> &Self::Output {
        &self.0[lit.index()]
    }
}

impl IndexMut<Literal> for WatchLists {
    fn index_mut(&mut self, lit: Literal) -> &mut Self::Output {
        &mut self.0[lit.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(lits: &[i32]) -> Clause {
        Clause::new(lits.iter().map(|&l| Literal::from_dimacs(l)).collect())
    }

    #[test]
    fn attach_registers_both_watches() {
        let mut watches = WatchLists::new(3);
        let c = clause(&[1, -2, 3]);
        watches.attach(&c, 0);
        assert_eq!(watches[Literal::from_dimacs(1)].as_slice(), &[0]);
        assert_eq!(watches[Literal::from_dimacs(-2)].as_slice(), &[0]);
        assert!(watches[Literal::from_dimacs(3)].is_empty());
    }

    #[test]
    fn detach_removes_only_the_clause() {
        let mut watches = WatchLists::new(2);
        let a = clause(&[1, 2]);
        let b = clause(&[1, -2]);
        watches.attach(&a, 0);
        watches.attach(&b, 1);
        watches.detach(a[0], a[1], 0);
        assert_eq!(watches[Literal::from_dimacs(1)].as_slice(), &[1]);
        assert!(watches[Literal::from_dimacs(2)].is_empty());
    }
}
