#![warn(clippy::all, clippy::pedantic)]
//! Clause storage.
//!
//! A clause is a disjunction of literals. Literal order carries no logical
//! meaning but positions 0 and 1 are the watched slots: propagation keeps
//! the invariant that a watched literal is only false while the clause is
//! satisfied or about to propagate.

use crate::sat::literal::Literal;
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;

/// Inline storage for the common short clause.
pub type LiteralVec = SmallVec<[Literal; 8]>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause {
    literals: LiteralVec,
    /// Literal block distance, computed when the clause is learned.
    pub lbd: u32,
    learned: bool,
    deleted: bool,
}

impl Clause {
    #[must_use]
    pub fn new(literals: LiteralVec) -> Self {
        Self {
            literals,
            lbd: 0,
            learned: false,
            deleted: false,
        }
    }

    #[must_use]
    pub fn learned(literals: LiteralVec, lbd: u32) -> Self {
        Self {
            literals,
            lbd,
            learned: true,
            deleted: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    #[must_use]
    pub const fn is_learned(&self) -> bool {
        self.learned
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Tombstones the clause. Callers must detach its watches first.
    pub fn delete(&mut self) {
        self.deleted = true;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.literals.swap(i, j);
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl IndexMut<usize> for Clause {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.literals[index]
    }
}
