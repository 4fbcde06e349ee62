#![warn(clippy::all, clippy::pedantic)]
//! Phase saving.
//!
//! When a variable is picked for a decision, it is assigned the polarity it
//! last held, so work from before a backjump or restart is not thrown away.
//! Variables never assigned before default to `false`; together with the
//! deterministic selection policies this makes solve runs reproducible.

use crate::sat::literal::{Literal, Variable};
use bit_vec::BitVec;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedPhases(BitVec);

impl SavedPhases {
    #[must_use]
    pub fn new(num_vars: Variable) -> Self {
        Self(BitVec::from_elem(num_vars as usize + 1, false))
    }

    /// Records the polarity `lit` was just assigned.
    pub fn save(&mut self, lit: Literal) {
        self.0.set(lit.variable() as usize, lit.polarity());
    }

    /// The polarity to try next for `var`.
    #[must_use]
    pub fn next(&self, var: Variable) -> bool {
        self.0.get(var as usize).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_false() {
        let phases = SavedPhases::new(4);
        assert!(!phases.next(1));
        assert!(!phases.next(4));
    }

    #[test]
    fn remembers_last_polarity() {
        let mut phases = SavedPhases::new(2);
        phases.save(Literal::new(1, true));
        assert!(phases.next(1));
        phases.save(Literal::new(1, false));
        assert!(!phases.next(1));
        assert!(!phases.next(2));
    }
}
