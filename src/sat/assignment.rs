#![warn(clippy::all, clippy::pedantic)]
//! Variable assignments and the model returned on SAT.

use crate::sat::literal::{Literal, Variable};

/// The engine's working assignment: tri-state per variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    values: Vec<Option<bool>>,
    assigned: usize,
}

impl Assignment {
    #[must_use]
    pub fn new(num_vars: Variable) -> Self {
        Self {
            values: vec![None; num_vars as usize + 1],
            assigned: 0,
        }
    }

    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        self.values[var as usize]
    }

    /// The truth value of `lit` under the current assignment, `None` while
    /// its variable is unassigned.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.value(lit.variable()).map(|b| b == lit.polarity())
    }

    /// Makes `lit` true. The variable must be unassigned.
    pub fn assign(&mut self, lit: Literal) {
        let slot = &mut self.values[lit.variable() as usize];
        debug_assert!(slot.is_none(), "variable assigned twice");
        *slot = Some(lit.polarity());
        self.assigned += 1;
    }

    pub fn unassign(&mut self, var: Variable) {
        let slot = &mut self.values[var as usize];
        debug_assert!(slot.is_some(), "unassigning an unassigned variable");
        *slot = None;
        self.assigned -= 1;
    }

    #[must_use]
    pub fn is_assigned(&self, var: Variable) -> bool {
        self.value(var).is_some()
    }

    #[must_use]
    pub fn all_assigned(&self) -> bool {
        self.assigned == self.values.len() - 1
    }
}

/// A total satisfying assignment. Variables the engine never had to decide
/// default to `false`, a stable rule that keeps output reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    #[must_use]
    pub fn value(&self, var: Variable) -> bool {
        self.values.get(var as usize).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> bool {
        self.value(lit.variable()) == lit.polarity()
    }

    #[must_use]
    pub fn variable_count(&self) -> Variable {
        #[allow(clippy::cast_possible_truncation)]
        {
            self.values.len().saturating_sub(1) as Variable
        }
    }

    /// DIMACS convention: one signed literal per variable, 1-based.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn literals(&self) -> Vec<i32> {
        (1..self.values.len())
            .map(|var| if self.values[var] { var as i32 } else { -(var as i32) })
            .collect()
    }
}

impl From<&Assignment> for Model {
    fn from(assignment: &Assignment) -> Self {
        Self {
            values: assignment
                .values
                .iter()
                .map(|v| v.unwrap_or(false))
                .collect(),
        }
    }
}
