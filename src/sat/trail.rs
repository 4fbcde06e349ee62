#![warn(clippy::all, clippy::pedantic)]
//! The assignment trail: every assignment in order, with its decision
//! level and the clause that forced it.
//!
//! The trail doubles as the propagation queue: `head` separates the
//! literals whose consequences have been propagated from those still
//! pending. Entries above a level are popped on backtracking; a variable
//! never appears twice while assigned.

use crate::sat::literal::{Literal, Variable};

/// Why a variable was assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reason {
    /// A branching choice.
    #[default]
    Decision,
    /// Forced by the clause at this index in the solver's database.
    Clause(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub lit: Literal,
    pub level: u32,
    pub reason: Reason,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    steps: Vec<Step>,
    head: usize,
    level_of: Vec<u32>,
    reason_of: Vec<Reason>,
}

impl Trail {
    #[must_use]
    pub fn new(num_vars: Variable) -> Self {
        Self {
            steps: Vec::with_capacity(num_vars as usize),
            head: 0,
            level_of: vec![0; num_vars as usize + 1],
            reason_of: vec![Reason::Decision; num_vars as usize + 1],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn num_vars(&self) -> Variable {
        (self.level_of.len() - 1) as Variable
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Step {
        self.steps[index]
    }

    #[must_use]
    pub fn last(&self) -> Option<Step> {
        self.steps.last().copied()
    }

    pub fn push(&mut self, lit: Literal, level: u32, reason: Reason) {
        let var = lit.variable() as usize;
        self.level_of[var] = level;
        self.reason_of[var] = reason;
        self.steps.push(Step { lit, level, reason });
    }

    pub fn pop(&mut self) -> Option<Step> {
        let step = self.steps.pop()?;
        let var = step.lit.variable() as usize;
        self.level_of[var] = 0;
        self.reason_of[var] = Reason::Decision;
        self.head = self.head.min(self.steps.len());
        Some(step)
    }

    /// Next literal whose consequences have not been propagated yet.
    pub fn next_queued(&mut self) -> Option<Literal> {
        let lit = self.steps.get(self.head)?.lit;
        self.head += 1;
        Some(lit)
    }

    /// Only meaningful while the variable is assigned.
    #[must_use]
    pub fn level_of(&self, var: Variable) -> u32 {
        self.level_of[var as usize]
    }

    /// Only meaningful while the variable is assigned.
    #[must_use]
    pub fn reason_of(&self, var: Variable) -> Reason {
        self.reason_of[var as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}
