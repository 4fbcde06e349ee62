#![warn(clippy::all, clippy::pedantic)]
//! The CNF store: an immutable-once-built set of original clauses.
//!
//! Clauses are normalized at insertion: duplicate literals are removed and
//! tautological clauses (containing a variable and its negation) are dropped
//! entirely, since they constrain nothing. An empty clause is recorded and
//! makes the instance unsatisfiable without running the engine.

use crate::sat::assignment::Model;
use crate::sat::clause::{Clause, LiteralVec};
use crate::sat::literal::{Literal, Variable};
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Validation failures raised by [`Cnf::add_clause`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CnfError {
    /// Zero is the DIMACS clause terminator, and `i32::MIN` has no
    /// negation; neither can name a variable.
    #[error("literal 0 or -2147483648 is not a valid literal")]
    InvalidLiteral,
    /// A literal referenced a variable above the declared bound.
    #[error("variable {var} exceeds the declared variable count {declared}")]
    VariableOutOfRange { var: Variable, declared: Variable },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
    num_vars: Variable,
    declared: Option<Variable>,
    empty_clauses: usize,
}

impl Cnf {
    /// An empty store whose variable count grows with the clauses added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with a declared variable bound. `add_clause` rejects
    /// literals whose magnitude exceeds it.
    #[must_use]
    pub fn with_vars(num_vars: Variable) -> Self {
        Self {
            declared: Some(num_vars),
            num_vars,
            ..Self::default()
        }
    }

    /// Adds one clause given as signed DIMACS literals.
    ///
    /// # Errors
    ///
    /// [`CnfError::InvalidLiteral`] if any literal is 0 or `i32::MIN`, and
    /// [`CnfError::VariableOutOfRange`] if a declared bound is exceeded.
    /// The clause is validated in full before anything is stored.
    pub fn add_clause<I>(&mut self, literals: I) -> Result<(), CnfError>
    where
        I: IntoIterator<Item = i32>,
    {
        let mut seen = FxHashSet::default();
        let mut lits = LiteralVec::new();
        let mut tautology = false;
        let mut max_var = self.num_vars;

        for value in literals {
            if value == 0 || value == i32::MIN {
                return Err(CnfError::InvalidLiteral);
            }
            let var = value.unsigned_abs();
            if let Some(declared) = self.declared {
                if var > declared {
                    return Err(CnfError::VariableOutOfRange { var, declared });
                }
            }
            tautology |= seen.contains(&-value);
            if seen.insert(value) {
                lits.push(Literal::from_dimacs(value));
            }
            max_var = max_var.max(var);
        }

        // Nothing is committed until the whole clause has validated.
        self.num_vars = max_var;

        if tautology {
            return Ok(());
        }

        if lits.is_empty() {
            self.empty_clauses += 1;
        } else {
            self.clauses.push(Clause::new(lits));
        }

        Ok(())
    }

    /// The declared variable bound, or the highest magnitude referenced.
    #[must_use]
    pub fn variable_count(&self) -> Variable {
        self.num_vars
    }

    /// Number of stored (non-empty, non-tautological) clauses.
    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// `true` when no clause at all was added, including empty ones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.empty_clauses == 0
    }

    /// An empty clause was added, so the instance is trivially unsatisfiable.
    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.empty_clauses > 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Checks a candidate model against every stored clause. Used by the
    /// test suite and by callers that want to audit a SAT answer.
    #[must_use]
    pub fn is_satisfied_by(&self, model: &Model) -> bool {
        !self.has_empty_clause()
            && self
                .clauses
                .iter()
                .all(|c| c.iter().any(|&lit| model.literal_value(lit)))
    }
}
