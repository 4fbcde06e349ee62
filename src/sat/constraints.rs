#![warn(clippy::all, clippy::pedantic)]
//! Composable cardinality constraint builders.
//!
//! Encoders that map a problem onto CNF tend to need the same handful of
//! patterns over a group of literals: at least one holds, at most one
//! holds, exactly one holds. These helpers generate the clauses once so
//! encoders never hand-roll the pairwise expansions.

use crate::sat::cnf::{Cnf, CnfError};
use itertools::Itertools;

/// At least one of `literals` is true: a single disjunction.
///
/// # Errors
///
/// Propagates validation failures from [`Cnf::add_clause`].
pub fn at_least_one(cnf: &mut Cnf, literals: &[i32]) -> Result<(), CnfError> {
    cnf.add_clause(literals.iter().copied())
}

/// At most one of `literals` is true, encoded pairwise: for every pair,
/// not both. Quadratic in the group size, which is fine for the small
/// groups cardinality constraints are typically built over.
///
/// # Errors
///
/// Propagates validation failures from [`Cnf::add_clause`].
pub fn at_most_one(cnf: &mut Cnf, literals: &[i32]) -> Result<(), CnfError> {
    for (&a, &b) in literals.iter().tuple_combinations() {
        cnf.add_clause([negated(a)?, negated(b)?])?;
    }
    Ok(())
}

/// Exactly one of `literals` is true.
///
/// # Errors
///
/// Propagates validation failures from [`Cnf::add_clause`].
pub fn exactly_one(cnf: &mut Cnf, literals: &[i32]) -> Result<(), CnfError> {
    at_least_one(cnf, literals)?;
    at_most_one(cnf, literals)
}

/// `premise` implies `conclusion`.
///
/// # Errors
///
/// Propagates validation failures from [`Cnf::add_clause`].
pub fn implies(cnf: &mut Cnf, premise: i32, conclusion: i32) -> Result<(), CnfError> {
    cnf.add_clause([negated(premise)?, conclusion])
}

/// `i32::MIN` would be rejected by `add_clause` anyway, but it has to be
/// caught before negation overflows.
fn negated(literal: i32) -> Result<i32, CnfError> {
    literal.checked_neg().ok_or(CnfError::InvalidLiteral)
}
