#![warn(clippy::all, clippy::pedantic)]
//! Literal and variable representation.
//!
//! A variable is a 1-based integer id. A literal packs a variable together
//! with its polarity into a single `u32`: `2 * var` is the positive literal,
//! `2 * var + 1` its negation. The packed code doubles as a dense index into
//! per-literal tables such as the watch lists.

use core::fmt;
use core::ops::Not;

/// A 1-based variable identifier. Id 0 is reserved.
pub type Variable = u32;

/// A variable or its negation, packed as `2 * var + sign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal(u32);

impl Literal {
    /// Builds a literal. `polarity` is `true` for the positive literal.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        debug_assert!(var > 0, "variable ids are 1-based");
        debug_assert!(var <= u32::MAX / 2, "variable id too large to pack");
        Self(var * 2 + u32::from(!polarity))
    }

    /// Converts a signed DIMACS literal. Magnitudes 0 and `i32::MIN` are
    /// rejected earlier, at [`crate::sat::cnf::Cnf::add_clause`].
    #[must_use]
    pub fn from_dimacs(value: i32) -> Self {
        Self::new(value.unsigned_abs(), value.is_positive())
    }

    /// The signed DIMACS rendering of this literal.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_dimacs(self) -> i32 {
        let var = self.variable() as i32;
        if self.polarity() { var } else { -var }
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0 / 2
    }

    /// `true` for the positive literal of the variable.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 % 2 == 0
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Dense index for per-literal tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}
