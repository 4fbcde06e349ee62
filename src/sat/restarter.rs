#![warn(clippy::all, clippy::pedantic)]
//! Restart strategies.
//!
//! A restart abandons the current decision sequence (learned clauses and
//! activities are kept) to escape an unproductive region of the search
//! space. Correctness never depends on restarting; only performance does.

/// Decides when the solver should restart. `should_restart` is called once
/// per conflict.
pub trait Restarter {
    fn new() -> Self;

    /// `true` when a restart is due now. Implementations reset their own
    /// interval bookkeeping before returning `true`.
    fn should_restart(&mut self) -> bool;

    fn num_restarts(&self) -> usize;
}

/// The k-th element of the Luby sequence 1, 1, 2, 1, 1, 2, 4, ... (`k`
/// 0-based).
fn luby(mut k: usize) -> usize {
    let mut size = 1_usize;
    let mut seq = 0_u32;
    while size < k + 1 {
        seq += 1;
        size = 2 * size + 1;
    }
    while size - 1 != k {
        size = (size - 1) / 2;
        seq -= 1;
        k %= size;
    }
    1 << seq
}

/// Restarts after `UNIT * luby(i)` conflicts for the i-th interval. The
/// Luby schedule is the standard choice when nothing is known about the
/// runtime distribution of the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Luby<const UNIT: usize = 256> {
    conflicts: usize,
    restarts: usize,
}

impl<const UNIT: usize> Restarter for Luby<UNIT> {
    fn new() -> Self {
        Self {
            conflicts: 0,
            restarts: 0,
        }
    }

    fn should_restart(&mut self) -> bool {
        self.conflicts += 1;
        if self.conflicts >= UNIT * luby(self.restarts) {
            self.conflicts = 0;
            self.restarts += 1;
            true
        } else {
            false
        }
    }

    fn num_restarts(&self) -> usize {
        self.restarts
    }
}

/// Intervals start at `FIRST` conflicts and grow by half each restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometric<const FIRST: usize = 100> {
    conflicts: usize,
    interval: usize,
    restarts: usize,
}

impl<const FIRST: usize> Restarter for Geometric<FIRST> {
    fn new() -> Self {
        Self {
            conflicts: 0,
            interval: FIRST,
            restarts: 0,
        }
    }

    fn should_restart(&mut self) -> bool {
        self.conflicts += 1;
        if self.conflicts >= self.interval {
            self.conflicts = 0;
            self.interval += self.interval / 2;
            self.restarts += 1;
            true
        } else {
            false
        }
    }

    fn num_restarts(&self) -> usize {
        self.restarts
    }
}

/// Disables restarts entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Never;

impl Restarter for Never {
    fn new() -> Self {
        Self
    }

    fn should_restart(&mut self) -> bool {
        false
    }

    fn num_restarts(&self) -> usize {
        0
    }
}
