#![warn(clippy::all, clippy::pedantic)]
//! Learned-clause database reduction.
//!
//! Clause learning is monotone: left alone, the database grows until
//! propagation drowns in it. When the live learned count passes a cap, the
//! worst half by literal block distance is tombstoned. Binary clauses,
//! clauses with LBD at or below the keep threshold, and clauses currently
//! acting as a reason on the trail are never removed.

use crate::sat::clause::Clause;
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LbdPolicy {
    cap: usize,
    keep_lbd: u32,
}

impl LbdPolicy {
    #[must_use]
    pub fn new(cap: usize, keep_lbd: u32) -> Self {
        Self { cap, keep_lbd }
    }

    #[must_use]
    pub fn should_reduce(&self, live_learned: usize) -> bool {
        live_learned > self.cap
    }

    /// Each reduction raises the cap, so the database is allowed to grow
    /// over the life of the solve.
    pub fn on_reduce(&mut self) {
        self.cap += self.cap / 2;
    }

    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[must_use]
    pub fn keep_lbd(&self) -> u32 {
        self.keep_lbd
    }
}

/// Picks the learned clauses to drop: the worst half of the candidates,
/// ordered by LBD then length, highest first. `locked` names clauses that
/// are the reason for a literal on the trail.
pub fn select_victims<F>(
    db: &[Clause],
    first_learned: usize,
    keep_lbd: u32,
    locked: F,
) -> Vec<usize>
where
    F: Fn(usize) -> bool,
{
    let mut candidates: Vec<usize> = (first_learned..db.len())
        .filter(|&i| {
            let clause = &db[i];
            !clause.is_deleted() && clause.len() > 2 && clause.lbd > keep_lbd && !locked(i)
        })
        .collect();

    candidates.sort_by_key(|&i| (Reverse(db[i].lbd), Reverse(db[i].len())));
    candidates.truncate(candidates.len() / 2);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause::LiteralVec;
    use crate::sat::literal::Literal;

    fn learned(lits: &[i32], lbd: u32) -> Clause {
        let lits: LiteralVec = lits.iter().map(|&l| Literal::from_dimacs(l)).collect();
        Clause::learned(lits, lbd)
    }

    #[test]
    fn cap_grows_on_reduce() {
        let mut policy = LbdPolicy::new(100, 2);
        assert!(policy.should_reduce(101));
        policy.on_reduce();
        assert!(!policy.should_reduce(101));
        assert_eq!(policy.cap(), 150);
    }

    #[test]
    fn victims_are_the_worst_half() {
        let db = vec![
            learned(&[1, 2, 3], 6),
            learned(&[1, 2, 4], 3),
            learned(&[1, 3, 4], 5),
            learned(&[2, 3, 4], 4),
        ];
        let victims = select_victims(&db, 0, 2, |_| false);
        assert_eq!(victims, vec![0, 2]);
    }

    #[test]
    fn protected_clauses_survive() {
        let db = vec![
            learned(&[1, 2], 9),      // binary
            learned(&[1, 2, 3], 2),   // low LBD
            learned(&[1, 2, 4], 9),   // locked
            learned(&[1, 3, 4], 9),
            learned(&[2, 3, 4], 8),
        ];
        let victims = select_victims(&db, 0, 2, |i| i == 2);
        assert_eq!(victims, vec![3]);
    }
}
