#![warn(clippy::all, clippy::pedantic)]
//! The CDCL engine.
//!
//! The engine owns every piece of mutable solve state: the clause database
//! (originals plus learned), the assignment, the trail, watch lists, and
//! the heuristic components. Nothing is shared or global, so independent
//! solves over the same [`Cnf`] just construct independent engines.
//!
//! The loop is the textbook one: propagate to fixpoint; on conflict at
//! level 0 report unsatisfiable, otherwise learn a first-UIP clause and
//! backjump; at fixpoint with unassigned variables left, decide; when
//! everything is assigned, the trail is a model.

use crate::sat::assignment::{Assignment, Model};
use crate::sat::clause::Clause;
use crate::sat::clause_management::{LbdPolicy, select_victims};
use crate::sat::cnf::Cnf;
use crate::sat::conflict_analysis::analyze;
use crate::sat::literal::Literal;
use crate::sat::phase_saving::SavedPhases;
use crate::sat::restarter::{Luby, Restarter};
use crate::sat::trail::{Reason, Trail};
use crate::sat::variable_selection::{VariableSelection, Vsids};
use crate::sat::watch::WatchLists;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Terminal result of a solve. Unsatisfiability and cancellation are valid
/// outcomes, not errors; callers branch on them explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sat(Model),
    Unsat,
    /// The caller's [`CancelToken`] fired between decisions.
    Cancelled,
}

impl Outcome {
    #[must_use]
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    #[must_use]
    pub fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsat)
    }

    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        match self {
            Self::Sat(model) => Some(model),
            _ => None,
        }
    }
}

/// Cooperative cancellation flag, checked between decide steps. Clone the
/// token, hand one copy to the engine, and call [`CancelToken::cancel`]
/// from anywhere (another thread included) to stop a long solve.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Search counters, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub restarts: u64,
    pub learned: u64,
    pub removed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Live learned clauses kept before the first database reduction.
    /// Zero picks a bound proportional to the input size.
    pub learned_cap: usize,
    /// Learned clauses with LBD at or below this are never removed.
    pub keep_lbd: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            learned_cap: 0,
            keep_lbd: 2,
        }
    }
}

/// One CDCL engine. Construct per solve; all state is reset at the start
/// of [`Solver::solve`], so a prior call can never leak into the next.
#[derive(Debug, Clone)]
pub struct Solver<V: VariableSelection = Vsids, R: Restarter = Luby> {
    db: Vec<Clause>,
    first_learned: usize,
    live_learned: usize,
    assignment: Assignment,
    trail: Trail,
    watches: WatchLists,
    selector: V,
    phases: SavedPhases,
    restarter: R,
    policy: LbdPolicy,
    level: u32,
    stats: Stats,
    cancel: Option<CancelToken>,
    input_unsat: bool,
}

impl<V: VariableSelection, R: Restarter> Solver<V, R> {
    #[must_use]
    pub fn new(cnf: &Cnf) -> Self {
        Self::with_config(cnf, Config::default())
    }

    #[must_use]
    pub fn with_config(cnf: &Cnf, config: Config) -> Self {
        let num_vars = cnf.variable_count();
        let db: Vec<Clause> = cnf.iter().cloned().collect();

        let mut watches = WatchLists::new(num_vars);
        for (i, clause) in db.iter().enumerate() {
            if clause.len() >= 2 {
                watches.attach(clause, i);
            }
        }

        let cap = if config.learned_cap == 0 {
            (db.len() / 3).max(1000)
        } else {
            config.learned_cap
        };

        Self {
            selector: V::new(num_vars, &db),
            first_learned: db.len(),
            live_learned: 0,
            assignment: Assignment::new(num_vars),
            trail: Trail::new(num_vars),
            watches,
            phases: SavedPhases::new(num_vars),
            restarter: R::new(),
            policy: LbdPolicy::new(cap, config.keep_lbd),
            level: 0,
            stats: Stats::default(),
            cancel: None,
            input_unsat: cnf.has_empty_clause(),
            db,
        }
    }

    /// Installs a cancellation token, checked between decide steps.
    pub fn set_cancel_token(&mut self, token: CancelToken) {
        self.cancel = Some(token);
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Runs the search to completion.
    pub fn solve(&mut self) -> Outcome {
        if self.input_unsat {
            return Outcome::Unsat;
        }

        self.reset();
        if !self.enqueue_units() {
            return Outcome::Unsat;
        }

        loop {
            if let Some(conflict) = self.propagate() {
                self.stats.conflicts += 1;
                if self.level == 0 {
                    debug!(conflicts = self.stats.conflicts, "conflict at ground level");
                    return Outcome::Unsat;
                }
                self.learn_from(conflict);

                if self.restarter.should_restart() {
                    self.stats.restarts += 1;
                    debug!(
                        restarts = self.stats.restarts,
                        conflicts = self.stats.conflicts,
                        "restarting"
                    );
                    self.backtrack_to(0);
                }
                if self.policy.should_reduce(self.live_learned) {
                    self.reduce_db();
                }
            } else if self.assignment.all_assigned() {
                debug!(stats = ?self.stats, "satisfiable");
                return Outcome::Sat(Model::from(&self.assignment));
            } else if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                debug!(stats = ?self.stats, "cancelled");
                return Outcome::Cancelled;
            } else {
                let Some(var) = self.selector.pick(&self.assignment) else {
                    return Outcome::Sat(Model::from(&self.assignment));
                };
                self.level += 1;
                self.stats.decisions += 1;
                self.enqueue(Literal::new(var, self.phases.next(var)), Reason::Decision);
            }
        }
    }

    /// Unwinds everything, level-0 assignments included. Learned clauses
    /// and activities survive; they are implied by the originals, so a
    /// repeated solve stays sound while starting from a fresh trail.
    fn reset(&mut self) {
        while let Some(step) = self.trail.last() {
            let var = step.lit.variable();
            self.assignment.unassign(var);
            self.selector.on_unassign(var);
            self.trail.pop();
        }
        self.level = 0;
    }

    /// Queues every unit clause in the database. `false` on an immediate
    /// contradiction between units.
    fn enqueue_units(&mut self) -> bool {
        for i in 0..self.db.len() {
            if !self.db[i].is_unit() || self.db[i].is_deleted() {
                continue;
            }
            let lit = self.db[i][0];
            match self.assignment.literal_value(lit) {
                Some(true) => {}
                Some(false) => return false,
                None => self.enqueue(lit, Reason::Clause(i)),
            }
        }
        true
    }

    fn enqueue(&mut self, lit: Literal, reason: Reason) {
        self.assignment.assign(lit);
        self.phases.save(lit);
        self.trail.push(lit, self.level, reason);
        self.stats.propagations += u64::from(matches!(reason, Reason::Clause(_)));
    }

    /// Unit propagation to fixpoint. Returns the index of a conflicting
    /// clause, or `None` at fixpoint.
    fn propagate(&mut self) -> Option<usize> {
        while let Some(lit) = self.trail.next_queued() {
            let false_lit = !lit;
            let mut i = 0;
            while i < self.watches[false_lit].len() {
                let c_idx = self.watches[false_lit][i];

                // Keep the falsified watch in slot 1.
                if self.db[c_idx][0] == false_lit {
                    self.db[c_idx].swap(0, 1);
                }
                let first = self.db[c_idx][0];
                if self.assignment.literal_value(first) == Some(true) {
                    i += 1;
                    continue;
                }

                let replacement = (2..self.db[c_idx].len())
                    .find(|&k| self.assignment.literal_value(self.db[c_idx][k]) != Some(false));

                if let Some(k) = replacement {
                    self.db[c_idx].swap(1, k);
                    let moved = self.db[c_idx][1];
                    self.watches[false_lit].swap_remove(i);
                    self.watches[moved].push(c_idx);
                    // The swapped-in entry now sits at `i`.
                } else if self.assignment.literal_value(first).is_none() {
                    // All other literals false: the clause forces `first`.
                    self.enqueue(first, Reason::Clause(c_idx));
                    i += 1;
                } else {
                    return Some(c_idx);
                }
            }
        }
        None
    }

    fn learn_from(&mut self, conflict: usize) {
        let analysis = analyze(&self.db, &self.trail, self.level, conflict);
        for &var in &analysis.bumped {
            self.selector.bump(var);
        }
        self.selector.decay();

        self.backtrack_to(analysis.backtrack_level);

        let asserting = analysis.literals[0];
        let clause = Clause::learned(analysis.literals, analysis.lbd);
        let c_idx = self.db.len();
        if clause.len() >= 2 {
            self.watches.attach(&clause, c_idx);
        }
        self.db.push(clause);
        self.live_learned += 1;
        self.stats.learned += 1;

        // The learned clause is asserting at the backjump level.
        self.enqueue(asserting, Reason::Clause(c_idx));
    }

    fn backtrack_to(&mut self, level: u32) {
        while let Some(step) = self.trail.last() {
            if step.level <= level {
                break;
            }
            let var = step.lit.variable();
            self.assignment.unassign(var);
            self.selector.on_unassign(var);
            self.trail.pop();
        }
        // Popping clamps the queue head; entries that survive the jump but
        // were never propagated (a freshly asserted level-0 literal, when a
        // restart lands here) stay queued.
        self.level = level;
    }

    fn reduce_db(&mut self) {
        let victims = {
            let db = &self.db;
            let assignment = &self.assignment;
            let trail = &self.trail;
            select_victims(db, self.first_learned, self.policy.keep_lbd(), |idx| {
                let var = db[idx][0].variable();
                assignment.is_assigned(var) && trail.reason_of(var) == Reason::Clause(idx)
            })
        };

        for &idx in &victims {
            let (a, b) = (self.db[idx][0], self.db[idx][1]);
            self.watches.detach(a, b, idx);
            self.db[idx].delete();
            self.live_learned -= 1;
            self.stats.removed += 1;
        }
        self.policy.on_reduce();
        debug!(
            removed = victims.len(),
            cap = self.policy.cap(),
            "reduced learned clause database"
        );
    }
}

/// Solves `cnf` with the default engine configuration.
#[must_use]
pub fn solve(cnf: &Cnf) -> Outcome {
    Solver::<Vsids, Luby>::new(cnf).solve()
}
