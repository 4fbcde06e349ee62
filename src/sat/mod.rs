#![warn(clippy::all, clippy::pedantic)]
pub mod assignment;
pub mod clause;
pub mod clause_management;
pub mod cnf;
pub mod conflict_analysis;
pub mod constraints;
pub mod dimacs;
pub mod literal;
pub mod phase_saving;
pub mod restarter;
pub mod solver;
pub mod trail;
pub mod variable_selection;
pub mod watch;
