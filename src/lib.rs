//! A conflict-driven clause learning (CDCL) SAT solver.
//!
//! Build a [`sat::cnf::Cnf`] from clauses of signed integers (or parse a
//! DIMACS file via [`sat::dimacs`]), then hand it to [`sat::solver::solve`]
//! or a configured [`sat::solver::Solver`]:
//!
//! ```
//! use clausal::sat::cnf::Cnf;
//! use clausal::sat::solver;
//!
//! let mut cnf = Cnf::new();
//! cnf.add_clause([1, 2])?;
//! cnf.add_clause([-1, 2])?;
//! cnf.add_clause([1, -2])?;
//!
//! let outcome = solver::solve(&cnf);
//! let model = outcome.model().expect("satisfiable");
//! assert!(model.value(1) && model.value(2));
//! # Ok::<(), clausal::sat::cnf::CnfError>(())
//! ```

pub mod sat;
