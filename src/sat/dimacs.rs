#![warn(clippy::all, clippy::pedantic)]
//! DIMACS CNF input and model output.
//!
//! The accepted input is the standard competition format: optional `c`
//! comment lines, a `p cnf <nvars> <nclauses>` problem line, clauses as
//! whitespace-separated signed integers terminated by `0` (clauses may
//! span lines), and an optional `%` end marker. Malformed input surfaces
//! as a typed error, never a panic.

use crate::sat::assignment::Model;
use crate::sat::cnf::{Cnf, CnfError};
use crate::sat::solver::Outcome;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: malformed or repeated problem line: {text}")]
    Header { line: usize, text: String },
    #[error("line {line}: invalid literal token `{token}`")]
    Literal { line: usize, token: String },
    #[error("header declared {declared} clauses but the file contains {found}")]
    ClauseCount { declared: usize, found: usize },
    #[error(transparent)]
    Cnf(#[from] CnfError),
}

/// Parses DIMACS CNF data into a [`Cnf`].
///
/// A problem line is optional: without one the variable count grows with
/// the clauses; with one, literals beyond the declared bound are rejected
/// and the clause count is checked.
///
/// # Errors
///
/// Any [`DimacsError`] variant, including validation failures propagated
/// from [`Cnf::add_clause`].
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, DimacsError> {
    let mut cnf: Option<Cnf> = None;
    let mut declared_clauses = None;
    let mut pending: Vec<i32> = Vec::new();
    let mut found_clauses = 0_usize;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_idx + 1;
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            None | Some(&"c") => {}
            Some(&"%") => break,
            Some(&"p") => {
                let parts: Vec<&str> = tokens.collect();
                let header = || DimacsError::Header {
                    line: line_no,
                    text: line.clone(),
                };
                if cnf.is_some() || parts.len() != 4 || parts[1] != "cnf" {
                    return Err(header());
                }
                let num_vars = parts[2].parse().map_err(|_| header())?;
                declared_clauses = Some(parts[3].parse::<usize>().map_err(|_| header())?);
                cnf = Some(Cnf::with_vars(num_vars));
            }
            Some(_) => {
                for token in tokens {
                    let value: i32 = token.parse().map_err(|_| DimacsError::Literal {
                        line: line_no,
                        token: token.to_string(),
                    })?;
                    if value == 0 {
                        cnf.get_or_insert_with(Cnf::new)
                            .add_clause(pending.drain(..))?;
                        found_clauses += 1;
                    } else {
                        pending.push(value);
                    }
                }
            }
        }
    }

    // Some generators omit the trailing 0 of the last clause.
    if !pending.is_empty() {
        cnf.get_or_insert_with(Cnf::new)
            .add_clause(pending.drain(..))?;
        found_clauses += 1;
    }

    if let Some(declared) = declared_clauses {
        if declared != found_clauses {
            return Err(DimacsError::ClauseCount {
                declared,
                found: found_clauses,
            });
        }
    }

    Ok(cnf.unwrap_or_default())
}

/// Opens and parses a DIMACS CNF file.
///
/// # Errors
///
/// [`DimacsError::Io`] when the file cannot be read, otherwise as
/// [`parse_dimacs`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Cnf, DimacsError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file))
}

/// Writes a solve outcome in the DIMACS solution convention: an `s` status
/// line, and on SAT a `v` line of signed literals terminated by `0`.
///
/// # Errors
///
/// Forwards I/O failures from the writer.
pub fn write_outcome<W: Write>(mut writer: W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Sat(model) => {
            writeln!(writer, "s SATISFIABLE")?;
            write!(writer, "v")?;
            for lit in model.literals() {
                write!(writer, " {lit}")?;
            }
            writeln!(writer, " 0")
        }
        Outcome::Unsat => writeln!(writer, "s UNSATISFIABLE"),
        Outcome::Cancelled => writeln!(writer, "s UNKNOWN"),
    }
}

/// The `v` line for a model, without writing it anywhere.
#[must_use]
pub fn model_line(model: &Model) -> String {
    let mut line = String::from("v");
    for lit in model.literals() {
        line.push_str(&format!(" {lit}"));
    }
    line.push_str(" 0");
    line
}
