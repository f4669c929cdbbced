//! Transport-agnostic solve pipeline.
//!
//! This is the full request-to-reply path a front end needs: parse the wire
//! string, validate it, solve, verify the answer by replaying it, and shape
//! the outcome for serialization. Plugging it into an HTTP handler or the
//! command line is a one-liner either way.

use std::time::Instant;

use cube::Cube;
use itertools::Itertools;
use serde::Serialize;

use crate::tables::Tables;
use crate::{SolveError, TwoPhaseSolver};

/// Successful reply: the solved cube string, the move sequence in standard
/// notation, and how long the search took.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub cube: String,
    pub moves: String,
    pub time_to_solve: f64,
}

/// Failure reply with a single human-readable field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ServiceError {
    pub error: String,
}

/// What a front end serializes back to the client.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Reply {
    Solution(Solution),
    Error(ServiceError),
}

/// Runs the whole pipeline on a wire-format cube string.
pub fn solve_cube(wire: &str, tables: &Tables, max_length: usize) -> Result<Solution, SolveError> {
    let mut cube: Cube = wire.parse()?;
    let cubie = cube.to_facelets()?.to_cubie();
    cubie.validate()?;

    let start = Instant::now();
    let moves = TwoPhaseSolver::new(tables)
        .with_max_length(max_length)
        .solve(&cubie)?;
    let time_to_solve = start.elapsed().as_secs_f64();

    // replay the answer on the original colors; anything but a uniform cube
    // here means the tables or the search are broken
    for &mv in &moves {
        cube.transform(mv);
    }
    if !cube.is_solved() {
        return Err(SolveError::ReplayMismatch);
    }

    Ok(Solution {
        cube: cube.to_string(),
        moves: moves.iter().join(" "),
        time_to_solve,
    })
}

/// Like [`solve_cube`], but folds every failure into the uniform error
/// payload instead of an `Err`.
#[must_use]
pub fn reply_for(wire: &str, tables: &Tables, max_length: usize) -> Reply {
    match solve_cube(wire, tables, max_length) {
        Ok(solution) => Reply::Solution(solution),
        Err(error) => Reply::Error(ServiceError {
            error: error.to_string(),
        }),
    }
}

/// Entry point for a query-string transport: pulls the required `cube`
/// parameter out of `query` and solves its value. A missing parameter is
/// reported through the same error payload as any other failure.
#[must_use]
pub fn handle_query(query: &str, tables: &Tables, max_length: usize) -> Reply {
    match query.split('&').find_map(|pair| pair.strip_prefix("cube=")) {
        Some(wire) => reply_for(wire, tables, max_length),
        None => Reply::Error(ServiceError {
            error: "missing required query parameter \"cube\"".to_owned(),
        }),
    }
}
