#![warn(clippy::pedantic)]

//! Two-phase solver for the 3x3x3 cube.
//!
//! The search first brings the cube into the subgroup generated by
//! `U, D, R2, F2, L2, B2` and then finishes it inside that subgroup. Both
//! phases run on precomputed coordinate move tables and exact pruning tables
//! owned by [`Tables`]; [`TwoPhaseSolver`] borrows a table bundle and performs
//! iterative-deepening searches against it.

use cube::CubeError;
use thiserror::Error;

pub mod persist;
pub mod search;
pub mod service;
pub mod tables;

pub use search::TwoPhaseSolver;
pub use tables::Tables;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

/// Everything that can go wrong between receiving a cube string and handing
/// back a move sequence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error(transparent)]
    Invalid(#[from] CubeError),
    /// Every valid cube has a solution in at most twenty moves, so this only
    /// fires when the caller lowered the bound below the cube's distance.
    #[error("no solution of at most {max_length} moves found")]
    NoSolution { max_length: usize },
    /// Replaying the found moves did not restore the cube. This indicates a
    /// defect in the tables or the search, never a bad input.
    #[error("solution failed verification against the scrambled cube")]
    ReplayMismatch,
}
