#![warn(clippy::pedantic)]

//! Puzzle state for the 3x3x3 cube.
//!
//! Three representations live here, from the outside in:
//!
//! - [`grid::Cube`] holds the caller's 54 colored stickers and knows how to
//!   physically turn faces. This is the layer solutions are replayed against.
//! - [`facelet::FaceCube`] is the canonical sticker state in `U R F D L B`
//!   face order, convertible to and from the cubie level.
//! - [`cubie::CubieCube`] is the algebraic state (corner/edge permutations
//!   plus orientations) that the solver's coordinates are derived from.

use thiserror::Error;

pub mod coord;
pub mod cubie;
pub mod facelet;
pub mod grid;
pub mod moves;

pub use cubie::{Corner, CubieCube, Edge};
pub use facelet::{Color, FaceCube};
pub use grid::Cube;
pub use moves::{Face, Move};

/// Everything that can be wrong with a cube description before the search is
/// allowed to start: malformed input, or a sticker arrangement no sequence of
/// face turns can produce.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeError {
    #[error("cube string must be exactly 54 characters, got {0}")]
    InvalidLength(usize),
    #[error("unrecognized facelet color {0:?}")]
    UnknownColor(char),
    #[error("the six face centers must all have distinct colors")]
    CenterColors,
    #[error("every color must appear exactly 9 times")]
    ColorCount,
    #[error("every edge must appear exactly once")]
    EdgePermutation,
    #[error("the total edge flip must be even")]
    EdgeOrientation,
    #[error("every corner must appear exactly once")]
    CornerPermutation,
    #[error("the total corner twist must be divisible by 3")]
    CornerOrientation,
    #[error("edge and corner permutations must have equal parity")]
    Parity,
}
