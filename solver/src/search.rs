//! Iterative-deepening two-phase search.
//!
//! Phase 1 drives twist, flip and udslice to zero, which puts the cube in
//! the subgroup generated by `U, D, R2, F2, L2, B2`. Phase 2 finishes the
//! solve without leaving that subgroup. Both phases take the maximum of two
//! exact pruning distances as their lower bound, so a deepening pass only
//! expands nodes the bound cannot rule out.

use std::time::Instant;

use cube::{CubieCube, Face, Move};
use itertools::Itertools;
use log::{debug, info};

use crate::tables::Tables;
use crate::{SolveError, start, success, working};

/// Default bound on the combined length of both phases. Any cube is
/// solvable well within this, so the first phase 1 completion almost always
/// leaves phase 2 enough room.
pub const DEFAULT_MAX_LENGTH: usize = 25;

/// Two-phase solver borrowing a table bundle.
pub struct TwoPhaseSolver<'a> {
    tables: &'a Tables,
    max_length: usize,
}

/// Per-solve search state. The move path and the coordinate and bound
/// history along it live in flat arrays indexed by ply, shared by both
/// phases so phase 2 continues where phase 1 stopped.
struct TwoPhaseSolverMutable {
    cube: CubieCube,
    axis: Vec<usize>,
    power: Vec<usize>,
    twist: Vec<usize>,
    flip: Vec<usize>,
    udslice: Vec<usize>,
    corner: Vec<usize>,
    edge8: Vec<usize>,
    edge4: Vec<usize>,
    min_dist_1: Vec<i8>,
    min_dist_2: Vec<i8>,
}

impl TwoPhaseSolverMutable {
    fn new(cube: CubieCube, tables: &Tables, max_length: usize) -> Self {
        let mut frames = TwoPhaseSolverMutable {
            cube,
            axis: vec![0; max_length],
            power: vec![0; max_length],
            twist: vec![0; max_length + 1],
            flip: vec![0; max_length + 1],
            udslice: vec![0; max_length + 1],
            corner: vec![0; max_length + 1],
            edge8: vec![0; max_length + 1],
            edge4: vec![0; max_length + 1],
            min_dist_1: vec![0; max_length + 1],
            min_dist_2: vec![0; max_length + 1],
        };
        frames.twist[0] = cube.twist();
        frames.flip[0] = cube.flip();
        frames.udslice[0] = cube.udslice();
        frames.corner[0] = cube.corner();
        frames.edge8[0] = cube.edge8();
        frames.edge4[0] = cube.edge4();
        frames.min_dist_1[0] = tables
            .udslice_twist_prune
            .lookup(frames.udslice[0], frames.twist[0])
            .max(tables.udslice_flip_prune.lookup(frames.udslice[0], frames.flip[0]));
        frames
    }

    fn solution(&self, length: usize) -> Vec<Move> {
        (0..length)
            .map(|ply| Move::from_face_power(Face::from_index(self.axis[ply]), self.power[ply]))
            .collect_vec()
    }
}

impl<'a> TwoPhaseSolver<'a> {
    #[must_use]
    pub fn new(tables: &'a Tables) -> Self {
        TwoPhaseSolver {
            tables,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Finds a solution of at most the configured length. The cube must
    /// already have passed [`CubieCube::validate`].
    pub fn solve(&self, cube: &CubieCube) -> Result<Vec<Move>, SolveError> {
        debug_assert!(cube.validate().is_ok());
        info!(start!("Searching for a two-phase solution"));
        let start = Instant::now();

        if cube.is_solved() {
            info!(success!("Cube is already solved"));
            return Ok(Vec::new());
        }

        let mut frames = TwoPhaseSolverMutable::new(*cube, self.tables, self.max_length);
        for depth in 0..self.max_length {
            debug!(working!("Searching phase 1 at depth {}..."), depth);
            if let Some(length) = self.phase_1(&mut frames, 0, depth) {
                info!(
                    success!("Found a {} move solution in {:.3}s"),
                    length,
                    start.elapsed().as_secs_f64()
                );
                return Ok(frames.solution(length));
            }
        }
        Err(SolveError::NoSolution {
            max_length: self.max_length,
        })
    }

    /// Depth-limited search for a path into the subgroup. On reaching it,
    /// hands over to phase 2 and reports the combined length found there.
    fn phase_1(&self, frames: &mut TwoPhaseSolverMutable, n: usize, depth: usize) -> Option<usize> {
        if frames.min_dist_1[n] == 0 {
            return self.phase_2_init(frames, n);
        }
        if frames.min_dist_1[n] as usize <= depth {
            for face in 0..6 {
                // never turn the same face twice in a row, and search an
                // opposite-face pair in only one order
                if n > 0 && (frames.axis[n - 1] == face || frames.axis[n - 1] == face + 3) {
                    continue;
                }
                for power in 1..=3 {
                    frames.axis[n] = face;
                    frames.power[n] = power;
                    let mv = 3 * face + power - 1;
                    frames.twist[n + 1] = self.tables.twist_move[frames.twist[n]][mv] as usize;
                    frames.flip[n + 1] = self.tables.flip_move[frames.flip[n]][mv] as usize;
                    frames.udslice[n + 1] =
                        self.tables.udslice_move[frames.udslice[n]][mv] as usize;
                    let cost = self
                        .tables
                        .udslice_twist_prune
                        .lookup(frames.udslice[n + 1], frames.twist[n + 1])
                        .max(
                            self.tables
                                .udslice_flip_prune
                                .lookup(frames.udslice[n + 1], frames.flip[n + 1]),
                        );
                    frames.min_dist_1[n + 1] = cost;
                    if let Some(length) = self.phase_1(frames, n + 1, depth - 1) {
                        return Some(length);
                    }
                }
            }
        }
        None
    }

    /// Replays the phase 1 moves on the original cube to seed the phase 2
    /// coordinates, then runs its own deepening loop over the remaining
    /// move budget.
    fn phase_2_init(&self, frames: &mut TwoPhaseSolverMutable, n: usize) -> Option<usize> {
        let mut cube = frames.cube;
        for ply in 0..n {
            for _ in 0..frames.power[ply] {
                cube.apply_face(Face::from_index(frames.axis[ply]));
            }
        }
        frames.corner[n] = cube.corner();
        frames.edge8[n] = cube.edge8();
        frames.edge4[n] = cube.edge4();
        frames.min_dist_2[n] = self.phase_2_cost(frames, n);
        for depth in 0..self.max_length - n {
            if let Some(length) = self.phase_2(frames, n, depth) {
                return Some(length);
            }
        }
        None
    }

    fn phase_2(&self, frames: &mut TwoPhaseSolverMutable, n: usize, depth: usize) -> Option<usize> {
        if frames.min_dist_2[n] == 0 {
            return Some(n);
        }
        if frames.min_dist_2[n] as usize <= depth {
            for face in 0..6 {
                if n > 0 && (frames.axis[n - 1] == face || frames.axis[n - 1] == face + 3) {
                    continue;
                }
                for power in 1..=3 {
                    let mv = 3 * face + power - 1;
                    let corner = self.tables.corner_move[frames.corner[n]][mv];
                    // quarter turns of R, F, L and B hold the sentinel here
                    if corner < 0 {
                        continue;
                    }
                    frames.axis[n] = face;
                    frames.power[n] = power;
                    frames.corner[n + 1] = corner as usize;
                    frames.edge8[n + 1] = self.tables.edge8_move[frames.edge8[n]][mv] as usize;
                    frames.edge4[n + 1] = self.tables.edge4_move[frames.edge4[n]][mv] as usize;
                    frames.min_dist_2[n + 1] = self.phase_2_cost(frames, n + 1);
                    if let Some(length) = self.phase_2(frames, n + 1, depth - 1) {
                        return Some(length);
                    }
                }
            }
        }
        None
    }

    fn phase_2_cost(&self, frames: &TwoPhaseSolverMutable, n: usize) -> i8 {
        self.tables
            .edge4_edge8_prune
            .lookup(frames.edge4[n], frames.edge8[n])
            .max(
                self.tables
                    .edge4_corner_prune
                    .lookup(frames.edge4[n], frames.corner[n]),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_cube_needs_no_search() {
        // a zero budget leaves no room for any search, so the empty answer
        // must come from the short-circuit
        let tables = Tables::shared();
        let moves = TwoPhaseSolver::new(tables)
            .with_max_length(0)
            .solve(&CubieCube::SOLVED)
            .unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn single_move_scrambles_solve_in_one_move() {
        let tables = Tables::shared();
        let solver = TwoPhaseSolver::new(tables);
        for mv in [Move::U, Move::R2, Move::F, Move::D3, Move::B2] {
            let mut cube = CubieCube::SOLVED;
            cube.apply_move(mv);
            let moves = solver.solve(&cube).unwrap();
            assert_eq!(moves.len(), 1, "{mv}");
            cube.apply_move(moves[0]);
            assert!(cube.is_solved(), "{mv}");
        }
    }
}
