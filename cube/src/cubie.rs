//! Cubie-level state: which piece sits in which slot, and how it is twisted
//! or flipped there.
//!
//! A [`CubieCube`] composed with one of the six base move cubes is the same
//! cube after that face turn. All coordinate math (see [`crate::coord`]) is
//! derived from this representation.

use crate::CubeError;
use crate::moves::{Face, Move};

/// Corner slots, `U` layer first. Each name lists the faces the slot touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

/// Edge slots. The last four (`FR`, `FL`, `BL`, `BR`) form the UD slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::URF,
        Corner::UFL,
        Corner::ULB,
        Corner::UBR,
        Corner::DFR,
        Corner::DLF,
        Corner::DBL,
        Corner::DRB,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// # Panics
    /// Panics if `index` is not in `0..8`.
    #[must_use]
    pub fn from_index(index: usize) -> Corner {
        Self::ALL[index]
    }
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::UR,
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::DR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// # Panics
    /// Panics if `index` is not in `0..12`.
    #[must_use]
    pub fn from_index(index: usize) -> Edge {
        Self::ALL[index]
    }

    /// Whether this edge belongs in the UD slice when solved.
    #[must_use]
    pub fn in_ud_slice(self) -> bool {
        self.index() >= 8
    }
}

/// Permutation and orientation of every corner and edge.
///
/// `cp[i]` is the corner occupying slot `i`, `co[i]` its twist (0..3);
/// `ep[i]`/`eo[i]` are the same for edges with flips (0..2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubieCube {
    pub cp: [Corner; 8],
    pub co: [u8; 8],
    pub ep: [Edge; 12],
    pub eo: [u8; 12],
}

use Corner::{DBL, DFR, DLF, DRB, UBR, UFL, ULB, URF};
use Edge::{BL, BR, DB, DF, DL, DR, FL, FR, UB, UF, UL, UR};

impl CubieCube {
    /// The identity of the cube group.
    pub const SOLVED: CubieCube = CubieCube {
        cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
        co: [0; 8],
        ep: [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR],
        eo: [0; 12],
    };

    /// One clockwise quarter turn of each face, in `U R F D L B` order.
    /// Composing a state with `BASE_MOVES[f]` turns face `f` once.
    pub const BASE_MOVES: [CubieCube; 6] = [
        // U
        CubieCube {
            cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
            co: [0; 8],
            ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
            eo: [0; 12],
        },
        // R
        CubieCube {
            cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
            co: [2, 0, 0, 1, 1, 0, 0, 2],
            ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR],
            eo: [0; 12],
        },
        // F
        CubieCube {
            cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
            co: [1, 2, 0, 0, 2, 1, 0, 0],
            ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
            eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
        },
        // D
        CubieCube {
            cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
            co: [0; 8],
            ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
            eo: [0; 12],
        },
        // L
        CubieCube {
            cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
            co: [0, 1, 2, 0, 0, 2, 1, 0],
            ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
            eo: [0; 12],
        },
        // B
        CubieCube {
            cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
            co: [0, 0, 1, 2, 0, 0, 2, 1],
            ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
            eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
        },
    ];

    /// Corner half of the group operation: `self` becomes `self * other`.
    pub fn corner_multiply(&mut self, other: &CubieCube) {
        let mut cp = [URF; 8];
        let mut co = [0u8; 8];
        for i in 0..8 {
            let from = other.cp[i].index();
            cp[i] = self.cp[from];
            co[i] = (self.co[from] + other.co[i]) % 3;
        }
        self.cp = cp;
        self.co = co;
    }

    /// Edge half of the group operation.
    pub fn edge_multiply(&mut self, other: &CubieCube) {
        let mut ep = [UR; 12];
        let mut eo = [0u8; 12];
        for i in 0..12 {
            let from = other.ep[i].index();
            ep[i] = self.ep[from];
            eo[i] = (self.eo[from] + other.eo[i]) % 2;
        }
        self.ep = ep;
        self.eo = eo;
    }

    /// Full group operation over both piece kinds. Not commutative.
    pub fn multiply(&mut self, other: &CubieCube) {
        self.corner_multiply(other);
        self.edge_multiply(other);
    }

    /// Turn `face` clockwise once.
    pub fn apply_face(&mut self, face: Face) {
        self.multiply(&Self::BASE_MOVES[face.index()]);
    }

    /// Apply one of the 18 elementary turns.
    pub fn apply_move(&mut self, mv: Move) {
        for _ in 0..mv.power() {
            self.apply_face(mv.face());
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Parity of the corner permutation (number of inversions mod 2).
    #[must_use]
    pub fn corner_parity(&self) -> u8 {
        let mut inversions = 0u32;
        for i in 0..8 {
            for j in 0..i {
                if self.cp[j] > self.cp[i] {
                    inversions += 1;
                }
            }
        }
        (inversions % 2) as u8
    }

    /// Parity of the edge permutation.
    #[must_use]
    pub fn edge_parity(&self) -> u8 {
        let mut inversions = 0u32;
        for i in 0..12 {
            for j in 0..i {
                if self.ep[j] > self.ep[i] {
                    inversions += 1;
                }
            }
        }
        (inversions % 2) as u8
    }

    /// Check that this state is reachable by face turns, reporting the first
    /// violated invariant. A state that fails here cannot be solved and must
    /// never enter the search.
    ///
    /// # Errors
    /// One of the permutation, orientation, or parity variants of
    /// [`CubeError`].
    pub fn validate(&self) -> Result<(), CubeError> {
        let mut edge_seen = [0u8; 12];
        for edge in self.ep {
            edge_seen[edge.index()] += 1;
        }
        if edge_seen.iter().any(|&count| count != 1) {
            return Err(CubeError::EdgePermutation);
        }
        if self.eo.iter().map(|&flip| u32::from(flip)).sum::<u32>() % 2 != 0 {
            return Err(CubeError::EdgeOrientation);
        }
        let mut corner_seen = [0u8; 8];
        for corner in self.cp {
            corner_seen[corner.index()] += 1;
        }
        if corner_seen.iter().any(|&count| count != 1) {
            return Err(CubeError::CornerPermutation);
        }
        if self.co.iter().map(|&twist| u32::from(twist)).sum::<u32>() % 3 != 0 {
            return Err(CubeError::CornerOrientation);
        }
        if self.edge_parity() != self.corner_parity() {
            return Err(CubeError::Parity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after_moves(moves: &[Move]) -> CubieCube {
        let mut cube = CubieCube::SOLVED;
        for &mv in moves {
            cube.apply_move(mv);
        }
        cube
    }

    #[test]
    fn base_moves_have_order_four() {
        for face in Face::ALL {
            let mut cube = CubieCube::SOLVED;
            for turns in 1..=4 {
                cube.apply_face(face);
                assert_eq!(cube.is_solved(), turns == 4, "{face} at {turns} turns");
            }
        }
    }

    #[test]
    fn base_moves_are_valid_states() {
        for base in &CubieCube::BASE_MOVES {
            assert_eq!(base.validate(), Ok(()));
        }
    }

    #[test]
    fn composition_is_associative() {
        let moves = [Move::R, Move::U2, Move::F3, Move::L, Move::D, Move::B2];
        for window in moves.windows(3) {
            let (a, b, c) = (
                after_moves(&[window[0]]),
                after_moves(&[window[1]]),
                after_moves(&[window[2]]),
            );
            let mut left = a;
            left.multiply(&b);
            left.multiply(&c);
            let mut bc = b;
            bc.multiply(&c);
            let mut right = a;
            right.multiply(&bc);
            assert_eq!(left, right);
        }
    }

    #[test]
    fn move_then_inverse_is_identity() {
        let mut cube = after_moves(&[Move::R, Move::U, Move::F2]);
        for mv in [Move::F2, Move::U3, Move::R3] {
            cube.apply_move(mv);
        }
        assert!(cube.is_solved());
    }

    #[test]
    fn scrambles_stay_valid() {
        let cube = after_moves(&[
            Move::R,
            Move::U2,
            Move::B3,
            Move::L,
            Move::D,
            Move::F2,
            Move::R3,
            Move::U,
        ]);
        assert_eq!(cube.validate(), Ok(()));
    }

    #[test]
    fn validate_reports_first_broken_invariant() {
        let mut twisted = CubieCube::SOLVED;
        twisted.co[0] = 1;
        assert_eq!(twisted.validate(), Err(CubeError::CornerOrientation));

        let mut flipped = CubieCube::SOLVED;
        flipped.eo[4] = 1;
        assert_eq!(flipped.validate(), Err(CubeError::EdgeOrientation));

        let mut duplicated = CubieCube::SOLVED;
        duplicated.ep[0] = Edge::UF;
        assert_eq!(duplicated.validate(), Err(CubeError::EdgePermutation));

        let mut repeated_corner = CubieCube::SOLVED;
        repeated_corner.cp[3] = Corner::URF;
        assert_eq!(repeated_corner.validate(), Err(CubeError::CornerPermutation));

        let mut two_swapped_edges = CubieCube::SOLVED;
        two_swapped_edges.ep.swap(0, 1);
        assert_eq!(two_swapped_edges.validate(), Err(CubeError::Parity));

        // A corner swap on top restores equal parity and is reachable again.
        let mut both_swapped = two_swapped_edges;
        both_swapped.cp.swap(0, 1);
        assert_eq!(both_swapped.validate(), Ok(()));
    }
}
