//! Coordinate codecs: compact integer encodings of partial cubie state.
//!
//! Each coordinate is a pure function of [`CubieCube`] with an exact inverse.
//! The setters fill everything the coordinate does not determine in a fixed
//! canonical order, so decoding coordinate `i` always yields the same state;
//! the table builder depends on that when it seeds states from raw indices.
//!
//! The codecs themselves (`ori_*`, `perm_*`, `occupancy_*`) are deliberately
//! standalone so they can be tested without touching the search.

use crate::cubie::{Corner, CubieCube, Edge};

/// Number of corner orientation coordinates, 3^7.
pub const TWIST: usize = 2187;
/// Number of edge orientation coordinates, 2^11.
pub const FLIP: usize = 2048;
/// Number of UD-slice occupancy coordinates, C(12, 4).
pub const UDSLICE: usize = 495;
/// Number of corner permutation coordinates, 8!.
pub const CORNER: usize = 40320;
/// Number of U/D-layer edge permutation coordinates, 8!.
pub const EDGE8: usize = 40320;
/// Number of slice edge permutation coordinates, 4!.
pub const EDGE4: usize = 24;

/// Rank orientation digits in the given base. The final digit is redundant
/// (orientations sum to 0 mod `base`) and is not encoded.
#[must_use]
pub fn ori_to_index(digits: &[u8], base: usize) -> usize {
    digits[..digits.len() - 1]
        .iter()
        .fold(0, |acc, &digit| acc * base + digit as usize)
}

/// Inverse of [`ori_to_index`]; picks the last digit so the sum is divisible
/// by `base`.
pub fn index_to_ori(mut index: usize, base: usize, digits: &mut [u8]) {
    let n = digits.len();
    let mut total = 0;
    for i in 0..n - 1 {
        let digit = index % base;
        index /= base;
        digits[n - 2 - i] = digit as u8;
        total += digit;
    }
    digits[n - 1] = ((base - total % base) % base) as u8;
}

/// Factorial-base (Lehmer) rank of a permutation. Later positions contribute
/// the more significant digits, matching [`index_to_perm`].
#[must_use]
pub fn perm_to_index(perm: &[u8]) -> usize {
    let mut index = 0;
    for j in (1..perm.len()).rev() {
        let larger_before = perm[..j].iter().filter(|&&piece| piece > perm[j]).count();
        index = (index + larger_before) * j;
    }
    index
}

/// Inverse of [`perm_to_index`]; writes the ranked permutation of
/// `0..out.len()`.
pub fn index_to_perm(mut index: usize, out: &mut [u8]) {
    let n = out.len();
    let mut coefficients = [0usize; 11];
    for i in 1..n {
        coefficients[i - 1] = index % (i + 1);
        index /= i + 1;
    }
    let mut remaining: Vec<u8> = (0..n as u8).collect();
    for i in (0..n - 1).rev() {
        out[i + 1] = remaining.remove(i + 1 - coefficients[i]);
    }
    out[0] = remaining[0];
}

fn choose(n: i64, k: i64) -> i64 {
    if k < 0 || k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut c = 1;
    for i in 0..k {
        c = c * (n - i) / (i + 1);
    }
    c
}

/// Combinatorial rank of which 4 of 12 slots are occupied.
#[must_use]
pub fn occupancy_to_index(occupied: &[bool; 12]) -> usize {
    let mut index = 0;
    let mut seen = 0;
    for (slot, &filled) in occupied.iter().enumerate() {
        if filled {
            seen += 1;
        } else if seen >= 1 {
            index += choose(slot as i64, seen - 1);
        }
    }
    index as usize
}

/// Inverse of [`occupancy_to_index`].
pub fn index_to_occupancy(index: usize, occupied: &mut [bool; 12]) {
    let mut remaining = index as i64;
    let mut seen = 3;
    for slot in (0..12).rev() {
        let c = choose(slot as i64, seen);
        if remaining - c < 0 {
            occupied[slot] = true;
            seen -= 1;
        } else {
            occupied[slot] = false;
            remaining -= c;
        }
    }
}

/// Edges that fill the slice slots when decoding, lowest slot first.
const SLICE_EDGES: [Edge; 4] = [Edge::FR, Edge::FL, Edge::BL, Edge::BR];
/// Canonical fill order for slots a coordinate leaves undetermined.
const OTHER_EDGES: [Edge; 8] = [
    Edge::UR,
    Edge::UF,
    Edge::UL,
    Edge::UB,
    Edge::DR,
    Edge::DF,
    Edge::DL,
    Edge::DB,
];

impl CubieCube {
    /// Phase-1 corner orientation coordinate, in `0..TWIST`.
    #[must_use]
    pub fn twist(&self) -> usize {
        ori_to_index(&self.co, 3)
    }

    pub fn set_twist(&mut self, twist: usize) {
        debug_assert!(twist < TWIST);
        index_to_ori(twist, 3, &mut self.co);
    }

    /// Phase-1 edge orientation coordinate, in `0..FLIP`.
    #[must_use]
    pub fn flip(&self) -> usize {
        ori_to_index(&self.eo, 2)
    }

    pub fn set_flip(&mut self, flip: usize) {
        debug_assert!(flip < FLIP);
        index_to_ori(flip, 2, &mut self.eo);
    }

    /// Phase-1 UD-slice coordinate: where the four slice edges sit,
    /// ignoring their order. In `0..UDSLICE`; 0 means all four are home.
    #[must_use]
    pub fn udslice(&self) -> usize {
        let mut occupied = [false; 12];
        for (slot, &edge) in self.ep.iter().enumerate() {
            occupied[slot] = edge.in_ud_slice();
        }
        occupancy_to_index(&occupied)
    }

    pub fn set_udslice(&mut self, udslice: usize) {
        debug_assert!(udslice < UDSLICE);
        let mut occupied = [false; 12];
        index_to_occupancy(udslice, &mut occupied);
        let mut next_slice = 0;
        let mut next_other = 0;
        for (slot, &filled) in occupied.iter().enumerate() {
            if filled {
                self.ep[slot] = SLICE_EDGES[next_slice];
                next_slice += 1;
            } else {
                self.ep[slot] = OTHER_EDGES[next_other];
                next_other += 1;
            }
        }
    }

    /// Phase-2 corner permutation coordinate, in `0..CORNER`.
    #[must_use]
    pub fn corner(&self) -> usize {
        let perm = self.cp.map(|corner| corner.index() as u8);
        perm_to_index(&perm)
    }

    pub fn set_corner(&mut self, corner: usize) {
        debug_assert!(corner < CORNER);
        let mut perm = [0u8; 8];
        index_to_perm(corner, &mut perm);
        for (slot, &piece) in perm.iter().enumerate() {
            self.cp[slot] = Corner::from_index(piece as usize);
        }
    }

    /// Phase-2 coordinate of the eight U/D-layer edges, in `0..EDGE8`.
    /// Only meaningful once the slice edges are back in the slice.
    #[must_use]
    pub fn edge8(&self) -> usize {
        let mut perm = [0u8; 8];
        for (slot, digit) in perm.iter_mut().enumerate() {
            *digit = self.ep[slot].index() as u8;
        }
        perm_to_index(&perm)
    }

    pub fn set_edge8(&mut self, edge8: usize) {
        debug_assert!(edge8 < EDGE8);
        let mut perm = [0u8; 8];
        index_to_perm(edge8, &mut perm);
        for (slot, &piece) in perm.iter().enumerate() {
            self.ep[slot] = Edge::from_index(piece as usize);
        }
    }

    /// Phase-2 permutation of the slice edges among slice slots, in
    /// `0..EDGE4`.
    #[must_use]
    pub fn edge4(&self) -> usize {
        let mut perm = [0u8; 4];
        for (slot, digit) in perm.iter_mut().enumerate() {
            *digit = self.ep[8 + slot].index() as u8;
        }
        perm_to_index(&perm)
    }

    pub fn set_edge4(&mut self, edge4: usize) {
        debug_assert!(edge4 < EDGE4);
        let mut perm = [0u8; 4];
        index_to_perm(edge4, &mut perm);
        for (slot, &piece) in perm.iter().enumerate() {
            self.ep[8 + slot] = Edge::from_index(8 + piece as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    fn scrambled(moves: &[Move]) -> CubieCube {
        let mut cube = CubieCube::SOLVED;
        for &mv in moves {
            cube.apply_move(mv);
        }
        cube
    }

    #[test]
    fn solved_coordinates_are_all_zero() {
        let solved = CubieCube::SOLVED;
        assert_eq!(solved.twist(), 0);
        assert_eq!(solved.flip(), 0);
        assert_eq!(solved.udslice(), 0);
        assert_eq!(solved.corner(), 0);
        assert_eq!(solved.edge8(), 0);
        assert_eq!(solved.edge4(), 0);
    }

    #[test]
    fn every_index_round_trips() {
        let mut cube = CubieCube::SOLVED;
        for twist in 0..TWIST {
            cube.set_twist(twist);
            assert_eq!(cube.twist(), twist);
        }
        for flip in 0..FLIP {
            cube.set_flip(flip);
            assert_eq!(cube.flip(), flip);
        }
        for udslice in 0..UDSLICE {
            cube.set_udslice(udslice);
            assert_eq!(cube.udslice(), udslice);
        }
        for corner in 0..CORNER {
            cube.set_corner(corner);
            assert_eq!(cube.corner(), corner);
        }
        for edge8 in 0..EDGE8 {
            cube.set_edge8(edge8);
            assert_eq!(cube.edge8(), edge8);
        }
        for edge4 in 0..EDGE4 {
            cube.set_edge4(edge4);
            assert_eq!(cube.edge4(), edge4);
        }
    }

    #[test]
    fn setters_fill_a_consistent_state() {
        let mut cube = CubieCube::SOLVED;
        cube.set_twist(1234);
        assert_eq!(cube.co.iter().map(|&t| u32::from(t)).sum::<u32>() % 3, 0);
        cube.set_flip(999);
        assert_eq!(cube.eo.iter().map(|&f| u32::from(f)).sum::<u32>() % 2, 0);
        for udslice in [0, 1, 137, UDSLICE - 1] {
            cube.set_udslice(udslice);
            let slice_count = cube.ep.iter().filter(|edge| edge.in_ud_slice()).count();
            assert_eq!(slice_count, 4);
            let mut seen = [false; 12];
            for edge in cube.ep {
                assert!(!seen[edge.index()], "edge repeated at index {udslice}");
                seen[edge.index()] = true;
            }
        }
    }

    #[test]
    fn decode_of_encode_restores_determined_fields() {
        let cube = scrambled(&[Move::R, Move::U2, Move::F3, Move::D, Move::L2, Move::B]);
        let mut fresh = CubieCube::SOLVED;
        fresh.set_twist(cube.twist());
        assert_eq!(fresh.co, cube.co);
        fresh.set_flip(cube.flip());
        assert_eq!(fresh.eo, cube.eo);
        fresh.set_corner(cube.corner());
        assert_eq!(fresh.cp, cube.cp);
        fresh.set_udslice(cube.udslice());
        for slot in 0..12 {
            assert_eq!(
                fresh.ep[slot].in_ud_slice(),
                cube.ep[slot].in_ud_slice(),
                "occupancy differs at slot {slot}"
            );
        }
    }

    #[test]
    fn phase_2_coordinates_restore_subgroup_edges() {
        // Phase-2 moves only, so the slice edges never leave the slice.
        let cube = scrambled(&[Move::U, Move::R2, Move::D3, Move::F2, Move::U2, Move::L2]);
        assert_eq!(cube.udslice(), 0);
        let mut fresh = CubieCube::SOLVED;
        fresh.set_edge8(cube.edge8());
        assert_eq!(fresh.ep[..8], cube.ep[..8]);
        fresh.set_edge4(cube.edge4());
        assert_eq!(fresh.ep[8..], cube.ep[8..]);
    }
}
