//! Facelet-level cube description: 54 colored stickers in the canonical
//! U, R, F, D, L, B face order, and the structural conversion to and from
//! the cubie representation.

use std::fmt;
use std::str::FromStr;

use crate::CubeError;
use crate::cubie::{Corner, CubieCube, Edge};

/// Sticker color, named after the face it belongs to on a solved cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Color {
    pub const ALL: [Color; 6] = [Color::U, Color::R, Color::F, Color::D, Color::L, Color::B];

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Color::U => 'U',
            Color::R => 'R',
            Color::F => 'F',
            Color::D => 'D',
            Color::L => 'L',
            Color::B => 'B',
        }
    }
}

impl TryFrom<char> for Color {
    type Error = CubeError;

    fn try_from(c: char) -> Result<Self, CubeError> {
        match c {
            'U' => Ok(Color::U),
            'R' => Ok(Color::R),
            'F' => Ok(Color::F),
            'D' => Ok(Color::D),
            'L' => Ok(Color::L),
            'B' => Ok(Color::B),
            other => Err(CubeError::UnknownColor(other)),
        }
    }
}

/// Sticker indices of each corner slot, U/D sticker first, then clockwise.
const CORNER_FACELET: [[usize; 3]; 8] = [
    [8, 9, 20],
    [6, 18, 38],
    [0, 36, 47],
    [2, 45, 11],
    [29, 26, 15],
    [27, 44, 24],
    [33, 53, 42],
    [35, 17, 51],
];

/// Sticker indices of each edge slot, in reference orientation.
const EDGE_FACELET: [[usize; 2]; 12] = [
    [5, 10],
    [7, 19],
    [3, 37],
    [1, 46],
    [32, 16],
    [28, 25],
    [30, 43],
    [34, 52],
    [23, 12],
    [21, 41],
    [50, 39],
    [48, 14],
];

/// Colors of each corner piece, in the same sticker order as
/// [`CORNER_FACELET`].
const CORNER_COLOR: [[Color; 3]; 8] = [
    [Color::U, Color::R, Color::F],
    [Color::U, Color::F, Color::L],
    [Color::U, Color::L, Color::B],
    [Color::U, Color::B, Color::R],
    [Color::D, Color::F, Color::R],
    [Color::D, Color::L, Color::F],
    [Color::D, Color::B, Color::L],
    [Color::D, Color::R, Color::B],
];

/// Colors of each edge piece, in the same sticker order as [`EDGE_FACELET`].
const EDGE_COLOR: [[Color; 2]; 12] = [
    [Color::U, Color::R],
    [Color::U, Color::F],
    [Color::U, Color::L],
    [Color::U, Color::B],
    [Color::D, Color::R],
    [Color::D, Color::F],
    [Color::D, Color::L],
    [Color::D, Color::B],
    [Color::F, Color::R],
    [Color::F, Color::L],
    [Color::B, Color::L],
    [Color::B, Color::R],
];

/// A cube described by its 54 sticker colors, stored in face order
/// U1..U9, R1..R9, F1..F9, D1..D9, L1..L9, B1..B9 with each face read
/// row by row from its top-left sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceCube {
    pub f: [Color; 54],
}

impl FaceCube {
    #[must_use]
    pub fn solved() -> Self {
        let mut f = [Color::U; 54];
        for (face, color) in Color::ALL.iter().enumerate() {
            f[9 * face..9 * (face + 1)].fill(*color);
        }
        Self { f }
    }

    /// Reads the cubie state off the stickers. Slots whose stickers match no
    /// real piece keep a placeholder, so the result must go through
    /// [`CubieCube::validate`] before it is trusted.
    #[must_use]
    pub fn to_cubie(&self) -> CubieCube {
        let mut cube = CubieCube::SOLVED;
        for (slot, facelets) in CORNER_FACELET.iter().enumerate() {
            // A corner is identified by rotating until its U/D sticker is
            // first, then matching the remaining two colors clockwise.
            let ori = (0..3)
                .find(|&n| matches!(self.f[facelets[n]], Color::U | Color::D))
                .unwrap_or(0);
            let col1 = self.f[facelets[(ori + 1) % 3]];
            let col2 = self.f[facelets[(ori + 2) % 3]];
            for (piece, colors) in CORNER_COLOR.iter().enumerate() {
                if col1 == colors[1] && col2 == colors[2] {
                    cube.cp[slot] = Corner::from_index(piece);
                    cube.co[slot] = ori as u8;
                    break;
                }
            }
        }
        for (slot, facelets) in EDGE_FACELET.iter().enumerate() {
            for (piece, colors) in EDGE_COLOR.iter().enumerate() {
                if self.f[facelets[0]] == colors[0] && self.f[facelets[1]] == colors[1] {
                    cube.ep[slot] = Edge::from_index(piece);
                    cube.eo[slot] = 0;
                    break;
                }
                if self.f[facelets[0]] == colors[1] && self.f[facelets[1]] == colors[0] {
                    cube.ep[slot] = Edge::from_index(piece);
                    cube.eo[slot] = 1;
                    break;
                }
            }
        }
        cube
    }

    /// Paints the stickers implied by a cubie state.
    #[must_use]
    pub fn from_cubie(cube: &CubieCube) -> Self {
        let mut face = Self::solved();
        for (slot, facelets) in CORNER_FACELET.iter().enumerate() {
            let piece = cube.cp[slot].index();
            let ori = cube.co[slot] as usize;
            for n in 0..3 {
                face.f[facelets[(n + ori) % 3]] = CORNER_COLOR[piece][n];
            }
        }
        for (slot, facelets) in EDGE_FACELET.iter().enumerate() {
            let piece = cube.ep[slot].index();
            let ori = cube.eo[slot] as usize;
            for n in 0..2 {
                face.f[facelets[(n + ori) % 2]] = EDGE_COLOR[piece][n];
            }
        }
        face
    }
}

impl FromStr for FaceCube {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, CubeError> {
        let count = s.chars().count();
        if count != 54 {
            return Err(CubeError::InvalidLength(count));
        }
        let mut f = [Color::U; 54];
        for (slot, c) in s.chars().enumerate() {
            f[slot] = Color::try_from(c)?;
        }
        Ok(Self { f })
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.f {
            write!(formatter, "{}", color.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    const SOLVED_FACELETS: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn solved_string_parses_to_solved_cubie() {
        let face: FaceCube = SOLVED_FACELETS.parse().unwrap();
        assert_eq!(face, FaceCube::solved());
        assert!(face.to_cubie().is_solved());
        assert_eq!(FaceCube::solved().to_string(), SOLVED_FACELETS);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(
            "UUU".parse::<FaceCube>(),
            Err(CubeError::InvalidLength(3))
        );
        let too_long = SOLVED_FACELETS.to_owned() + "U";
        assert_eq!(
            too_long.parse::<FaceCube>(),
            Err(CubeError::InvalidLength(55))
        );
        let bad_color = SOLVED_FACELETS.replace('F', "X");
        assert_eq!(
            bad_color.parse::<FaceCube>(),
            Err(CubeError::UnknownColor('X'))
        );
    }

    #[test]
    fn cubie_round_trips_through_stickers() {
        let mut cube = CubieCube::SOLVED;
        for mv in [Move::R, Move::U2, Move::F3, Move::L, Move::D, Move::B2, Move::R3] {
            cube.apply_move(mv);
            let painted = FaceCube::from_cubie(&cube);
            assert_eq!(painted.to_cubie(), cube);
        }
    }

    #[test]
    fn display_and_parse_are_inverses() {
        let mut cube = CubieCube::SOLVED;
        for mv in [Move::F, Move::R3, Move::D2, Move::B, Move::U] {
            cube.apply_move(mv);
        }
        let painted = FaceCube::from_cubie(&cube);
        let reparsed: FaceCube = painted.to_string().parse().unwrap();
        assert_eq!(reparsed, painted);
    }

    #[test]
    fn single_quarter_turn_paints_the_expected_stickers() {
        let mut cube = CubieCube::SOLVED;
        cube.apply_move(Move::U);
        let painted = FaceCube::from_cubie(&cube);
        // U turn leaves the U and D faces uniform and cycles the top rows
        // of the four side faces.
        assert!(painted.f[..9].iter().all(|&c| c == Color::U));
        assert!(painted.f[27..36].iter().all(|&c| c == Color::D));
        assert_eq!(&painted.f[9..12], &[Color::B, Color::B, Color::B]);
        assert_eq!(&painted.f[18..21], &[Color::R, Color::R, Color::R]);
        assert_eq!(&painted.f[36..39], &[Color::F, Color::F, Color::F]);
        assert_eq!(&painted.f[45..48], &[Color::L, Color::L, Color::L]);
    }
}
