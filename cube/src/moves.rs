//! Face-turn notation.
//!
//! The 18 elementary turns are indexed `3 * face + power - 1`, with faces in
//! `U R F D L B` order and powers 1..=3 (clockwise quarter, half, reverse
//! quarter). Opposite faces sit three apart, which the search relies on when
//! it skips redundant consecutive turns.

use std::fmt;
use std::str::FromStr;

/// One of the six faces, in `U R F D L B` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// # Panics
    /// Panics if `index` is not in `0..6`.
    #[must_use]
    pub fn from_index(index: usize) -> Face {
        Self::ALL[index]
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One of the 18 elementary turns. The discriminant is the table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl Move {
    pub const COUNT: usize = 18;

    #[rustfmt::skip]
    pub const ALL: [Move; 18] = [
        Move::U, Move::U2, Move::U3,
        Move::R, Move::R2, Move::R3,
        Move::F, Move::F2, Move::F3,
        Move::D, Move::D2, Move::D3,
        Move::L, Move::L2, Move::L3,
        Move::B, Move::B2, Move::B3,
    ];

    /// # Panics
    /// Panics if `power` is not in `1..=3`.
    #[must_use]
    pub fn from_face_power(face: Face, power: usize) -> Move {
        assert!((1..=3).contains(&power));
        Self::ALL[3 * face.index() + power - 1]
    }

    /// Index into the move dimension of the transition tables.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn face(self) -> Face {
        Face::from_index(self.index() / 3)
    }

    /// How many clockwise quarter turns this move applies (1..=3).
    #[must_use]
    pub fn power(self) -> usize {
        self.index() % 3 + 1
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.power() {
            1 => "",
            2 => "2",
            _ => "'",
        };
        write!(f, "{}{}", self.face().letter(), suffix)
    }
}

impl FromStr for Move {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = match chars.next() {
            Some('U') => Face::U,
            Some('R') => Face::R,
            Some('F') => Face::F,
            Some('D') => Face::D,
            Some('L') => Face::L,
            Some('B') => Face::B,
            _ => return Err(()),
        };
        let power = match (chars.next(), chars.next()) {
            (None, _) => 1,
            (Some('2'), None) => 2,
            (Some('\''), None) => 3,
            _ => return Err(()),
        };
        Ok(Move::from_face_power(face, power))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_indices_follow_face_and_power() {
        for (i, mv) in Move::ALL.iter().enumerate() {
            assert_eq!(mv.index(), i);
            assert_eq!(mv.index(), 3 * mv.face().index() + mv.power() - 1);
            assert_eq!(Move::from_face_power(mv.face(), mv.power()), *mv);
        }
    }

    #[test]
    fn tokens_round_trip() {
        for mv in Move::ALL {
            assert_eq!(mv.to_string().parse::<Move>(), Ok(mv));
        }
        assert_eq!("R'".parse::<Move>(), Ok(Move::R3));
        assert_eq!("U2".parse::<Move>(), Ok(Move::U2));
        assert!("X".parse::<Move>().is_err());
        assert!("U3".parse::<Move>().is_err());
        assert!("R''".parse::<Move>().is_err());
    }

    #[test]
    fn opposite_faces_sit_three_apart() {
        assert_eq!(Face::U.index() + 3, Face::D.index());
        assert_eq!(Face::R.index() + 3, Face::L.index());
        assert_eq!(Face::F.index() + 3, Face::B.index());
    }
}
