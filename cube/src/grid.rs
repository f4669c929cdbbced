//! Sticker-grid cube in the wire format used by clients: six 3x3 faces of
//! arbitrary color characters, serialized in up, left, front, right, back,
//! down order. Turns are implemented as row/column cycles on the grid, which
//! keeps replaying a solution independent of the cubie machinery it checks.

use std::fmt;
use std::str::FromStr;

use crate::CubeError;
use crate::facelet::{Color, FaceCube};
use crate::moves::{Face, Move};

const UP: usize = 0;
const LEFT: usize = 1;
const FRONT: usize = 2;
const RIGHT: usize = 3;
const BACK: usize = 4;
const DOWN: usize = 5;

/// Wire faces in canonical U, R, F, D, L, B order.
const CANONICAL: [usize; 6] = [UP, RIGHT, FRONT, DOWN, LEFT, BACK];

fn rotate_cw(face: [[char; 3]; 3]) -> [[char; 3]; 3] {
    let mut rotated = face;
    for (r, row) in rotated.iter_mut().enumerate() {
        for (c, sticker) in row.iter_mut().enumerate() {
            *sticker = face[2 - c][r];
        }
    }
    rotated
}

/// A cube as the client draws it, indexed `faces[face][row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cube {
    faces: [[[char; 3]; 3]; 6],
}

impl Cube {
    /// Solved cube colored with the canonical face letters.
    #[must_use]
    pub fn solved() -> Self {
        let letters = ['U', 'L', 'F', 'R', 'B', 'D'];
        Self {
            faces: letters.map(|letter| [[letter; 3]; 3]),
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.faces.iter().all(|face| {
            let middle = face[1][1];
            face.iter().flatten().all(|&sticker| sticker == middle)
        })
    }

    /// Applies one move by repeating its face's clockwise turn.
    pub fn transform(&mut self, mv: Move) {
        for _ in 0..mv.power() {
            self.turn_cw(mv.face());
        }
    }

    fn turn_cw(&mut self, face: Face) {
        let old = self.faces;
        match face {
            Face::U => {
                self.faces[LEFT][0] = old[FRONT][0];
                self.faces[BACK][0] = old[LEFT][0];
                self.faces[RIGHT][0] = old[BACK][0];
                self.faces[FRONT][0] = old[RIGHT][0];
                self.faces[UP] = rotate_cw(old[UP]);
            }
            Face::D => {
                self.faces[RIGHT][2] = old[FRONT][2];
                self.faces[BACK][2] = old[RIGHT][2];
                self.faces[LEFT][2] = old[BACK][2];
                self.faces[FRONT][2] = old[LEFT][2];
                self.faces[DOWN] = rotate_cw(old[DOWN]);
            }
            Face::L => {
                // The back face is traversed upside down relative to the
                // other three, hence the reversed rows.
                for r in 0..3 {
                    self.faces[DOWN][r][0] = old[FRONT][r][0];
                    self.faces[BACK][r][2] = old[DOWN][2 - r][0];
                    self.faces[UP][r][0] = old[BACK][2 - r][2];
                    self.faces[FRONT][r][0] = old[UP][r][0];
                }
                self.faces[LEFT] = rotate_cw(old[LEFT]);
            }
            Face::R => {
                for r in 0..3 {
                    self.faces[UP][r][2] = old[FRONT][r][2];
                    self.faces[BACK][r][0] = old[UP][2 - r][2];
                    self.faces[DOWN][r][2] = old[BACK][2 - r][0];
                    self.faces[FRONT][r][2] = old[DOWN][r][2];
                }
                self.faces[RIGHT] = rotate_cw(old[RIGHT]);
            }
            Face::F => {
                for r in 0..3 {
                    self.faces[UP][2][r] = old[LEFT][2 - r][2];
                    self.faces[RIGHT][r][0] = old[UP][2][r];
                    self.faces[DOWN][0][r] = old[RIGHT][2 - r][0];
                    self.faces[LEFT][r][2] = old[DOWN][0][r];
                }
                self.faces[FRONT] = rotate_cw(old[FRONT]);
            }
            Face::B => {
                for r in 0..3 {
                    self.faces[UP][0][r] = old[RIGHT][r][2];
                    self.faces[LEFT][r][0] = old[UP][0][2 - r];
                    self.faces[DOWN][2][r] = old[LEFT][r][0];
                    self.faces[RIGHT][r][2] = old[DOWN][2][2 - r];
                }
                self.faces[BACK] = rotate_cw(old[BACK]);
            }
        }
    }

    /// Maps the grid onto canonical facelets by matching each sticker
    /// against the six face centers. Fails if the centers are not six
    /// distinct colors or any color does not appear exactly nine times.
    pub fn to_facelets(&self) -> Result<FaceCube, CubeError> {
        let centers: [char; 6] = CANONICAL.map(|face| self.faces[face][1][1]);
        for (i, center) in centers.iter().enumerate() {
            if centers[..i].contains(center) {
                return Err(CubeError::CenterColors);
            }
        }
        let mut f = [Color::U; 54];
        let mut counts = [0usize; 6];
        for (k, &face) in CANONICAL.iter().enumerate() {
            for r in 0..3 {
                for c in 0..3 {
                    let sticker = self.faces[face][r][c];
                    let Some(which) = centers.iter().position(|&m| m == sticker) else {
                        return Err(CubeError::ColorCount);
                    };
                    counts[which] += 1;
                    f[9 * k + 3 * r + c] = Color::ALL[which];
                }
            }
        }
        if counts.iter().any(|&n| n != 9) {
            return Err(CubeError::ColorCount);
        }
        Ok(FaceCube { f })
    }
}

impl FromStr for Cube {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, CubeError> {
        let stickers: Vec<char> = s.chars().collect();
        if stickers.len() != 54 {
            return Err(CubeError::InvalidLength(stickers.len()));
        }
        let mut faces = [[[' '; 3]; 3]; 6];
        for (i, &sticker) in stickers.iter().enumerate() {
            faces[i / 9][(i % 9) / 3][i % 3] = sticker;
        }
        Ok(Self { faces })
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in &self.faces {
            for row in face {
                for &sticker in row {
                    write!(formatter, "{sticker}")?;
                }
            }
        }
        Ok(())
    }
}
