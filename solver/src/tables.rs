//! Precomputed coordinate move tables and exact pruning tables.
//!
//! A move table row holds the successor coordinate for each of the eighteen
//! face turns. The four pruning tables store, for a pair of coordinates, the
//! exact number of moves needed to bring both to zero under the moves the
//! owning phase allows, which makes them admissible and sharp lower bounds
//! for iterative deepening.

use std::sync::OnceLock;
use std::time::Instant;

use cube::coord::{CORNER, EDGE4, EDGE8, FLIP, TWIST, UDSLICE};
use cube::{CubieCube, Face, Move};
use log::{debug, info};

use crate::{start, success, working};

/// Dense `coordinate x move` transition table. Entries are `-1` for moves the
/// owning phase does not allow, and the successor coordinate otherwise.
pub type MoveTable = Box<[[i32; Move::COUNT]]>;

/// Distance table over the product of two coordinate spaces, laid out as
/// `first * stride + second` where `stride` is the size of the second space.
#[derive(Debug, PartialEq, Eq)]
pub struct PruningTable {
    pub(crate) table: Box<[i8]>,
    pub(crate) stride: usize,
}

impl PruningTable {
    /// Exact number of moves to bring both coordinates to zero.
    #[must_use]
    pub fn lookup(&self, first: usize, second: usize) -> i8 {
        self.table[first * self.stride + second]
    }
}

/// Every table the two-phase search reads. The bundle is immutable once
/// built; solvers borrow it and never write through it.
#[derive(Debug, PartialEq, Eq)]
pub struct Tables {
    pub twist_move: MoveTable,
    pub flip_move: MoveTable,
    pub udslice_move: MoveTable,
    pub edge4_move: MoveTable,
    pub edge8_move: MoveTable,
    pub corner_move: MoveTable,
    pub udslice_twist_prune: PruningTable,
    pub udslice_flip_prune: PruningTable,
    pub edge4_edge8_prune: PruningTable,
    pub edge4_corner_prune: PruningTable,
}

impl Tables {
    /// Builds every table from scratch. Takes a few seconds; callers that
    /// solve more than once should hold on to the result or use
    /// [`Tables::shared`].
    #[must_use]
    pub fn generate() -> Tables {
        info!(start!("Generating move and pruning tables"));
        let start = Instant::now();

        let twist_move = timed("twist moves", || {
            move_table(TWIST, CubieCube::set_twist, corner_turn, CubieCube::twist, false)
        });
        let flip_move = timed("flip moves", || {
            move_table(FLIP, CubieCube::set_flip, edge_turn, CubieCube::flip, false)
        });
        let udslice_move = timed("udslice moves", || {
            move_table(UDSLICE, CubieCube::set_udslice, edge_turn, CubieCube::udslice, false)
        });
        let edge4_move = timed("edge4 moves", || {
            move_table(EDGE4, CubieCube::set_edge4, edge_turn, CubieCube::edge4, true)
        });
        let edge8_move = timed("edge8 moves", || {
            move_table(EDGE8, CubieCube::set_edge8, edge_turn, CubieCube::edge8, true)
        });
        let corner_move = timed("corner moves", || {
            move_table(CORNER, CubieCube::set_corner, corner_turn, CubieCube::corner, true)
        });

        let udslice_twist_prune = timed("udslice x twist pruning", || {
            pruning_table(&udslice_move, &twist_move)
        });
        let udslice_flip_prune = timed("udslice x flip pruning", || {
            pruning_table(&udslice_move, &flip_move)
        });
        let edge4_edge8_prune = timed("edge4 x edge8 pruning", || {
            pruning_table(&edge4_move, &edge8_move)
        });
        let edge4_corner_prune = timed("edge4 x corner pruning", || {
            pruning_table(&edge4_move, &corner_move)
        });

        info!(success!("Tables ready in {:.3}s"), start.elapsed().as_secs_f64());

        Tables {
            twist_move,
            flip_move,
            udslice_move,
            edge4_move,
            edge8_move,
            corner_move,
            udslice_twist_prune,
            udslice_flip_prune,
            edge4_edge8_prune,
            edge4_corner_prune,
        }
    }

    /// Process-wide table bundle, generated on first use. Concurrent callers
    /// block until the one generation finishes.
    #[must_use]
    pub fn shared() -> &'static Tables {
        static SHARED: OnceLock<Tables> = OnceLock::new();
        SHARED.get_or_init(Tables::generate)
    }

    pub(crate) fn move_tables(&self) -> [(&'static str, &MoveTable); 6] {
        [
            ("twist_move", &self.twist_move),
            ("flip_move", &self.flip_move),
            ("udslice_move", &self.udslice_move),
            ("edge4_move", &self.edge4_move),
            ("edge8_move", &self.edge8_move),
            ("corner_move", &self.corner_move),
        ]
    }

    pub(crate) fn pruning_tables(&self) -> [(&'static str, &PruningTable); 4] {
        [
            ("udslice_twist_prune", &self.udslice_twist_prune),
            ("udslice_flip_prune", &self.udslice_flip_prune),
            ("edge4_edge8_prune", &self.edge4_edge8_prune),
            ("edge4_corner_prune", &self.edge4_corner_prune),
        ]
    }
}

fn corner_turn(cube: &mut CubieCube, face: Face) {
    cube.corner_multiply(&CubieCube::BASE_MOVES[face.index()]);
}

fn edge_turn(cube: &mut CubieCube, face: Face) {
    cube.edge_multiply(&CubieCube::BASE_MOVES[face.index()]);
}

fn timed<T>(name: &str, build: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let table = build();
    debug!(working!("Built {} in {:.3}s"), name, start.elapsed().as_secs_f64());
    table
}

/// Tabulates `read` after one, two and three turns of each face applied to
/// the cube seeded with every coordinate value in turn. With `restricted`
/// set, quarter turns of R, F, L and B store `-1` instead.
fn move_table(
    size: usize,
    seed: impl Fn(&mut CubieCube, usize),
    advance: impl Fn(&mut CubieCube, Face),
    read: impl Fn(&CubieCube) -> usize,
    restricted: bool,
) -> MoveTable {
    let mut table = vec![[0; Move::COUNT]; size].into_boxed_slice();
    let mut cube = CubieCube::SOLVED;
    for (index, row) in table.iter_mut().enumerate() {
        seed(&mut cube, index);
        for face in Face::ALL {
            for power in 1..=3 {
                advance(&mut cube, face);
                row[3 * face.index() + power - 1] =
                    if restricted && power != 2 && face.index() % 3 != 0 {
                        -1
                    } else {
                        read(&cube) as i32
                    };
            }
            // the fourth turn restores the seeded state
            advance(&mut cube, face);
        }
    }
    table
}

/// Breadth-first scan outward from `(0, 0)`, following only the moves both
/// tables allow. Every product state is reachable, so filling proceeds until
/// the count converges and no entry is left at `-1`.
fn pruning_table(first_moves: &MoveTable, second_moves: &MoveTable) -> PruningTable {
    let stride = second_moves.len();
    let mut table = vec![-1_i8; first_moves.len() * stride].into_boxed_slice();
    table[0] = 0;
    let mut filled = 1;
    let mut depth = 0;
    while filled < table.len() {
        for index in 0..table.len() {
            if table[index] != depth {
                continue;
            }
            let first_row = &first_moves[index / stride];
            let second_row = &second_moves[index % stride];
            for mv in 0..Move::COUNT {
                // a -1 entry is a forbidden move, not a coordinate
                if first_row[mv] < 0 || second_row[mv] < 0 {
                    continue;
                }
                let neighbor = first_row[mv] as usize * stride + second_row[mv] as usize;
                if table[neighbor] < 0 {
                    table[neighbor] = depth + 1;
                    filled += 1;
                }
            }
        }
        depth += 1;
    }
    PruningTable { table, stride }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_matches_cubie_model(
        table: &MoveTable,
        seed: impl Fn(&mut CubieCube, usize),
        read: impl Fn(&CubieCube) -> usize,
    ) {
        for index in 0..table.len() {
            for mv in Move::ALL {
                let entry = table[index][mv.index()];
                if entry < 0 {
                    continue;
                }
                let mut cube = CubieCube::SOLVED;
                seed(&mut cube, index);
                cube.apply_move(mv);
                assert_eq!(entry as usize, read(&cube), "{mv} from index {index}");
            }
        }
    }

    #[test]
    fn twist_table_matches_cubie_model() {
        let table =
            move_table(TWIST, CubieCube::set_twist, corner_turn, CubieCube::twist, false);
        table_matches_cubie_model(&table, CubieCube::set_twist, CubieCube::twist);
    }

    #[test]
    fn flip_table_matches_cubie_model() {
        let table = move_table(FLIP, CubieCube::set_flip, edge_turn, CubieCube::flip, false);
        table_matches_cubie_model(&table, CubieCube::set_flip, CubieCube::flip);
    }

    #[test]
    fn udslice_table_matches_cubie_model() {
        let table =
            move_table(UDSLICE, CubieCube::set_udslice, edge_turn, CubieCube::udslice, false);
        table_matches_cubie_model(&table, CubieCube::set_udslice, CubieCube::udslice);
    }

    #[test]
    fn edge4_table_matches_cubie_model() {
        let table = move_table(EDGE4, CubieCube::set_edge4, edge_turn, CubieCube::edge4, true);
        table_matches_cubie_model(&table, CubieCube::set_edge4, CubieCube::edge4);
    }

    #[test]
    fn restricted_tables_mark_exactly_the_quarter_turns_off_ud() {
        let table = move_table(EDGE4, CubieCube::set_edge4, edge_turn, CubieCube::edge4, true);
        for row in &table {
            for mv in Move::ALL {
                let leaves_subgroup = mv.power() != 2 && mv.face().index() % 3 != 0;
                assert_eq!(row[mv.index()] == -1, leaves_subgroup, "{mv}");
            }
        }
    }

    #[test]
    fn zero_entries_are_reachable_coordinates_not_sentinels() {
        // U never touches the slice edges, and a half turn undoes itself
        let edge4 = move_table(EDGE4, CubieCube::set_edge4, edge_turn, CubieCube::edge4, true);
        assert_eq!(edge4[0][Move::U.index()], 0);

        let corner =
            move_table(CORNER, CubieCube::set_corner, corner_turn, CubieCube::corner, true);
        let mut cube = CubieCube::SOLVED;
        cube.apply_move(Move::U2);
        assert_eq!(corner[cube.corner()][Move::U2.index()], 0);
    }
}
