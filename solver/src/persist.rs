//! Binary serialization of the table bundle.
//!
//! The format is a magic/version header followed by the ten tables in a
//! fixed order, each framed as a length-prefixed name and its payload. All
//! integers are little endian. Decoding checks every name and shape so a
//! stale or foreign file is rejected instead of producing a bundle that
//! misbehaves at solve time.

use cube::Move;
use cube::coord::{CORNER, EDGE4, EDGE8, FLIP, TWIST, UDSLICE};
use thiserror::Error;

use crate::tables::{MoveTable, PruningTable, Tables};

const MAGIC: [u8; 4] = *b"RKTB";
const VERSION: u32 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("table data is truncated")]
    Truncated,
    #[error("not a table file")]
    BadMagic,
    #[error("unsupported table format version {0}")]
    Version(u32),
    #[error("expected table {expected:?}, found {found:?}")]
    WrongTable {
        expected: &'static str,
        found: String,
    },
    #[error("table {0:?} does not have its expected shape")]
    WrongShape(&'static str),
    #[error("trailing bytes after the last table")]
    TrailingBytes,
}

#[must_use]
pub fn encode(tables: &Tables) -> Vec<u8> {
    let mut stream = Vec::new();
    stream.extend_from_slice(&MAGIC);
    stream.extend_from_slice(&VERSION.to_le_bytes());
    for (name, table) in tables.move_tables() {
        write_name(&mut stream, name);
        stream.extend_from_slice(&(table.len() as u32).to_le_bytes());
        for row in table.iter() {
            for entry in row {
                stream.extend_from_slice(&entry.to_le_bytes());
            }
        }
    }
    for (name, table) in tables.pruning_tables() {
        write_name(&mut stream, name);
        stream.extend_from_slice(&(table.stride as u32).to_le_bytes());
        stream.extend_from_slice(&(table.table.len() as u32).to_le_bytes());
        stream.extend(table.table.iter().map(|&distance| distance as u8));
    }
    stream
}

pub fn decode(mut data: &[u8]) -> Result<Tables, DecodeError> {
    if take_bytes(&mut data, MAGIC.len())? != &MAGIC[..] {
        return Err(DecodeError::BadMagic);
    }
    let version = take_u32(&mut data)?;
    if version != VERSION {
        return Err(DecodeError::Version(version));
    }

    let twist_move = decode_move_table(&mut data, "twist_move", TWIST)?;
    let flip_move = decode_move_table(&mut data, "flip_move", FLIP)?;
    let udslice_move = decode_move_table(&mut data, "udslice_move", UDSLICE)?;
    let edge4_move = decode_move_table(&mut data, "edge4_move", EDGE4)?;
    let edge8_move = decode_move_table(&mut data, "edge8_move", EDGE8)?;
    let corner_move = decode_move_table(&mut data, "corner_move", CORNER)?;
    let udslice_twist_prune =
        decode_pruning_table(&mut data, "udslice_twist_prune", UDSLICE, TWIST)?;
    let udslice_flip_prune =
        decode_pruning_table(&mut data, "udslice_flip_prune", UDSLICE, FLIP)?;
    let edge4_edge8_prune = decode_pruning_table(&mut data, "edge4_edge8_prune", EDGE4, EDGE8)?;
    let edge4_corner_prune =
        decode_pruning_table(&mut data, "edge4_corner_prune", EDGE4, CORNER)?;

    if !data.is_empty() {
        return Err(DecodeError::TrailingBytes);
    }

    Ok(Tables {
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
    })
}

fn write_name(stream: &mut Vec<u8>, name: &str) {
    stream.extend_from_slice(&(name.len() as u32).to_le_bytes());
    stream.extend_from_slice(name.as_bytes());
}

fn expect_name(data: &mut &[u8], expected: &'static str) -> Result<(), DecodeError> {
    let length = take_u32(data)? as usize;
    let found = take_bytes(data, length)?;
    if found != expected.as_bytes() {
        return Err(DecodeError::WrongTable {
            expected,
            found: String::from_utf8_lossy(found).into_owned(),
        });
    }
    Ok(())
}

fn decode_move_table(
    data: &mut &[u8],
    name: &'static str,
    size: usize,
) -> Result<MoveTable, DecodeError> {
    expect_name(data, name)?;
    let rows = take_u32(data)? as usize;
    if rows != size {
        return Err(DecodeError::WrongShape(name));
    }
    let mut table = vec![[0; Move::COUNT]; rows].into_boxed_slice();
    for row in &mut table {
        for entry in row {
            *entry = take_i32(data)?;
        }
    }
    Ok(table)
}

fn decode_pruning_table(
    data: &mut &[u8],
    name: &'static str,
    first: usize,
    second: usize,
) -> Result<PruningTable, DecodeError> {
    expect_name(data, name)?;
    let stride = take_u32(data)? as usize;
    let length = take_u32(data)? as usize;
    if stride != second || length != first * second {
        return Err(DecodeError::WrongShape(name));
    }
    let bytes = take_bytes(data, length)?;
    let table = bytes.iter().map(|&byte| byte as i8).collect();
    Ok(PruningTable { table, stride })
}

fn take_u32(data: &mut &[u8]) -> Result<u32, DecodeError> {
    let (head, rest) = data.split_first_chunk::<4>().ok_or(DecodeError::Truncated)?;
    *data = rest;
    Ok(u32::from_le_bytes(*head))
}

fn take_i32(data: &mut &[u8]) -> Result<i32, DecodeError> {
    let (head, rest) = data.split_first_chunk::<4>().ok_or(DecodeError::Truncated)?;
    *data = rest;
    Ok(i32::from_le_bytes(*head))
}

fn take_bytes<'a>(data: &mut &'a [u8], length: usize) -> Result<&'a [u8], DecodeError> {
    if data.len() < length {
        return Err(DecodeError::Truncated);
    }
    let (head, rest) = data.split_at(length);
    *data = rest;
    Ok(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_foreign_and_truncated_headers() {
        assert_eq!(decode(b"").unwrap_err(), DecodeError::Truncated);
        assert_eq!(decode(b"RK").unwrap_err(), DecodeError::Truncated);
        assert_eq!(decode(b"JSON").unwrap_err(), DecodeError::BadMagic);

        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&9_u32.to_le_bytes());
        assert_eq!(decode(&data).unwrap_err(), DecodeError::Version(9));

        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&VERSION.to_le_bytes());
        assert_eq!(decode(&data).unwrap_err(), DecodeError::Truncated);
    }

    #[test]
    fn rejects_a_misnamed_first_table() {
        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&VERSION.to_le_bytes());
        write_name(&mut data, "bogus");
        assert_eq!(
            decode(&data).unwrap_err(),
            DecodeError::WrongTable {
                expected: "twist_move",
                found: "bogus".to_owned(),
            }
        );
    }

    #[test]
    fn rejects_a_table_with_the_wrong_row_count() {
        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&VERSION.to_le_bytes());
        write_name(&mut data, "twist_move");
        data.extend_from_slice(&1_u32.to_le_bytes());
        assert_eq!(decode(&data).unwrap_err(), DecodeError::WrongShape("twist_move"));
    }
}
