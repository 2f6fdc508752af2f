use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MoveError;
use crate::BOARD_SIZE;

lazy_static! {
    static ref SQUARE_RE: Regex = Regex::new(r"^([a-hA-H])([1-8])$").unwrap();
    static ref MOVE_RE: Regex = Regex::new(r"^([a-hA-H])([1-8])\s*[-\s]?\s*([a-hA-H])([1-8])$").unwrap();
}

/// A square on the board. Row 0 is White's home rank (rank 1), column 0 is file `a`.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    /// Builds a coordinate, rejecting anything off the 8x8 grid.
    pub fn new(row: i8, col: i8) -> Result<Coord, MoveError> {
        if Coord::on_board(row, col) {
            Ok(Coord { row, col })
        } else {
            Err(MoveError::OutOfBounds { row, col })
        }
    }

    #[inline]
    fn on_board(row: i8, col: i8) -> bool {
        (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col)
    }

    /// The square `(dr, dc)` away, or `None` when that falls off the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Coord> {
        Coord::new(self.row + dr, self.col + dc).ok()
    }

    /// Row-major iteration: row 0 first, column 0 first within a row.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE as i8).flat_map(|row| (0..BOARD_SIZE as i8).map(move |col| Coord { row, col }))
    }

    pub(crate) fn index(self) -> (usize, usize) { (self.row as usize, self.col as usize) }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !Coord::on_board(self.row, self.col) {
            return write!(f, "({},{})", self.row, self.col);
        }
        let file_char = (b'a' + self.col as u8) as char;
        let rank_char = (b'1' + self.row as u8) as char;
        write!(f, "{}{}", file_char, rank_char)
    }
}

fn coord_from_chars(file: &str, rank: &str) -> Coord {
    let file = file.as_bytes()[0].to_ascii_lowercase() - b'a';
    let rank = rank.as_bytes()[0] - b'1';
    // The regexes only admit a-h and 1-8.
    Coord { row: rank as i8, col: file as i8 }
}

/// Parses a square such as `e2` (column letter, then row digit).
pub fn parse_square(input: &str) -> Result<Coord, MoveError> {
    let trimmed = input.trim();
    let caps = SQUARE_RE.captures(trimmed)
        .ok_or_else(|| MoveError::InvalidFormat(trimmed.to_string()))?;
    Ok(coord_from_chars(&caps[1], &caps[2]))
}

/// Parses a from/to pair such as `e2e4`, `e2-e4` or `e2 e4`.
pub fn parse_move_text(input: &str) -> Result<(Coord, Coord), MoveError> {
    let trimmed = input.trim();
    let caps = MOVE_RE.captures(trimmed)
        .ok_or_else(|| MoveError::InvalidFormat(trimmed.to_string()))?;
    Ok((coord_from_chars(&caps[1], &caps[2]), coord_from_chars(&caps[3], &caps[4])))
}
