//! Conversion between human cell references ("A1", "j10") and zero-based
//! grid positions. Letters select the column, digits the row.

use core::fmt;
use core::str::FromStr;

use crate::common::GameError;
use crate::config::BOARD_SIZE;

/// A validated, zero-based position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    /// Returns `None` when either index falls outside the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coordinate { row, col }))
    }
}

/// Canonical form: uppercase column letter followed by the one-based row.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row + 1)
    }
}

impl FromStr for Coordinate {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cell(s)
    }
}

/// Spreadsheet-style column name for a zero-based index (0 -> "A", 26 -> "AA").
fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Decode a cell token such as `"B7"` or `" j10 "`.
///
/// The token is trimmed and uppercased, then split into a leading run of
/// ASCII letters and a following run of digits. Anything after the digits,
/// an empty part, or a position outside the board is rejected.
pub fn parse_cell(token: &str) -> Result<Coordinate, GameError> {
    let invalid = || GameError::InvalidCoordinate(token.trim().to_string());
    let cell = token.trim().to_ascii_uppercase();

    let letters_end = cell
        .find(|ch: char| !ch.is_ascii_uppercase())
        .unwrap_or(cell.len());
    let (letters, rest) = cell.split_at(letters_end);
    let digits_end = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, trailing) = rest.split_at(digits_end);

    if letters.is_empty() || digits.is_empty() || !trailing.is_empty() {
        return Err(invalid());
    }

    // Base-26 with A=1; bail out as soon as the value leaves the board.
    let mut col: usize = 0;
    for ch in letters.bytes() {
        col = col * 26 + (ch - b'A') as usize + 1;
        if col > BOARD_SIZE {
            return Err(invalid());
        }
    }
    let row: usize = digits.parse().map_err(|_| invalid())?;

    if row == 0 {
        return Err(invalid());
    }
    Coordinate::new(row - 1, col - 1).ok_or_else(invalid)
}
