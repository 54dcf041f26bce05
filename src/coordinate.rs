//! Grid coordinates and their short text form (`B4`, `J10`).

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::config::BOARD_SIZE;

/// Errors produced when parsing a coordinate token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// The token is not a column letter followed by a row number.
    #[error("invalid coordinate `{0}`")]
    Invalid(String),
    /// The token is well formed but names a cell off the grid.
    #[error("coordinate `{0}` is outside the board")]
    OutOfBounds(String),
}

/// A cell on the grid, zero-based. Construction guarantees it is in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    // Field order keeps the derived ordering row-major.
    row: u8,
    column: u8,
}

impl Coordinate {
    /// Build from zero-based indices; `None` when off the grid.
    pub fn new(column: u8, row: u8) -> Option<Self> {
        if column < BOARD_SIZE && row < BOARD_SIZE {
            Some(Self { row, column })
        } else {
            None
        }
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    /// Every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |column| Coordinate { row, column }))
    }

    /// Parse tokens such as `b4` or `J10`.
    pub fn parse(token: &str) -> Result<Self, CoordinateError> {
        let invalid = || CoordinateError::Invalid(token.to_string());
        let mut chars = token.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        if !letter.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: u8 = digits.parse().map_err(|_| invalid())?;
        let column = letter.to_ascii_uppercase() as u8 - b'A';
        if row == 0 {
            return Err(CoordinateError::OutOfBounds(token.to_string()));
        }
        Coordinate::new(column, row - 1).ok_or_else(|| CoordinateError::OutOfBounds(token.to_string()))
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinate::parse(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.column) as char, self.row + 1)
    }
}
