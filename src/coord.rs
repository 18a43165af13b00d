//! Bounds-checked grid coordinates and human-token parsing.
//!
//! The horizontal index is written as a letter and the vertical index as a
//! number, so `C7` is column 2, row 7. Tokens are accepted with the letter
//! at either end and with any non-alphanumeric punctuation in between.

use crate::common::GameError;
use crate::config::GameConfig;
use core::fmt;

const LETTER_BASE: u8 = b'A';

/// A position within the playing field. Construction is bounds-checked, so
/// every value of this type is a valid cell of the grid it was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    /// Builds a coordinate, failing if the pair lies outside the field.
    pub fn new(x: i32, y: i32, config: &GameConfig) -> Result<Self, GameError> {
        if !config.contains(x, y) {
            return Err(GameError::InvalidCoordinate { x, y });
        }
        Ok(Coord {
            x: x as u8,
            y: y as u8,
        })
    }

    /// Offsets by a signed delta, returning `None` when that leaves the field.
    pub fn offset(&self, dx: i32, dy: i32, config: &GameConfig) -> Option<Coord> {
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;
        if config.contains(x, y) {
            Some(Coord {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Parses a human-entered token like `B3`, `3b` or `(B, 3)`.
    ///
    /// Exactly one alphabetic character must sit at either end of the
    /// token once punctuation is stripped; the remaining digits are read
    /// as the vertical index. Anything else, including an in-grid miss,
    /// is an `IncomprehensibleCoordinate`.
    pub fn parse(input: &str, config: &GameConfig) -> Result<Self, GameError> {
        let incomprehensible = || GameError::IncomprehensibleCoordinate(input.to_string());

        let cleaned: String = input.chars().filter(char::is_ascii_alphanumeric).collect();
        if cleaned.len() < 2 {
            return Err(incomprehensible());
        }

        let first = cleaned.chars().next().ok_or_else(incomprehensible)?;
        let last = cleaned.chars().next_back().ok_or_else(incomprehensible)?;
        let (letter, digits) = if first.is_ascii_alphabetic() {
            (first, &cleaned[1..])
        } else if last.is_ascii_alphabetic() {
            (last, &cleaned[..cleaned.len() - 1])
        } else {
            return Err(incomprehensible());
        };

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(incomprehensible());
        }
        let x = (letter.to_ascii_uppercase() as u8 - LETTER_BASE) as i32;
        let y: i32 = digits.parse().map_err(|_| incomprehensible())?;

        if !config.contains(x, y) {
            return Err(incomprehensible());
        }
        Ok(Coord {
            x: x as u8,
            y: y as u8,
        })
    }

    /// The letter used for this coordinate's column.
    pub fn column_letter(&self) -> char {
        (self.x + LETTER_BASE) as char
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.y)
    }
}
