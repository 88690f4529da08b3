use minefield_core::{Coord, Position};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParsePositionError {
    #[error("expected a letter followed by a number (e.g. A1)")]
    Pattern,
    #[error("position out of bounds")]
    OutOfBounds,
}

/// Parses reveal input: one letter followed by one or two digits with no
/// leading zero, case-insensitive. `A1` maps to row 0, col 0.
pub fn parse_position(input: &str, size: Coord) -> Result<Position, ParsePositionError> {
    let mut chars = input.trim().chars();

    let letter = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => c,
        _ => return Err(ParsePositionError::Pattern),
    };

    let digits = chars.as_str();
    let well_formed = !digits.is_empty()
        && digits.len() <= 2
        && !digits.starts_with('0')
        && digits.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(ParsePositionError::Pattern);
    }
    let number: Coord = digits.parse().map_err(|_| ParsePositionError::Pattern)?;

    let row = letter.to_ascii_uppercase() as u8 - b'A';
    let position = Position::new(row, number - 1);
    if !position.is_valid(size) {
        return Err(ParsePositionError::OutOfBounds);
    }
    Ok(position)
}
