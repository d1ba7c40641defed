//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable names (e.g., `e4`) and the board's
//! `(file, rank)` coordinate pairs, reused by the position-record and move
//! notation codecs.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert an algebraic name (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    Square::new(file - b'a', rank - b'1').ok_or_else(|| ChessError::InvalidSquare(square.to_owned()))
}

/// Convert a zero-based `(file, rank)` pair to its name, or `None` off-board.
#[inline]
pub fn coords_to_algebraic(file: i32, rank: i32) -> Option<String> {
    Square::from_coords(file, rank).map(|square| square.to_string())
}

/// Convert a name to its zero-based `(file, rank)` pair.
#[inline]
pub fn algebraic_to_coords(square: &str) -> ChessResult<(u8, u8)> {
    let square = algebraic_to_square(square)?;
    Ok((square.file(), square.rank()))
}
