//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type returned by every parser in the
//! crate: position records, square names and move text. Move legality is
//! never an error; an illegal move is a plain `false` from the oracle.
//!
//! Usage guidelines:
//! - Parsing functions return `ChessResult<T>` and propagate with `?`.
//! - Each variant carries the offending token so callers can show precise
//!   diagnostics without re-parsing.

use thiserror::Error;

pub type ChessResult<T> = Result<T, ChessError>;

/// Unified error type for the rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A position record did not split into exactly six fields.
    ///
    /// Payload: the number of fields found.
    #[error("position record must have 6 fields, found {0}")]
    FenFieldCount(usize),

    /// The piece-placement field is malformed (bad rank count, bad run
    /// length, unknown letter) or unreachable (king count other than one per
    /// color, pawn on a back rank).
    #[error("invalid piece placement '{field}': {reason}")]
    FenBoard { field: String, reason: String },

    /// The side-to-move field is neither `w` nor `b`.
    #[error("invalid side to move '{0}'")]
    FenSideToMove(String),

    /// The castling field contains something other than `KQkq` in order, or `-`.
    #[error("invalid castling rights '{0}'")]
    FenCastling(String),

    /// The en-passant field is neither `-` nor an empty square directly
    /// behind a pawn of the side that just moved, double-stepped from home.
    #[error("invalid en-passant target '{0}'")]
    FenEnPassant(String),

    /// The halfmove clock is not a non-negative integer.
    #[error("invalid halfmove clock '{0}'")]
    FenHalfmoveClock(String),

    /// The fullmove number is not a positive integer.
    #[error("invalid fullmove number '{0}'")]
    FenFullmoveNumber(String),

    /// A square name is not a file letter `a`-`h` followed by a rank digit `1`-`8`.
    #[error("invalid square name '{0}'")]
    InvalidSquare(String),

    /// Move text is not 5 or 6 characters long.
    #[error("move text '{0}' must be 5 or 6 characters")]
    MoveTextLength(String),

    /// The figure letter of a move is not one of `KQRBNPkqrbnp`.
    #[error("invalid figure letter '{0}' in move text")]
    MoveFigure(char),

    /// The promotion letter of a move is not one of `KQRBNPkqrbnp`.
    #[error("invalid promotion letter '{0}' in move text")]
    MovePromotion(char),
}

#[cfg(test)]
mod tests {
    use super::ChessError;

    #[test]
    fn messages_name_the_offending_token() {
        assert_eq!(
            ChessError::FenFieldCount(4).to_string(),
            "position record must have 6 fields, found 4"
        );
        assert_eq!(
            ChessError::InvalidSquare("z9".to_owned()).to_string(),
            "invalid square name 'z9'"
        );
    }
}
