//! Canonical chess-rule constants.
//!
//! This module stores static rule-related literals such as the standard
//! starting position record and the fixed board geometry the oracle relies on.

use crate::game_state::chess_types::{Color, PieceKind};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const BOARD_SIZE: u8 = 8;

/// Files of the castling rook corners and the king's home file.
pub const QUEENSIDE_ROOK_FILE: u8 = 0;
pub const KINGSIDE_ROOK_FILE: u8 = 7;
pub const KING_HOME_FILE: u8 = 4;

/// Kinds a pawn may promote to.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Rank holding the king and rooks of `color` at game start.
#[inline]
pub const fn back_rank(color: Color) -> u8 {
    match color {
        Color::Light => 0,
        Color::Dark => BOARD_SIZE - 1,
    }
}

/// Rank a pawn of `color` may double-step from.
#[inline]
pub const fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::Light => 1,
        Color::Dark => BOARD_SIZE - 2,
    }
}

/// Rank on which a pawn of `color` promotes.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    back_rank(color.opposite())
}
