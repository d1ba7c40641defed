//! Position-record (FEN) parser.
//!
//! Builds a fully-populated `Position` from a Forsyth-Edwards Notation
//! string: piece placement, side to move, castling rights, en-passant target
//! and both clocks. Any malformed field is reported as a `ChessError`; there
//! is no fallback to a default position.
//!
//! Beyond syntax, the record must describe a reachable board: exactly one
//! king per color, no pawns on the back ranks, and an en-passant target that
//! sits behind a pawn which just advanced two ranks.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{back_rank, pawn_home_rank, BOARD_SIZE};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

const CASTLING_ORDER: [(char, CastlingRights); 4] = [
    ('K', CASTLE_LIGHT_KINGSIDE),
    ('Q', CASTLE_LIGHT_QUEENSIDE),
    ('k', CASTLE_DARK_KINGSIDE),
    ('q', CASTLE_DARK_QUEENSIDE),
];

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    let [board_part, side_part, castling_part, en_passant_part, halfmove_part, fullmove_part] =
        *parts.as_slice()
    else {
        return Err(ChessError::FenFieldCount(parts.len()));
    };

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_square = parse_en_passant_square(en_passant_part, &board, side_to_move)?;
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::FenHalfmoveClock(halfmove_part.to_owned()))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .ok()
        .filter(|number| *number > 0)
        .ok_or_else(|| ChessError::FenFullmoveNumber(fullmove_part.to_owned()))?;

    Ok(Position::from_parts(
        board,
        side_to_move,
        castling_rights,
        en_passant_square,
        halfmove_clock,
        fullmove_number,
    ))
}

fn parse_board(board_part: &str) -> ChessResult<[Figure; 64]> {
    let board_error = |reason: String| ChessError::FenBoard {
        field: board_part.to_owned(),
        reason,
    };

    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != usize::from(BOARD_SIZE) {
        return Err(board_error(format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut board = [Figure::Empty; 64];

    for (fen_rank_idx, rank_str) in (0u8..).zip(ranks.iter()) {
        let board_rank = BOARD_SIZE - 1 - fen_rank_idx;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(board_error(format!("invalid empty-square count '{ch}'")));
                }
                // Bounded by the range check above.
                file += empty_count as u8;
                if file > BOARD_SIZE {
                    return Err(board_error(format!("rank {} has too many files", board_rank + 1)));
                }
                continue;
            }

            let figure = Figure::from_char(ch)
                .ok_or_else(|| board_error(format!("invalid piece character '{ch}'")))?;
            let square = Square::new(file, board_rank)
                .ok_or_else(|| board_error(format!("rank {} has too many files", board_rank + 1)))?;
            board[square.index()] = figure;
            file += 1;
        }

        if file != BOARD_SIZE {
            return Err(board_error(format!(
                "rank {} does not sum to 8 files",
                board_rank + 1
            )));
        }
    }

    check_board_contents(&board).map_err(board_error)?;
    Ok(board)
}

fn check_board_contents(board: &[Figure; 64]) -> Result<(), String> {
    for color in [Color::Light, Color::Dark] {
        let king = Figure::new(color, PieceKind::King);
        let kings = board.iter().filter(|figure| **figure == king).count();
        if kings != 1 {
            return Err(format!("expected one {color:?} king, found {kings}"));
        }
    }

    for rank in [back_rank(Color::Light), back_rank(Color::Dark)] {
        let pawn_on_rank = (0..BOARD_SIZE)
            .filter_map(|file| Square::new(file, rank))
            .any(|square| board[square.index()].kind() == Some(PieceKind::Pawn));
        if pawn_on_rank {
            return Err(format!("pawn on rank {}", rank + 1));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessError::FenSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    let mut order = CASTLING_ORDER.iter();

    for ch in castling_part.chars() {
        // Letters must appear at most once and in `KQkq` order.
        let (_, right) = order
            .by_ref()
            .find(|(letter, _)| *letter == ch)
            .ok_or_else(|| ChessError::FenCastling(castling_part.to_owned()))?;
        rights |= right;
    }

    Ok(rights)
}

fn parse_en_passant_square(
    en_passant_part: &str,
    board: &[Figure; 64],
    side_to_move: Color,
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let invalid = || ChessError::FenEnPassant(en_passant_part.to_owned());
    let target = algebraic_to_square(en_passant_part).map_err(|_| invalid())?;

    // The side that just moved double-stepped a pawn over `target`.
    let pusher = side_to_move.opposite();
    let home = Square::new(target.file(), pawn_home_rank(pusher)).ok_or_else(invalid)?;
    let skipped = home.offset(0, pusher.forward());
    let landed = target.offset(0, pusher.forward());
    let figure_on = |square: Option<Square>| square.map(|sq| board[sq.index()]);

    let consistent = skipped == Some(target)
        && board[target.index()].is_empty()
        && figure_on(Some(home)) == Some(Figure::Empty)
        && figure_on(landed) == Some(Figure::new(pusher, PieceKind::Pawn));
    if !consistent {
        return Err(invalid());
    }

    Ok(Some(target))
}
