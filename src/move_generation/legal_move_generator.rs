//! Full legal move enumeration and terminal-state detection.
//!
//! Enumeration is a bounded brute-force scan: every figure of the side to
//! move against every square of the board, each candidate asked of the
//! oracle. Pawn moves onto the last rank are tried once per promotion kind.

use crate::game_state::chess_rules::{promotion_rank, PROMOTION_KINDS};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::evaluate_move;
use crate::moves::chess_move::Move;

/// Check / checkmate / stalemate flags of a position's side to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.checkmate || self.stalemate
    }
}

/// Every legal move for the side to move, with castling tags resolved.
pub fn generate_legal_moves(position: &Position) -> Vec<Move> {
    let mover = position.side_to_move();
    let mut legal = Vec::with_capacity(64);

    for (from, figure) in position.figures(mover) {
        for to in Square::all() {
            for candidate in candidates(figure, from, to, mover) {
                let verdict = evaluate_move(position, &candidate);
                if verdict.legal {
                    legal.push(candidate.with_castling(verdict.castling));
                }
            }
        }
    }

    legal
}

/// Whether the side to move has at least one legal move. Stops at the first.
pub fn has_legal_move(position: &Position) -> bool {
    let mover = position.side_to_move();
    position.figures(mover).any(|(from, figure)| {
        Square::all().any(|to| {
            candidates(figure, from, to, mover)
                .any(|candidate| evaluate_move(position, &candidate).legal)
        })
    })
}

pub fn game_status(position: &Position) -> GameStatus {
    let in_check = position.is_king_attacked(position.side_to_move());
    let stuck = !has_legal_move(position);

    GameStatus {
        in_check,
        checkmate: in_check && stuck,
        stalemate: !in_check && stuck,
    }
}

fn candidates(
    figure: Figure,
    from: Square,
    to: Square,
    mover: Color,
) -> impl Iterator<Item = Move> {
    let promotes = figure.kind() == Some(PieceKind::Pawn) && to.rank() == promotion_rank(mover);
    let promotions: Vec<Option<Figure>> = if promotes {
        PROMOTION_KINDS
            .iter()
            .map(|kind| Some(Figure::new(mover, *kind)))
            .collect()
    } else {
        vec![None]
    };

    promotions
        .into_iter()
        .map(move |promotion| Move::new(figure, from, to, promotion))
}
