//! Successor positions.
//!
//! `Position::apply` builds the next snapshot from a legal move in a fixed
//! order: piece placement (promotion figure if any), en-passant victim
//! removal, castling rook relocation, fullmove counter, new en-passant
//! target, castling-rights update, halfmove clock, and finally the side to
//! move flips.

use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;

impl Position {
    /// Successor position after `mv`.
    ///
    /// `mv` must already be legal here, with its castling tag resolved by the
    /// oracle; applying anything else yields an unspecified position. The
    /// receiver is left untouched.
    pub fn apply(&self, mv: &Move) -> Position {
        let moving_color = self.side_to_move();
        let captured = self.figure_at(mv.to);
        let is_pawn = mv.figure.kind() == Some(PieceKind::Pawn);

        let mut next = self.clone();
        next.set_figure(mv.from, Figure::Empty);
        next.set_figure(mv.to, mv.promotion.unwrap_or(mv.figure));

        // En-passant capture: the victim sits beside the source square.
        let en_passant_capture = is_pawn && self.en_passant_square() == Some(mv.to);
        if en_passant_capture {
            if let Some(victim) = Square::new(mv.to.file(), mv.from.rank()) {
                next.set_figure(victim, Figure::Empty);
            }
        }

        // Castling rook move.
        if mv.castling.is_castling() {
            move_castling_rook(&mut next, mv, moving_color);
        }

        if moving_color == Color::Dark {
            next.set_fullmove_number(self.fullmove_number().saturating_add(1));
        }

        next.set_en_passant_square(double_step_square(mv, moving_color));

        update_castling_rights(&mut next, mv, moving_color);

        if is_pawn || !captured.is_empty() || en_passant_capture {
            next.set_halfmove_clock(0);
        } else {
            next.set_halfmove_clock(self.halfmove_clock().saturating_add(1));
        }

        next.set_side_to_move(moving_color.opposite());
        next
    }
}

fn move_castling_rook(next: &mut Position, mv: &Move, color: Color) {
    let rank = back_rank(color);
    let step = mv.delta_file().signum();
    let corner_file = if step > 0 {
        KINGSIDE_ROOK_FILE
    } else {
        QUEENSIDE_ROOK_FILE
    };

    // Rook lands next to the king on the side it came from.
    if let (Some(corner), Some(landing)) = (Square::new(corner_file, rank), mv.to.offset(-step, 0)) {
        next.set_figure(corner, Figure::Empty);
        next.set_figure(landing, Figure::new(color, PieceKind::Rook));
    }
}

// Square passed over by a pawn double-stepping from its home rank.
fn double_step_square(mv: &Move, color: Color) -> Option<Square> {
    let double_step = mv.figure.kind() == Some(PieceKind::Pawn)
        && mv.from.rank() == pawn_home_rank(color)
        && mv.delta_file() == 0
        && mv.delta_rank() == 2 * color.forward();

    if double_step {
        mv.from.offset(0, color.forward())
    } else {
        None
    }
}

fn update_castling_rights(next: &mut Position, mv: &Move, moving_color: Color) {
    if mv.figure == Figure::new(moving_color, PieceKind::King) {
        next.clear_castling_rights(
            Castling::for_side(moving_color, true).right()
                | Castling::for_side(moving_color, false).right(),
        );
    }

    if mv.figure == Figure::new(moving_color, PieceKind::Rook) {
        next.clear_castling_rights(corner_right(mv.from));
    }

    // Capturing a rook on its home corner also removes rights.
    next.clear_castling_rights(corner_right(mv.to));
}

fn corner_right(square: Square) -> CastlingRights {
    let side = match square.file() {
        KINGSIDE_ROOK_FILE => true,
        QUEENSIDE_ROOK_FILE => false,
        _ => return 0,
    };

    [Color::Light, Color::Dark]
        .into_iter()
        .find(|color| back_rank(*color) == square.rank())
        .map_or(0, |color| Castling::for_side(color, side).right())
}
