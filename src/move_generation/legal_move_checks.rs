//! Move legality oracle.
//!
//! Two cooperating pure functions over immutable positions:
//!
//! - [`evaluate_move`] runs every stage (origin, destination, shape,
//!   promotion, castling, self-check) and resolves the castling tag.
//! - [`can_attack`] runs only origin, destination and plain shape for the
//!   figure standing on the source square. It never considers castling and
//!   never recurses into self-check, which is what bounds the mutual
//!   recursion between legality and king-attack detection to one ply.

use tracing::trace;

use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;

/// Outcome of [`evaluate_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalityVerdict {
    pub legal: bool,
    /// Castling side the move performs; `Castling::None` unless legal.
    pub castling: Castling,
}

impl LegalityVerdict {
    pub const ILLEGAL: LegalityVerdict = LegalityVerdict {
        legal: false,
        castling: Castling::None,
    };

    #[inline]
    const fn legal(castling: Castling) -> Self {
        LegalityVerdict {
            legal: true,
            castling,
        }
    }
}

/// What the geometry of a figure says about a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Invalid,
    Plain,
    /// King two files sideways; needs the castling sub-check.
    CastlingAttempt,
}

/// Full legality evaluation of `mv` for the side to move in `position`.
pub fn evaluate_move(position: &Position, mv: &Move) -> LegalityVerdict {
    let mover = position.side_to_move();

    if !can_move_from(position, mv, mover) {
        trace!(%mv, "rejected: origin");
        return LegalityVerdict::ILLEGAL;
    }
    if !can_move_to(position, mv, mover) {
        trace!(%mv, "rejected: destination");
        return LegalityVerdict::ILLEGAL;
    }

    let castling = match figure_shape(position, mv) {
        Shape::Invalid => {
            trace!(%mv, "rejected: shape");
            return LegalityVerdict::ILLEGAL;
        }
        Shape::Plain => Castling::None,
        Shape::CastlingAttempt => match castling_side(position, mv) {
            Some(castling) => castling,
            None => {
                trace!(%mv, "rejected: castling");
                return LegalityVerdict::ILLEGAL;
            }
        },
    };

    if !promotion_matches(mv, mover) {
        trace!(%mv, "rejected: promotion");
        return LegalityVerdict::ILLEGAL;
    }

    let next = position.apply(&mv.with_castling(castling));
    if next.is_king_attacked(mover) {
        trace!(%mv, "rejected: leaves king attacked");
        return LegalityVerdict::ILLEGAL;
    }

    LegalityVerdict::legal(castling)
}

#[inline]
pub fn is_legal(position: &Position, mv: &Move) -> bool {
    evaluate_move(position, mv).legal
}

/// Whether the figure on `from` could capture on `to`, ignoring whose turn
/// it is and whether doing so would expose its own king.
pub fn can_attack(position: &Position, from: Square, to: Square) -> bool {
    let figure = position.figure_at(from);
    let Some(attacker) = figure.color() else {
        return false;
    };

    let probe = Move::new(figure, from, to, None);
    can_move_from(position, &probe, attacker)
        && can_move_to(position, &probe, attacker)
        && figure_shape(position, &probe) == Shape::Plain
}

/// True if any figure of `attacker` can attack `square`.
pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    position
        .figures(attacker)
        .any(|(from, _)| can_attack(position, from, square))
}

fn can_move_from(position: &Position, mv: &Move, mover: Color) -> bool {
    position.figure_at(mv.from) == mv.figure && mv.figure.is_color(mover)
}

fn can_move_to(position: &Position, mv: &Move, mover: Color) -> bool {
    mv.from != mv.to && !position.figure_at(mv.to).is_color(mover)
}

fn figure_shape(position: &Position, mv: &Move) -> Shape {
    let Figure::Piece(color, kind) = mv.figure else {
        return Shape::Invalid;
    };

    let plain = match kind {
        PieceKind::King => {
            if mv.delta_file().abs() <= 1 && mv.delta_rank().abs() <= 1 {
                true
            } else if mv.delta_file().abs() == 2 && mv.delta_rank() == 0 {
                return Shape::CastlingAttempt;
            } else {
                false
            }
        }
        PieceKind::Queen => can_straight_move(position, mv),
        PieceKind::Rook => {
            (mv.delta_file() == 0 || mv.delta_rank() == 0) && can_straight_move(position, mv)
        }
        PieceKind::Bishop => {
            mv.delta_file() != 0 && mv.delta_rank() != 0 && can_straight_move(position, mv)
        }
        PieceKind::Knight => can_knight_move(mv),
        PieceKind::Pawn => can_pawn_move(position, mv, color),
    };

    if plain {
        Shape::Plain
    } else {
        Shape::Invalid
    }
}

// Axis-aligned or diagonal line with every square strictly between empty.
fn can_straight_move(position: &Position, mv: &Move) -> bool {
    let (d_file, d_rank) = (mv.delta_file(), mv.delta_rank());
    if d_file != 0 && d_rank != 0 && d_file.abs() != d_rank.abs() {
        return false;
    }

    let (step_file, step_rank) = (d_file.signum(), d_rank.signum());
    let mut at = mv.from;
    loop {
        let Some(next) = at.offset(step_file, step_rank) else {
            return false;
        };
        if next == mv.to {
            return true;
        }
        if !position.figure_at(next).is_empty() {
            return false;
        }
        at = next;
    }
}

fn can_knight_move(mv: &Move) -> bool {
    matches!(
        (mv.delta_file().abs(), mv.delta_rank().abs()),
        (1, 2) | (2, 1)
    )
}

fn can_pawn_move(position: &Position, mv: &Move, color: Color) -> bool {
    // A pawn never stands on either back rank.
    if mv.from.rank() == back_rank(Color::Light) || mv.from.rank() == back_rank(Color::Dark) {
        return false;
    }

    let step = color.forward();
    let target_empty = position.figure_at(mv.to).is_empty();

    let go = target_empty && mv.delta_file() == 0 && mv.delta_rank() == step;

    let jump = target_empty
        && mv.delta_file() == 0
        && mv.delta_rank() == 2 * step
        && mv.from.rank() == pawn_home_rank(color)
        && mv
            .from
            .offset(0, step)
            .is_some_and(|between| position.figure_at(between).is_empty());

    let diagonal = mv.delta_file().abs() == 1 && mv.delta_rank() == step;
    let attack = diagonal && position.figure_at(mv.to).is_color(color.opposite());
    let en_passant = diagonal && target_empty && position.en_passant_square() == Some(mv.to);

    go || jump || attack || en_passant
}

// Promotion figure required exactly when a pawn reaches its last rank.
fn promotion_matches(mv: &Move, mover: Color) -> bool {
    let reaches_last_rank = mv.figure.kind() == Some(PieceKind::Pawn)
        && mv.to.rank() == promotion_rank(mover);

    match mv.promotion {
        None => !reaches_last_rank,
        Some(Figure::Piece(color, kind)) => {
            reaches_last_rank && color == mover && PROMOTION_KINDS.contains(&kind)
        }
        Some(Figure::Empty) => false,
    }
}

/// Castling sub-check. Returns the side on success.
fn castling_side(position: &Position, mv: &Move) -> Option<Castling> {
    let color = mv.figure.color()?;
    let rank = back_rank(color);
    if mv.from.rank() != rank || mv.from.file() != KING_HOME_FILE {
        return None;
    }

    let kingside = mv.delta_file() > 0;
    let castling = Castling::for_side(color, kingside);
    if !position.has_castling_right(castling) {
        return None;
    }

    let rook_file = if kingside {
        KINGSIDE_ROOK_FILE
    } else {
        QUEENSIDE_ROOK_FILE
    };
    let rook_square = Square::new(rook_file, rank)?;
    if position.figure_at(rook_square) != Figure::new(color, PieceKind::Rook) {
        return None;
    }

    let (low, high) = if kingside {
        (KING_HOME_FILE + 1, rook_file)
    } else {
        (rook_file + 1, KING_HOME_FILE)
    };
    let path_clear = (low..high)
        .filter_map(|file| Square::new(file, rank))
        .all(|square| position.figure_at(square).is_empty());
    if !path_clear {
        return None;
    }

    if position.is_king_attacked(color) {
        return None;
    }

    // The square crossed and the square landed on, probed with the king
    // standing there.
    let step = mv.delta_file().signum();
    let crossed = mv.from.offset(step, 0)?;
    let passes_safely = [crossed, mv.to]
        .into_iter()
        .all(|square| !position.with_relocated(mv.from, square).is_king_attacked(color));

    passes_safely.then_some(castling)
}
