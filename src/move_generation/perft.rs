//! Legal move tree counting (perft).
//!
//! Walks every legal line to a fixed depth and tallies the leaf moves by
//! kind. Reference node counts for well-known positions make this the
//! end-to-end check of the legality oracle.

use std::thread;

use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::{game_status, generate_legal_moves};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(position) {
        perft_recurse(position, &mv, depth, &mut total);
    }
    total
}

/// Same counts as [`perft`], one scoped thread per root move.
///
/// Positions are immutable snapshots, so the workers share the root by
/// reference without any locking.
pub fn perft_multi_threaded(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return perft(position, depth);
    }

    let root_moves = generate_legal_moves(position);
    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|mv| {
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(position, mv, depth, &mut local);
                    local
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    })
}

fn perft_recurse(parent: &Position, mv: &Move, depth: u8, counts: &mut PerftCounts) {
    let next = parent.apply(mv);

    if depth == 1 {
        counts.nodes += 1;

        let en_passant = mv.figure.kind() == Some(PieceKind::Pawn)
            && parent.en_passant_square() == Some(mv.to);
        if en_passant || !parent.figure_at(mv.to).is_empty() {
            counts.captures += 1;
        }
        if en_passant {
            counts.en_passant += 1;
        }
        if mv.castling.is_castling() {
            counts.castles += 1;
        }
        if mv.promotion.is_some() {
            counts.promotions += 1;
        }

        let status = game_status(&next);
        if status.in_check {
            counts.checks += 1;
        }
        if status.checkmate {
            counts.checkmates += 1;
        }
        return;
    }

    for child in generate_legal_moves(&next) {
        perft_recurse(&next, &child, depth - 1, counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("perft FEN should parse")
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&Position::new_game(), 0);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_start_position() {
        let start = position(STARTING_POSITION_FEN);
        assert_eq!(perft(&start, 1).nodes, 20);
        assert_eq!(perft(&start, 2).nodes, 400);

        let depth_three = perft(&start, 3);
        assert_eq!(depth_three.nodes, 8902);
        assert_eq!(depth_three.captures, 34);
        assert_eq!(depth_three.checks, 12);
        assert_eq!(depth_three.checkmates, 0);
    }

    #[test]
    fn perft_castling_and_en_passant_heavy_position() {
        let kiwipete =
            position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let depth_one = perft(&kiwipete, 1);
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);

        let depth_two = perft(&kiwipete, 2);
        assert_eq!(depth_two.nodes, 2039);
        assert_eq!(depth_two.captures, 351);
        assert_eq!(depth_two.en_passant, 1);
        assert_eq!(depth_two.castles, 91);
        assert_eq!(depth_two.checks, 3);
    }

    #[test]
    fn perft_endgame_with_pins() {
        let endgame = position("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
        assert_eq!(perft(&endgame, 1).nodes, 14);
        assert_eq!(perft(&endgame, 2).nodes, 191);

        let depth_three = perft(&endgame, 3);
        assert_eq!(depth_three.nodes, 2812);
        assert_eq!(depth_three.captures, 209);
        assert_eq!(depth_three.en_passant, 2);
        assert_eq!(depth_three.checks, 267);
    }

    #[test]
    fn perft_promotion_position() {
        let promotions =
            position("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
        assert_eq!(perft(&promotions, 1).nodes, 6);

        let depth_two = perft(&promotions, 2);
        assert_eq!(depth_two.nodes, 264);
        assert_eq!(depth_two.promotions, 48);
        assert_eq!(depth_two.castles, 6);
    }

    #[test]
    fn multi_threaded_matches_single_thread() {
        let start = Position::new_game();
        assert_eq!(perft_multi_threaded(&start, 2), perft(&start, 2));
        assert_eq!(perft_multi_threaded(&start, 0).nodes, 1);
    }
}
