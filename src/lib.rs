//! Crate root module declarations for the chess rules engine.
//!
//! This file exposes the position model, the move-legality oracle, legal
//! move enumeration, the game session and the notation codecs so tests,
//! benchmarks and hosting front-ends can import stable module paths.

pub mod errors;
pub mod game;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
}

pub mod moves {
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
}

pub use errors::{ChessError, ChessResult};
pub use game::Game;
pub use game_state::chess_types::{Castling, Color, Figure, PieceKind, Square};
pub use game_state::position::Position;
pub use move_generation::legal_move_checks::{evaluate_move, is_legal, LegalityVerdict};
pub use move_generation::legal_move_generator::GameStatus;
pub use moves::chess_move::Move;
