//! Game session.
//!
//! `Game` owns the authoritative current `Position` and the status flags of
//! its side to move. Accepting a move swaps in the successor position and
//! recomputes the status once; a rejected move changes nothing.

use tracing::{debug, warn};

use crate::errors::ChessResult;
use crate::game_state::chess_types::{Color, Figure, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::evaluate_move;
use crate::move_generation::legal_move_generator::{game_status, generate_legal_moves, GameStatus};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    status: GameStatus,
    plies_played: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A game from the standard initial position.
    pub fn new() -> Self {
        Self::with_position(Position::new_game())
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let position = Position::from_fen(fen).inspect_err(|err| {
            warn!(fen, error = %err, "rejected position record");
        })?;
        Ok(Self::with_position(position))
    }

    pub fn with_position(position: Position) -> Self {
        let status = game_status(&position);
        Self {
            position,
            status,
            plies_played: 0,
        }
    }

    /// Try a move given as text (`Pe2e4`, `Pe7e8Q`).
    ///
    /// `Ok(true)` when the move was legal and played, `Ok(false)` when the
    /// oracle rejected it (state unchanged), `Err` when the text is malformed.
    pub fn attempt_move(&mut self, text: &str) -> ChessResult<bool> {
        let mv = Move::parse(text)?;
        Ok(self.play(&mv))
    }

    /// Same as [`Game::attempt_move`] for an already parsed move.
    pub fn play(&mut self, mv: &Move) -> bool {
        let verdict = evaluate_move(&self.position, mv);
        if !verdict.legal {
            debug!(%mv, fen = %self.position.to_fen(), "move rejected");
            return false;
        }

        self.position = self.position.apply(&mv.with_castling(verdict.castling));
        self.status = game_status(&self.position);
        self.plies_played += 1;

        debug!(
            %mv,
            castling = ?verdict.castling,
            in_check = self.status.in_check,
            checkmate = self.status.checkmate,
            stalemate = self.status.stalemate,
            "move accepted"
        );
        true
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        generate_legal_moves(&self.position)
    }

    pub fn legal_moves_text(&self) -> Vec<String> {
        self.legal_moves().iter().map(Move::to_string).collect()
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.position.to_fen()
    }

    /// Moves accepted by this session.
    #[inline]
    pub fn plies_played(&self) -> usize {
        self.plies_played
    }

    #[inline]
    pub fn figure_at(&self, file: i32, rank: i32) -> Figure {
        self.position.figure_at_coords(file, rank)
    }

    /// Figure letter on a square, `'.'` when empty or off-board.
    pub fn figure_char_at(&self, file: i32, rank: i32) -> char {
        self.figure_at(file, rank).to_char().unwrap_or('.')
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.status.in_check
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.status.checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.status.stalemate
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.position.en_passant_square()
    }
}

#[cfg(test)]
mod tests {
    use super::Game;
    use crate::errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    fn attempt(game: &mut Game, text: &str) -> bool {
        game.attempt_move(text).expect("test move text should parse")
    }

    #[test]
    fn new_game_defaults() {
        let game = Game::default();
        assert_eq!(game.fen(), STARTING_POSITION_FEN);
        assert_eq!(game.side_to_move(), Color::Light);
        assert_eq!(game.legal_moves_text().len(), 20);
        assert_eq!(game.figure_char_at(4, 0), 'K');
        assert_eq!(game.figure_char_at(3, 7), 'q');
        assert_eq!(game.figure_char_at(4, 4), '.');
        assert_eq!(game.figure_char_at(9, 9), '.');
        assert!(!game.is_check() && !game.is_checkmate() && !game.is_stalemate());
    }

    #[test]
    fn rejected_move_leaves_state_unchanged() {
        let mut game = Game::new();
        assert!(!attempt(&mut game, "Pe2e5"));
        assert!(!attempt(&mut game, "pe7e5"));
        assert_eq!(game.fen(), STARTING_POSITION_FEN);
        assert_eq!(game.plies_played(), 0);

        assert_eq!(
            game.attempt_move("e2e4"),
            Err(ChessError::MoveTextLength("e2e4".to_owned()))
        );
        assert_eq!(game.fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn malformed_position_record_is_an_error() {
        assert_eq!(
            Game::from_fen("8/8/8/8 w - -").map(|game| game.fen()),
            Err(ChessError::FenFieldCount(4))
        );
    }

    #[test]
    fn stale_en_passant_target_is_rejected_before_play() {
        assert_eq!(
            Game::from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1").map(|game| game.fen()),
            Err(ChessError::FenEnPassant("e3".to_owned()))
        );

        let mut game = Game::from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - - 0 1")
            .expect("pawn FEN should parse");
        assert!(!attempt(&mut game, "Pd2e3"));
        assert_eq!(game.figure_char_at(4, 1), 'P');
    }

    #[test]
    fn accepted_move_swaps_position() {
        let mut game = Game::new();
        let before = game.position().clone();
        assert!(attempt(&mut game, "Pe2e4"));
        assert_eq!(game.plies_played(), 1);
        assert_eq!(game.side_to_move(), Color::Dark);
        assert_eq!(game.en_passant_square().map(|sq| sq.to_string()).as_deref(), Some("e3"));
        assert_eq!(before.to_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn kingside_castle_through_the_session() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("castling FEN should parse");
        assert!(attempt(&mut game, "Ke1g1"));
        assert_eq!(game.figure_char_at(5, 0), 'R');
        assert_eq!(game.figure_char_at(7, 0), '.');
        assert_eq!(game.fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
    }

    #[test]
    fn castling_rejected_when_path_is_attacked() {
        for fen in [
            "r3kr2/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            "r3k1r1/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        ] {
            let mut game = Game::from_fen(fen).expect("castling FEN should parse");
            assert!(!attempt(&mut game, "Ke1g1"), "castled through attack in {fen}");
            assert_eq!(game.fen(), fen);
        }
    }

    #[test]
    fn en_passant_capture_removes_pawn() {
        let mut game = Game::from_fen("4k3/8/8/8/3p1p2/8/4P3/4K3 w - - 0 1")
            .expect("en passant FEN should parse");
        assert!(attempt(&mut game, "Pe2e4"));
        let replies = game.legal_moves_text();
        assert!(replies.contains(&"pd4e3".to_owned()));
        assert!(replies.contains(&"pf4e3".to_owned()));

        assert!(attempt(&mut game, "pf4e3"));
        assert_eq!(game.figure_char_at(4, 3), '.');
        assert_eq!(game.figure_char_at(4, 2), 'p');
        assert_eq!(game.en_passant_square(), None);
    }

    #[test]
    fn en_passant_window_is_one_move() {
        let mut game = Game::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1")
            .expect("en passant FEN should parse");
        assert!(attempt(&mut game, "Pe2e4"));
        assert!(attempt(&mut game, "ke8e7"));
        assert!(attempt(&mut game, "Ke1d1"));
        assert!(!attempt(&mut game, "pd4e3"));
        assert!(attempt(&mut game, "pd4d3"));
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut game = Game::new();
        for text in ["Pf2f3", "pe7e5", "Pg2g4", "qd8h4"] {
            assert!(attempt(&mut game, text), "{text} should be legal");
        }
        assert!(game.is_check());
        assert!(game.is_checkmate());
        assert!(!game.is_stalemate());
        assert!(game.legal_moves().is_empty());
        assert!(!attempt(&mut game, "Pa2a3"));
    }

    #[test]
    fn stalemate_reported_after_quiet_move() {
        let mut game =
            Game::from_fen("7k/8/5Q2/6K1/8/8/8/8 w - - 0 1").expect("stalemate FEN should parse");
        assert!(attempt(&mut game, "Qf6f7"));
        assert!(!game.is_check());
        assert!(game.is_stalemate());
        assert!(!game.is_checkmate());
    }

    #[test]
    fn promotion_by_text() {
        let mut game =
            Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("promotion FEN should parse");
        assert!(!attempt(&mut game, "Pa7a8"));
        assert!(attempt(&mut game, "Pa7a8Q"));
        assert_eq!(game.figure_char_at(0, 7), 'Q');
        assert!(game.is_check());
    }
}
