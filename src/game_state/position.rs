//! Immutable board snapshot.
//!
//! `Position` is the central model of the engine: the 64-cell grid, side to
//! move, castling rights, en-passant target and the two clocks. A position is
//! never modified after it is built; [`Position::apply`] (see
//! `move_generation::legal_move_apply`) always returns a fresh successor, so
//! older snapshots stay valid and can be shared freely between threads.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::{back_rank, pawn_home_rank, BOARD_SIZE};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const SQUARE_COUNT: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

const BACK_RANK_KINDS: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Figure; SQUARE_COUNT],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Position {
    /// An empty board with light to move, no rights and fresh clocks.
    pub fn new_empty() -> Self {
        Self {
            board: [Figure::Empty; SQUARE_COUNT],
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard initial position.
    pub fn new_game() -> Self {
        let mut position = Self::new_empty();
        for color in [Color::Light, Color::Dark] {
            for (file, kind) in (0u8..).zip(BACK_RANK_KINDS) {
                position.put(file, back_rank(color), Figure::new(color, kind));
                position.put(file, pawn_home_rank(color), Figure::new(color, PieceKind::Pawn));
            }
        }
        position.castling_rights = CASTLE_ALL;
        position
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    pub(crate) fn from_parts(
        board: [Figure; SQUARE_COUNT],
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        Self {
            board,
            side_to_move,
            castling_rights,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
        }
    }

    #[inline]
    pub fn figure_at(&self, square: Square) -> Figure {
        self.board[square.index()]
    }

    /// Off-board coordinates read as empty.
    #[inline]
    pub fn figure_at_coords(&self, file: i32, rank: i32) -> Figure {
        Square::from_coords(file, rank).map_or(Figure::Empty, |square| self.figure_at(square))
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, castling: Castling) -> bool {
        castling.is_castling() && (self.castling_rights & castling.right()) != 0
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Occupied squares of `color`, scanned `a1` to `h8`.
    pub fn figures(&self, color: Color) -> impl Iterator<Item = (Square, Figure)> + '_ {
        Square::all()
            .map(move |square| (square, self.figure_at(square)))
            .filter(move |(_, figure)| figure.is_color(color))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Figure::new(color, PieceKind::King);
        Square::all().find(|square| self.figure_at(*square) == king)
    }

    /// True if any figure of the other color could move onto the king of
    /// `color`. A board without that king is never in check.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => is_square_attacked(self, king, color.opposite()),
            None => false,
        }
    }

    /// Same position with the figure on `from` standing on `to` instead.
    /// Nothing else changes; used to probe hypothetical king placements.
    pub(crate) fn with_relocated(&self, from: Square, to: Square) -> Self {
        let mut next = self.clone();
        let figure = next.board[from.index()];
        next.board[from.index()] = Figure::Empty;
        next.board[to.index()] = figure;
        next
    }

    // Mutators below are only ever called on a freshly built copy.

    fn put(&mut self, file: u8, rank: u8, figure: Figure) {
        if let Some(square) = Square::new(file, rank) {
            self.board[square.index()] = figure;
        }
    }

    #[inline]
    pub(crate) fn set_figure(&mut self, square: Square, figure: Figure) {
        self.board[square.index()] = figure;
    }

    #[inline]
    pub(crate) fn clear_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights &= !rights;
    }

    #[inline]
    pub(crate) fn set_en_passant_square(&mut self, square: Option<Square>) {
        self.en_passant_square = square;
    }

    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn built_start_position_matches_the_record() {
        let built = Position::new_game();
        let parsed = Position::from_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(built, parsed);
        assert_eq!(built.to_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn figure_lookup_by_square_and_coords() {
        let game = Position::new_game();
        assert_eq!(game.figure_at(sq("e1")), Figure::LIGHT_KING);
        assert_eq!(game.figure_at(sq("d8")), Figure::new(Color::Dark, PieceKind::Queen));
        assert_eq!(game.figure_at(sq("e4")), Figure::Empty);
        assert_eq!(game.figure_at_coords(-1, 0), Figure::Empty);
        assert_eq!(game.figure_at_coords(0, 8), Figure::Empty);
        assert_eq!(
            game.figure_at_coords(0, 1),
            Figure::new(Color::Light, PieceKind::Pawn)
        );
    }

    #[test]
    fn figures_and_kings() {
        let game = Position::new_game();
        assert_eq!(game.figures(Color::Light).count(), 16);
        assert_eq!(game.figures(Color::Dark).count(), 16);
        assert_eq!(game.king_square(Color::Dark), Some(sq("e8")));
        assert!(!game.is_king_attacked(Color::Light));

        let bare = Position::new_empty();
        assert_eq!(bare.king_square(Color::Light), None);
        assert!(!bare.is_king_attacked(Color::Light));
    }

    #[test]
    fn detects_attacked_king() {
        let game = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("FEN should parse");
        assert!(game.is_king_attacked(Color::Light));
        assert!(!game.is_king_attacked(Color::Dark));

        let blocked =
            Position::from_fen("4k3/8/8/8/8/8/8/r1N1K3 w - - 0 1").expect("FEN should parse");
        assert!(!blocked.is_king_attacked(Color::Light));
    }

    #[test]
    fn pawn_attacks_only_diagonally_forward() {
        let front = Position::from_fen("8/8/8/8/4k3/4P3/8/4K3 b - - 0 1").expect("FEN should parse");
        assert!(!front.is_king_attacked(Color::Dark));

        let diagonal =
            Position::from_fen("8/8/8/8/4k3/3P4/8/4K3 b - - 0 1").expect("FEN should parse");
        assert!(diagonal.is_king_attacked(Color::Dark));

        let behind = Position::from_fen("8/8/8/3P4/4k3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert!(!behind.is_king_attacked(Color::Dark));
    }
}
