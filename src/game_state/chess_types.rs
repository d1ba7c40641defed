//! Value types shared by the position model and the legality oracle.
//!
//! Everything here is `Copy` and lives on the fixed 8x8 board: colors,
//! piece kinds, the 13-valued `Figure`, board squares, the castling tag a
//! legal king move resolves to, and the castling-rights bitmask.

use std::fmt;
use std::str::FromStr;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::BOARD_SIZE;

/// Side of a figure (and side to move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank a pawn of this color advances towards.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

/// Piece kind without color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase notation letter.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Content of one board cell: empty, or a piece kind of one color.
///
/// Thirteen distinct values. The color of a figure is derived from the value
/// itself, which is what the notation letters encode as well (uppercase is
/// light, lowercase is dark).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Figure {
    #[default]
    Empty,
    Piece(Color, PieceKind),
}

impl Figure {
    pub const LIGHT_KING: Figure = Figure::Piece(Color::Light, PieceKind::King);
    pub const DARK_KING: Figure = Figure::Piece(Color::Dark, PieceKind::King);

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Figure::Piece(color, kind)
    }

    /// `None` for an empty cell.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self {
            Figure::Empty => None,
            Figure::Piece(color, _) => Some(color),
        }
    }

    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            Figure::Empty => None,
            Figure::Piece(_, kind) => Some(kind),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Figure::Empty)
    }

    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// Notation letter, or `None` for an empty cell.
    pub fn to_char(self) -> Option<char> {
        match self {
            Figure::Empty => None,
            Figure::Piece(Color::Light, kind) => Some(kind.letter().to_ascii_uppercase()),
            Figure::Piece(Color::Dark, kind) => Some(kind.letter()),
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        let kind = PieceKind::from_letter(ch)?;
        if ch.is_ascii_uppercase() {
            Some(Figure::Piece(Color::Light, kind))
        } else {
            Some(Figure::Piece(Color::Dark, kind))
        }
    }
}

/// A square on the 8x8 board.
///
/// Squares are on-board by construction; off-board coordinates surface as
/// `None` from [`Square::from_coords`] and [`Square::offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// `file` and `rank` are zero-based (`a1` is `(0, 0)`).
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < BOARD_SIZE && rank < BOARD_SIZE {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    #[inline]
    pub fn from_coords(file: i32, rank: i32) -> Option<Self> {
        let file = u8::try_from(file).ok()?;
        let rank = u8::try_from(rank).ok()?;
        Square::new(file, rank)
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Row-major index with `a1 == 0` and `h8 == 63`.
    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * BOARD_SIZE as usize + self.file as usize
    }

    #[inline]
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        Square::from_coords(
            i32::from(self.file) + i32::from(d_file),
            i32::from(self.rank) + i32::from(d_rank),
        )
    }

    /// Every square, `a1, b1, .., h1, a2, .., h8`. Restartable: each call
    /// yields a fresh iterator.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> ChessResult<Self> {
        crate::utils::algebraic::algebraic_to_square(s)
    }
}

/// Castling classification of a move, resolved by legality evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Castling {
    #[default]
    None,
    LightKingside,
    LightQueenside,
    DarkKingside,
    DarkQueenside,
}

impl Castling {
    pub const fn for_side(color: Color, kingside: bool) -> Self {
        match (color, kingside) {
            (Color::Light, true) => Castling::LightKingside,
            (Color::Light, false) => Castling::LightQueenside,
            (Color::Dark, true) => Castling::DarkKingside,
            (Color::Dark, false) => Castling::DarkQueenside,
        }
    }

    /// The rights bit this castle consumes.
    pub const fn right(self) -> CastlingRights {
        match self {
            Castling::None => 0,
            Castling::LightKingside => CASTLE_LIGHT_KINGSIDE,
            Castling::LightQueenside => CASTLE_LIGHT_QUEENSIDE,
            Castling::DarkKingside => CASTLE_DARK_KINGSIDE,
            Castling::DarkQueenside => CASTLE_DARK_QUEENSIDE,
        }
    }

    pub const fn is_castling(self) -> bool {
        !matches!(self, Castling::None)
    }
}

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE;

/// Four independent castling flags packed into the low nibble.
pub type CastlingRights = u8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_color_comes_from_the_value() {
        assert_eq!(Figure::from_char('K'), Some(Figure::LIGHT_KING));
        assert_eq!(Figure::from_char('k'), Some(Figure::DARK_KING));
        assert_eq!(Figure::from_char('x'), None);
        assert_eq!(Figure::Empty.color(), None);
        assert_eq!(
            Figure::new(Color::Dark, PieceKind::Knight).color(),
            Some(Color::Dark)
        );
        assert_eq!(Figure::new(Color::Light, PieceKind::Queen).to_char(), Some('Q'));
    }

    #[test]
    fn squares_stay_on_board() {
        let a1 = Square::new(0, 0).expect("a1 is on board");
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(1, 1).map(|sq| sq.to_string()).as_deref(), Some("b2"));
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::from_coords(-1, -1), None);
        assert_eq!(Square::all().count(), 64);
        assert_eq!(Square::all().last().map(|sq| sq.index()), Some(63));
    }

    #[test]
    fn square_names_parse_and_print() {
        let e4: Square = "e4".parse().expect("e4 should parse");
        assert_eq!((e4.file(), e4.rank()), (4, 3));
        assert_eq!(e4.to_string(), "e4");
        assert!("i9".parse::<Square>().is_err());
    }
}
