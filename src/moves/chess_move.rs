//! Candidate and applied moves, plus the move notation.
//!
//! Notation: figure letter (case is the color), source square, destination
//! square and an optional promotion letter, e.g. `Pe2e4` or `Pe7e8Q`.

use std::fmt;
use std::str::FromStr;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Castling, Figure, Square};
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub figure: Figure,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Figure>,
    /// Resolved by the legality oracle; a freshly parsed move is `None`.
    pub castling: Castling,
}

impl Move {
    pub const fn new(figure: Figure, from: Square, to: Square, promotion: Option<Figure>) -> Self {
        Self {
            figure,
            from,
            to,
            promotion,
            castling: Castling::None,
        }
    }

    /// Copy of this move carrying the given castling classification.
    pub const fn with_castling(self, castling: Castling) -> Self {
        Self { castling, ..self }
    }

    #[inline]
    pub fn delta_file(&self) -> i8 {
        self.to.file() as i8 - self.from.file() as i8
    }

    #[inline]
    pub fn delta_rank(&self) -> i8 {
        self.to.rank() as i8 - self.from.rank() as i8
    }

    /// Parse move text such as `Pe2e4` or `Pe7e8Q`.
    pub fn parse(text: &str) -> ChessResult<Self> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 5 && chars.len() != 6 {
            return Err(ChessError::MoveTextLength(text.to_owned()));
        }

        let figure = Figure::from_char(chars[0]).ok_or(ChessError::MoveFigure(chars[0]))?;
        let from = parse_square(&chars[1..3])?;
        let to = parse_square(&chars[3..5])?;
        let promotion = match chars.get(5) {
            Some(&ch) => Some(Figure::from_char(ch).ok_or(ChessError::MovePromotion(ch))?),
            None => None,
        };

        Ok(Move::new(figure, from, to, promotion))
    }
}

fn parse_square(chars: &[char]) -> ChessResult<Square> {
    let name: String = chars.iter().collect();
    algebraic_to_square(&name)
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> ChessResult<Self> {
        Move::parse(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ch) = self.figure.to_char() {
            write!(f, "{ch}")?;
        }
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(ch) = self.promotion.and_then(Figure::to_char) {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
