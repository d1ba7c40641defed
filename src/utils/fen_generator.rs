use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub fn generate_fen(position: &Position) -> String {
    let board = generate_board_field(position);
    let side_to_move = match position.side_to_move() {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(position.castling_rights());
    let en_passant = position
        .en_passant_square()
        .map_or_else(|| "-".to_owned(), |square| square.to_string());

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        position.halfmove_clock(),
        position.fullmove_number()
    )
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for rank in (0..BOARD_SIZE).rev() {
        let mut empty_count = 0u8;

        for file in 0..BOARD_SIZE {
            let ch = Square::new(file, rank).and_then(|square| position.figure_at(square).to_char());
            if let Some(ch) = ch {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(ch);
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if (rights & CASTLE_LIGHT_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_LIGHT_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_DARK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_DARK_QUEENSIDE) != 0 {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn round_trip_starting_position_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        let generated = generate_fen(&parsed);

        assert_eq!(generated, STARTING_POSITION_FEN);

        let reparsed = parse_fen(&generated).expect("generated FEN should parse");
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn round_trip_custom_position_fen() {
        for fen in [
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6",
            "rnbqkbnr/pppp1ppp/8/8/3pP3/8/PPP2PPP/RNBQKBNR b KQkq e3 0 3",
            "4k3/8/8/8/8/8/8/4K3 w - - 99 120",
        ] {
            let parsed = parse_fen(fen).expect("custom FEN should parse");
            assert_eq!(generate_fen(&parsed), fen);
        }
    }
}
