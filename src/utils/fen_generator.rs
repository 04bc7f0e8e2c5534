use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

/// Render the full FEN for a position. The fullmove counter is not tracked
/// by the engine and is emitted as 1.
pub fn generate_fen(game_state: &GameState) -> String {
    format!(
        "{} {} 1",
        generate_position_key(game_state),
        game_state.halfmove_clock
    )
}

/// Simplified FEN used as the opening-book lookup key: piece placement,
/// side to move, castling rights, and en-passant target, with no counters.
pub fn generate_position_key(game_state: &GameState) -> String {
    let board = generate_board_field(game_state);
    let side_to_move = if game_state.is_white_turn() { "w" } else { "b" };
    let castling = generate_castling_field(game_state.castling_rights);
    let en_passant = generate_en_passant_field(game_state.en_passant_square);

    format!("{board} {side_to_move} {castling} {en_passant}")
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let sq = rank * 8 + file;
            if let Some(ch) = game_state.piece_char_at(sq) {
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

    if (rights & CASTLE_WHITE_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_WHITE_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_BLACK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_BLACK_QUEENSIDE) != 0 {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    let Some(square) = square else {
        return "-".to_owned();
    };

    square_to_algebraic(square).unwrap_or_else(|_| "-".to_owned())
}
