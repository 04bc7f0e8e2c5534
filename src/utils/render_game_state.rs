//! Terminal-oriented board renderer.
//!
//! Creates a human-readable board view from internal bitboards for debugging,
//! tests, and the demo binary.

use crate::game_state::chess_types::GameState;

/// Render the board to an ASCII string for terminal output.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            let sq = rank * 8 + file;
            match game_state.piece_char_at(sq) {
                Some(ch) => out.push(ch),
                None => out.push('.'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}
