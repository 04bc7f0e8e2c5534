use crate::game_state::chess_types::*;

/// Full position snapshot pushed by `make_move` and popped by `unmake_move`.
///
/// Unlike delta-based undo records, a full snapshot makes restore trivially
/// correct for every move shape, including castling and en passant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub pieces: [[u64; 6]; 2],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub zobrist_key: u64,
}

impl UndoState {
    #[inline]
    pub fn capture(game_state: &GameState) -> Self {
        Self {
            pieces: game_state.pieces,
            side_to_move: game_state.side_to_move,
            castling_rights: game_state.castling_rights,
            en_passant_square: game_state.en_passant_square,
            halfmove_clock: game_state.halfmove_clock,
            zobrist_key: game_state.zobrist_key,
        }
    }

    #[inline]
    pub fn restore(&self, game_state: &mut GameState) {
        game_state.pieces = self.pieces;
        game_state.side_to_move = self.side_to_move;
        game_state.castling_rights = self.castling_rights;
        game_state.en_passant_square = self.en_passant_square;
        game_state.halfmove_clock = self.halfmove_clock;
        game_state.zobrist_key = self.zobrist_key;
    }
}
