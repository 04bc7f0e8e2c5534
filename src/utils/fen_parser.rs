//! FEN-to-GameState parser.
//!
//! Builds fully-populated board state from a Forsyth-Edwards Notation string,
//! including piece bitboards, rights, the en-passant target, and the Zobrist
//! key. The halfmove/fullmove counters are accepted positionally but the
//! halfmove clock always restarts at zero on setup.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::*;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenError(String);

impl FenError {
    fn new(message: impl Into<String>) -> Self {
        FenError(message.into())
    }
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed FEN: {}", self.0)
    }
}

impl Error for FenError {}

pub fn parse_fen(fen: &str) -> Result<GameState, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| FenError::new("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| FenError::new("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| FenError::new("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| FenError::new("missing en-passant square"))?;

    // Move counters are positional and optional; the clock restarts anyway.
    let _halfmove_part = parts.next();
    let _fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(FenError::new("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = 0;
    game_state.zobrist_key = compute_zobrist_key(&game_state);

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::new("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7usize - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::new(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as usize;
                continue;
            }

            let (color, piece) = piece_from_fen_char(ch)
                .ok_or_else(|| FenError::new(format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(FenError::new("board rank has too many files"));
            }

            let sq = board_rank * 8 + file;
            game_state.pieces[color.index()][piece.index()] |= 1u64 << sq;
            file += 1;
        }

        if file != 8 {
            return Err(FenError::new("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::new(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => {
                return Err(FenError::new(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(FenError::new)
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}
