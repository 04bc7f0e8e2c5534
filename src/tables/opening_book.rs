//! Opening book built from a line-oriented corpus of recorded games.
//!
//! Each input line is one game as whitespace-separated algebraic moves
//! (a SAN subset: castling, promotions, captures, file/rank disambiguators).
//! Lines are replayed from the starting position through the legal move
//! generator; every position along the way is indexed by its simplified FEN
//! key with per-move observation weights. Lookups pick a weighted-random
//! continuation.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;

use rand::Rng;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::BoardError;
use crate::move_generation::legal_move_generator::{generate_legal_moves, MoveGenerationError};
use crate::moves::chess_move::{Move, MoveFlag};
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::fen_generator::generate_position_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    Io(String),
    Parse(String),
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookError::Io(msg) => write!(f, "opening book I/O error: {msg}"),
            BookError::Parse(msg) => write!(f, "opening book parse error: {msg}"),
        }
    }
}

impl Error for BookError {}

impl From<MoveGenerationError> for BookError {
    fn from(err: MoveGenerationError) -> Self {
        BookError::Parse(err.to_string())
    }
}

impl From<BoardError> for BookError {
    fn from(err: BoardError) -> Self {
        BookError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct BookMove {
    pub book_move: Move,
    pub weight: u32,
}

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    by_position: HashMap<String, Vec<BookMove>>,
}

impl OpeningBook {
    /// Load a game corpus from disk. A missing or unreadable file is an
    /// immediate error; there is no silent empty-book fallback.
    pub fn from_file(path: &str) -> Result<Self, BookError> {
        let data = fs::read_to_string(path)
            .map_err(|err| BookError::Io(format!("failed reading {path}: {err}")))?;
        Self::from_games_str(&data)
    }

    /// Build the book from an in-memory corpus.
    ///
    /// Result tokens (`1-0`, `0-1`, `1/2-1/2`, `*`) end a line; a token that
    /// does not resolve to a legal move abandons the rest of its line, so a
    /// partially readable corpus still contributes its prefix.
    pub fn from_games_str(games: &str) -> Result<Self, BookError> {
        let mut by_position: HashMap<String, Vec<BookMove>> = HashMap::new();

        for line in games.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let mut game = GameState::new_game();

            for token in line.split_whitespace() {
                if token.contains("1-0")
                    || token.contains("0-1")
                    || token.contains("1/2-1/2")
                    || token == "*"
                {
                    break;
                }

                let legal = generate_legal_moves(&game, false)?;
                let Some(mv) = parse_recorded_move(token, &legal) else {
                    break;
                };

                let key = generate_position_key(&game);
                let row = by_position.entry(key).or_default();
                match row.iter_mut().find(|entry| entry.book_move == mv) {
                    Some(entry) => entry.weight += 1,
                    None => row.push(BookMove {
                        book_move: mv,
                        weight: 1,
                    }),
                }

                game.make_move(mv)?;
            }
        }

        Ok(Self { by_position })
    }

    /// Known continuations for the current position, if any.
    pub fn moves_for(&self, game_state: &GameState) -> Option<&[BookMove]> {
        self.by_position
            .get(&generate_position_key(game_state))
            .map(|row| row.as_slice())
    }

    /// Weighted-random choice among the known continuations.
    pub fn book_move<R: Rng + ?Sized>(
        &self,
        game_state: &GameState,
        rng: &mut R,
    ) -> Option<Move> {
        let moves = self.moves_for(game_state)?;
        if moves.is_empty() {
            return None;
        }

        let total_weight: u64 = moves.iter().map(|entry| u64::from(entry.weight)).sum();
        if total_weight == 0 {
            return Some(moves[0].book_move);
        }

        let mut pick = rng.random_range(0..total_weight);
        for entry in moves {
            let weight = u64::from(entry.weight);
            if pick < weight {
                return Some(entry.book_move);
            }
            pick -= weight;
        }

        Some(moves[0].book_move)
    }
}

/// Match one recorded token against the legal moves of the position.
fn parse_recorded_move(token: &str, legal: &[Move]) -> Option<Move> {
    let token = token.trim_end_matches(['+', '#', '!', '?']);

    if token == "O-O" || token == "0-0" {
        return legal
            .iter()
            .copied()
            .find(|m| m.flag() == MoveFlag::CastleKingSide);
    }
    if token == "O-O-O" || token == "0-0-0" {
        return legal
            .iter()
            .copied()
            .find(|m| m.flag() == MoveFlag::CastleQueenSide);
    }

    if let Some(eq_idx) = token.find('=') {
        return parse_promotion(token, eq_idx, legal);
    }

    let (piece, rest) = match *token.as_bytes().first()? {
        b'N' => (PieceKind::Knight, &token[1..]),
        b'B' => (PieceKind::Bishop, &token[1..]),
        b'R' => (PieceKind::Rook, &token[1..]),
        b'Q' => (PieceKind::Queen, &token[1..]),
        b'K' => (PieceKind::King, &token[1..]),
        _ => (PieceKind::Pawn, token),
    };

    if rest.len() < 2 {
        return None;
    }

    let destination = algebraic_to_square(&rest[rest.len() - 2..]).ok()?;
    let (from_file, from_rank) = parse_disambiguators(&rest[..rest.len() - 2])?;

    legal.iter().copied().find(|m| {
        m.to() == destination
            && m.piece_kind() == piece
            && m.promotion_kind().is_none()
            && from_file.map_or(true, |file| m.from() % 8 == file)
            && from_rank.map_or(true, |rank| m.from() / 8 == rank)
    })
}

fn parse_promotion(token: &str, eq_idx: usize, legal: &[Move]) -> Option<Move> {
    let square_part = &token[..eq_idx];
    if square_part.len() < 2 {
        return None;
    }

    let destination = algebraic_to_square(&square_part[square_part.len() - 2..]).ok()?;
    let flag = match token[eq_idx + 1..].chars().next()? {
        'Q' => MoveFlag::PromoteQueen,
        'R' => MoveFlag::PromoteRook,
        'B' => MoveFlag::PromoteBishop,
        'N' => MoveFlag::PromoteKnight,
        _ => return None,
    };
    let (from_file, _) = parse_disambiguators(&square_part[..square_part.len() - 2])?;

    legal.iter().copied().find(|m| {
        m.to() == destination
            && m.flag() == flag
            && from_file.map_or(true, |file| m.from() % 8 == file)
    })
}

/// Extract optional file/rank disambiguators, ignoring capture marks.
fn parse_disambiguators(prefix: &str) -> Option<(Option<u8>, Option<u8>)> {
    let mut from_file = None;
    let mut from_rank = None;

    for ch in prefix.chars() {
        match ch {
            'a'..='h' => from_file = Some(ch as u8 - b'a'),
            '1'..='8' => from_rank = Some(ch as u8 - b'1'),
            'x' => {}
            _ => return None,
        }
    }

    Some((from_file, from_rank))
}
