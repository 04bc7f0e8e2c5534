//! Pluggable board evaluation interfaces and implementations.
//!
//! Search stays modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Scores are centipawns from the perspective of the side to move.

use crate::game_state::chess_types::*;
use crate::moves::pawn_moves::pawn_attacks;
use crate::search::piece_square_tables as pst;
use crate::utils::bits;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 310;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 920;

/// Material value of a piece; the king carries none.
#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => 0,
    }
}

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Material-only baseline, handy for tests and as a sanity oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let white_minus_black =
            material(game_state, Color::White) - material(game_state, Color::Black);
        match game_state.side_to_move {
            Color::White => white_minus_black,
            Color::Black => -white_minus_black,
        }
    }
}

/// The full heuristic: material, piece-square tables with a phase-tapered
/// king, pawn structure, and an endgame term that drives the enemy king
/// toward the board edge and the own king toward its passed pawns.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaperedScorer;

// Game phase at which the king-driving term switches on.
const KING_DRIVE_PHASE_THRESHOLD: f32 = 0.6;
// Weight multiplier against a near-lone king (at most one minor, no majors).
const KING_DRIVE_WEIGHT_HIGH: f32 = 3.0;
const KING_DRIVE_WEIGHT_LOW: f32 = 1.0;

const PAWN_UNDEFENDABLE_BONUS: i32 = 15;
const PAWN_DEFENDED_BONUS: i32 = 20;
const PAWN_ADVANCE_BONUS_PER_RANK: i32 = 10;

impl BoardScorer for TaperedScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let phase = game_phase(game_state);

        let white_eval = material(game_state, Color::White)
            + piece_square_score(game_state, Color::White, phase)
            + pawn_structure(game_state, Color::White);
        let black_eval = material(game_state, Color::Black)
            + piece_square_score(game_state, Color::Black, phase)
            + pawn_structure(game_state, Color::Black);

        let mover = game_state.side_to_move;
        let mut king_drive = 0;

        if phase >= KING_DRIVE_PHASE_THRESHOLD {
            king_drive = king_drive_score(game_state, mover, phase);
        }

        let perspective = match mover {
            Color::White => 1,
            Color::Black => -1,
        };

        (white_eval - black_eval) * perspective + king_drive
    }
}

/// Material sum for one side, king excluded.
fn material(game_state: &GameState, color: Color) -> i32 {
    let boards = &game_state.pieces[color.index()];
    let mut sum = 0i32;

    for piece in [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ] {
        sum += bits::pop_count(boards[piece.index()]) as i32 * piece_value(piece);
    }

    sum
}

/// Phase in `[0, 1]`: 0 at full armies, 1 once all non-pawn, non-king
/// pieces (at most 14) have left the board.
pub fn game_phase(game_state: &GameState) -> f32 {
    let mut total = 0u32;
    for color in [Color::White, Color::Black] {
        let boards = &game_state.pieces[color.index()];
        total += bits::pop_count(boards[PieceKind::Knight.index()]);
        total += bits::pop_count(boards[PieceKind::Bishop.index()]);
        total += bits::pop_count(boards[PieceKind::Rook.index()]);
        total += bits::pop_count(boards[PieceKind::Queen.index()]);
    }

    const MAX_PIECES: f32 = 14.0;
    (1.0 - total as f32 / MAX_PIECES).clamp(0.0, 1.0)
}

fn piece_square_score(game_state: &GameState, color: Color, phase: f32) -> i32 {
    let boards = &game_state.pieces[color.index()];
    let mut score = 0i32;

    let tables = [
        (PieceKind::Pawn, &pst::PAWNS),
        (PieceKind::Knight, &pst::KNIGHTS),
        (PieceKind::Bishop, &pst::BISHOPS),
        (PieceKind::Rook, &pst::ROOKS),
        (PieceKind::Queen, &pst::QUEENS),
    ];

    for (piece, table) in tables {
        let mut bb = boards[piece.index()];
        while bb != 0 {
            let sq = bb.trailing_zeros() as Square;
            score += pst::read(table, sq, color);
            bb &= bb - 1;
        }
    }

    let kings = boards[PieceKind::King.index()];
    if kings != 0 {
        let king_sq = kings.trailing_zeros() as Square;
        let middle = pst::read(&pst::KING_MIDDLE, king_sq, color) as f32;
        let end = pst::read(&pst::KING_END, king_sq, color) as f32;
        score += ((1.0 - phase) * middle + phase * end) as i32;
    }

    score
}

fn pawn_structure(game_state: &GameState, color: Color) -> i32 {
    let pawns = game_state.pieces[color.index()][PieceKind::Pawn.index()];
    let mut score = 0i32;

    let mut bb = pawns;
    while bb != 0 {
        let sq = bb.trailing_zeros() as Square;
        let rank = i32::from(sq / 8);

        // Squares from which a friendly pawn could defend this one.
        if (pawn_attacks(color.opposite(), sq) & pawns) == 0 {
            score += PAWN_UNDEFENDABLE_BONUS;
        }
        // Squares this pawn defends that hold friendly pawns.
        if (pawn_attacks(color, sq) & pawns) != 0 {
            score += PAWN_DEFENDED_BONUS;
        }

        let advance = match color {
            Color::White => rank,
            Color::Black => 7 - rank,
        };
        score += advance * PAWN_ADVANCE_BONUS_PER_RANK;

        bb &= bb - 1;
    }

    score
}

/// Mover-relative endgame bonus for pushing the enemy king to the edge,
/// escorting own passed pawns, and closing the king distance.
fn king_drive_score(game_state: &GameState, mover: Color, phase: f32) -> i32 {
    let enemy = mover.opposite();
    let own_king = game_state.pieces[mover.index()][PieceKind::King.index()];
    let enemy_king = game_state.pieces[enemy.index()][PieceKind::King.index()];
    if own_king == 0 || enemy_king == 0 {
        return 0;
    }

    let own_king_sq = own_king.trailing_zeros() as Square;
    let enemy_king_sq = enemy_king.trailing_zeros() as Square;

    let enemy_boards = &game_state.pieces[enemy.index()];
    let enemy_minors = bits::pop_count(
        enemy_boards[PieceKind::Knight.index()] | enemy_boards[PieceKind::Bishop.index()],
    );
    let enemy_majors = bits::pop_count(
        enemy_boards[PieceKind::Rook.index()] | enemy_boards[PieceKind::Queen.index()],
    );

    let weight_multiplier = if enemy_minors <= 1 && enemy_majors == 0 {
        KING_DRIVE_WEIGHT_HIGH
    } else {
        KING_DRIVE_WEIGHT_LOW
    };
    let endgame_weight = phase * weight_multiplier;

    let own_pawns = game_state.pieces[mover.index()][PieceKind::Pawn.index()];
    let enemy_pawns = enemy_boards[PieceKind::Pawn.index()];

    let mut evaluation = 0i32;

    let enemy_file = i32::from(enemy_king_sq % 8);
    let enemy_rank = i32::from(enemy_king_sq / 8);
    evaluation += ((3 - enemy_file).abs() + (3 - enemy_rank).abs()) * 2;

    let pawn_distance = closest_passed_pawn_distance(own_pawns, enemy_pawns, mover, own_king_sq);
    if let Some(min_distance) = pawn_distance {
        evaluation += (7 - min_distance) * 3;
    }

    evaluation += (14 - manhattan(own_king_sq, enemy_king_sq)) * 2;

    (evaluation as f32 * endgame_weight) as i32
}

/// Manhattan distance from the king to the closest own passed pawn, if any.
fn closest_passed_pawn_distance(
    own_pawns: u64,
    enemy_pawns: u64,
    color: Color,
    king_sq: Square,
) -> Option<i32> {
    let mut best: Option<i32> = None;

    let mut bb = own_pawns;
    while bb != 0 {
        let sq = bb.trailing_zeros() as Square;
        if (passed_pawn_mask(sq, color) & enemy_pawns) == 0 {
            let distance = manhattan(sq, king_sq);
            best = Some(best.map_or(distance, |current| current.min(distance)));
        }
        bb &= bb - 1;
    }

    best
}

/// Mask of all squares an enemy pawn would have to occupy to stop this pawn:
/// the pawn's file and both adjacent files, on every rank ahead of it.
pub fn passed_pawn_mask(square: Square, color: Color) -> u64 {
    const FILE_A: u64 = 0x0101_0101_0101_0101;

    let file = square % 8;
    let rank = square / 8;

    let rank_mask = match color {
        Color::White => {
            if rank >= 7 {
                0
            } else {
                u64::MAX << (8 * (rank + 1))
            }
        }
        Color::Black => {
            if rank == 0 {
                0
            } else {
                u64::MAX >> (8 * (8 - rank))
            }
        }
    };

    let center = FILE_A << file;
    let left = FILE_A << file.saturating_sub(1);
    let right = FILE_A << (file + 1).min(7);

    (left | center | right) & rank_mask
}

#[inline]
fn manhattan(a: Square, b: Square) -> i32 {
    let file_delta = (i32::from(a % 8) - i32::from(b % 8)).abs();
    let rank_delta = (i32::from(a / 8) - i32::from(b / 8)).abs();
    file_delta + rank_delta
}
