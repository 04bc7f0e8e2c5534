//! Attack queries shared by check detection, king-move legality, and
//! castling legality.

use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::{bishop_attacks, BISHOP_RAYS};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::{rook_attacks, ROOK_RAYS};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    attackers_to_square(game_state, square, attacker_color) != 0
}

/// All of `attacker_color`'s pieces that attack `square`, as a bitboard.
///
/// Slider attacks are resolved by ray casts that stop at the first blocker;
/// knight, pawn, and king attacks come from the contact tables. A pawn
/// attacking `square` sits on a square the *opposite*-color pawn pattern
/// reaches from there.
pub fn attackers_to_square(game_state: &GameState, square: Square, attacker_color: Color) -> u64 {
    let occupied = game_state.occupied();
    let boards = &game_state.pieces[attacker_color.index()];
    let mut attackers = 0u64;

    // The unbounded ray masks are a cheap pre-filter: no slider on a ray
    // through `square` means the ray casts cannot hit anything.
    let rook_queens = boards[PieceKind::Rook.index()] | boards[PieceKind::Queen.index()];
    if (ROOK_RAYS[square as usize] & rook_queens) != 0 {
        attackers |= rook_attacks(square, occupied) & rook_queens;
    }

    let bishop_queens = boards[PieceKind::Bishop.index()] | boards[PieceKind::Queen.index()];
    if (BISHOP_RAYS[square as usize] & bishop_queens) != 0 {
        attackers |= bishop_attacks(square, occupied) & bishop_queens;
    }

    attackers |= knight_attacks(square) & boards[PieceKind::Knight.index()];
    attackers |=
        pawn_attacks(attacker_color.opposite(), square) & boards[PieceKind::Pawn.index()];
    attackers |= king_attacks(square) & boards[PieceKind::King.index()];

    attackers
}

/// Every square attacked by `by` pieces.
///
/// Slider rays treat the enemy king as absent so a checked king cannot step
/// backwards along the checking ray and appear safe; all other occupancy
/// blocks rays normally.
pub fn attacked_squares(game_state: &GameState, by: Color) -> u64 {
    let boards = &game_state.pieces[by.index()];
    let enemy_king = game_state.pieces[by.opposite().index()][PieceKind::King.index()];
    let occupied = game_state.occupied() & !enemy_king;

    let mut attacked = 0u64;

    let mut pawns = boards[PieceKind::Pawn.index()];
    while pawns != 0 {
        let sq = pawns.trailing_zeros() as Square;
        attacked |= pawn_attacks(by, sq);
        pawns &= pawns - 1;
    }

    let mut knights = boards[PieceKind::Knight.index()];
    while knights != 0 {
        let sq = knights.trailing_zeros() as Square;
        attacked |= knight_attacks(sq);
        knights &= knights - 1;
    }

    let kings = boards[PieceKind::King.index()];
    if kings != 0 {
        attacked |= king_attacks(kings.trailing_zeros() as Square);
    }

    let mut bishops = boards[PieceKind::Bishop.index()];
    while bishops != 0 {
        let sq = bishops.trailing_zeros() as Square;
        attacked |= bishop_attacks(sq, occupied);
        bishops &= bishops - 1;
    }

    let mut rooks = boards[PieceKind::Rook.index()];
    while rooks != 0 {
        let sq = rooks.trailing_zeros() as Square;
        attacked |= rook_attacks(sq, occupied);
        rooks &= rooks - 1;
    }

    let mut queens = boards[PieceKind::Queen.index()];
    while queens != 0 {
        let sq = queens.trailing_zeros() as Square;
        attacked |= queen_attacks(sq, occupied);
        queens &= queens - 1;
    }

    attacked
}
