//! Full legal move generation.
//!
//! Generates only legal moves in a single pass by branching on the number of
//! checkers: with no checker every piece moves under its own pin constraint,
//! with one checker non-king moves are confined to the evasion mask, and
//! under double check only the king may move. En passant is the one case
//! validated by simulation, which also covers the discovered-check-through-
//! the-vacated-rank trap.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::BoardError;
use crate::move_generation::legal_move_checks::{
    attacked_squares, attackers_to_square, is_square_attacked, king_square,
};
use crate::move_generation::pins::{pin_direction, pinned_pieces, ray_between, ray_through, PinDirection};
use crate::moves::chess_move::{Move, MoveError, MoveFlag};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::utils::bits;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    InvalidMove(MoveError),
    InvalidState(BoardError),
}

impl fmt::Display for MoveGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveGenerationError::InvalidMove(err) => write!(f, "invalid move: {err}"),
            MoveGenerationError::InvalidState(err) => write!(f, "invalid game state: {err}"),
        }
    }
}

impl Error for MoveGenerationError {}

impl From<MoveError> for MoveGenerationError {
    fn from(err: MoveError) -> Self {
        MoveGenerationError::InvalidMove(err)
    }
}

impl From<BoardError> for MoveGenerationError {
    fn from(err: BoardError) -> Self {
        MoveGenerationError::InvalidState(err)
    }
}

const STRAIGHT_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Generate the legal move list for the side to move.
///
/// With `captures_only` set, quiet moves and castling are suppressed; this
/// mode feeds the quiescence search.
pub fn generate_legal_moves(
    game_state: &GameState,
    captures_only: bool,
) -> MoveGenResult<Vec<Move>> {
    let mut moves = Vec::with_capacity(48);
    let mover = game_state.side_to_move;

    let Some(king_sq) = king_square(game_state, mover) else {
        return Ok(moves);
    };

    let checkers = attackers_to_square(game_state, king_sq, mover.opposite());
    let check_count = bits::pop_count(checkers);
    let pinned = pinned_pieces(game_state, mover);
    let attacked = attacked_squares(game_state, mover.opposite());

    match check_count {
        0 => {
            if !captures_only {
                generate_castling_moves(game_state, king_sq, attacked, &mut moves)?;
            }
            generate_king_moves(game_state, king_sq, attacked, captures_only, &mut moves)?;
            generate_pawn_moves(
                game_state, king_sq, pinned, u64::MAX, false, captures_only, &mut moves,
            )?;
            generate_knight_moves(game_state, pinned, u64::MAX, captures_only, &mut moves)?;
            generate_bishop_moves(
                game_state, king_sq, pinned, u64::MAX, false, captures_only, &mut moves,
            )?;
            generate_rook_moves(
                game_state, king_sq, pinned, u64::MAX, false, captures_only, &mut moves,
            )?;
            generate_queen_moves(
                game_state, king_sq, pinned, u64::MAX, false, captures_only, &mut moves,
            )?;
        }
        1 => {
            let evasions = evasion_mask(king_sq, checkers);
            generate_king_moves(game_state, king_sq, attacked, captures_only, &mut moves)?;
            generate_pawn_moves(
                game_state, king_sq, pinned, evasions, true, captures_only, &mut moves,
            )?;
            generate_knight_moves(game_state, pinned, evasions, captures_only, &mut moves)?;
            generate_bishop_moves(
                game_state, king_sq, pinned, evasions, true, captures_only, &mut moves,
            )?;
            generate_rook_moves(
                game_state, king_sq, pinned, evasions, true, captures_only, &mut moves,
            )?;
            generate_queen_moves(
                game_state, king_sq, pinned, evasions, true, captures_only, &mut moves,
            )?;
        }
        _ => {
            // Double check: only the king can resolve it.
            generate_king_moves(game_state, king_sq, attacked, captures_only, &mut moves)?;
        }
    }

    Ok(moves)
}

/// Squares a non-king move may land on to resolve a single check: capture
/// the checker, or block the ray when the checker is a slider.
fn evasion_mask(king_sq: Square, checkers: u64) -> u64 {
    let checker_sq = checkers.trailing_zeros() as Square;

    if pin_direction(king_sq, checker_sq) != PinDirection::None {
        ray_between(king_sq, checker_sq) | checkers
    } else {
        checkers
    }
}

fn generate_king_moves(
    game_state: &GameState,
    king_sq: Square,
    attacked: u64,
    captures_only: bool,
    moves: &mut Vec<Move>,
) -> MoveGenResult<()> {
    let mover = game_state.side_to_move;
    let own_pieces = game_state.pieces_of(mover);

    let mut targets = king_attacks(king_sq) & !own_pieces & !attacked;
    if captures_only {
        targets &= game_state.pieces_of(mover.opposite());
    }

    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        moves.push(Move::new(king_sq, to, MoveFlag::None, PieceKind::King)?);
        targets &= targets - 1;
    }

    Ok(())
}

fn generate_castling_moves(
    game_state: &GameState,
    king_sq: Square,
    attacked: u64,
    moves: &mut Vec<Move>,
) -> MoveGenResult<()> {
    let occupied = game_state.occupied();
    let rights = game_state.castling_rights;

    match game_state.side_to_move {
        Color::White if king_sq == 4 => {
            let kingside_path = (1u64 << 5) | (1u64 << 6);
            if (rights & CASTLE_WHITE_KINGSIDE) != 0
                && (occupied & kingside_path) == 0
                && (attacked & kingside_path) == 0
            {
                moves.push(Move::new(4, 6, MoveFlag::CastleKingSide, PieceKind::King)?);
            }

            let queenside_clear = (1u64 << 1) | (1u64 << 2) | (1u64 << 3);
            let queenside_path = (1u64 << 2) | (1u64 << 3);
            if (rights & CASTLE_WHITE_QUEENSIDE) != 0
                && (occupied & queenside_clear) == 0
                && (attacked & queenside_path) == 0
            {
                moves.push(Move::new(4, 2, MoveFlag::CastleQueenSide, PieceKind::King)?);
            }
        }
        Color::Black if king_sq == 60 => {
            let kingside_path = (1u64 << 61) | (1u64 << 62);
            if (rights & CASTLE_BLACK_KINGSIDE) != 0
                && (occupied & kingside_path) == 0
                && (attacked & kingside_path) == 0
            {
                moves.push(Move::new(60, 62, MoveFlag::CastleKingSide, PieceKind::King)?);
            }

            let queenside_clear = (1u64 << 57) | (1u64 << 58) | (1u64 << 59);
            let queenside_path = (1u64 << 58) | (1u64 << 59);
            if (rights & CASTLE_BLACK_QUEENSIDE) != 0
                && (occupied & queenside_clear) == 0
                && (attacked & queenside_path) == 0
            {
                moves.push(Move::new(60, 58, MoveFlag::CastleQueenSide, PieceKind::King)?);
            }
        }
        _ => {}
    }

    Ok(())
}

fn generate_knight_moves(
    game_state: &GameState,
    pinned: u64,
    valid_targets: u64,
    captures_only: bool,
    moves: &mut Vec<Move>,
) -> MoveGenResult<()> {
    let mover = game_state.side_to_move;
    let own_pieces = game_state.pieces_of(mover);
    let mut knights = game_state.pieces[mover.index()][PieceKind::Knight.index()];

    while knights != 0 {
        let from = knights.trailing_zeros() as Square;
        knights &= knights - 1;

        // A knight leaves its pin line with every move it has.
        if (pinned & (1u64 << from)) != 0 {
            continue;
        }

        let mut targets = knight_attacks(from) & !own_pieces & valid_targets;
        if captures_only {
            targets &= game_state.pieces_of(mover.opposite());
        }

        while targets != 0 {
            let to = targets.trailing_zeros() as Square;
            moves.push(Move::new(from, to, MoveFlag::None, PieceKind::Knight)?);
            targets &= targets - 1;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn generate_pawn_moves(
    game_state: &GameState,
    king_sq: Square,
    pinned: u64,
    valid_targets: u64,
    in_check: bool,
    captures_only: bool,
    moves: &mut Vec<Move>,
) -> MoveGenResult<()> {
    let mover = game_state.side_to_move;
    let enemy_pieces = game_state.pieces_of(mover.opposite());
    let occupied = game_state.occupied();
    let start_rank = match mover {
        Color::White => 1,
        Color::Black => 6,
    };

    let mut pawns = game_state.pieces[mover.index()][PieceKind::Pawn.index()];

    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;
        let from_mask = 1u64 << from;

        if (pinned & from_mask) != 0 {
            // A pinned piece can never block or capture a checker: the pin
            // line and the check line only meet at the king square.
            if in_check {
                continue;
            }

            match pin_direction(king_sq, from) {
                PinDirection::Vertical => {
                    if captures_only {
                        continue;
                    }
                    push_pinned_pawn_advances(mover, from, start_rank, occupied, moves)?;
                }
                PinDirection::Diagonal => {
                    let mut captures = pawn_attacks(mover, from)
                        & enemy_pieces
                        & ray_through(king_sq, from);
                    while captures != 0 {
                        let to = captures.trailing_zeros() as Square;
                        add_pawn_move(from, to, moves)?;
                        captures &= captures - 1;
                    }
                }
                // A horizontally pinned pawn has no legal move at all.
                _ => {}
            }
            continue;
        }

        if !captures_only {
            let one_step = advance_square(mover, from);
            if (occupied & (1u64 << one_step)) == 0 {
                if (valid_targets & (1u64 << one_step)) != 0 {
                    add_pawn_move(from, one_step, moves)?;
                }

                if from / 8 == start_rank {
                    let two_step = advance_square(mover, one_step);
                    if (occupied & (1u64 << two_step)) == 0
                        && (valid_targets & (1u64 << two_step)) != 0
                    {
                        moves.push(Move::new(
                            from,
                            two_step,
                            MoveFlag::DoublePawnPush,
                            PieceKind::Pawn,
                        )?);
                    }
                }
            }
        }

        let attacks = pawn_attacks(mover, from);
        let mut captures = attacks & enemy_pieces & valid_targets;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            add_pawn_move(from, to, moves)?;
            captures &= captures - 1;
        }

        // En passant legality (including evasion legality while in check) is
        // settled by simulating the capture on a scratch board.
        if let Some(ep_square) = game_state.en_passant_square {
            if (attacks & (1u64 << ep_square)) != 0
                && en_passant_is_safe(game_state, from, ep_square)
            {
                moves.push(Move::new(from, ep_square, MoveFlag::EnPassant, PieceKind::Pawn)?);
            }
        }
    }

    Ok(())
}

fn push_pinned_pawn_advances(
    mover: Color,
    from: Square,
    start_rank: Square,
    occupied: u64,
    moves: &mut Vec<Move>,
) -> MoveGenResult<()> {
    let one_step = advance_square(mover, from);
    if (occupied & (1u64 << one_step)) != 0 {
        return Ok(());
    }

    add_pawn_move(from, one_step, moves)?;

    if from / 8 == start_rank {
        let two_step = advance_square(mover, one_step);
        if (occupied & (1u64 << two_step)) == 0 {
            moves.push(Move::new(
                from,
                two_step,
                MoveFlag::DoublePawnPush,
                PieceKind::Pawn,
            )?);
        }
    }

    Ok(())
}

#[inline]
fn advance_square(mover: Color, from: Square) -> Square {
    match mover {
        Color::White => from + 8,
        Color::Black => from - 8,
    }
}

/// Push a pawn move, expanding landings on the back ranks into the four
/// promotion choices.
fn add_pawn_move(from: Square, to: Square, moves: &mut Vec<Move>) -> MoveGenResult<()> {
    if to >= 56 || to <= 7 {
        moves.push(Move::new(from, to, MoveFlag::PromoteQueen, PieceKind::Pawn)?);
        moves.push(Move::new(from, to, MoveFlag::PromoteRook, PieceKind::Pawn)?);
        moves.push(Move::new(from, to, MoveFlag::PromoteBishop, PieceKind::Pawn)?);
        moves.push(Move::new(from, to, MoveFlag::PromoteKnight, PieceKind::Pawn)?);
    } else {
        moves.push(Move::new(from, to, MoveFlag::None, PieceKind::Pawn)?);
    }
    Ok(())
}

fn en_passant_is_safe(game_state: &GameState, from: Square, ep_square: Square) -> bool {
    let mover = game_state.side_to_move;
    let enemy = mover.opposite();

    let mut scratch = GameState::new_empty();
    scratch.pieces = game_state.pieces;
    scratch.side_to_move = mover;

    let captured_square = match mover {
        Color::White => ep_square - 8,
        Color::Black => ep_square + 8,
    };

    scratch.pieces[mover.index()][PieceKind::Pawn.index()] &= !(1u64 << from);
    scratch.pieces[mover.index()][PieceKind::Pawn.index()] |= 1u64 << ep_square;
    scratch.pieces[enemy.index()][PieceKind::Pawn.index()] &= !(1u64 << captured_square);

    let Some(king_sq) = king_square(&scratch, mover) else {
        return true;
    };

    !is_square_attacked(&scratch, king_sq, enemy)
}

#[allow(clippy::too_many_arguments)]
fn generate_bishop_moves(
    game_state: &GameState,
    king_sq: Square,
    pinned: u64,
    valid_targets: u64,
    in_check: bool,
    captures_only: bool,
    moves: &mut Vec<Move>,
) -> MoveGenResult<()> {
    generate_slider_moves(
        game_state,
        PieceKind::Bishop,
        &DIAGONAL_DIRECTIONS,
        king_sq,
        pinned,
        valid_targets,
        in_check,
        captures_only,
        moves,
    )
}

#[allow(clippy::too_many_arguments)]
fn generate_rook_moves(
    game_state: &GameState,
    king_sq: Square,
    pinned: u64,
    valid_targets: u64,
    in_check: bool,
    captures_only: bool,
    moves: &mut Vec<Move>,
) -> MoveGenResult<()> {
    generate_slider_moves(
        game_state,
        PieceKind::Rook,
        &STRAIGHT_DIRECTIONS,
        king_sq,
        pinned,
        valid_targets,
        in_check,
        captures_only,
        moves,
    )
}

#[allow(clippy::too_many_arguments)]
fn generate_queen_moves(
    game_state: &GameState,
    king_sq: Square,
    pinned: u64,
    valid_targets: u64,
    in_check: bool,
    captures_only: bool,
    moves: &mut Vec<Move>,
) -> MoveGenResult<()> {
    generate_slider_moves(
        game_state,
        PieceKind::Queen,
        &ALL_DIRECTIONS,
        king_sq,
        pinned,
        valid_targets,
        in_check,
        captures_only,
        moves,
    )
}

#[allow(clippy::too_many_arguments)]
fn generate_slider_moves(
    game_state: &GameState,
    piece: PieceKind,
    directions: &[(i32, i32)],
    king_sq: Square,
    pinned: u64,
    valid_targets: u64,
    in_check: bool,
    captures_only: bool,
    moves: &mut Vec<Move>,
) -> MoveGenResult<()> {
    let mover = game_state.side_to_move;
    let own_pieces = game_state.pieces_of(mover);
    let occupied = game_state.occupied();

    let mut valid = valid_targets;
    if captures_only {
        valid &= occupied & !own_pieces;
    }

    let mut sliders = game_state.pieces[mover.index()][piece.index()];

    while sliders != 0 {
        let from = sliders.trailing_zeros() as Square;
        sliders &= sliders - 1;

        let mut pin_ray = u64::MAX;
        if (pinned & (1u64 << from)) != 0 {
            if in_check {
                continue;
            }
            pin_ray = ray_through(king_sq, from);
        }

        for &(file_step, rank_step) in directions {
            let mut file = i32::from(from % 8) + file_step;
            let mut rank = i32::from(from / 8) + rank_step;

            while (0..8).contains(&file) && (0..8).contains(&rank) {
                let to = (rank * 8 + file) as Square;
                let to_mask = 1u64 << to;

                if (own_pieces & to_mask) != 0 {
                    break;
                }
                if (valid & to_mask & pin_ray) != 0 {
                    moves.push(Move::new(from, to, MoveFlag::None, piece)?);
                }
                if (occupied & to_mask) != 0 {
                    break;
                }

                file += file_step;
                rank += rank_step;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::generate_legal_moves;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::move_generation::pins::{pinned_pieces, ray_through};
    use crate::moves::chess_move::MoveFlag;

    #[test]
    fn start_position_has_twenty_moves() {
        let game = GameState::new_game();
        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn every_evasion_actually_resolves_the_check() {
        // White king on e1 checked by the rook on e8.
        let mut game = GameState::from_fen("4r2k/8/8/8/8/3B4/2N5/R3K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(is_king_in_check(&game, Color::White));

        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        assert!(!moves.is_empty(), "the check must be escapable");

        for mv in moves {
            game.make_move(mv).expect("move should apply");
            assert!(
                !is_king_in_check(&game, Color::White),
                "{mv} leaves the king in check"
            );
            game.unmake_move().expect("unmake should succeed");
        }
    }

    #[test]
    fn double_check_permits_only_king_moves() {
        // Rook on e8 and bishop on h4 both give check.
        let game = GameState::from_fen("4r2k/8/8/8/7b/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        assert!(!moves.is_empty());
        for mv in &moves {
            assert_eq!(mv.piece_kind(), PieceKind::King, "{mv} is not a king move");
        }
    }

    #[test]
    fn pinned_piece_moves_stay_on_the_pin_ray() {
        // Bishop on e2 is pinned by the e8 rook.
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let pinned = pinned_pieces(&game, Color::White);
        assert_eq!(pinned, 1u64 << 12);

        let ray = ray_through(4, 12);
        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        for mv in moves.iter().filter(|m| m.from() == 12) {
            assert_ne!(
                ray & (1u64 << mv.to()),
                0,
                "{mv} leaves the pin ray"
            );
        }
        // A bishop pinned on a file cannot move at all.
        assert_eq!(moves.iter().filter(|m| m.from() == 12).count(), 0);
    }

    #[test]
    fn pinned_rook_may_slide_along_the_pin_file() {
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        let rook_moves: Vec<_> = moves.iter().filter(|m| m.from() == 12).collect();
        assert_eq!(rook_moves.len(), 6, "e3..e7 slides plus the e8 capture");
        for mv in rook_moves {
            assert_eq!(mv.to() % 8, 4, "{mv} must stay on the e-file");
        }
    }

    #[test]
    fn en_passant_is_dropped_when_it_uncovers_the_king() {
        // King a5 and rook h5 share the fifth rank with both pawns; taking
        // en passant would clear the rank and expose the king.
        let unsafe_game = GameState::from_fen("7k/8/8/K2pP2r/8/8/8/8 w - d6 0 1")
            .expect("FEN should parse");
        let moves = generate_legal_moves(&unsafe_game, false).expect("generation should succeed");
        assert!(
            moves.iter().all(|m| m.flag() != MoveFlag::EnPassant),
            "en passant must be excluded when it exposes the king"
        );

        // Without the rook the capture is fine.
        let safe_game = GameState::from_fen("7k/8/8/K2pP3/8/8/8/8 w - d6 0 1")
            .expect("FEN should parse");
        let moves = generate_legal_moves(&safe_game, false).expect("generation should succeed");
        assert!(
            moves.iter().any(|m| m.flag() == MoveFlag::EnPassant),
            "en passant must be offered when it is safe"
        );
    }

    #[test]
    fn en_passant_appears_in_capture_only_generation() {
        let game = GameState::from_fen("7k/8/8/3Pp3/8/5K2/8/8 w - e6 0 1")
            .expect("FEN should parse");
        let captures = generate_legal_moves(&game, true).expect("generation should succeed");
        assert!(captures.iter().any(|m| m.flag() == MoveFlag::EnPassant));
    }

    #[test]
    fn en_passant_can_capture_a_checking_pawn() {
        // Black's e7-e5 push checks the d4 king; fxe6 removes the checker
        // in passing even though the en-passant square lies outside the
        // evasion mask.
        let game = GameState::from_fen("7k/8/8/4pP2/3K4/8/8/8 w - e6 0 1")
            .expect("FEN should parse");
        assert!(is_king_in_check(&game, Color::White));

        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        assert!(moves.iter().any(|m| m.flag() == MoveFlag::EnPassant));
    }

    #[test]
    fn castling_is_blocked_through_attacked_squares() {
        // Black rook on f8 covers f1; kingside castling is illegal while
        // queenside stays available.
        let game = GameState::from_fen("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1")
            .expect("FEN should parse");
        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        assert!(!moves
            .iter()
            .any(|m| m.flag() == MoveFlag::CastleKingSide));
        assert!(moves
            .iter()
            .any(|m| m.flag() == MoveFlag::CastleQueenSide));
    }

    #[test]
    fn castling_requires_empty_between_squares() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1")
            .expect("FEN should parse");
        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        assert!(moves.iter().any(|m| m.flag() == MoveFlag::CastleKingSide));
        assert!(
            !moves.iter().any(|m| m.flag() == MoveFlag::CastleQueenSide),
            "the b1 knight blocks queenside castling"
        );
    }

    #[test]
    fn promotions_expand_to_four_moves() {
        let game =
            GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        let promotions: Vec<_> = moves.iter().filter(|m| m.from() == 48).collect();
        assert_eq!(promotions.len(), 4);
        assert!(promotions
            .iter()
            .all(|m| m.promotion_kind().is_some()));
    }

    #[test]
    fn captures_only_yields_a_subset_of_all_moves() {
        let game = GameState::from_fen(
            "r1bqkbnr/pppp1ppp/2n5/4p3/3PP3/8/PPP2PPP/RNBQKBNR b KQkq - 0 3",
        )
        .expect("FEN should parse");

        let all = generate_legal_moves(&game, false).expect("generation should succeed");
        let captures = generate_legal_moves(&game, true).expect("generation should succeed");

        assert!(!captures.is_empty());
        for mv in &captures {
            assert!(all.contains(mv), "{mv} missing from the full move list");
            let is_capture = game.piece_kind_at(mv.to()).is_some()
                || mv.flag() == MoveFlag::EnPassant;
            assert!(is_capture, "{mv} is not a capture");
        }
    }

    #[test]
    fn horizontally_pinned_pawn_cannot_move() {
        // Rook on h4 pins the f4 pawn sideways against the e4 king.
        let game = GameState::from_fen("6k1/8/8/8/4KP1r/8/8/8 w - - 0 1")
            .expect("FEN should parse");
        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        assert_eq!(
            moves.iter().filter(|m| m.from() == 29).count(),
            0,
            "a horizontally pinned pawn has no legal move"
        );
    }

    #[test]
    fn vertically_pinned_pawn_may_still_push() {
        // Rook on e8 pins the e2 pawn; pushes stay on the file and remain
        // legal, captures do not exist.
        let game = GameState::from_fen("4r1k1/8/8/8/8/5n2/4P3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let moves = generate_legal_moves(&game, false).expect("generation should succeed");
        let pawn_moves: Vec<_> = moves.iter().filter(|m| m.from() == 12).collect();
        assert_eq!(pawn_moves.len(), 2, "single and double push only");
        assert!(pawn_moves.iter().all(|m| m.to() % 8 == 4));
    }
}
