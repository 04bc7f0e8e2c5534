//! Perft node counting over the legal move generator.
//!
//! Walks the move tree with make/unmake and counts leaf nodes; the known
//! reference counts pin down generator correctness far better than spot
//! checks on individual rules.

use crate::game_state::chess_types::GameState;
use crate::move_generation::legal_move_generator::{generate_legal_moves, MoveGenResult};
use crate::moves::chess_move::Move;

/// Count leaf nodes reachable from `game_state` in exactly `depth` plies.
pub fn perft(game_state: &mut GameState, depth: u8) -> MoveGenResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generate_legal_moves(game_state, false)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        game_state.make_move(mv)?;
        let result = perft(game_state, depth - 1);
        game_state.unmake_move()?;
        nodes += result?;
    }

    Ok(nodes)
}

/// Per-root-move node counts, the usual tool for bisecting a generator bug
/// against a reference engine.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> MoveGenResult<Vec<(Move, u64)>> {
    let moves = generate_legal_moves(game_state, false)?;
    let mut counts = Vec::with_capacity(moves.len());

    for mv in moves {
        game_state.make_move(mv)?;
        let result = perft(game_state, depth.saturating_sub(1));
        game_state.unmake_move()?;
        counts.push((mv, result?));
    }

    Ok(counts)
}
