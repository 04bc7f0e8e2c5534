//! Zobrist hashing support for fast position identity and repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging.

use std::sync::OnceLock;

use crate::game_state::{chess_types::*, game_state::GameState};

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = next_random_u64(&mut seed);
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Return the Zobrist key for a `(color, piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

/// Return the Zobrist key contribution for a castling rights mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & 0x0F) as usize]
}

/// Return the Zobrist key contribution for a valid en-passant file.
#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[file as usize]
}

/// Return the side-to-move toggle key (xor in when black to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position Zobrist key from the complete game state.
///
/// The incremental key maintained by `make_move` must always agree with this.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for color in [Color::White, Color::Black] {
        for piece in PieceKind::ALL {
            let mut bb = game_state.pieces[color.index()][piece.index()];
            while bb != 0 {
                let sq = bb.trailing_zeros() as Square;
                key ^= piece_square_key(color, piece, sq);
                bb &= bb - 1;
            }
        }
    }

    if game_state.side_to_move == Color::Black {
        key ^= side_to_move_key();
    }

    key ^= castling_key(game_state.castling_rights);

    if let Some(ep_square) = game_state.en_passant_square {
        key ^= en_passant_file_key(ep_square % 8);
    }

    key
}
