//! Feature extraction for neural network input
//!
//! Converts a chess position into a flat vector suitable for NN input.
//! The board is always seen from the side to move: when black is to move the
//! ranks are mirrored and the colours swapped, so "friendly" pieces are the
//! first six planes and friendly pawns advance towards rank 8.

use cozy_chess::{Board, Color, Piece, Square};

/// Number of piece planes: 6 piece types × 2 sides
pub const NUM_PLANES: usize = 12;

/// Board features: 8 × 8 × 12 = 768
pub const NUM_FEATURES: usize = 64 * NUM_PLANES;

/// Game-state scalars appended after the planes:
/// castling (4), en passant, halfmove clock, move number
pub const NUM_EXTRA: usize = 7;

/// Total network input width.
pub const NUM_INPUTS: usize = NUM_FEATURES + NUM_EXTRA;

/// Square as seen by the side to move.
#[inline]
pub fn relative_square(sq: Square, side: Color) -> Square {
    match side {
        Color::White => sq,
        Color::Black => sq.flip_rank(),
    }
}

/// Piece planes, side-to-move relative.
///
/// Plane index is `piece + 0` for friendly pieces and `piece + 6` for enemy
/// pieces, with pieces ordered pawn, knight, bishop, rook, queen, king.
pub fn extract_planes(board: &Board) -> Vec<f32> {
    let mut features = vec![0.0f32; NUM_FEATURES];
    let us = board.side_to_move();

    for color in [Color::White, Color::Black] {
        let color_offset = if color == us { 0 } else { 6 };
        for piece in Piece::ALL {
            let plane = piece as usize + color_offset;
            for sq in board.colored_pieces(color, piece) {
                let idx = plane * 64 + relative_square(sq, us) as usize;
                features[idx] = 1.0;
            }
        }
    }

    features
}

/// Full network input: the planes followed by game-state scalars.
///
/// - Castling rights: ours short, ours long, theirs short, theirs long
/// - En passant file normalized to 0..1, or -1 when there is none
/// - Halfmove clock normalized to 0..1 (capped at 100)
/// - Move number normalized to 0..1 (capped at 100)
pub fn encode(board: &Board, move_number: u32) -> Vec<f32> {
    let mut features = extract_planes(board);
    features.reserve(NUM_EXTRA);

    let us = board.side_to_move();
    for color in [us, !us] {
        let rights = board.castle_rights(color);
        features.push(if rights.short.is_some() { 1.0 } else { 0.0 });
        features.push(if rights.long.is_some() { 1.0 } else { 0.0 });
    }

    features.push(
        board
            .en_passant()
            .map(|file| file as usize as f32 / 7.0)
            .unwrap_or(-1.0),
    );
    features.push((board.halfmove_clock() as f32 / 100.0).min(1.0));
    features.push((move_number as f32 / 100.0).min(1.0));

    features
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod features_tests;
