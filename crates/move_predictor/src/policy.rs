//! Policy head layout and decoding.
//!
//! A policy vector has one logit per (from, to) square pair in side-relative
//! coordinates, plus a tail for under-promotions:
//!
//! ```text
//! 0    .. 4096   from * 64 + to        (queen promotions share this slot)
//! 4096 .. 4168   under-promotions      (from_file, direction, piece)
//! ```
//!
//! Castling is indexed by the king's destination (g- or c-file), matching
//! UCI text rather than cozy-chess's king-takes-rook encoding.

use bot_core::uci_destination;
use cozy_chess::{Board, Move, Piece};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::features::relative_square;
use crate::PredictError;

const FROM_TO_SIZE: usize = 64 * 64;
const UNDERPROMO_PIECES: usize = 3;
const UNDERPROMO_DIRECTIONS: usize = 3;

/// Total policy width.
pub const POLICY_SIZE: usize = FROM_TO_SIZE + 8 * UNDERPROMO_DIRECTIONS * UNDERPROMO_PIECES;

/// Policy slot for a legal move of `board`.
pub fn policy_index(board: &Board, mv: Move) -> usize {
    let us = board.side_to_move();
    let from = relative_square(mv.from, us);
    let to = relative_square(uci_destination(board, mv), us);

    let piece_slot = match mv.promotion {
        Some(Piece::Knight) => Some(0),
        Some(Piece::Bishop) => Some(1),
        Some(Piece::Rook) => Some(2),
        _ => None,
    };

    match piece_slot {
        Some(slot) => {
            let from_file = from.file() as usize;
            // 0 = capture towards a-file, 1 = push, 2 = capture towards h-file
            let direction = (to.file() as usize + 1) - from_file;
            FROM_TO_SIZE
                + (from_file * UNDERPROMO_DIRECTIONS + direction) * UNDERPROMO_PIECES
                + slot
        }
        None => from as usize * 64 + to as usize,
    }
}

/// Softmax of `logits / temperature` restricted to the given slots.
///
/// Illegal moves never receive probability mass.
pub fn legal_softmax(
    logits: &[f32],
    indices: &[usize],
    temperature: f32,
) -> Result<Vec<f32>, PredictError> {
    let raw: Vec<f32> = indices.iter().map(|&i| logits[i]).collect();
    let max = raw.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return Err(PredictError::DegenerateOutput);
    }

    // Shift before scaling: a tiny temperature must not overflow the logits.
    let exps: Vec<f32> = raw.iter().map(|&x| ((x - max) / temperature).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(PredictError::DegenerateOutput);
    }
    Ok(exps.into_iter().map(|e| e / sum).collect())
}

/// Index of the most probable entry. Ties go to the earliest move.
pub fn argmax(probs: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probs.iter().enumerate() {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
}

/// Draws an index with probability proportional to `probs`.
pub fn sample<R: Rng + ?Sized>(probs: &[f32], rng: &mut R) -> Result<usize, PredictError> {
    let dist = WeightedIndex::new(probs).map_err(|_| PredictError::DegenerateOutput)?;
    Ok(dist.sample(rng))
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod policy_tests;
