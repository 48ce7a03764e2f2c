//! Random Move Chess Engine
//!
//! Selects moves uniformly at random from all legal moves. The UCI host
//! falls back to it when the predictor engine fails or answers with a move
//! that is not legal, so a game never stalls on a bad prediction.

use bot_core::{legal_moves, move_to_uci, Board, Engine, EngineError, PlayResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(test)]
mod lib_tests;

/// A chess engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, board: &Board) -> Result<PlayResult, EngineError> {
        let moves = legal_moves(board);
        let mv = moves
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| EngineError::NoLegalMoves(board.to_string()))?;

        Ok(PlayResult::new(move_to_uci(board, mv), None))
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
