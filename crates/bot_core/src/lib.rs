pub mod uci;

pub use cozy_chess::{Board, Color, Move, Piece, Square};
pub use uci::*;

use thiserror::Error;

// =============================================================================
// Engine trait — the one capability the host needs from a bot
// =============================================================================

/// What an engine hands back to the host for one move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayResult {
    /// The chosen move in UCI text, exactly as the engine produced it
    pub best_move: String,
    /// Evaluation in centipawns from the engine's perspective, if it has one
    pub score: Option<i32>,
}

impl PlayResult {
    pub fn new(best_move: impl Into<String>, score: Option<i32>) -> Self {
        Self {
            best_move: best_move.into(),
            score,
        }
    }
}

/// Failures an engine reports to the host. Recovery is the host's call.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("predictor failed: {0}")]
    Predictor(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("no legal moves in position {0}")]
    NoLegalMoves(String),
}

/// Trait that all bots plugged into the host must implement.
///
/// The host owns the board, the clock and the game loop. It calls `search`
/// once per turn and blocks until it returns.
pub trait Engine: Send {
    /// Produce a move for the given position.
    fn search(&mut self, board: &Board) -> Result<PlayResult, EngineError>;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str {
        "ML-chess bot"
    }
}

/// All legal moves in `board`, in generation order.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    board.generate_moves(|piece_moves| {
        moves.extend(piece_moves);
        false
    });
    moves
}
