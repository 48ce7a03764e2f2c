//! Learned Move Prediction
//!
//! This crate turns a position in FEN plus a move number into a move in UCI
//! text, using one or more policy networks loaded from ONNX checkpoints.
//!
//! # Pipeline
//!
//! 1. Parse the FEN and encode it side-to-move relative (see [`features`])
//! 2. Run every network of the [`PolicyModel`] on the encoding
//! 3. Mask each policy to the legal moves, softmax, blend by weight (see [`policy`])
//! 4. Take the most probable move, or sample one when asked to be stochastic
//!
//! # Checkpoints
//!
//! Each checkpoint is an ONNX graph with input `[1, NUM_INPUTS]` and a
//! `POLICY_SIZE` wide output of logits. Several checkpoints can be blended:
//! ```ignore
//! let model = PolicyModel::load(&[
//!     Checkpoint::new("models/dl1.onnx", 0.5),
//!     Checkpoint::new("models/dl2.onnx", 0.5),
//! ])?;
//! ```

pub mod features;
pub mod model;
pub mod policy;

#[cfg(feature = "onnx")]
mod onnx_model;

pub use features::NUM_INPUTS;
pub use model::{Checkpoint, PolicyModel, PolicyNetwork};
pub use policy::POLICY_SIZE;

use bot_core::{legal_moves, move_to_uci};
use cozy_chess::Board;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid FEN: {0:?}")]
    InvalidFen(String),
    #[error("no legal moves in {0}")]
    NoLegalMoves(String),
    #[error("model not found: {}", .0.display())]
    ModelNotFound(PathBuf),
    #[error("failed to load or run {}: {message}", .path.display())]
    Model { path: PathBuf, message: String },
    #[error("cannot load {}: built without the `onnx` feature", .0.display())]
    OnnxDisabled(PathBuf),
    #[error("model has no checkpoints")]
    EmptyModel,
    #[error("checkpoint weight must be positive, got {0}")]
    InvalidWeight(f32),
    #[error("temperature must be positive, got {0}")]
    InvalidTemperature(f32),
    #[error("network expects {expected} inputs, got {actual}")]
    InputShape { expected: usize, actual: usize },
    #[error("network produced {actual} logits, expected {expected}")]
    OutputShape { expected: usize, actual: usize },
    #[error("policy has no usable probability mass")]
    DegenerateOutput,
}

/// The prediction function the bot delegates to.
pub trait MovePredictor: Send {
    /// Choose a move for the position `fen`.
    ///
    /// `move_number` is the caller's running count of move requests. With
    /// `stochastic` set the move is sampled from the policy instead of taken
    /// greedily. Returns the move in UCI notation.
    fn predict(
        &mut self,
        fen: &str,
        move_number: u32,
        stochastic: bool,
    ) -> Result<String, PredictError>;
}

/// Predicts moves with a shared [`PolicyModel`].
///
/// The model is read-only and shared; each predictor owns its own RNG so
/// several games can draw independently.
pub struct PolicyPredictor {
    model: Arc<PolicyModel>,
    temperature: f32,
    rng: StdRng,
}

impl PolicyPredictor {
    pub fn new(model: Arc<PolicyModel>, temperature: f32, rng: StdRng) -> Result<Self, PredictError> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(PredictError::InvalidTemperature(temperature));
        }
        Ok(Self {
            model,
            temperature,
            rng,
        })
    }

    /// Predictor with a reproducible sampling sequence.
    pub fn seeded(model: Arc<PolicyModel>, temperature: f32, seed: u64) -> Result<Self, PredictError> {
        Self::new(model, temperature, StdRng::seed_from_u64(seed))
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f32) -> Result<(), PredictError> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(PredictError::InvalidTemperature(temperature));
        }
        self.temperature = temperature;
        Ok(())
    }

    /// Blended probability for each legal move of `board`, in generation order.
    pub fn move_probabilities(
        &self,
        board: &Board,
        move_number: u32,
    ) -> Result<Vec<(cozy_chess::Move, f32)>, PredictError> {
        let moves = legal_moves(board);
        if moves.is_empty() {
            return Err(PredictError::NoLegalMoves(board.to_string()));
        }

        let inputs = features::encode(board, move_number);
        let indices: Vec<usize> = moves
            .iter()
            .map(|&mv| policy::policy_index(board, mv))
            .collect();

        let mut blended = vec![0.0f32; moves.len()];
        for (network, weight) in self.model.members() {
            let logits = network.forward(&inputs)?;
            if logits.len() != POLICY_SIZE {
                return Err(PredictError::OutputShape {
                    expected: POLICY_SIZE,
                    actual: logits.len(),
                });
            }
            let probs = policy::legal_softmax(&logits, &indices, self.temperature)?;
            for (b, p) in blended.iter_mut().zip(probs) {
                *b += weight * p;
            }
        }

        Ok(moves.into_iter().zip(blended).collect())
    }
}

impl MovePredictor for PolicyPredictor {
    fn predict(
        &mut self,
        fen: &str,
        move_number: u32,
        stochastic: bool,
    ) -> Result<String, PredictError> {
        let board =
            Board::from_fen(fen, false).map_err(|_| PredictError::InvalidFen(fen.to_string()))?;

        let scored = self.move_probabilities(&board, move_number)?;
        let probs: Vec<f32> = scored.iter().map(|&(_, p)| p).collect();

        let pick = if stochastic {
            policy::sample(&probs, &mut self.rng)?
        } else {
            policy::argmax(&probs).ok_or(PredictError::DegenerateOutput)?
        };

        let (mv, prob) = scored[pick];
        let uci = move_to_uci(&board, mv);
        debug!(move_number, stochastic, %uci, prob, "policy move");
        Ok(uci)
    }
}
