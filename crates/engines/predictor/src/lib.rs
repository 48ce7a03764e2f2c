//! Learned Predictor Engine
//!
//! Plugs a [`MovePredictor`] into the host's [`Engine`] contract. The engine
//! does no search of its own: every request bumps a move counter, forwards the
//! position's FEN and the counter to the predictor, and hands the predicted
//! move back unchanged.
//!
//! Construction is explicit and ordered: load the model, then build engines
//! from it.
//! ```ignore
//! let config = BotConfig::load(Path::new("bot.toml"))?;
//! let mut factory = EngineFactory::from_config(config)?;
//! let mut engine = factory.build()?;
//! let reply = engine.search(&board)?;
//! ```

pub mod config;
mod factory;

pub use config::{BotConfig, ConfigError, EngineSettings, LogSettings, ModelEntry, PredictorSettings};
pub use factory::{EngineFactory, FactoryError};

use bot_core::{Board, Engine, EngineError, PlayResult};
use move_predictor::MovePredictor;
use tracing::info;

/// Engine that plays whatever its predictor says.
pub struct PredictorEngine<P> {
    predictor: P,
    /// Sequence number of the last move request
    move_counter: u32,
    stochastic: bool,
    name: String,
}

impl<P: MovePredictor> PredictorEngine<P> {
    /// Creates an engine with the default settings.
    pub fn new(predictor: P) -> Self {
        Self::with_settings(predictor, &EngineSettings::default())
    }

    pub fn with_settings(predictor: P, settings: &EngineSettings) -> Self {
        Self {
            predictor,
            move_counter: settings.initial_move_counter,
            stochastic: settings.stochastic,
            name: settings.name.clone(),
        }
    }

    /// Counter value passed with the most recent request.
    pub fn move_counter(&self) -> u32 {
        self.move_counter
    }

    pub fn stochastic(&self) -> bool {
        self.stochastic
    }

    pub fn set_stochastic(&mut self, stochastic: bool) {
        self.stochastic = stochastic;
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn predictor_mut(&mut self) -> &mut P {
        &mut self.predictor
    }
}

impl<P: MovePredictor> Engine for PredictorEngine<P> {
    fn search(&mut self, board: &Board) -> Result<PlayResult, EngineError> {
        self.move_counter = self.move_counter.saturating_add(1);
        info!(move_number = self.move_counter, "predicting move");

        let fen = board.to_string();
        let best_move = self
            .predictor
            .predict(&fen, self.move_counter, self.stochastic)
            .map_err(|e| EngineError::Predictor(Box::new(e)))?;

        Ok(PlayResult::new(best_move, None))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
