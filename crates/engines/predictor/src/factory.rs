use std::sync::Arc;

use move_predictor::{PolicyModel, PolicyPredictor, PredictError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info};

use crate::{BotConfig, ConfigError, PredictorEngine};

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Predict(#[from] PredictError),
}

/// Holds the loaded model and stamps out one engine per game.
pub struct EngineFactory {
    model: Arc<PolicyModel>,
    config: BotConfig,
    built: u64,
}

impl EngineFactory {
    /// Validate the config and load every checkpoint it names.
    pub fn from_config(config: BotConfig) -> Result<Self, FactoryError> {
        config.validate()?;
        let model = PolicyModel::load(&config.checkpoints())?;
        info!(checkpoints = model.len(), "model ready");
        Ok(Self::with_model(Arc::new(model), config))
    }

    /// Use an already loaded model.
    pub fn with_model(model: Arc<PolicyModel>, config: BotConfig) -> Self {
        Self {
            model,
            config,
            built: 0,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Settings changed here apply to engines built afterwards.
    pub fn config_mut(&mut self) -> &mut BotConfig {
        &mut self.config
    }

    /// A fresh engine sharing the model. Its counter starts from the
    /// configured initial value.
    ///
    /// With a configured seed, the n-th engine built samples from
    /// `seed + n` so games differ but runs repeat.
    pub fn build(&mut self) -> Result<PredictorEngine<PolicyPredictor>, PredictError> {
        let rng = match self.config.predictor.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.built)),
            None => StdRng::from_entropy(),
        };
        self.built += 1;
        debug!(game = self.built, "building engine");

        let predictor =
            PolicyPredictor::new(self.model.clone(), self.config.predictor.temperature, rng)?;
        Ok(PredictorEngine::with_settings(predictor, &self.config.engine))
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod factory_tests;
