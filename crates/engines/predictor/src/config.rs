//! Bot configuration, read from TOML.
//!
//! ```toml
//! [engine]
//! name = "DL1"
//! initial_move_counter = 1
//! stochastic = true
//!
//! [predictor]
//! temperature = 1.0
//! seed = 7
//!
//! [[models]]
//! path = "models/model_DL1-3.onnx"
//! weight = 1.0
//!
//! [log]
//! level = "info"
//! ```

use move_predictor::Checkpoint;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub engine: EngineSettings,
    pub predictor: PredictorSettings,
    pub models: Vec<ModelEntry>,
    pub log: LogSettings,
}

/// How the adapter drives the predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Name reported to the host
    pub name: String,
    /// Counter value before the first request; it is bumped before use
    pub initial_move_counter: u32,
    /// Sample from the policy instead of playing its top move
    pub stochastic: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            name: "DL1".to_string(),
            initial_move_counter: 1,
            stochastic: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorSettings {
    pub temperature: f32,
    /// Fixed seed for reproducible games; entropy when absent
    pub seed: Option<u64>,
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub path: PathBuf,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive, e.g. "info" or "predictor_engine=debug"
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            predictor: PredictorSettings::default(),
            models: vec![ModelEntry {
                path: PathBuf::from("models/model.onnx"),
                weight: 1.0,
            }],
            log: LogSettings::default(),
        }
    }
}

impl BotConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate config text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: BotConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.models.is_empty() {
            return Err(ConfigError::Invalid("at least one [[models]] entry is required".into()));
        }
        if let Some(m) = self
            .models
            .iter()
            .find(|m| !(m.weight.is_finite() && m.weight > 0.0))
        {
            return Err(ConfigError::Invalid(format!(
                "weight of {} must be positive, got {}",
                m.path.display(),
                m.weight
            )));
        }
        let t = self.predictor.temperature;
        if !(t.is_finite() && t > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "temperature must be positive, got {}",
                t
            )));
        }
        Ok(())
    }

    /// Replace the model list with a single checkpoint.
    pub fn use_single_model(&mut self, path: impl Into<PathBuf>) {
        self.models = vec![ModelEntry {
            path: path.into(),
            weight: 1.0,
        }];
    }

    pub fn checkpoints(&self) -> Vec<Checkpoint> {
        self.models
            .iter()
            .map(|m| Checkpoint::new(m.path.clone(), m.weight))
            .collect()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
