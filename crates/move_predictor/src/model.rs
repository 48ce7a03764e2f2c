//! Loaded policy networks and their blend weights.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::PredictError;

/// A network that maps an encoded position to policy logits.
pub trait PolicyNetwork: Send + Sync {
    /// Run one forward pass. `inputs` has `NUM_INPUTS` entries and the
    /// result is expected to have `POLICY_SIZE` entries.
    fn forward(&self, inputs: &[f32]) -> Result<Vec<f32>, PredictError>;
}

/// Where to find one checkpoint and how much it counts in the blend.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub path: PathBuf,
    pub weight: f32,
}

impl Checkpoint {
    pub fn new(path: impl Into<PathBuf>, weight: f32) -> Self {
        Self {
            path: path.into(),
            weight,
        }
    }
}

struct Member {
    network: Box<dyn PolicyNetwork>,
    weight: f32,
}

/// One or more policy networks, read-only after load.
///
/// Weights are normalized to sum to one at construction.
pub struct PolicyModel {
    members: Vec<Member>,
}

impl PolicyModel {
    /// Build a model from already-constructed networks.
    pub fn new(networks: Vec<(Box<dyn PolicyNetwork>, f32)>) -> Result<Self, PredictError> {
        if networks.is_empty() {
            return Err(PredictError::EmptyModel);
        }
        if let Some(&(_, w)) = networks.iter().find(|(_, w)| !(w.is_finite() && *w > 0.0)) {
            return Err(PredictError::InvalidWeight(w));
        }

        let total: f32 = networks.iter().map(|(_, w)| w).sum();
        let members = networks
            .into_iter()
            .map(|(network, weight)| Member {
                network,
                weight: weight / total,
            })
            .collect();
        Ok(Self { members })
    }

    /// A model with a single network at full weight.
    pub fn single(network: Box<dyn PolicyNetwork>) -> Self {
        Self {
            members: vec![Member {
                network,
                weight: 1.0,
            }],
        }
    }

    /// Load every checkpoint from disk.
    pub fn load(checkpoints: &[Checkpoint]) -> Result<Self, PredictError> {
        let mut networks = Vec::with_capacity(checkpoints.len());
        for checkpoint in checkpoints {
            let network = load_network(&checkpoint.path)?;
            info!(
                path = %checkpoint.path.display(),
                weight = checkpoint.weight,
                "loaded policy checkpoint"
            );
            networks.push((network, checkpoint.weight));
        }
        Self::new(networks)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Networks with their normalized weights.
    pub fn members(&self) -> impl Iterator<Item = (&dyn PolicyNetwork, f32)> {
        self.members.iter().map(|m| (m.network.as_ref(), m.weight))
    }
}

fn load_network(path: &Path) -> Result<Box<dyn PolicyNetwork>, PredictError> {
    if !path.exists() {
        return Err(PredictError::ModelNotFound(path.to_path_buf()));
    }

    #[cfg(feature = "onnx")]
    {
        let model = crate::onnx_model::OnnxPolicy::load(path)?;
        Ok(Box::new(model))
    }

    #[cfg(not(feature = "onnx"))]
    {
        Err(PredictError::OnnxDisabled(path.to_path_buf()))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod model_tests;
