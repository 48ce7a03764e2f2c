//! ONNX model loading and inference
//!
//! This module handles loading ONNX policy checkpoints and running inference.
//! Requires the `onnx` feature to be enabled.

use std::path::{Path, PathBuf};
use tract_onnx::prelude::*;

use crate::features::NUM_INPUTS;
use crate::model::PolicyNetwork;
use crate::policy::POLICY_SIZE;
use crate::PredictError;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Wrapper around an ONNX policy network with a fixed `[1, NUM_INPUTS]` input.
pub struct OnnxPolicy {
    plan: Plan,
    path: PathBuf,
}

impl OnnxPolicy {
    /// Load an ONNX model from the given path.
    pub fn load(path: &Path) -> Result<Self, PredictError> {
        let model_err = |e: TractError| PredictError::Model {
            path: path.to_path_buf(),
            message: format!("{e:#}"),
        };

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(model_err)?
            .with_input_fact(0, f32::fact([1, NUM_INPUTS]).into())
            .map_err(model_err)?
            .into_optimized()
            .map_err(model_err)?
            .into_runnable()
            .map_err(model_err)?;

        Ok(Self {
            plan,
            path: path.to_path_buf(),
        })
    }

    fn inference_err(&self, e: TractError) -> PredictError {
        PredictError::Model {
            path: self.path.clone(),
            message: format!("{e:#}"),
        }
    }
}

impl PolicyNetwork for OnnxPolicy {
    fn forward(&self, inputs: &[f32]) -> Result<Vec<f32>, PredictError> {
        if inputs.len() != NUM_INPUTS {
            return Err(PredictError::InputShape {
                expected: NUM_INPUTS,
                actual: inputs.len(),
            });
        }

        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, NUM_INPUTS), inputs.to_vec())
            .map_err(|e| self.inference_err(e.into()))?
            .into();

        let result = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| self.inference_err(e))?;
        let output = result[0]
            .to_array_view::<f32>()
            .map_err(|e| self.inference_err(e))?;

        let logits: Vec<f32> = output.iter().copied().collect();
        if logits.len() != POLICY_SIZE {
            return Err(PredictError::OutputShape {
                expected: POLICY_SIZE,
                actual: logits.len(),
            });
        }
        Ok(logits)
    }
}

#[cfg(test)]
#[path = "onnx_model_tests.rs"]
mod onnx_model_tests;
