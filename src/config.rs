use std::{num::NonZeroUsize, path::PathBuf};

use serde::Deserialize;

use crate::error::{Result, TrainErr};

/// Hyperparameters and execution bounds for one training run.
///
/// Everything here is fixed before initialization begins; the trainer treats
/// the configuration as immutable input.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TrainingConfig {
    /// Fixed iteration budget. There is no convergence check or early stop.
    pub iterations: NonZeroUsize,
    /// Number of parallel compute units the example range is split among.
    #[serde(default = "default_units")]
    pub units: NonZeroUsize,
    /// Learning rate.
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    /// Momentum coefficient.
    #[serde(default = "default_gamma")]
    pub gamma: f32,
}

fn default_units() -> NonZeroUsize {
    NonZeroUsize::new(1).unwrap()
}

fn default_alpha() -> f32 {
    0.3
}

fn default_gamma() -> f32 {
    0.95
}

impl TrainingConfig {
    /// Rejects hyperparameters the update rule cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(TrainErr::InvalidConfig(format!(
                "alpha must be a positive finite number, got {}",
                self.alpha
            )));
        }
        if !self.gamma.is_finite() || self.gamma < 0.0 {
            return Err(TrainErr::InvalidConfig(format!(
                "gamma must be a non-negative finite number, got {}",
                self.gamma
            )));
        }
        Ok(())
    }
}

/// A full run description as loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub train_file: PathBuf,
    #[serde(default)]
    pub test_file: Option<PathBuf>,
    pub model_file: PathBuf,

    pub num_classes: NonZeroUsize,
    pub num_features: NonZeroUsize,
    pub num_examples: NonZeroUsize,

    #[serde(flatten)]
    pub training: TrainingConfig,
}

impl RunConfig {
    /// Parses a run configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(content)
            .map_err(|e| TrainErr::InvalidConfig(format!("invalid JSON: {e}")))?;
        config.training.validate()?;
        Ok(config)
    }

    /// Loads a run configuration from a JSON file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrainErr::InvalidConfig(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_json(&content)
    }
}
