//! Build training components from configuration

use super::schema::{ModelSpec, OptimSpec, TrainingParams};
use crate::error::{Error, Result};
use crate::model::{Sizes, WeightBundle};
use crate::optim::{Optimizer, SGD};
use crate::train::TrainConfig;

/// Build optimizer from configuration
pub fn build_optimizer(spec: &OptimSpec) -> Result<Box<dyn Optimizer>> {
    if !spec.lr.is_finite() || spec.lr <= 0.0 {
        return Err(Error::ConfigError(format!(
            "Invalid learning rate: {} (must be > 0.0)",
            spec.lr
        )));
    }
    Ok(Box::new(SGD::new(spec.lr)))
}

/// Build sizes and initial weights for a corpus with `vocab_size` symbols
pub fn build_model(spec: &ModelSpec, vocab_size: usize) -> Result<(Sizes, WeightBundle)> {
    if vocab_size == 0 || spec.hidden_size == 0 {
        return Err(Error::ConfigError(format!(
            "Cannot build model with vocab_size={vocab_size}, hidden_size={}",
            spec.hidden_size
        )));
    }
    let sizes = Sizes::new(vocab_size, spec.hidden_size);
    let weights = WeightBundle::init(sizes, spec.init.weights, spec.init.biases, spec.seed);
    Ok((sizes, weights))
}

/// Build the training loop configuration
pub fn build_train_config(params: &TrainingParams) -> TrainConfig {
    TrainConfig::new()
        .with_log_interval(params.log_every)
        .with_probs_history(params.keep_probs)
}
