//! Configuration validation

use super::schema::TrainSpec;
use crate::model::Float;

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Training data path does not exist: {0}")]
    DataPathNotFound(String),

    #[error("Invalid end-of-sequence marker: {0:?} (must be exactly one character)")]
    InvalidEos(String),

    #[error("Invalid hidden size: {0} (must be > 0)")]
    InvalidHiddenSize(usize),

    #[error("Invalid learning rate: {0} (must be > 0.0)")]
    InvalidLearningRate(Float),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid log interval: {0} (must be > 0)")]
    InvalidLogInterval(usize),

    #[error("Invalid finite-difference step: {0} (must be > 0.0)")]
    InvalidCheckStep(Float),

    #[error("Invalid gradient check tolerance: {0} (must be > 0.0)")]
    InvalidTolerance(Float),
}

/// Validate a training specification
///
/// Checks:
/// - The corpus file exists
/// - Numeric values are in valid ranges
/// - The end-of-sequence marker is a single character
pub fn validate_config(spec: &TrainSpec) -> Result<(), ValidationError> {
    if !spec.data.path.exists() {
        return Err(ValidationError::DataPathNotFound(
            spec.data.path.display().to_string(),
        ));
    }

    validate_params(spec)
}

/// Validate everything except file paths
pub fn validate_params(spec: &TrainSpec) -> Result<(), ValidationError> {
    if spec.data.eos_char().is_none() {
        return Err(ValidationError::InvalidEos(spec.data.eos.clone()));
    }

    if spec.model.hidden_size == 0 {
        return Err(ValidationError::InvalidHiddenSize(spec.model.hidden_size));
    }

    if !spec.optimizer.lr.is_finite() || spec.optimizer.lr <= 0.0 {
        return Err(ValidationError::InvalidLearningRate(spec.optimizer.lr));
    }

    if spec.training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(spec.training.epochs));
    }

    if spec.training.log_every == 0 {
        return Err(ValidationError::InvalidLogInterval(spec.training.log_every));
    }

    if !spec.check.step.is_finite() || spec.check.step <= 0.0 {
        return Err(ValidationError::InvalidCheckStep(spec.check.step));
    }

    if spec.check.tolerance.is_nan() || spec.check.tolerance <= 0.0 {
        return Err(ValidationError::InvalidTolerance(spec.check.tolerance));
    }

    Ok(())
}
