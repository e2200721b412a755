//! Single-command training and gradient checks from YAML configuration

use super::builder::{build_model, build_optimizer, build_train_config};
use super::schema::TrainSpec;
use super::validate::{validate_config, validate_params};
use crate::data::{Corpus, Vocabulary};
use crate::error::{Error, Result};
use crate::gradcheck::{ErrorReport, GradientChecker, TensorComparison};
use crate::model::{Float, Sizes};
use crate::train::{TrainResult, TrainState, Trainer};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Everything a finished training run leaves behind
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub vocabulary: Vocabulary,
    pub sizes: Sizes,
    pub result: TrainResult,
    pub state: TrainState,
}

/// Gradient check on one corpus sequence
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    /// Index of the checked sequence within the corpus
    pub sequence: usize,
    /// Number of characters in it, end-of-sequence included
    pub length: usize,
    pub step: Float,
    pub tolerance: Float,
    pub passed: bool,
    pub report: ErrorReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elementwise: Option<Vec<TensorComparison>>,
}

/// Load training spec from YAML file (without running training)
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<TrainSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    let spec = parse_spec(&yaml_content)?;
    validate_config(&spec).map_err(|e| Error::ConfigError(format!("Invalid config: {}", e)))?;

    Ok(spec)
}

/// Parse and validate a spec from YAML text
///
/// The data path is not checked for existence.
pub fn parse_config(yaml: &str) -> Result<TrainSpec> {
    let spec = parse_spec(yaml)?;
    validate_params(&spec).map_err(|e| Error::ConfigError(format!("Invalid config: {}", e)))?;
    Ok(spec)
}

fn parse_spec(yaml: &str) -> Result<TrainSpec> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {}", e)))
}

/// Read the corpus a spec points at
pub fn load_corpus(spec: &TrainSpec) -> Result<Corpus> {
    let eos = spec.data.eos_char().ok_or_else(|| {
        Error::ConfigError(format!(
            "eos must be a single character, got {:?}",
            spec.data.eos
        ))
    })?;
    Corpus::load(&spec.data.path, eos)
}

/// Train a model from an already loaded spec
pub fn train_from_spec(spec: &TrainSpec) -> Result<TrainOutcome> {
    let corpus = load_corpus(spec)?;
    let (sizes, weights) = build_model(&spec.model, corpus.vocab_size())?;
    let optimizer = build_optimizer(&spec.optimizer)?;
    let config = build_train_config(&spec.training);

    tracing::info!(
        path = %spec.data.path.display(),
        sequences = corpus.len(),
        vocab_size = sizes.vocab_size,
        hidden_size = sizes.hidden_size,
        params = sizes.param_count(),
        lr = spec.optimizer.lr,
        epochs = spec.training.epochs,
        "starting training"
    );

    let mut trainer = Trainer::new(sizes, weights, optimizer, config)?;
    let result = trainer.train(&corpus.sequences, spec.training.epochs)?;

    Ok(TrainOutcome {
        vocabulary: corpus.vocabulary,
        sizes,
        result,
        state: trainer.into_state(),
    })
}

/// Train a model from YAML configuration file
///
/// # Example
///
/// ```no_run
/// use charnn::config::train_from_yaml;
///
/// let outcome = train_from_yaml("config.yaml")?;
/// println!("final loss: {:?}", outcome.result.final_loss);
/// # Ok::<(), charnn::Error>(())
/// ```
pub fn train_from_yaml<P: AsRef<Path>>(config_path: P) -> Result<TrainOutcome> {
    let spec = load_config(config_path)?;
    train_from_spec(&spec)
}

/// Gradient-check the initial weights on the configured corpus sequence
pub fn check_from_spec(spec: &TrainSpec, elementwise: bool) -> Result<CheckOutcome> {
    let corpus = load_corpus(spec)?;
    let index = spec.check.sequence;
    let sequence = corpus.sequences.get(index).ok_or_else(|| {
        Error::InvalidParameter(format!(
            "sequence index {index} out of range (corpus has {})",
            corpus.len()
        ))
    })?;
    if !spec.check.step.is_finite() || spec.check.step <= 0.0 {
        return Err(Error::ConfigError(format!(
            "Invalid finite-difference step: {} (must be > 0.0)",
            spec.check.step
        )));
    }

    let (sizes, weights) = build_model(&spec.model, corpus.vocab_size())?;
    let checker = GradientChecker::with_step(spec.check.step);
    let report = checker.check(sequence, sizes, &weights);
    let elementwise = elementwise.then(|| checker.compare(sequence, sizes, &weights));
    let passed = report.passes(spec.check.tolerance);

    tracing::info!(
        sequence = index,
        length = sequence.len(),
        max_error = report.max_abs(),
        passed,
        "gradient check finished"
    );

    Ok(CheckOutcome {
        sequence: index,
        length: sequence.len(),
        step: spec.check.step,
        tolerance: spec.check.tolerance,
        passed,
        report,
        elementwise,
    })
}
