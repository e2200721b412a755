//! YAML schema definitions for declarative training configuration

use crate::data::DEFAULT_EOS;
use crate::gradcheck::DEFAULT_STEP;
use crate::model::{Float, Init};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete training specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSpec {
    /// Corpus configuration
    pub data: DataSpec,

    /// Network configuration
    pub model: ModelSpec,

    /// Optimizer configuration
    pub optimizer: OptimSpec,

    /// Training hyperparameters
    #[serde(default)]
    pub training: TrainingParams,

    /// Gradient check settings
    #[serde(default)]
    pub check: CheckSpec,
}

/// Corpus location and sequence delimiter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSpec {
    /// Path to a UTF-8 text file
    pub path: PathBuf,

    /// End-of-sequence character (a one-character string)
    #[serde(default = "default_eos")]
    pub eos: String,
}

impl DataSpec {
    /// The delimiter as a `char`, if it is exactly one character
    pub fn eos_char(&self) -> Option<char> {
        let mut chars = self.eos.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// Network shape and initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Hidden state size
    pub hidden_size: usize,

    /// Seed for weight initialization
    #[serde(default)]
    pub seed: u64,

    /// Fill modes for weights and biases
    #[serde(default)]
    pub init: InitSpec,
}

/// Initialization modes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitSpec {
    #[serde(default)]
    pub weights: Init,

    #[serde(default = "default_bias_init")]
    pub biases: Init,
}

impl Default for InitSpec {
    fn default() -> Self {
        Self {
            weights: Init::Random,
            biases: default_bias_init(),
        }
    }
}

/// Optimizer specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimSpec {
    /// Learning rate
    pub lr: Float,
}

/// Training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Number of passes over the corpus
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    /// Emit a debug event every N sequences
    #[serde(default = "default_log_every")]
    pub log_every: usize,

    /// Keep probability traces for every step
    #[serde(default)]
    pub keep_probs: bool,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            log_every: default_log_every(),
            keep_probs: false,
        }
    }
}

/// Gradient check settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSpec {
    /// Finite-difference step
    #[serde(default = "default_step")]
    pub step: Float,

    /// Index of the corpus sequence to check
    #[serde(default)]
    pub sequence: usize,

    /// Largest acceptable mean signed error
    #[serde(default = "default_tolerance")]
    pub tolerance: Float,
}

impl Default for CheckSpec {
    fn default() -> Self {
        Self {
            step: default_step(),
            sequence: 0,
            tolerance: default_tolerance(),
        }
    }
}

fn default_eos() -> String {
    DEFAULT_EOS.to_string()
}

fn default_bias_init() -> Init {
    Init::Zeros
}

fn default_epochs() -> usize {
    1
}

fn default_log_every() -> usize {
    100
}

fn default_step() -> Float {
    DEFAULT_STEP
}

fn default_tolerance() -> Float {
    1e-4
}
