//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! charnn train config.yaml
//! charnn train config.yaml --epochs 10 --lr 0.05
//! charnn check config.yaml --format json
//! charnn validate config.yaml
//! charnn info config.yaml
//! ```

use super::validate::{validate_params, ValidationError};
use super::TrainSpec;
use crate::model::Float;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// charnn: character-level RNN trained with backpropagation through time
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "charnn")]
#[command(version)]
#[command(about = "Train a character-level RNN with BPTT and check its gradients")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train on a corpus from YAML configuration
    Train(TrainArgs),

    /// Compare analytic gradients with finite differences
    Check(CheckArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Display information about a configuration
    Info(InfoArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Override learning rate
    #[arg(short, long)]
    pub lr: Option<Float>,

    /// Override hidden state size
    #[arg(long)]
    pub hidden_size: Option<usize>,

    /// Override initialization seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log every N sequences
    #[arg(long)]
    pub log_every: Option<usize>,

    /// Dry run (validate config and corpus but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CheckArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override finite-difference step
    #[arg(long)]
    pub step: Option<Float>,

    /// Index of the corpus sequence to check
    #[arg(long)]
    pub sequence: Option<usize>,

    /// Override initialization seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also report per-entry max absolute/relative errors
    #[arg(long)]
    pub elementwise: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!(
                "Unknown output format: {}. Valid formats: text, json, yaml",
                s
            )),
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a TrainSpec and re-validate it
pub fn apply_overrides(spec: &mut TrainSpec, args: &TrainArgs) -> Result<(), ValidationError> {
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if let Some(lr) = args.lr {
        spec.optimizer.lr = lr;
    }
    if let Some(hidden_size) = args.hidden_size {
        spec.model.hidden_size = hidden_size;
    }
    if let Some(seed) = args.seed {
        spec.model.seed = seed;
    }
    if let Some(log_every) = args.log_every {
        spec.training.log_every = log_every;
    }
    validate_params(spec)
}

/// Apply gradient check overrides to a TrainSpec and re-validate it
pub fn apply_check_overrides(
    spec: &mut TrainSpec,
    args: &CheckArgs,
) -> Result<(), ValidationError> {
    if let Some(step) = args.step {
        spec.check.step = step;
    }
    if let Some(sequence) = args.sequence {
        spec.check.sequence = sequence;
    }
    if let Some(seed) = args.seed {
        spec.model.seed = seed;
    }
    validate_params(spec)
}
