//! Declarative YAML configuration
//!
//! A single YAML file describes the corpus, the network and the optimizer.
//!
//! # Example
//!
//! ```yaml
//! data:
//!   path: names.txt
//!   eos: "\n"
//!
//! model:
//!   hidden_size: 100
//!   seed: 42
//!   init:
//!     weights: random
//!     biases: zeros
//!
//! optimizer:
//!   lr: 0.01
//!
//! training:
//!   epochs: 10
//!   log_every: 100
//!
//! check:
//!   step: 1.0e-5
//!   sequence: 0
//! ```

mod builder;
mod cli;
mod schema;
mod train;
mod validate;

#[cfg(test)]
mod tests;


pub use builder::{build_model, build_optimizer, build_train_config};
pub use cli::{
    apply_check_overrides, apply_overrides, parse_args, CheckArgs, Cli, Command, InfoArgs,
    OutputFormat, TrainArgs, ValidateArgs,
};
pub use schema::{CheckSpec, DataSpec, InitSpec, ModelSpec, OptimSpec, TrainSpec, TrainingParams};
pub use train::{
    check_from_spec, load_config, load_corpus, parse_config, train_from_spec, train_from_yaml,
    CheckOutcome, TrainOutcome,
};
pub use validate::{validate_config, validate_params, ValidationError};
