//! Training loop
//!
//! One training step per sequence: forward, backward, SGD update. The weights
//! and the loss history live in an explicit [`TrainState`] owned by the
//! [`Trainer`], and the weights are replaced wholesale after each update.
//!
//! # Example
//!
//! ```
//! use charnn::data::Corpus;
//! use charnn::model::{Sizes, WeightBundle};
//! use charnn::optim::SGD;
//! use charnn::train::{TrainConfig, Trainer};
//!
//! let corpus = Corpus::from_text("ab\nba\n", '\n')?;
//! let sizes = Sizes::new(corpus.vocab_size(), 8);
//! let weights = WeightBundle::random(sizes, 0);
//!
//! let mut trainer = Trainer::new(sizes, weights, Box::new(SGD::new(0.1)), TrainConfig::default())?;
//! let result = trainer.train(&corpus.sequences, 5)?;
//! assert_eq!(result.epoch_losses.len(), 5);
//! # Ok::<(), charnn::Error>(())
//! ```

mod config;
mod state;
mod trainer;

pub use config::TrainConfig;
pub use state::TrainState;
pub use trainer::{StepOutput, TrainResult, Trainer};
