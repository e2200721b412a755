//! # charnn: character-level recurrent network
//!
//! charnn trains a single-layer tanh RNN over one-hot encoded characters with
//! backpropagation through time, and verifies the analytic gradients against
//! central finite differences.
//!
//! ## Architecture
//!
//! - **data**: Vocabulary, one-hot sequences and corpus loading
//! - **model**: Network sizes, weight/gradient bundles and initialization
//! - **rnn**: Forward unrolling and BPTT backward pass
//! - **optim**: Plain gradient descent
//! - **gradcheck**: Finite-difference gradient verification
//! - **train**: Sequence-at-a-time training loop
//! - **config**: Declarative YAML configuration and CLI
//!
//! ## Example
//!
//! ```
//! use charnn::data::Vocabulary;
//! use charnn::model::{Sizes, WeightBundle};
//! use charnn::{backward, forward, update};
//!
//! let vocab = Vocabulary::from_chars("hello\n".chars());
//! let seq = vocab.encode_str("hello\n")?;
//! let sizes = Sizes::new(vocab.len(), 8);
//! let weights = WeightBundle::random(sizes, 42);
//!
//! let trace = forward(&seq, sizes, &weights);
//! let grads = backward(&trace.probs, &trace.hs, &seq, sizes, &weights);
//! let next = update(&weights, &grads, 0.1);
//!
//! assert_eq!(trace.loss.len(), seq.len() - 1);
//! assert!(next.is_finite());
//! # Ok::<(), charnn::Error>(())
//! ```

pub mod config;
pub mod data;
pub mod gradcheck;
pub mod model;
pub mod optim;
pub mod rnn;
pub mod train;

pub mod error;

// Re-export commonly used types
pub use data::Sequence;
pub use error::{Error, Result};
pub use gradcheck::{check, ErrorReport, GradientChecker};
pub use model::{Float, GradientBundle, ParamKind, Sizes, WeightBundle};
pub use optim::{update, Optimizer, SGD};
pub use rnn::{backward, forward};
