//! Text ingestion and one-hot encoding
//!
//! - **Vocabulary**: character-to-index table built in first-appearance order
//! - **Sequence**: ordered one-hot column vectors fed to the recurrence
//! - **Corpus**: a text file split into end-of-sequence terminated pieces

mod corpus;
mod sequence;
mod vocab;

pub use corpus::{split_sequences, Corpus};
pub use sequence::Sequence;
pub use vocab::Vocabulary;

/// Default end-of-sequence character
pub const DEFAULT_EOS: char = '\n';
