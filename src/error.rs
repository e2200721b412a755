//! Error types for charnn

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Shape mismatch for {tensor}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        tensor: &'static str,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Unknown symbol {0:?} (not in vocabulary)")]
    UnknownSymbol(char),

    #[error("Empty sequence: {0}")]
    EmptySequence(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
