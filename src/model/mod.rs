//! Model parameters
//!
//! The recurrence is parameterised by four tensors:
//!
//! - `W`: `[hidden, vocab + hidden]`, applied to `[x_t; h_{t-1}]`
//! - `Why`: `[vocab, hidden]`, hidden-to-output projection
//! - `bh`: `[hidden]`, hidden bias (column vector)
//! - `by`: `[vocab]`, output bias (column vector)

mod init;
mod params;

pub use init::Init;
pub use params::{GradientBundle, ParamKind, WeightBundle};

use serde::{Deserialize, Serialize};

/// Scalar type used throughout the numerical core
pub type Float = f64;

/// Vocabulary and hidden-state sizes, fixed for a training run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sizes {
    /// Length of a one-hot input vector
    pub vocab_size: usize,

    /// Length of the hidden state
    pub hidden_size: usize,
}

impl Sizes {
    /// Create sizes; both dimensions must be positive
    pub fn new(vocab_size: usize, hidden_size: usize) -> Self {
        assert!(
            vocab_size > 0 && hidden_size > 0,
            "Sizes must be positive, got vocab_size={vocab_size}, hidden_size={hidden_size}"
        );
        Self {
            vocab_size,
            hidden_size,
        }
    }

    /// Length of the concatenated `[x; h]` input seen by `W`
    pub fn input_size(&self) -> usize {
        self.vocab_size + self.hidden_size
    }

    /// Expected shape of a parameter tensor
    pub fn shape(&self, kind: ParamKind) -> Vec<usize> {
        match kind {
            ParamKind::W => vec![self.hidden_size, self.input_size()],
            ParamKind::Why => vec![self.vocab_size, self.hidden_size],
            ParamKind::Bh => vec![self.hidden_size],
            ParamKind::By => vec![self.vocab_size],
        }
    }

    /// Number of scalar entries in a parameter tensor
    pub fn numel(&self, kind: ParamKind) -> usize {
        self.shape(kind).iter().product()
    }

    /// Total number of learnable scalars
    pub fn param_count(&self) -> usize {
        ParamKind::ALL.iter().map(|&kind| self.numel(kind)).sum()
    }
}
