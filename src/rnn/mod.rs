//! Single-layer recurrent network: forward unrolling and BPTT
//!
//! One training step over a sequence of length `T + 1`:
//!
//! ```text
//! h[t+1]   = tanh(W · [x_t; h_t] + bh)
//! probs[t] = softmax(Why · h[t+1] + by)
//! loss[t]  = -log(probs[t][target])
//! ```
//!
//! [`forward`] records the hidden, probability and loss traces; [`backward`]
//! walks them in reverse and sums the per-step gradients of the shared weights.

mod backward;
mod forward;
mod ops;

#[cfg(test)]
mod property_tests;

pub use backward::backward;
pub use forward::{forward, sequence_loss, ForwardTrace, HiddenTrace, LossTrace, ProbsTrace};
pub use ops::{concat_input, cross_entropy, softmax};

use crate::data::Sequence;
use crate::model::{GradientBundle, Sizes, WeightBundle};

/// Forward then backward over one sequence
pub fn loss_and_gradients(
    sequence: &Sequence,
    sizes: Sizes,
    weights: &WeightBundle,
) -> (ForwardTrace, GradientBundle) {
    let trace = forward(sequence, sizes, weights);
    let grads = backward(&trace.probs, &trace.hs, sequence, sizes, weights);
    (trace, grads)
}
