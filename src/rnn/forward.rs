//! Forward unrolling of the recurrence

use super::ops::{concat_input, cross_entropy, softmax};
use crate::data::Sequence;
use crate::model::{Float, Sizes, WeightBundle};
use ndarray::Array1;

/// Hidden states `h[0..=T]`, with `h[0]` the zero vector
pub type HiddenTrace = Vec<Array1<Float>>;

/// Softmax outputs, one per step
pub type ProbsTrace = Vec<Array1<Float>>;

/// Cross-entropy loss, one per step
pub type LossTrace = Vec<Float>;

/// Everything the backward pass needs from the forward pass
///
/// `probs[t]` and `loss[t]` are the prediction made after consuming
/// `sequence[t]` and scored against `sequence[t + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTrace {
    /// Hidden states, length `T + 1`
    pub hs: HiddenTrace,
    /// Next-symbol distributions, length `T`
    pub probs: ProbsTrace,
    /// Per-step losses, length `T`
    pub loss: LossTrace,
}

impl ForwardTrace {
    /// Number of recurrence steps `T`
    pub fn steps(&self) -> usize {
        self.loss.len()
    }

    /// Sum of per-step losses (the quantity differentiated by BPTT)
    pub fn total_loss(&self) -> Float {
        self.loss.iter().sum()
    }

    /// Mean per-step loss, `None` when `T = 0`
    pub fn mean_loss(&self) -> Option<Float> {
        if self.loss.is_empty() {
            None
        } else {
            Some(self.total_loss() / self.loss.len() as Float)
        }
    }

    /// Final hidden state
    pub fn last_hidden(&self) -> &Array1<Float> {
        &self.hs[self.hs.len() - 1]
    }
}

/// Unroll `sequence` through the network
///
/// # Panics
///
/// If any weight tensor or the sequence's vector length disagrees with `sizes`.
///
/// # Example
///
/// ```
/// use charnn::data::Sequence;
/// use charnn::model::{Sizes, WeightBundle};
/// use charnn::rnn::forward;
///
/// let sizes = Sizes::new(3, 2);
/// let weights = WeightBundle::random(sizes, 0);
/// let seq = Sequence::from_indices(&[0, 1, 2], 3)?;
///
/// let trace = forward(&seq, sizes, &weights);
/// assert_eq!(trace.hs.len(), 3);
/// assert_eq!(trace.loss.len(), 2);
/// # Ok::<(), charnn::Error>(())
/// ```
pub fn forward(sequence: &Sequence, sizes: Sizes, weights: &WeightBundle) -> ForwardTrace {
    weights.assert_shapes(sizes);
    assert_eq!(
        sequence.vocab_size(),
        sizes.vocab_size,
        "forward: sequence vectors have length {} but vocab_size is {}",
        sequence.vocab_size(),
        sizes.vocab_size
    );

    let steps = sequence.transitions();
    let mut hs = Vec::with_capacity(steps + 1);
    let mut probs = Vec::with_capacity(steps);
    let mut loss = Vec::with_capacity(steps);
    hs.push(Array1::zeros(sizes.hidden_size));

    for t in 0..steps {
        let (h, p, l) = step_forward(&sequence[t], &hs[t], &sequence[t + 1], weights);
        hs.push(h);
        probs.push(p);
        loss.push(l);
    }

    ForwardTrace { hs, probs, loss }
}

/// One recurrence step: returns `(h_next, probs, loss)`
fn step_forward(
    x: &Array1<Float>,
    h_prev: &Array1<Float>,
    target: &Array1<Float>,
    weights: &WeightBundle,
) -> (Array1<Float>, Array1<Float>, Float) {
    let xh = concat_input(x, h_prev);
    let h = (weights.w.dot(&xh) + &weights.bh).mapv(Float::tanh);
    let scores = weights.why.dot(&h) + &weights.by;
    let probs = softmax(&scores);
    let loss = cross_entropy(&probs, target);
    (h, probs, loss)
}

/// Summed loss over the whole sequence
pub fn sequence_loss(sequence: &Sequence, sizes: Sizes, weights: &WeightBundle) -> Float {
    forward(sequence, sizes, weights).total_loss()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    fn fixture() -> (Sizes, WeightBundle, Sequence) {
        let sizes = Sizes::new(4, 3);
        let weights = WeightBundle::random(sizes, 42);
        let seq = Sequence::from_indices(&[0, 1, 2, 3], 4).unwrap();
        (sizes, weights, seq)
    }

    #[test]
    fn test_forward_trace_lengths() {
        let (sizes, weights, seq) = fixture();
        let trace = forward(&seq, sizes, &weights);

        assert_eq!(trace.hs.len(), seq.len());
        assert_eq!(trace.probs.len(), seq.len() - 1);
        assert_eq!(trace.loss.len(), seq.len() - 1);
        assert_eq!(trace.steps(), 3);
        for h in &trace.hs {
            assert_eq!(h.len(), sizes.hidden_size);
        }
        for p in &trace.probs {
            assert_eq!(p.len(), sizes.vocab_size);
        }
    }

    #[test]
    fn test_initial_hidden_is_zero() {
        let (sizes, weights, seq) = fixture();
        let trace = forward(&seq, sizes, &weights);
        assert!(trace.hs[0].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_probs_are_distributions() {
        let (sizes, weights, seq) = fixture();
        let trace = forward(&seq, sizes, &weights);
        for p in &trace.probs {
            assert_abs_diff_eq!(p.sum(), 1.0, epsilon = 1e-9);
            assert!(p.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn test_loss_is_negative_log_of_target_prob() {
        let (sizes, weights, seq) = fixture();
        let trace = forward(&seq, sizes, &weights);
        for t in 0..trace.steps() {
            let target = seq.hot_index(t + 1).unwrap();
            assert_abs_diff_eq!(trace.loss[t], -trace.probs[t][target].ln(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_small_weights_give_near_uniform_loss() {
        let (sizes, weights, seq) = fixture();
        let trace = forward(&seq, sizes, &weights);
        let uniform = (sizes.vocab_size as Float).ln();
        assert_abs_diff_eq!(trace.mean_loss().unwrap(), uniform, epsilon = 1e-2);
    }

    #[test]
    fn test_single_element_sequence() {
        let sizes = Sizes::new(3, 2);
        let weights = WeightBundle::random(sizes, 1);
        let seq = Sequence::from_indices(&[2], 3).unwrap();

        let trace = forward(&seq, sizes, &weights);
        assert_eq!(trace.hs.len(), 1);
        assert!(trace.probs.is_empty());
        assert!(trace.loss.is_empty());
        assert_eq!(trace.total_loss(), 0.0);
        assert_eq!(trace.mean_loss(), None);
    }

    #[test]
    fn test_forward_deterministic() {
        let (sizes, weights, seq) = fixture();
        let a = forward(&seq, sizes, &weights);
        let b = forward(&seq, sizes, &weights);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hidden_state_uses_bias() {
        let sizes = Sizes::new(2, 2);
        let mut weights = WeightBundle::zeros(sizes);
        weights.bh.fill(0.5);
        let seq = Sequence::from_indices(&[0, 1], 2).unwrap();

        let trace = forward(&seq, sizes, &weights);
        for &v in trace.hs[1].iter() {
            assert_abs_diff_eq!(v, 0.5_f64.tanh(), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_recurrent_weights_carry_state() {
        let sizes = Sizes::new(2, 1);
        let mut weights = WeightBundle::zeros(sizes);
        // h1 = tanh(1.0 * x0[0]), h2 = tanh(2.0 * h1)
        weights.w = Array2::from_shape_vec((1, 3), vec![1.0, 0.0, 2.0]).unwrap();
        let seq = Sequence::from_indices(&[0, 1, 0], 2).unwrap();

        let trace = forward(&seq, sizes, &weights);
        let h1 = 1.0_f64.tanh();
        assert_abs_diff_eq!(trace.hs[1][0], h1, epsilon = 1e-15);
        assert_abs_diff_eq!(trace.hs[2][0], (2.0 * h1).tanh(), epsilon = 1e-15);
    }

    #[test]
    #[should_panic(expected = "weights do not match sizes")]
    fn test_forward_rejects_mismatched_weights() {
        let weights = WeightBundle::zeros(Sizes::new(3, 2));
        let seq = Sequence::from_indices(&[0, 1], 3).unwrap();
        forward(&seq, Sizes::new(3, 4), &weights);
    }

    #[test]
    #[should_panic(expected = "forward: sequence vectors have length")]
    fn test_forward_rejects_mismatched_sequence() {
        let sizes = Sizes::new(3, 2);
        let weights = WeightBundle::zeros(sizes);
        let seq = Sequence::from_indices(&[0, 1], 4).unwrap();
        forward(&seq, sizes, &weights);
    }
}
