//! Accumulated training state

use crate::model::{Float, WeightBundle};
use crate::rnn::{ForwardTrace, ProbsTrace};

/// Everything that carries over from one sequence to the next
#[derive(Debug, Clone, PartialEq)]
pub struct TrainState {
    /// Current weights
    pub weights: WeightBundle,

    /// Mean per-step loss of every sequence with at least one step
    pub loss_history: Vec<Float>,

    /// Probability traces, only filled when requested
    pub probs_history: Vec<ProbsTrace>,

    /// Number of sequences processed
    pub steps: usize,
}

impl TrainState {
    pub fn new(weights: WeightBundle) -> Self {
        Self {
            weights,
            loss_history: Vec::new(),
            probs_history: Vec::new(),
            steps: 0,
        }
    }

    /// Fold one sequence's forward trace into the history
    ///
    /// Returns the sequence's mean loss, `None` for a single-element sequence.
    pub fn record(&mut self, trace: ForwardTrace, keep_probs: bool) -> Option<Float> {
        self.steps += 1;
        let mean = trace.mean_loss();
        if let Some(loss) = mean {
            self.loss_history.push(loss);
        }
        if keep_probs {
            self.probs_history.push(trace.probs);
        }
        mean
    }

    pub fn last_loss(&self) -> Option<Float> {
        self.loss_history.last().copied()
    }
}
