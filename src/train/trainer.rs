//! Trainer abstraction for training loops

use super::{TrainConfig, TrainState};
use crate::data::Sequence;
use crate::error::{Error, Result};
use crate::model::{Float, Sizes, WeightBundle};
use crate::optim::Optimizer;
use crate::rnn::loss_and_gradients;
use serde::Serialize;
use std::time::Instant;

/// Outcome of one sequence's forward/backward/update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    /// Recurrence steps `T` in the sequence
    pub transitions: usize,
    /// Summed loss over the sequence
    pub total_loss: Float,
    /// Mean per-step loss, `None` when `T = 0`
    pub mean_loss: Option<Float>,
    /// L2 norm of the whole-sequence gradient
    pub grad_norm: Float,
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainResult {
    /// Epochs completed
    pub epochs: usize,
    /// Sequences processed in total
    pub steps: usize,
    /// Mean loss per epoch
    pub epoch_losses: Vec<Float>,
    /// Loss of the last epoch
    pub final_loss: Option<Float>,
    /// Lowest epoch loss
    pub best_loss: Option<Float>,
    /// Total training time in seconds
    pub elapsed_secs: f64,
}

/// Runs forward, backward and update over sequences, one at a time
pub struct Trainer {
    sizes: Sizes,
    optimizer: Box<dyn Optimizer>,
    config: TrainConfig,
    state: TrainState,
}

impl Trainer {
    /// Create a new trainer; the weights must match `sizes`
    pub fn new(
        sizes: Sizes,
        weights: WeightBundle,
        optimizer: Box<dyn Optimizer>,
        config: TrainConfig,
    ) -> Result<Self> {
        weights.check_shapes(sizes)?;
        Ok(Self {
            sizes,
            optimizer,
            config,
            state: TrainState::new(weights),
        })
    }

    pub fn sizes(&self) -> Sizes {
        self.sizes
    }

    pub fn weights(&self) -> &WeightBundle {
        &self.state.weights
    }

    pub fn state(&self) -> &TrainState {
        &self.state
    }

    pub fn into_state(self) -> TrainState {
        self.state
    }

    /// Get current learning rate
    pub fn lr(&self) -> Float {
        self.optimizer.lr()
    }

    /// Set learning rate
    pub fn set_lr(&mut self, lr: Float) {
        self.optimizer.set_lr(lr);
    }

    /// Train on one sequence
    pub fn train_step(&mut self, sequence: &Sequence) -> Result<StepOutput> {
        if sequence.vocab_size() != self.sizes.vocab_size {
            return Err(Error::ShapeMismatch {
                tensor: "sequence",
                expected: vec![self.sizes.vocab_size],
                got: vec![sequence.vocab_size()],
            });
        }

        let (trace, grads) = loss_and_gradients(sequence, self.sizes, &self.state.weights);
        self.state.weights = self.optimizer.update(&self.state.weights, &grads);

        let output = StepOutput {
            transitions: trace.steps(),
            total_loss: trace.total_loss(),
            mean_loss: trace.mean_loss(),
            grad_norm: grads.norm(),
        };
        self.state.record(trace, self.config.keep_probs);

        if !output.total_loss.is_finite() {
            tracing::warn!(step = self.state.steps, loss = output.total_loss, "non-finite loss");
        } else if self.state.steps % self.config.log_interval.max(1) == 0 {
            tracing::debug!(
                step = self.state.steps,
                loss = output.mean_loss.unwrap_or(0.0),
                grad_norm = output.grad_norm,
                "train step"
            );
        }

        Ok(output)
    }

    /// Train on every sequence once, in order
    ///
    /// Returns the mean of the per-sequence mean losses, ignoring
    /// single-element sequences; `None` if no sequence had a step.
    pub fn train_epoch(&mut self, sequences: &[Sequence]) -> Result<Option<Float>> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for sequence in sequences {
            if let Some(loss) = self.train_step(sequence)?.mean_loss {
                sum += loss;
                count += 1;
            }
        }
        Ok(if count == 0 {
            None
        } else {
            Some(sum / count as Float)
        })
    }

    /// Run `epochs` passes over `sequences`
    pub fn train(&mut self, sequences: &[Sequence], epochs: usize) -> Result<TrainResult> {
        let start = Instant::now();
        let mut epoch_losses = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            if let Some(loss) = self.train_epoch(sequences)? {
                tracing::info!(epoch = epoch + 1, epochs, loss, "epoch complete");
                epoch_losses.push(loss);
            }
        }

        let best_loss = epoch_losses
            .iter()
            .copied()
            .filter(|l| l.is_finite())
            .reduce(Float::min);

        Ok(TrainResult {
            epochs,
            steps: self.state.steps,
            final_loss: epoch_losses.last().copied(),
            best_loss,
            epoch_losses,
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }
}
