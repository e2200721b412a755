//! Optimizer trait

use crate::model::{Float, GradientBundle, WeightBundle};

/// Trait for optimization algorithms
///
/// Updates are pure: the current weights are read, never mutated, and a new
/// bundle is returned for the caller to swap in.
pub trait Optimizer {
    /// Produce updated weights from the current weights and their gradients
    fn update(&self, weights: &WeightBundle, gradients: &GradientBundle) -> WeightBundle;

    /// Get learning rate
    fn lr(&self) -> Float;

    /// Set learning rate
    fn set_lr(&mut self, lr: Float);
}
