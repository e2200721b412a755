//! Stochastic Gradient Descent optimizer

use super::Optimizer;
use crate::model::{Float, GradientBundle, WeightBundle};

/// Plain SGD: `w' = w - lr * g`, no momentum, clipping or regularization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SGD {
    lr: Float,
}

impl SGD {
    /// Create a new SGD optimizer
    ///
    /// # Panics
    ///
    /// If `lr` is negative or not finite.
    pub fn new(lr: Float) -> Self {
        assert_valid_lr(lr);
        Self { lr }
    }
}

impl Optimizer for SGD {
    fn update(&self, weights: &WeightBundle, gradients: &GradientBundle) -> WeightBundle {
        update(weights, gradients, self.lr)
    }

    fn lr(&self) -> Float {
        self.lr
    }

    fn set_lr(&mut self, lr: Float) {
        assert_valid_lr(lr);
        self.lr = lr;
    }
}

fn assert_valid_lr(lr: Float) {
    assert!(
        lr.is_finite() && lr >= 0.0,
        "learning rate must be finite and non-negative, got {lr}"
    );
}

/// Gradient descent step returning a new bundle
///
/// # Panics
///
/// If any gradient tensor's shape differs from its weight tensor, or `lr`
/// is negative or not finite.
///
/// # Example
///
/// ```
/// use charnn::model::{GradientBundle, Sizes, WeightBundle};
/// use charnn::optim::update;
///
/// let sizes = Sizes::new(3, 2);
/// let weights = WeightBundle::random(sizes, 0);
/// let zero = GradientBundle::zeros(sizes);
/// assert_eq!(update(&weights, &zero, 0.1), weights);
/// ```
pub fn update(weights: &WeightBundle, gradients: &GradientBundle, lr: Float) -> WeightBundle {
    assert_valid_lr(lr);
    let sizes = weights.sizes();
    weights.assert_shapes(sizes);
    gradients.assert_shapes(sizes);

    WeightBundle {
        w: &weights.w - &(&gradients.dw * lr),
        why: &weights.why - &(&gradients.dwhy * lr),
        bh: &weights.bh - &(&gradients.dbh * lr),
        by: &weights.by - &(&gradients.dby * lr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sizes;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_sgd_step() {
        let sizes = Sizes::new(2, 1);
        let weights = WeightBundle::zeros(sizes);
        let mut grads = GradientBundle::zeros(sizes);
        grads.dw.fill(1.0);
        grads.dby[1] = -2.0;

        let updated = SGD::new(0.1).update(&weights, &grads);
        for &v in updated.w.iter() {
            assert_abs_diff_eq!(v, -0.1, epsilon = 1e-15);
        }
        assert_abs_diff_eq!(updated.by[1], 0.2, epsilon = 1e-15);
        assert_eq!(updated.by[0], 0.0);
        assert_eq!(updated.why, weights.why);
    }

    #[test]
    fn test_update_does_not_mutate_input() {
        let sizes = Sizes::new(3, 2);
        let weights = WeightBundle::random(sizes, 4);
        let before = weights.clone();
        let mut grads = GradientBundle::zeros(sizes);
        grads.dwhy.fill(0.5);

        let updated = update(&weights, &grads, 0.01);
        assert_eq!(weights, before);
        assert_ne!(updated, weights);
    }

    #[test]
    fn test_set_lr() {
        let mut opt = SGD::new(0.01);
        opt.set_lr(0.5);
        assert_eq!(opt.lr(), 0.5);
    }

    #[test]
    #[should_panic(expected = "learning rate must be finite and non-negative")]
    fn test_negative_lr_panics() {
        SGD::new(-0.1);
    }

    #[test]
    #[should_panic(expected = "gradients do not match sizes")]
    fn test_mismatched_gradients_panic() {
        let weights = WeightBundle::zeros(Sizes::new(3, 2));
        let grads = GradientBundle::zeros(Sizes::new(3, 3));
        update(&weights, &grads, 0.1);
    }

    proptest! {
        #[test]
        fn prop_zero_gradient_is_identity(
            vocab in 1usize..6,
            hidden in 1usize..6,
            seed in any::<u64>(),
            lr in 0.0f64..10.0,
        ) {
            let sizes = Sizes::new(vocab, hidden);
            let weights = WeightBundle::random(sizes, seed);
            let zero = GradientBundle::zeros(sizes);
            prop_assert_eq!(update(&weights, &zero, lr), weights);
        }
    }
}
