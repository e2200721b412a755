//! Finite-difference gradient checking
//!
//! The gradient for every scalar entry of every weight tensor is estimated with a
//! central difference on the summed sequence loss:
//!
//! ```text
//! f'(w) ≈ (f(w + h) - f(w - h)) / (2h)
//! ```
//!
//! Each entry is perturbed on its own copy of the weights. The cost is two forward
//! passes per parameter, so this is a testing tool only.

mod report;

pub use report::{ErrorReport, TensorComparison};

use crate::data::Sequence;
use crate::model::{Float, GradientBundle, ParamKind, Sizes, WeightBundle};
use crate::rnn::{loss_and_gradients, sequence_loss};
use ndarray::ArrayD;

/// Default finite-difference step
pub const DEFAULT_STEP: Float = 1e-5;

/// Compares analytic BPTT gradients with numerical estimates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientChecker {
    step: Float,
}

impl Default for GradientChecker {
    fn default() -> Self {
        Self { step: DEFAULT_STEP }
    }
}

impl GradientChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom finite-difference step
    ///
    /// # Panics
    ///
    /// If `step` is not positive and finite.
    pub fn with_step(step: Float) -> Self {
        assert!(
            step.is_finite() && step > 0.0,
            "finite-difference step must be positive, got {step}"
        );
        Self { step }
    }

    pub fn step(&self) -> Float {
        self.step
    }

    /// Mean signed difference between analytic and numerical gradients, per tensor
    pub fn check(&self, sequence: &Sequence, sizes: Sizes, weights: &WeightBundle) -> ErrorReport {
        let (analytic, numerical) = self.gradients(sequence, sizes, weights);
        let report = ErrorReport::from_fn(|kind| {
            mean_signed_error(
                analytic.tensor(kind).iter().copied(),
                numerical.tensor(kind).iter().copied(),
            )
        });
        tracing::debug!(
            w = report.w,
            why = report.why,
            bh = report.bh,
            by = report.by,
            "gradient check"
        );
        report
    }

    /// Per-entry comparison: mean signed, max absolute and max relative error
    pub fn compare(
        &self,
        sequence: &Sequence,
        sizes: Sizes,
        weights: &WeightBundle,
    ) -> Vec<TensorComparison> {
        let (analytic, numerical) = self.gradients(sequence, sizes, weights);
        ParamKind::ALL
            .iter()
            .map(|&kind| {
                TensorComparison::between(
                    kind,
                    analytic.tensor(kind).iter().copied(),
                    numerical.tensor(kind).iter().copied(),
                )
            })
            .collect()
    }

    /// Analytic and numerical gradients for the same weights
    pub fn gradients(
        &self,
        sequence: &Sequence,
        sizes: Sizes,
        weights: &WeightBundle,
    ) -> (GradientBundle, GradientBundle) {
        let (_, analytic) = loss_and_gradients(sequence, sizes, weights);
        let numerical = self.numerical_gradients(sequence, sizes, weights);
        (analytic, numerical)
    }

    /// Numerical gradients for all four tensors
    pub fn numerical_gradients(
        &self,
        sequence: &Sequence,
        sizes: Sizes,
        weights: &WeightBundle,
    ) -> GradientBundle {
        weights.assert_shapes(sizes);
        let mut numerical = GradientBundle::zeros(sizes);
        for kind in ParamKind::ALL {
            let mut tensor = numerical.tensor_mut(kind);
            for (index, grad) in tensor.iter_mut().enumerate() {
                *grad = self.entry_gradient(sequence, sizes, weights, kind, index);
            }
        }
        numerical
    }

    /// Numerical gradient tensor for one parameter family
    pub fn numerical_gradient(
        &self,
        sequence: &Sequence,
        sizes: Sizes,
        weights: &WeightBundle,
        kind: ParamKind,
    ) -> ArrayD<Float> {
        weights.assert_shapes(sizes);
        let mut grad = weights.tensor(kind).to_owned();
        for (index, g) in grad.iter_mut().enumerate() {
            *g = self.entry_gradient(sequence, sizes, weights, kind, index);
        }
        grad
    }

    /// Central difference for the `index`-th entry (row-major) of `kind`
    ///
    /// # Panics
    ///
    /// If `index` is not below the tensor's element count.
    fn entry_gradient(
        &self,
        sequence: &Sequence,
        sizes: Sizes,
        weights: &WeightBundle,
        kind: ParamKind,
        index: usize,
    ) -> Float {
        let mut trial = weights.clone();
        let original = *entry_mut(&mut trial, kind, index);

        *entry_mut(&mut trial, kind, index) = original + self.step;
        let f_plus = sequence_loss(sequence, sizes, &trial);
        *entry_mut(&mut trial, kind, index) = original - self.step;
        let f_minus = sequence_loss(sequence, sizes, &trial);

        (f_plus - f_minus) / (2.0 * self.step)
    }
}

/// Row-major entry `index` of one weight tensor
fn entry_mut(weights: &mut WeightBundle, kind: ParamKind, index: usize) -> &mut Float {
    let numel = weights.tensor(kind).len();
    weights
        .tensor_mut(kind)
        .into_iter()
        .nth(index)
        .unwrap_or_else(|| panic!("entry {index} out of range for {kind} with {numel} entries"))
}

fn mean_signed_error<A, N>(analytic: A, numerical: N) -> Float
where
    A: IntoIterator<Item = Float>,
    N: IntoIterator<Item = Float>,
{
    let (sum, count) = analytic
        .into_iter()
        .zip(numerical)
        .fold((0.0, 0usize), |(sum, count), (a, n)| (sum + (a - n), count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as Float
    }
}

/// Gradient check with the default step
///
/// # Example
///
/// ```
/// use charnn::data::Sequence;
/// use charnn::gradcheck::check;
/// use charnn::model::{Sizes, WeightBundle};
///
/// let sizes = Sizes::new(3, 2);
/// let weights = WeightBundle::random(sizes, 1);
/// let seq = Sequence::from_indices(&[0, 1, 2], 3)?;
///
/// let report = check(&seq, sizes, &weights);
/// assert!(report.max_abs() < 1e-4);
/// # Ok::<(), charnn::Error>(())
/// ```
pub fn check(sequence: &Sequence, sizes: Sizes, weights: &WeightBundle) -> ErrorReport {
    GradientChecker::default().check(sequence, sizes, weights)
}

/// Numerical gradient tensor for one parameter family with step `h`
pub fn numerical_gradient(
    sequence: &Sequence,
    sizes: Sizes,
    weights: &WeightBundle,
    kind: ParamKind,
    h: Float,
) -> ArrayD<Float> {
    GradientChecker::with_step(h).numerical_gradient(sequence, sizes, weights, kind)
}
