//! Vector primitives used by the recurrence

use crate::model::Float;
use ndarray::{s, Array1};

/// `exp(scores) / sum(exp(scores))`
///
/// No max-subtraction is applied, so very large scores overflow to
/// `inf`/`NaN` rather than being rescaled.
pub fn softmax(scores: &Array1<Float>) -> Array1<Float> {
    let exp = scores.mapv(Float::exp);
    let sum = exp.sum();
    exp / sum
}

/// `-sum(target ⊙ log(probs))`
pub fn cross_entropy(probs: &Array1<Float>, target: &Array1<Float>) -> Float {
    -(target * &probs.mapv(Float::ln)).sum()
}

/// Stack `x` on top of `h` into one column vector
pub fn concat_input(x: &Array1<Float>, h: &Array1<Float>) -> Array1<Float> {
    let split = x.len();
    let mut xh = Array1::zeros(split + h.len());
    xh.slice_mut(s![..split]).assign(x);
    xh.slice_mut(s![split..]).assign(h);
    xh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn test_softmax_uniform() {
        let p = softmax(&arr1(&[0.3, 0.3, 0.3, 0.3]));
        for &v in p.iter() {
            assert_abs_diff_eq!(v, 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_softmax_known_values() {
        let p = softmax(&arr1(&[0.0, 1.0_f64.ln()]));
        assert_abs_diff_eq!(p[0], 0.5, epsilon = 1e-12);

        let p = softmax(&arr1(&[2.0_f64.ln(), 0.0]));
        assert_abs_diff_eq!(p[0], 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_softmax_overflows_without_shift() {
        let p = softmax(&arr1(&[1000.0, 0.0]));
        assert!(p[0].is_nan());
    }

    #[test]
    fn test_cross_entropy_picks_target() {
        let probs = arr1(&[0.2, 0.5, 0.3]);
        let target = arr1(&[0.0, 1.0, 0.0]);
        assert_abs_diff_eq!(cross_entropy(&probs, &target), -(0.5_f64.ln()), epsilon = 1e-12);
    }

    #[test]
    fn test_concat_input() {
        let xh = concat_input(&arr1(&[1.0, 0.0]), &arr1(&[0.5, -0.5, 0.25]));
        assert_eq!(xh, arr1(&[1.0, 0.0, 0.5, -0.5, 0.25]));
    }
}
