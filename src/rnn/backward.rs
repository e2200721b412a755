//! Backpropagation through time
//!
//! Every weight tensor is shared by all `T` steps, so its gradient is the sum
//! of per-step contributions. The hidden-state gradient flows the other way:
//! step `t` receives `dh_next` from step `t + 1`, which is why the loop runs
//! in reverse.

use super::ops::concat_input;
use crate::data::Sequence;
use crate::model::{Float, GradientBundle, Sizes, WeightBundle};
use ndarray::linalg::general_mat_mul;
use ndarray::{s, Array1, Array2, ArrayView2, Axis};

/// Analytic gradients of the summed sequence loss
///
/// `probs` and `hs` must come from [`forward`](super::forward) over the same
/// `sequence` and `weights`.
///
/// # Panics
///
/// If `probs.len() + 1 != hs.len()`, if the traces disagree with the sequence
/// length, or if any tensor or the sequence's vector length disagrees with
/// `sizes`.
pub fn backward(
    probs: &[Array1<Float>],
    hs: &[Array1<Float>],
    sequence: &Sequence,
    sizes: Sizes,
    weights: &WeightBundle,
) -> GradientBundle {
    weights.assert_shapes(sizes);
    assert_eq!(
        probs.len() + 1,
        hs.len(),
        "backward: probs trace has {} entries but hidden trace has {}",
        probs.len(),
        hs.len()
    );
    assert_eq!(
        hs.len(),
        sequence.len(),
        "backward: hidden trace has {} entries but sequence has {}",
        hs.len(),
        sequence.len()
    );
    assert_eq!(
        sequence.vocab_size(),
        sizes.vocab_size,
        "backward: sequence vectors have length {} but vocab_size is {}",
        sequence.vocab_size(),
        sizes.vocab_size
    );

    let mut grads = GradientBundle::zeros(sizes);
    let mut dh_next = Array1::<Float>::zeros(sizes.hidden_size);

    // Columns of W that receive h[t]
    let w_hh = weights.w.slice(s![.., sizes.vocab_size..]);

    for t in (0..probs.len()).rev() {
        let x = &sequence[t];
        let y = &sequence[t + 1];
        let h = &hs[t + 1];
        let h_prev = &hs[t];

        let dy = &probs[t] - y;
        accumulate_outer(&mut grads.dwhy, &dy, h);
        grads.dby += &dy;

        let dh = weights.why.t().dot(&dy) + &dh_next;
        let dh_raw = dh * &h.mapv(|v| 1.0 - v * v);

        let xh = concat_input(x, h_prev);
        accumulate_outer(&mut grads.dw, &dh_raw, &xh);
        grads.dbh += &dh_raw;

        dh_next = w_hh.t().dot(&dh_raw);
    }

    grads
}

/// `acc += a · bᵀ`
fn accumulate_outer(acc: &mut Array2<Float>, a: &Array1<Float>, b: &Array1<Float>) {
    let col: ArrayView2<'_, Float> = a.view().insert_axis(Axis(1));
    let row: ArrayView2<'_, Float> = b.view().insert_axis(Axis(0));
    general_mat_mul(1.0, &col, &row, 1.0, acc);
}
