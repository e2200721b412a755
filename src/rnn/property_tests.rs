//! Property tests for the forward/backward passes

#[cfg(test)]
mod tests {
    use crate::rnn::{forward, loss_and_gradients, softmax};
    use crate::data::Sequence;
    use crate::model::{Float, Sizes, WeightBundle};
    use ndarray::Array1;
    use proptest::prelude::*;

    fn arb_case() -> impl Strategy<Value = (Sizes, WeightBundle, Sequence)> {
        (1usize..6, 1usize..6, any::<u64>()).prop_flat_map(|(vocab, hidden, seed)| {
            proptest::collection::vec(0..vocab, 1..8).prop_map(move |indices| {
                let sizes = Sizes::new(vocab, hidden);
                let weights = WeightBundle::random(sizes, seed);
                let seq = Sequence::from_indices(&indices, vocab).unwrap();
                (sizes, weights, seq)
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_trace_lengths((sizes, weights, seq) in arb_case()) {
            let trace = forward(&seq, sizes, &weights);
            prop_assert_eq!(trace.hs.len(), seq.len());
            prop_assert_eq!(trace.probs.len(), seq.len() - 1);
            prop_assert_eq!(trace.loss.len(), seq.len() - 1);
        }

        #[test]
        fn prop_probs_are_valid((sizes, weights, seq) in arb_case()) {
            let trace = forward(&seq, sizes, &weights);
            for p in &trace.probs {
                prop_assert!((p.sum() - 1.0).abs() < 1e-6);
                prop_assert!(p.iter().all(|&v| (0.0..=1.0).contains(&v)));
            }
            prop_assert!(trace.loss.iter().all(|&l| l.is_finite() && l >= 0.0));
        }

        #[test]
        fn prop_gradient_shapes((sizes, weights, seq) in arb_case()) {
            let (_, grads) = loss_and_gradients(&seq, sizes, &weights);
            prop_assert!(grads.check_shapes(sizes).is_ok());
            if seq.len() == 1 {
                prop_assert!(grads.is_zero());
            }
        }

        #[test]
        fn prop_deterministic((sizes, weights, seq) in arb_case()) {
            let (ta, ga) = loss_and_gradients(&seq, sizes, &weights);
            let (tb, gb) = loss_and_gradients(&seq, sizes, &weights);
            prop_assert_eq!(ta, tb);
            prop_assert_eq!(ga, gb);
        }

        #[test]
        fn prop_softmax_sums_to_one(scores in proptest::collection::vec(-20.0f64..20.0, 1..16)) {
            let p = softmax(&Array1::from(scores));
            prop_assert!((p.sum() - 1.0).abs() < 1e-9);
            prop_assert!(p.iter().all(|&v: &Float| (0.0..=1.0).contains(&v)));
        }
    }
}
