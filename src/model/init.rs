//! Weight initialization

use super::{Float, Sizes, WeightBundle};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Scale applied to randomly initialised weight matrices
pub const WEIGHT_SCALE: Float = 0.01;

/// Fill mode for one family of tensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Init {
    /// Uniform samples in `[0, 1)`, scaled by [`WEIGHT_SCALE`] for matrices
    #[default]
    Random,
    /// All zeros
    Zeros,
}

impl Init {
    fn matrix(self, rows: usize, cols: usize, rng: &mut StdRng) -> Array2<Float> {
        match self {
            Init::Random => {
                Array2::from_shape_simple_fn((rows, cols), || rng.random::<Float>() * WEIGHT_SCALE)
            }
            Init::Zeros => Array2::zeros((rows, cols)),
        }
    }

    fn vector(self, len: usize, rng: &mut StdRng) -> Array1<Float> {
        match self {
            Init::Random => Array1::from_shape_simple_fn(len, || rng.random::<Float>()),
            Init::Zeros => Array1::zeros(len),
        }
    }
}

impl WeightBundle {
    /// Initialise weights and biases with the given modes from a seeded RNG
    ///
    /// The same `(sizes, weights, biases, seed)` always yields the same bundle.
    ///
    /// # Example
    ///
    /// ```
    /// use charnn::model::{Init, Sizes, WeightBundle};
    ///
    /// let sizes = Sizes::new(4, 3);
    /// let weights = WeightBundle::init(sizes, Init::Random, Init::Zeros, 42);
    /// assert!(weights.check_shapes(sizes).is_ok());
    /// assert!(weights.bh.iter().all(|&b| b == 0.0));
    /// ```
    pub fn init(sizes: Sizes, weights: Init, biases: Init, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let w = weights.matrix(sizes.hidden_size, sizes.input_size(), &mut rng);
        let why = weights.matrix(sizes.vocab_size, sizes.hidden_size, &mut rng);
        let bh = biases.vector(sizes.hidden_size, &mut rng);
        let by = biases.vector(sizes.vocab_size, &mut rng);
        Self { w, why, bh, by }
    }

    /// Small random weights with zero biases, the usual starting point
    pub fn random(sizes: Sizes, seed: u64) -> Self {
        Self::init(sizes, Init::Random, Init::Zeros, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_seeded() {
        let sizes = Sizes::new(4, 3);
        let a = WeightBundle::random(sizes, 7);
        let b = WeightBundle::random(sizes, 7);
        let c = WeightBundle::random(sizes, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_weights_are_small() {
        let weights = WeightBundle::random(Sizes::new(6, 5), 1);
        for &v in weights.w.iter().chain(weights.why.iter()) {
            assert!((0.0..WEIGHT_SCALE).contains(&v), "weight {v} out of range");
        }
        assert!(weights.bh.iter().all(|&v| v == 0.0));
        assert!(weights.by.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_zero_init() {
        let sizes = Sizes::new(3, 2);
        let weights = WeightBundle::init(sizes, Init::Zeros, Init::Zeros, 0);
        assert_eq!(weights, WeightBundle::zeros(sizes));
    }

    #[test]
    fn test_random_biases_are_unscaled() {
        let weights = WeightBundle::init(Sizes::new(3, 4), Init::Zeros, Init::Random, 3);
        assert!(weights.bh.iter().all(|&v| (0.0..1.0).contains(&v)));
        assert!(weights.w.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_init_deserialize() {
        let init: Init = serde_yaml::from_str("zeros").unwrap();
        assert_eq!(init, Init::Zeros);
        assert_eq!(Init::default(), Init::Random);
    }
}
