//! One-hot encoded sequences

use crate::error::{Error, Result};
use crate::model::Float;
use ndarray::Array1;
use std::ops::Index;

/// An ordered list of one-hot vectors of length `vocab_size`
///
/// A sequence of length `T + 1` drives `T` recurrence steps; the final
/// element only serves as the last prediction target. Sequences are never
/// empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    steps: Vec<Array1<Float>>,
    vocab_size: usize,
}

impl Sequence {
    /// Wrap pre-encoded vectors, checking they share one length
    pub fn from_one_hot(steps: Vec<Array1<Float>>) -> Result<Self> {
        let vocab_size = match steps.first() {
            Some(first) => first.len(),
            None => return Err(Error::EmptySequence("no vectors to wrap".to_string())),
        };
        if vocab_size == 0 {
            return Err(Error::InvalidParameter(
                "sequence vectors must be non-empty".to_string(),
            ));
        }
        if let Some(bad) = steps.iter().find(|s| s.len() != vocab_size) {
            return Err(Error::ShapeMismatch {
                tensor: "sequence",
                expected: vec![vocab_size],
                got: vec![bad.len()],
            });
        }
        Ok(Self { steps, vocab_size })
    }

    /// Encode symbol indices as one-hot vectors
    pub fn from_indices(indices: &[usize], vocab_size: usize) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::EmptySequence("no indices to encode".to_string()));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= vocab_size) {
            return Err(Error::InvalidParameter(format!(
                "index {bad} out of range for vocabulary of size {vocab_size}"
            )));
        }
        let steps = indices
            .iter()
            .map(|&i| Self::one_hot(i, vocab_size))
            .collect();
        Ok(Self { steps, vocab_size })
    }

    /// A single one-hot vector
    pub fn one_hot(index: usize, vocab_size: usize) -> Array1<Float> {
        let mut v = Array1::zeros(vocab_size);
        v[index] = 1.0;
        v
    }

    /// Number of vectors (`T + 1`)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Never true for a constructed sequence
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of recurrence steps `T`
    pub fn transitions(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    pub fn steps(&self) -> &[Array1<Float>] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Array1<Float>> {
        self.steps.iter()
    }

    /// Index of the hot entry at step `t`, if the vector is one-hot
    pub fn hot_index(&self, t: usize) -> Option<usize> {
        let v = self.steps.get(t)?;
        let mut ones = v.iter().enumerate().filter(|&(_, &x)| x != 0.0);
        match (ones.next(), ones.next()) {
            (Some((i, &x)), None) if x == 1.0 => Some(i),
            _ => None,
        }
    }
}

impl Index<usize> for Sequence {
    type Output = Array1<Float>;

    fn index(&self, t: usize) -> &Self::Output {
        &self.steps[t]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Array1<Float>;
    type IntoIter = std::slice::Iter<'a, Array1<Float>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
