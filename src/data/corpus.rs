//! Corpus loading

use super::{Sequence, Vocabulary};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Split text into sequences terminated by `eos`
///
/// Empty pieces are dropped and every kept piece gets `eos` re-appended,
/// so `"ab\n\ncd"` yields `["ab\n", "cd\n"]`.
pub fn split_sequences(text: &str, eos: char) -> Vec<Vec<char>> {
    text.split(eos)
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.chars().chain(std::iter::once(eos)).collect())
        .collect()
}

/// Encoded training text
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Vocabulary built over all sequences
    pub vocabulary: Vocabulary,

    /// One-hot encoded sequences, in file order
    pub sequences: Vec<Sequence>,

    /// Raw character sequences, aligned with `sequences`
    pub raw: Vec<Vec<char>>,
}

impl Corpus {
    /// Split, index and encode `text`
    pub fn from_text(text: &str, eos: char) -> Result<Self> {
        let raw = split_sequences(text, eos);
        if raw.is_empty() {
            return Err(Error::EmptySequence(
                "corpus contains no sequences".to_string(),
            ));
        }
        let vocabulary = Vocabulary::from_sequences(&raw);
        let sequences = raw
            .iter()
            .map(|chars| vocabulary.encode(chars))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            sequences = sequences.len(),
            vocab_size = vocabulary.len(),
            "encoded corpus"
        );

        Ok(Self {
            vocabulary,
            sequences,
            raw,
        })
    }

    /// Read a UTF-8 text file and encode it
    pub fn load<P: AsRef<Path>>(path: P, eos: char) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_text(&text, eos)
    }

    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
