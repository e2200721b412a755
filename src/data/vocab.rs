//! Character vocabulary

use super::Sequence;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Character-to-index table
///
/// Indices are assigned in order of first appearance, so the same text
/// always produces the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    chars: Vec<char>,
    index: HashMap<char, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from character sequences
    pub fn from_sequences<S: AsRef<[char]>>(sequences: &[S]) -> Self {
        let mut vocab = Self {
            chars: Vec::new(),
            index: HashMap::new(),
        };
        for seq in sequences {
            for &ch in seq.as_ref() {
                vocab.insert(ch);
            }
        }
        vocab
    }

    /// Build a vocabulary from an explicit symbol list, keeping its order
    ///
    /// Duplicates keep their first index.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut vocab = Self {
            chars: Vec::new(),
            index: HashMap::new(),
        };
        for ch in chars {
            vocab.insert(ch);
        }
        vocab
    }

    fn insert(&mut self, ch: char) {
        if !self.index.contains_key(&ch) {
            self.index.insert(ch, self.chars.len());
            self.chars.push(ch);
        }
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn index_of(&self, ch: char) -> Option<usize> {
        self.index.get(&ch).copied()
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Symbols in index order
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Map characters to their indices
    pub fn indices(&self, chars: &[char]) -> Result<Vec<usize>> {
        chars
            .iter()
            .map(|&ch| self.index_of(ch).ok_or(Error::UnknownSymbol(ch)))
            .collect()
    }

    /// One-hot encode a character sequence
    pub fn encode(&self, chars: &[char]) -> Result<Sequence> {
        let indices = self.indices(chars)?;
        Sequence::from_indices(&indices, self.len())
    }

    /// One-hot encode a string
    pub fn encode_str(&self, text: &str) -> Result<Sequence> {
        let chars: Vec<char> = text.chars().collect();
        self.encode(&chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_appearance_order() {
        let seqs = vec!["hello\n".chars().collect::<Vec<_>>()];
        let vocab = Vocabulary::from_sequences(&seqs);
        assert_eq!(vocab.chars(), &['h', 'e', 'l', 'o', '\n']);
        assert_eq!(vocab.index_of('l'), Some(2));
        assert_eq!(vocab.char_at(4), Some('\n'));
        assert_eq!(vocab.index_of('z'), None);
    }

    #[test]
    fn test_from_chars_dedups() {
        let vocab = Vocabulary::from_chars("abca".chars());
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of('a'), Some(0));
    }

    #[test]
    fn test_encode() {
        let vocab = Vocabulary::from_chars("ab\n".chars());
        let seq = vocab.encode_str("ba\n").unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.vocab_size(), 3);
        assert_eq!(seq.hot_index(0), Some(1));
        assert_eq!(seq.hot_index(1), Some(0));
        assert_eq!(seq.hot_index(2), Some(2));
    }

    #[test]
    fn test_encode_unknown_symbol() {
        let vocab = Vocabulary::from_chars("ab".chars());
        assert!(matches!(
            vocab.encode_str("abc"),
            Err(Error::UnknownSymbol('c'))
        ));
    }
}
