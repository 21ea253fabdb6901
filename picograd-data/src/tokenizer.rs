use log::info;
use picograd_core::PicogradError;
use std::collections::{BTreeSet, HashMap};

/// Character-level tokenizer with one extra BOS token.
///
/// The distinct characters of the corpus, sorted, get ids `0..n`; BOS is `n`
/// and the vocabulary size is `n + 1`. BOS marks both the start and the end
/// of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct CharTokenizer {
    chars: Vec<char>,
    ids: HashMap<char, usize>,
}

impl CharTokenizer {
    /// Builds the vocabulary from every character of `documents`.
    pub fn fit<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<char> = documents
            .into_iter()
            .flat_map(|doc| doc.as_ref().chars().collect::<Vec<_>>())
            .collect();
        let chars: Vec<char> = unique.into_iter().collect();
        let ids = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        let tokenizer = CharTokenizer { chars, ids };
        info!("Tokenizer vocab size: {}", tokenizer.vocab_size());
        tokenizer
    }

    /// Number of token ids, BOS included.
    pub fn vocab_size(&self) -> usize {
        self.chars.len() + 1
    }

    pub fn bos(&self) -> usize {
        self.chars.len()
    }

    pub fn encode_char(&self, c: char) -> Result<usize, PicogradError> {
        self.ids
            .get(&c)
            .copied()
            .ok_or(PicogradError::UnknownCharacter(c))
    }

    /// Character of a non-BOS id.
    pub fn decode(&self, id: usize) -> Result<char, PicogradError> {
        self.chars
            .get(id)
            .copied()
            .ok_or(PicogradError::UnknownToken {
                id,
                vocab_size: self.vocab_size(),
            })
    }

    /// `[BOS, ids of doc.., BOS]`.
    pub fn encode_document(&self, doc: &str) -> Result<Vec<usize>, PicogradError> {
        let mut tokens = Vec::with_capacity(doc.chars().count() + 2);
        tokens.push(self.bos());
        for c in doc.chars() {
            tokens.push(self.encode_char(c)?);
        }
        tokens.push(self.bos());
        Ok(tokens)
    }

    /// Decodes a sequence of non-BOS ids into a string.
    pub fn decode_tokens(&self, ids: &[usize]) -> Result<String, PicogradError> {
        ids.iter().map(|&id| self.decode(id)).collect()
    }
}

#[cfg(test)]
#[path = "tokenizer_test.rs"]
mod tests;
