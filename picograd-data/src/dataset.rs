use log::info;
use picograd_core::PicogradError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;

/// Trait representing a dataset.
///
/// A dataset provides access to individual samples via an index.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item;

    /// Returns the sample at `index`, or an `IndexOutOfBounds` error.
    fn get(&self, index: usize) -> Result<Self::Item, PicogradError>;

    /// Returns the total number of samples in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A corpus of documents, one per non-empty line.
///
/// Lines are trimmed of surrounding whitespace; lines that are empty after
/// trimming are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDataset {
    documents: Vec<String>,
}

impl TextDataset {
    /// Builds a dataset from any sequence of lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let documents = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        TextDataset { documents }
    }

    /// Reads a UTF-8 text file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `EmptyDataset` if it holds no
    /// non-blank line.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PicogradError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PicogradError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let dataset = Self::from_lines(text.lines());
        if dataset.is_empty() {
            return Err(PicogradError::EmptyDataset);
        }
        info!("Loaded {} documents from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Shuffles the documents in place with the given generator.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.documents.shuffle(rng);
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn document(&self, index: usize) -> Option<&str> {
        self.documents.get(index).map(String::as_str)
    }
}

impl Dataset for TextDataset {
    type Item = String;

    fn get(&self, index: usize) -> Result<String, PicogradError> {
        self.document(index)
            .map(str::to_string)
            .ok_or(PicogradError::IndexOutOfBounds {
                what: "document",
                index,
                len: self.documents.len(),
            })
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
