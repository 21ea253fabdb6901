use thiserror::Error;

/// Custom error type for the picograd crates.
///
/// The autograd engine itself never returns errors: numeric edge cases flow
/// through the graph as NaN/Inf and structural misuse panics. This type covers
/// the layers built on top of it (configuration, model assembly, data loading).
#[derive(Error, Debug, PartialEq, Clone)]
pub enum PicogradError {
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("Index out of bounds: {what} index {index} for length {len}")]
    IndexOutOfBounds {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Dimension mismatch in {operation}: expected {expected}, got {actual}")]
    DimensionMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Parameter {0:?} is missing from the state dict")]
    MissingParameter(String),

    #[error("Token sequence needs at least {min} tokens, got {actual}")]
    EmptySequence { min: usize, actual: usize },

    #[error("Character {0:?} is not in the tokenizer vocabulary")]
    UnknownCharacter(char),

    #[error("Token id {id} is not in the vocabulary (size {vocab_size})")]
    UnknownToken { id: usize, vocab_size: usize },

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Non-finite value encountered in {0}")]
    NonFinite(String),
}
