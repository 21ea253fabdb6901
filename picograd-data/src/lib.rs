//! Text corpora, the character tokenizer and step samplers used to feed
//! documents to `picograd-core` training.

pub mod dataset;
pub mod samplers;
pub mod tokenizer;

pub use dataset::{Dataset, TextDataset};
pub use samplers::{CyclicSampler, Sampler};
pub use tokenizer::CharTokenizer;
