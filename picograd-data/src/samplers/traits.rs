use std::fmt::Debug;

/// Decides which dataset index each training step reads.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over dataset indices, one per step.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices [`Sampler::iter`] yields for `dataset_len` items.
    fn len(&self, dataset_len: usize) -> usize;
}
