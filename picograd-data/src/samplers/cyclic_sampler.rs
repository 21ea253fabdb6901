use super::traits::Sampler;

/// Walks the dataset in order for a fixed number of steps, wrapping around
/// at the end: step `t` reads index `t mod len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicSampler {
    num_steps: usize,
}

impl CyclicSampler {
    pub fn new(num_steps: usize) -> Self {
        CyclicSampler { num_steps }
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }
}

impl Sampler for CyclicSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        Box::new((0..self.num_steps).map(move |t| t % dataset_len))
    }

    fn len(&self, dataset_len: usize) -> usize {
        if dataset_len == 0 {
            0
        } else {
            self.num_steps
        }
    }
}

#[cfg(test)]
#[path = "cyclic_sampler_test.rs"]
mod tests;
