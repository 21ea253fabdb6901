use crate::autograd::NodeId;
use crate::error::PicogradError;
use crate::ops::Matrix;
use std::collections::BTreeMap;

/// Named weight matrices of a model.
///
/// Names are kept sorted, so [`StateDict::parameters`] flattens in the same
/// order on every run and optimizer state lines up with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateDict {
    matrices: BTreeMap<String, Matrix>,
}

impl StateDict {
    pub fn new() -> Self {
        StateDict {
            matrices: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the matrix stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, matrix: Matrix) {
        self.matrices.insert(name.into(), matrix);
    }

    /// Looks up a matrix by name.
    pub fn get(&self, name: &str) -> Result<&Matrix, PicogradError> {
        self.matrices
            .get(name)
            .ok_or_else(|| PicogradError::MissingParameter(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matrices.contains_key(name)
    }

    /// Matrix names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.matrices.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Matrix)> {
        self.matrices.iter().map(|(name, m)| (name.as_str(), m))
    }

    /// Every parameter leaf, matrix by matrix in name order, each row-major.
    pub fn parameters(&self) -> Vec<NodeId> {
        self.matrices
            .values()
            .flat_map(|m| m.iter().flatten().copied())
            .collect()
    }

    /// Total number of scalar parameters.
    pub fn num_parameters(&self) -> usize {
        self.matrices
            .values()
            .map(|m| m.iter().map(Vec::len).sum::<usize>())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
