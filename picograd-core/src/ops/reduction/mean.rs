use super::sum::sum;
use crate::autograd::{Graph, NodeId};

/// Arithmetic mean of `xs`: [`sum`] scaled by `1 / len`.
///
/// # Panics
/// Panics if `xs` is empty.
pub fn mean(graph: &mut Graph, xs: &[NodeId]) -> NodeId {
    let total = sum(graph, xs);
    graph.mul_scalar(total, 1.0 / xs.len() as f64)
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
