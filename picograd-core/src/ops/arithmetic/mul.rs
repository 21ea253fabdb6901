use crate::autograd::{Graph, NodeId};

/// Multiplies every element of `x` by the plain number `factor`.
pub fn scale(graph: &mut Graph, x: &[NodeId], factor: f64) -> Vec<NodeId> {
    x.iter().map(|&xi| graph.mul_scalar(xi, factor)).collect()
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
