use crate::autograd::{Graph, NodeId};

/// Added to the mean square before the inverse square root.
pub const RMSNORM_EPS: f64 = 1e-5;

/// Rescales `x` to (approximately) unit root-mean-square.
///
/// Computes `scale = (mean(x_i^2) + eps)^-0.5` as a single graph node and
/// multiplies every element by it, so the gradient of each output flows into
/// every input through the shared scale.
///
/// # Panics
/// Panics if `x` is empty.
pub fn rmsnorm(graph: &mut Graph, x: &[NodeId]) -> Vec<NodeId> {
    assert!(!x.is_empty(), "rmsnorm: empty input");

    let mut ms = graph.constant(0.0);
    for &xi in x {
        let sq = graph.mul(xi, xi);
        ms = graph.add(ms, sq);
    }
    let ms = graph.mul_scalar(ms, 1.0 / x.len() as f64);
    let ms_eps = graph.add_scalar(ms, RMSNORM_EPS);
    let scale = graph.pow(ms_eps, -0.5);

    x.iter().map(|&xi| graph.mul(xi, scale)).collect()
}

#[cfg(test)]
#[path = "rmsnorm_test.rs"]
mod tests;
