use crate::autograd::{Graph, NodeId};

/// Weight grid of an affine map: `n_out` rows of `n_in` scalar nodes.
pub type Matrix = Vec<Vec<NodeId>>;

/// Applies the bias-free affine map `out[i] = sum_j w[i][j] * x[j]`.
///
/// Each output is a left-to-right chain of `add`/`mul` nodes seeded at a
/// `constant(0)` leaf, so one call creates `O(n_out * n_in)` nodes.
///
/// # Arguments
/// * `graph`: graph the new nodes are appended to.
/// * `x`: input vector of length `n_in`.
/// * `w`: `n_out` rows of length `n_in`.
///
/// # Panics
/// Panics if a row of `w` does not have the same length as `x`.
pub fn linear(graph: &mut Graph, x: &[NodeId], w: &[Vec<NodeId>]) -> Vec<NodeId> {
    w.iter()
        .enumerate()
        .map(|(i, row)| {
            assert_eq!(
                row.len(),
                x.len(),
                "linear: weight row {} has {} columns but input has {} elements",
                i,
                row.len(),
                x.len()
            );
            dot(graph, row, x)
        })
        .collect()
}

/// `sum_j a[j] * b[j]` as a chain seeded at `constant(0)`.
///
/// # Panics
/// Panics if the lengths differ.
pub fn dot(graph: &mut Graph, a: &[NodeId], b: &[NodeId]) -> NodeId {
    assert_eq!(a.len(), b.len(), "dot: length mismatch ({} vs {})", a.len(), b.len());
    let mut acc = graph.constant(0.0);
    for (&ai, &bi) in a.iter().zip(b) {
        let prod = graph.mul(ai, bi);
        acc = graph.add(acc, prod);
    }
    acc
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
