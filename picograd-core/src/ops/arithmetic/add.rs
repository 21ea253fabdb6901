use crate::autograd::{Graph, NodeId};

/// Elementwise `a[i] + b[i]`, used for residual connections.
///
/// # Panics
/// Panics if the lengths differ.
pub fn add_vecs(graph: &mut Graph, a: &[NodeId], b: &[NodeId]) -> Vec<NodeId> {
    assert_eq!(
        a.len(),
        b.len(),
        "add_vecs: length mismatch ({} vs {})",
        a.len(),
        b.len()
    );
    a.iter().zip(b).map(|(&ai, &bi)| graph.add(ai, bi)).collect()
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
