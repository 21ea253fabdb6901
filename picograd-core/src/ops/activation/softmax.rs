use crate::autograd::{Graph, NodeId};

/// Numerically stable softmax over `logits`.
///
/// The largest raw value is found with plain `f64` comparisons (it is not a
/// graph node) and subtracted from every logit before `exp`, so no
/// exponential sees a positive argument. The shift does not change the
/// result: softmax is invariant to adding a constant to all logits.
///
/// Returns probabilities in `(0, 1]` that sum to 1.
///
/// # Panics
/// Panics if `logits` is empty.
pub fn softmax(graph: &mut Graph, logits: &[NodeId]) -> Vec<NodeId> {
    assert!(!logits.is_empty(), "softmax: empty input");

    let max_value = logits
        .iter()
        .map(|&l| graph.value(l))
        .fold(f64::NEG_INFINITY, f64::max);

    let exps: Vec<NodeId> = logits
        .iter()
        .map(|&l| {
            let shifted = graph.add_scalar(l, -max_value);
            graph.exp(shifted)
        })
        .collect();

    let mut total = exps[0];
    for &e in &exps[1..] {
        total = graph.add(total, e);
    }

    exps.iter().map(|&e| graph.div(e, total)).collect()
}

#[cfg(test)]
#[path = "softmax_test.rs"]
mod tests;
