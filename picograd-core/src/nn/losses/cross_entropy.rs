use crate::autograd::{Graph, NodeId};
use crate::error::PicogradError;
use crate::ops::{mean, softmax, sum};

/// How per-position losses are combined into one scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

/// Negative log-likelihood of `target` under `softmax(logits)`.
///
/// Returns an `IndexOutOfBounds` error if `target` is not a valid index into
/// `logits`. A target whose probability underflows to 0 yields `+inf`.
pub fn cross_entropy(
    graph: &mut Graph,
    logits: &[NodeId],
    target: usize,
) -> Result<NodeId, PicogradError> {
    if target >= logits.len() {
        return Err(PicogradError::IndexOutOfBounds {
            what: "target",
            index: target,
            len: logits.len(),
        });
    }
    let probs = softmax(graph, logits);
    let log_prob = graph.log(probs[target]);
    Ok(graph.neg(log_prob))
}

/// Combines per-position losses. An empty slice is an `EmptySequence` error.
pub fn reduce(
    graph: &mut Graph,
    losses: &[NodeId],
    reduction: Reduction,
) -> Result<NodeId, PicogradError> {
    if losses.is_empty() {
        return Err(PicogradError::EmptySequence { min: 1, actual: 0 });
    }
    Ok(match reduction {
        Reduction::Mean => mean(graph, losses),
        Reduction::Sum => sum(graph, losses),
    })
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
