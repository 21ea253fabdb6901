use crate::autograd::{Graph, NodeId};

/// Sum of `xs`, chained left to right starting from the first element.
///
/// # Panics
/// Panics if `xs` is empty.
pub fn sum(graph: &mut Graph, xs: &[NodeId]) -> NodeId {
    let (&first, rest) = match xs.split_first() {
        Some(split) => split,
        None => panic!("sum: empty input"),
    };
    rest.iter().fold(first, |acc, &x| graph.add(acc, x))
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
