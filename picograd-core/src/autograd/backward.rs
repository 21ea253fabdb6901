use super::graph::{Graph, NodeId};

/// Returns the nodes reachable from `root` in topological order: every node
/// appears after all of its inputs, and `root` comes last.
///
/// This is a post-order depth-first traversal memoized by node identity, so
/// a node shared by many consumers is listed once. The traversal keeps an
/// explicit stack instead of recursing because a single loss can sit on top
/// of a chain of tens of thousands of `add` nodes.
///
/// # Panics
/// Panics if `root` does not belong to `graph`.
pub fn topological_sort(graph: &Graph, root: NodeId) -> Vec<NodeId> {
    graph.node(root);

    let mut visited = vec![false; graph.len()];
    let mut order = Vec::new();
    // (node, index of the next input to descend into)
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
    visited[root.index()] = true;

    while let Some(frame) = stack.last_mut() {
        let (id, next) = *frame;
        let inputs = graph.node(id).inputs();
        if next < inputs.len() {
            frame.1 += 1;
            let input = inputs[next];
            if !visited[input.index()] {
                visited[input.index()] = true;
                stack.push((input, 0));
            }
        } else {
            stack.pop();
            order.push(id);
        }
    }

    order
}

impl Graph {
    /// Computes `d(root)/d(node)` for `root` and every node it depends on,
    /// accumulating the results into each node's gradient.
    ///
    /// The root's gradient is set to 1. Nodes are then visited in reverse
    /// topological order, so a node's gradient is complete (every consumer has
    /// pushed its contribution) before it is propagated to its own inputs.
    /// Contributions are added, never assigned, which is what makes fan-out
    /// and parameter sharing work.
    ///
    /// Gradients of nodes that were already non-zero are added to, so callers
    /// reset them with [`Graph::zero_grads`] (or per parameter) between passes.
    /// Nodes not reachable from `root` are left untouched.
    ///
    /// # Panics
    /// Panics if `root` does not belong to this graph.
    pub fn backward(&mut self, root: NodeId) {
        let order = topological_sort(self, root);
        log::debug!(
            "backward: {} reachable nodes out of {} from root {}",
            order.len(),
            self.nodes.len(),
            root
        );

        self.nodes[root.index()].grad = 1.0;
        for &id in order.iter().rev() {
            let node = self.nodes[id.index()];
            for (input, local) in node.inputs().iter().zip(node.local_derivatives()) {
                self.nodes[input.index()].grad += node.grad * local;
            }
        }
    }
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
