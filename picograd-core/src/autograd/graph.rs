use super::op::{Op, MAX_ARITY};
use std::fmt;

/// Handle to a node stored in a [`Graph`].
///
/// Handles are plain indices: cheap to copy, hash and compare. They are only
/// meaningful for the graph that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its graph's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// A differentiable scalar: forward value, gradient accumulator and the edges
/// back to the nodes it was computed from.
///
/// `value`, `op`, `inputs` and `local_derivatives` are fixed at construction.
/// Only `grad` changes afterwards (and `value` for leaves, via
/// [`Graph::set_value`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub(crate) value: f64,
    pub(crate) grad: f64,
    pub(crate) op: Op,
    pub(crate) inputs: [NodeId; MAX_ARITY],
    pub(crate) local_derivatives: [f64; MAX_ARITY],
}

impl Node {
    fn leaf(value: f64) -> Self {
        Node {
            value,
            grad: 0.0,
            op: Op::Leaf,
            inputs: [NodeId(0); MAX_ARITY],
            local_derivatives: [0.0; MAX_ARITY],
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn grad(&self) -> f64 {
        self.grad
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn is_leaf(&self) -> bool {
        self.op.is_leaf()
    }

    /// Operands this node was derived from (empty for leaves).
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs[..self.op.arity()]
    }

    /// `d(self)/d(input_i)`, one entry per element of [`Node::inputs`].
    pub fn local_derivatives(&self) -> &[f64] {
        &self.local_derivatives[..self.op.arity()]
    }
}

/// Marks a length of a [`Graph`] that can later be restored with
/// [`Graph::truncate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Number of nodes that survive a truncate to this checkpoint.
    pub fn len(self) -> usize {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Append-only arena holding every node of a computation graph.
///
/// Nodes can only reference nodes that already exist, so the arena index
/// order is itself a topological order and the graph can never contain a
/// cycle. Long-lived parameters are created first; the transient nodes of one
/// forward pass are dropped in bulk with [`Graph::truncate`] once their
/// gradients have been harvested.
///
/// ```
/// use picograd_core::autograd::Graph;
///
/// let mut graph = Graph::new();
/// let x = graph.constant(2.0);
/// let w = graph.constant(3.0);
/// let y = graph.mul(w, x);
/// let loss = graph.pow(y, 2.0);
/// graph.backward(loss);
/// assert_eq!(graph.grad(w), 24.0);
/// assert_eq!(graph.grad(x), 36.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
}

impl Graph {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Graph {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes currently alive in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph (for example a handle
    /// kept across a [`Graph::truncate`]).
    pub fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.0) {
            Some(node) => node,
            None => panic!(
                "node {} is not part of this graph (graph holds {} nodes)",
                id,
                self.nodes.len()
            ),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        let len = self.nodes.len();
        match self.nodes.get_mut(id.0) {
            Some(node) => node,
            None => panic!("node {} is not part of this graph (graph holds {} nodes)", id, len),
        }
    }

    /// Forward value of `id`.
    pub fn value(&self, id: NodeId) -> f64 {
        self.node(id).value
    }

    /// Accumulated gradient of the last backward root with respect to `id`.
    pub fn grad(&self, id: NodeId) -> f64 {
        self.node(id).grad
    }

    /// Overwrites the value of a leaf (optimizer write-back).
    ///
    /// # Panics
    /// Panics if `id` is not a leaf: derived values are fixed at construction.
    pub fn set_value(&mut self, id: NodeId, value: f64) {
        let node = self.node_mut(id);
        assert!(
            node.op.is_leaf(),
            "set_value on {} node {}: only leaves can be updated",
            node.op.name(),
            id
        );
        node.value = value;
    }

    /// Resets the gradient of a single node to zero.
    pub fn zero_grad(&mut self, id: NodeId) {
        self.node_mut(id).grad = 0.0;
    }

    /// Resets the gradient of every node in the graph to zero.
    pub fn zero_grads(&mut self) {
        for node in &mut self.nodes {
            node.grad = 0.0;
        }
    }

    /// Records the current length so later nodes can be discarded.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.nodes.len())
    }

    /// Drops every node created after `checkpoint`.
    ///
    /// Handles to dropped nodes become invalid; using one panics.
    ///
    /// # Panics
    /// Panics if the graph is already shorter than the checkpoint.
    pub fn truncate(&mut self, checkpoint: Checkpoint) {
        assert!(
            checkpoint.0 <= self.nodes.len(),
            "cannot truncate graph of {} nodes to checkpoint {}",
            self.nodes.len(),
            checkpoint.0
        );
        let dropped = self.nodes.len() - checkpoint.0;
        self.nodes.truncate(checkpoint.0);
        log::trace!("Graph: truncated {} transient nodes, {} remain", dropped, checkpoint.0);
    }

    // --- Leaves ---

    /// Creates a leaf node holding `value` with a zero gradient.
    pub fn constant(&mut self, value: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::leaf(value));
        id
    }

    /// Creates a trainable leaf. Identical to [`Graph::constant`]; the name
    /// documents intent at call sites.
    pub fn parameter(&mut self, value: f64) -> NodeId {
        self.constant(value)
    }

    /// Appends a derived node, evaluating `op`'s forward and derivative rules
    /// on the current values of `inputs`.
    fn push(&mut self, op: Op, inputs: [NodeId; MAX_ARITY]) -> NodeId {
        let mut args = [0.0; MAX_ARITY];
        for (arg, &input) in args.iter_mut().zip(&inputs[..op.arity()]) {
            *arg = self.value(input);
        }
        let value = op.forward(args);
        let local_derivatives = op.local_derivatives(args, value);
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value,
            grad: 0.0,
            op,
            inputs,
            local_derivatives,
        });
        id
    }

    // --- Primitives ---

    pub fn add(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.push(Op::Add, [a, b])
    }

    pub fn mul(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.push(Op::Mul, [a, b])
    }

    /// `a ^ exponent`.
    ///
    /// A non-positive base with a fractional or negative exponent yields
    /// NaN/Inf, which then propagates; it is not checked here.
    pub fn pow(&mut self, a: NodeId, exponent: f64) -> NodeId {
        self.push(Op::Pow(exponent), [a, a])
    }

    /// Natural log. `log(0)` is `-inf`.
    pub fn log(&mut self, a: NodeId) -> NodeId {
        self.push(Op::Log, [a, a])
    }

    pub fn exp(&mut self, a: NodeId) -> NodeId {
        self.push(Op::Exp, [a, a])
    }

    /// Rectified linear unit. The derivative at exactly 0 is 0; a NaN input
    /// stays NaN in both the value and the derivative.
    pub fn relu(&mut self, a: NodeId) -> NodeId {
        self.push(Op::Relu, [a, a])
    }

    // --- Derived combinators ---

    pub fn neg(&mut self, a: NodeId) -> NodeId {
        self.mul_scalar(a, -1.0)
    }

    pub fn sub(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let neg_b = self.neg(b);
        self.add(a, neg_b)
    }

    pub fn div(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let inv_b = self.pow(b, -1.0);
        self.mul(a, inv_b)
    }

    pub fn add_scalar(&mut self, a: NodeId, f: f64) -> NodeId {
        let c = self.constant(f);
        self.add(a, c)
    }

    pub fn sub_scalar(&mut self, a: NodeId, f: f64) -> NodeId {
        self.add_scalar(a, -f)
    }

    pub fn mul_scalar(&mut self, a: NodeId, f: f64) -> NodeId {
        let c = self.constant(f);
        self.mul(a, c)
    }

    pub fn div_scalar(&mut self, a: NodeId, f: f64) -> NodeId {
        let c = self.constant(f);
        let inv = self.pow(c, -1.0);
        self.mul(a, inv)
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
