//! # Autograd
//!
//! Scalar reverse-mode automatic differentiation.
//!
//! A [`Graph`] is an arena of [`Node`]s. Each node holds one `f64` value, a
//! gradient accumulator, and the edges back to the nodes it was computed
//! from, together with the local partial derivatives captured when it was
//! built. Building a node is eager: its value is known as soon as the
//! combinator returns.
//!
//! [`Graph::backward`] linearizes the sub-graph reachable from a root with
//! [`topological_sort`] and applies the chain rule in reverse order.
//!
//! [`grad_check`] verifies analytical gradients with finite differences.

pub mod backward;
pub mod grad_check;
pub mod graph;
pub mod op;

pub use backward::topological_sort;
pub use grad_check::{check_grad, GradCheckError};
pub use graph::{Checkpoint, Graph, Node, NodeId};
pub use op::Op;
