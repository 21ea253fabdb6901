//! Optimizers for the parameter leaves of a [`Graph`](crate::autograd::Graph).
//!
//! An optimizer owns the list of parameter [`NodeId`](crate::autograd::NodeId)s
//! it updates. After `backward` has filled their gradients, `step` writes new
//! values through [`Graph::set_value`](crate::autograd::Graph::set_value) and
//! resets the gradients for the next pass.

pub mod adam;
pub mod lr_scheduler;
pub mod optimizer_trait;

pub use adam::{AdamOptimizer, AdamState};
pub use lr_scheduler::{ConstantLr, CosineDecay, LrScheduler};
pub use optimizer_trait::Optimizer;
