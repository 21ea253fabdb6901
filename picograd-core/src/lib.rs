//! Scalar reverse-mode automatic differentiation and the pieces needed to
//! train a tiny character-level GPT with it.
//!
//! - [`autograd`]: the node arena, backward pass and gradient checking.
//! - [`ops`]: vector-level graph builders (`linear`, `softmax`, `rmsnorm`, ...).
//! - [`nn`]: parameter store, the GPT model, losses and sampling.
//! - [`optim`]: Adam and learning-rate schedules.
//! - [`train`]: one training step and text generation.

pub mod autograd;
pub mod config;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod train;

pub use autograd::{Graph, NodeId};
pub use error::PicogradError;
