//! # Numeric Operations (`ops`)
//!
//! Stateless graph builders over slices of [`NodeId`](crate::autograd::NodeId)s.
//! Every function reads the values of its inputs, appends new nodes to the
//! [`Graph`](crate::autograd::Graph) and returns their handles; inputs are never
//! modified, so gradients flow back into shared parameters and into values
//! computed at earlier positions.
//!
//! ## Key Submodules:
//!
//! - [`linalg`]: bias-free affine map (`linear`) and `dot`.
//! - [`activation`]: `softmax`.
//! - [`norm`]: `rmsnorm`.
//! - [`arithmetic`]: elementwise `add_vecs`, `scale`.
//! - [`reduction`]: `sum`, `mean`.
//!
//! Length preconditions (empty softmax input, mismatched vectors) are caller
//! contracts and panic when broken.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod norm;
pub mod reduction;

pub use activation::softmax;
pub use arithmetic::{add_vecs, scale};
pub use linalg::{dot, linear, Matrix};
pub use norm::{rmsnorm, RMSNORM_EPS};
pub use reduction::{mean, sum};
