//! # Elementwise Arithmetic
//!
//! Vector-level wrappers over the scalar combinators of
//! [`Graph`](crate::autograd::Graph).

pub mod add;
pub mod mul;

pub use add::add_vecs;
pub use mul::scale;
