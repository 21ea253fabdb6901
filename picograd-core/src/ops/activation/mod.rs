//! # Activation Functions
//!
//! Normalizing activations built from the scalar primitives. The elementwise
//! rectifier lives on [`Graph::relu`](crate::autograd::Graph::relu) directly.

pub mod softmax;

pub use softmax::softmax;
