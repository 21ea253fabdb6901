//! # Linear Algebra
//!
//! Matrix-vector products expressed as graphs of scalar multiplies and adds.

pub mod linear;

pub use linear::{dot, linear, Matrix};
