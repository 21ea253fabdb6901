//! # Normalization
//!
//! Root-mean-square normalization without learned scale or bias.

pub mod rmsnorm;

pub use rmsnorm::{rmsnorm, RMSNORM_EPS};
