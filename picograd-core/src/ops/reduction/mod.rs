//! # Reductions
//!
//! Collapse a vector of nodes into a single node.

pub mod mean;
pub mod sum;

pub use mean::mean;
pub use sum::sum;
