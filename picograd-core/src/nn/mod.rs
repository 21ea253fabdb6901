//! # Model assembly (`nn`)
//!
//! Parameter initialization, the named parameter store, the GPT model with
//! its key/value cache, losses and token sampling. Everything here builds
//! on [`Graph`](crate::autograd::Graph) nodes and the [`ops`](crate::ops)
//! layer.

pub mod gpt;
pub mod init;
pub mod losses;
pub mod parameter;
pub mod sampling;

pub use gpt::{Gpt, KvCache};
pub use init::{normal_matrix, zeros_matrix};
pub use losses::{cross_entropy, Reduction};
pub use parameter::StateDict;
pub use sampling::weighted_choice;
