pub mod cyclic_sampler;
pub mod traits;

pub use cyclic_sampler::CyclicSampler;
pub use traits::Sampler;
