pub mod traits;
pub mod sampling;
pub mod tests;

pub use traits::{TripleSampler, SamplingMethod, SamplingConfig, select_sampling, seeded_rng, DEFAULT_SAMPLE_SIZE};
pub use sampling::{UniformSampling, EdgeNeighborhoodSampling};
