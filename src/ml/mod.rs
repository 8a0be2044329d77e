pub mod negative;
pub mod candidates;

pub use negative::{negative_sampling, corrupt, NegativeBatch, Device, CorruptionConfig};
pub use candidates::{corrupt_heads, corrupt_tails, filter_triples};
