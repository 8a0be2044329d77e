use std::fmt;
use std::str::FromStr;
use arrow::record_batch::RecordBatch;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use crate::algorithms::sampling::{EdgeNeighborhoodSampling, UniformSampling};
use crate::error::{GraphError, Result};
use crate::graph::{Triple, triples_to_record_batch};

/// Default number of edges drawn per sampling call
pub const DEFAULT_SAMPLE_SIZE: usize = 30_000;

/// Deterministic generator when a seed is given, entropy-seeded otherwise
pub fn seeded_rng(seed: Option<u64>) -> Pcg64 {
    match seed {
        Some(s) => Pcg64::seed_from_u64(s),
        None => Pcg64::from_entropy(),
    }
}

/// Strategy for drawing a training subset from a triple list
pub trait TripleSampler: fmt::Debug + Send + Sync {
    /// Draw `sample_size` triples. `num_entities` bounds the entity ids.
    fn sample(
        &self,
        triples: &[Triple],
        sample_size: usize,
        num_entities: usize,
        rng: &mut Pcg64,
    ) -> Result<Vec<Triple>>;

    /// Sample according to `config` and return the result as an Arrow batch
    fn execute(
        &self,
        triples: &[Triple],
        num_entities: usize,
        config: &SamplingConfig,
    ) -> Result<RecordBatch> {
        let mut rng = seeded_rng(config.seed);
        let sampled = self.sample(triples, config.sample_size, num_entities, &mut rng)?;
        triples_to_record_batch(&sampled)
    }

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "Triple sampling strategy"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingMethod {
    Uniform,
    EdgeNeighborhood,
}

impl SamplingMethod {
    pub fn sampler(self) -> Box<dyn TripleSampler> {
        match self {
            SamplingMethod::Uniform => Box::new(UniformSampling),
            SamplingMethod::EdgeNeighborhood => Box::new(EdgeNeighborhoodSampling),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SamplingMethod::Uniform => "uniform",
            SamplingMethod::EdgeNeighborhood => "edge-neighborhood",
        }
    }
}

impl FromStr for SamplingMethod {
    type Err = GraphError;

    fn from_str(method: &str) -> Result<Self> {
        let method = method.trim().to_lowercase();
        match method.as_str() {
            "uniform" => Ok(SamplingMethod::Uniform),
            "edge-neighborhood" => Ok(SamplingMethod::EdgeNeighborhood),
            _ => Err(GraphError::not_implemented(format!(
                "{} sampling method has not been implemented",
                method
            ))),
        }
    }
}

impl fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up a sampler by (case-insensitive) name
pub fn select_sampling(method: &str) -> Result<Box<dyn TripleSampler>> {
    Ok(method.parse::<SamplingMethod>()?.sampler())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub method: SamplingMethod,
    pub sample_size: usize,
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            method: SamplingMethod::Uniform,
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
        }
    }
}

impl SamplingConfig {
    /// Run the configured sampler
    pub fn sample(&self, triples: &[Triple], num_entities: usize) -> Result<Vec<Triple>> {
        let mut rng = seeded_rng(self.seed);
        self.method
            .sampler()
            .sample(triples, self.sample_size, num_entities, &mut rng)
    }
}
