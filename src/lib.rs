pub mod graph;
pub mod algorithms;
pub mod error;
pub mod ml;
pub mod analytics;
pub mod experiment;

pub use graph::{Triple, Vocabulary, KnowledgeGraphDataset, DatasetStats, triples_to_record_batch, triples_from_record_batch};
pub use algorithms::{TripleSampler, SamplingMethod, SamplingConfig, UniformSampling, EdgeNeighborhoodSampling, select_sampling, seeded_rng};
pub use ml::{negative_sampling, corrupt, corrupt_heads, corrupt_tails, filter_triples, NegativeBatch, Device, CorruptionConfig};
pub use analytics::{
    rank_triple, compute_mrr, compute_hits, compute_metrics,
    QueryMetrics, RankMetrics, LinkPredictionEvaluator, LinkPredictionReport, EvaluationConfig
};
pub use experiment::{create_experiment, Experiment, ExperimentConfig, ObserverConfig, Observer};
pub use error::{GraphError, Result};

pub mod prelude {
    pub use crate::graph::{Triple, Vocabulary, KnowledgeGraphDataset, DatasetStats, triples_to_record_batch, triples_from_record_batch};
    pub use crate::algorithms::{TripleSampler, SamplingMethod, SamplingConfig, UniformSampling, EdgeNeighborhoodSampling, select_sampling, seeded_rng};
    pub use crate::ml::{negative_sampling, corrupt, corrupt_heads, corrupt_tails, filter_triples, NegativeBatch, Device, CorruptionConfig};
    pub use crate::analytics::{
        rank_triple, compute_mrr, compute_hits, compute_metrics,
        QueryMetrics, RankMetrics, LinkPredictionEvaluator, LinkPredictionReport, EvaluationConfig
    };
    pub use crate::experiment::{create_experiment, Experiment, ExperimentConfig, ObserverConfig, Observer};
    pub use crate::error::{GraphError, Result};
}
