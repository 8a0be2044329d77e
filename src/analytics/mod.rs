/// Link prediction evaluation: per-query ranking metrics and the filtered
/// evaluation protocol over whole test splits.

pub mod metrics;
pub mod evaluation;

pub use metrics::{
    rank_triple, compute_mrr, compute_hits, compute_metrics,
    QueryMetrics, RankMetrics, DEFAULT_HITS_AT
};

pub use evaluation::{
    LinkPredictionEvaluator, LinkPredictionReport, EvaluationConfig, QueryRanks
};
