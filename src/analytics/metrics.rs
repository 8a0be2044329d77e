use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::error::{GraphError, Result};
use crate::graph::Triple;

/// Hits@K cut-offs reported when the caller does not choose any
pub const DEFAULT_HITS_AT: [usize; 3] = [1, 3, 10];

/// 1-based position of `correct` after a stable sort of `candidates` by
/// descending score. Equal scores keep their input order.
pub fn rank_triple(scores: &[f64], candidates: &[Triple], correct: &Triple) -> Result<usize> {
    if scores.len() != candidates.len() {
        return Err(GraphError::invalid_parameter(format!(
            "got {} scores for {} candidates",
            scores.len(),
            candidates.len()
        )));
    }

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    order
        .iter()
        .position(|&i| candidates[i] == *correct)
        .map(|pos| pos + 1)
        .ok_or_else(|| GraphError::triple_not_found(correct.to_string()))
}

/// Reciprocal rank of a single query
pub fn compute_mrr(rank: usize) -> f64 {
    1.0 / rank as f64
}

pub fn compute_hits(rank: usize, k: usize) -> u32 {
    let hit = if k == 1 { rank == k } else { rank <= k };
    u32::from(hit)
}

/// Metrics for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMetrics {
    pub rank: usize,
    pub mrr: f64,
    pub hits: BTreeMap<usize, u32>,
}

/// Rank `correct` among `candidates` and report MRR plus Hits@K for each `k`
/// in `ks` (defaults to 1, 3 and 10)
pub fn compute_metrics(
    scores: &[f64],
    candidates: &[Triple],
    correct: &Triple,
    ks: Option<&[usize]>,
) -> Result<QueryMetrics> {
    let ks = ks.unwrap_or(&DEFAULT_HITS_AT[..]);
    let rank = rank_triple(scores, candidates, correct)?;

    Ok(QueryMetrics {
        rank,
        mrr: compute_mrr(rank),
        hits: ks.iter().map(|&k| (k, compute_hits(rank, k))).collect(),
    })
}

/// Metrics averaged over many queries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankMetrics {
    /// Mean reciprocal rank
    pub mrr: f64,
    /// Mean rank
    pub mr: f64,
    /// Fraction of queries with a hit at each cut-off
    pub hits: BTreeMap<usize, f64>,
    pub num_queries: usize,
}

impl RankMetrics {
    pub fn from_ranks(ranks: &[usize], ks: &[usize]) -> Self {
        if ranks.is_empty() {
            return Self {
                hits: ks.iter().map(|&k| (k, 0.0)).collect(),
                ..Self::default()
            };
        }

        let n = ranks.len() as f64;
        let hits = ks
            .iter()
            .map(|&k| {
                let total: u32 = ranks.iter().map(|&r| compute_hits(r, k)).sum();
                (k, f64::from(total) / n)
            })
            .collect();

        Self {
            mrr: ranks.iter().map(|&r| compute_mrr(r)).sum::<f64>() / n,
            mr: ranks.iter().map(|&r| r as f64).sum::<f64>() / n,
            hits,
            num_queries: ranks.len(),
        }
    }

    /// Combine partial results, weighting each by its query count
    pub fn merge(parts: &[Self]) -> Self {
        let total: usize = parts.iter().map(|m| m.num_queries).sum();
        if total == 0 {
            return Self::default();
        }

        let total_f = total as f64;
        let weighted = |value: fn(&Self) -> f64| {
            parts.iter().map(|m| value(m) * m.num_queries as f64).sum::<f64>() / total_f
        };

        let mut hits: BTreeMap<usize, f64> = BTreeMap::new();
        for part in parts {
            for (&k, &h) in &part.hits {
                *hits.entry(k).or_default() += h * part.num_queries as f64 / total_f;
            }
        }

        Self {
            mrr: weighted(|m| m.mrr),
            mr: weighted(|m| m.mr),
            hits,
            num_queries: total,
        }
    }

    /// One-line report
    pub fn summary(&self) -> String {
        let hits: Vec<String> = self
            .hits
            .iter()
            .map(|(k, h)| format!("H@{}: {:.3}", k, h))
            .collect();

        format!(
            "MRR: {:.4} | MR: {:.1} | {} (n={})",
            self.mrr,
            self.mr,
            hits.join(" | "),
            self.num_queries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn abc() -> Vec<Triple> {
        vec![Triple::new(0, 0, 1), Triple::new(0, 0, 2), Triple::new(0, 0, 3)]
    }

    #[test]
    fn test_rank_triple_descending() {
        let candidates = abc();
        let rank = rank_triple(&[0.9, 0.5, 0.7], &candidates, &candidates[2]).unwrap();
        assert_eq!(rank, 2);
    }

    #[test]
    fn test_rank_triple_ties_keep_input_order() {
        let candidates = abc();
        assert_eq!(rank_triple(&[0.5, 0.5, 0.5], &candidates, &candidates[0]).unwrap(), 1);
        assert_eq!(rank_triple(&[0.5, 0.5, 0.5], &candidates, &candidates[2]).unwrap(), 3);
    }

    #[test]
    fn test_rank_triple_errors() {
        let candidates = abc();
        assert!(matches!(
            rank_triple(&[0.1, 0.2], &candidates, &candidates[0]),
            Err(GraphError::InvalidParameter(_))
        ));
        assert!(matches!(
            rank_triple(&[0.1, 0.2, 0.3], &candidates, &Triple::new(9, 9, 9)),
            Err(GraphError::TripleNotFound(_))
        ));
    }

    #[test]
    fn test_compute_hits() {
        assert_eq!(compute_hits(1, 1), 1);
        assert_eq!(compute_hits(2, 1), 0);
        assert_eq!(compute_hits(3, 3), 1);
        assert_eq!(compute_hits(4, 3), 0);
    }

    #[test]
    fn test_compute_mrr() {
        assert_eq!(compute_mrr(4), 0.25);
        assert_eq!(compute_mrr(1), 1.0);
    }

    #[test]
    fn test_compute_metrics_defaults() {
        let candidates = abc();
        let metrics = compute_metrics(&[0.9, 0.5, 0.7], &candidates, &candidates[2], None).unwrap();

        assert_eq!(metrics.rank, 2);
        assert_eq!(metrics.mrr, 0.5);
        let expected: BTreeMap<usize, u32> = [(1, 0), (3, 1), (10, 1)].into_iter().collect();
        assert_eq!(metrics.hits, expected);
    }

    #[test]
    fn test_compute_metrics_custom_ks() {
        let candidates = abc();
        let metrics = compute_metrics(&[0.9, 0.5, 0.7], &candidates, &candidates[0], Some(&[1, 2][..])).unwrap();

        assert_eq!(metrics.rank, 1);
        assert_eq!(metrics.hits.len(), 2);
        assert_eq!(metrics.hits[&1], 1);
    }

    #[test]
    fn test_rank_metrics_from_ranks() {
        let metrics = RankMetrics::from_ranks(&[1, 2, 4, 20], &DEFAULT_HITS_AT);

        assert_eq!(metrics.num_queries, 4);
        assert!((metrics.mrr - (1.0 + 0.5 + 0.25 + 0.05) / 4.0).abs() < 1e-12);
        assert_eq!(metrics.mr, 6.75);
        assert_eq!(metrics.hits[&1], 0.25);
        assert_eq!(metrics.hits[&3], 0.5);
        assert_eq!(metrics.hits[&10], 0.75);
    }

    #[test]
    fn test_rank_metrics_merge_weights_by_queries() {
        let a = RankMetrics::from_ranks(&[1], &[1]);
        let b = RankMetrics::from_ranks(&[2, 2, 2], &[1]);
        let merged = RankMetrics::merge(&[a, b]);

        assert_eq!(merged.num_queries, 4);
        assert_eq!(merged.mrr, (1.0 + 1.5) / 4.0);
        assert_eq!(merged.hits[&1], 0.25);
        assert!(merged.summary().contains("H@1: 0.250"));
    }
}
