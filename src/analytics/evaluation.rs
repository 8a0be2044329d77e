use hashbrown::HashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use crate::analytics::metrics::{rank_triple, RankMetrics, DEFAULT_HITS_AT};
use crate::error::Result;
use crate::graph::Triple;
use crate::ml::candidates::{corrupt_heads, corrupt_tails, filter_triples};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub hits_at: Vec<usize>,
    /// Drop other known-true triples from each candidate set
    pub filtered: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            hits_at: DEFAULT_HITS_AT.to_vec(),
            filtered: true,
        }
    }
}

/// Head, tail and combined metrics for a test split
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkPredictionReport {
    pub head: RankMetrics,
    pub tail: RankMetrics,
    pub both: RankMetrics,
}

/// Ranks for one test triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRanks {
    pub head: usize,
    pub tail: usize,
}

/// Link prediction evaluation over a full test split.
///
/// Each test triple is scored twice: once against every head substitution
/// and once against every tail substitution. With `filtered` set, other
/// known triples are removed before ranking.
#[derive(Debug, Clone)]
pub struct LinkPredictionEvaluator {
    known: HashSet<Triple>,
    num_entities: usize,
    config: EvaluationConfig,
}

impl LinkPredictionEvaluator {
    pub fn new(num_entities: usize, config: EvaluationConfig) -> Self {
        Self {
            known: HashSet::new(),
            num_entities,
            config,
        }
    }

    /// Register known-true triples (typically train + valid + test)
    pub fn add_known_triples<'a, I>(&mut self, triples: I)
    where
        I: IntoIterator<Item = &'a Triple>,
    {
        self.known.extend(triples.into_iter().copied());
    }

    pub fn with_known_triples<'a, I>(mut self, triples: I) -> Self
    where
        I: IntoIterator<Item = &'a Triple>,
    {
        self.add_known_triples(triples);
        self
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    fn prepare(&self, candidates: Vec<Triple>, correct: &Triple) -> Vec<Triple> {
        if self.config.filtered {
            filter_triples(&candidates, &self.known, correct)
        } else {
            candidates
        }
    }

    /// Rank one test triple against its head and tail corruptions
    pub fn query_ranks<F>(&self, triple: &Triple, score_fn: &F) -> Result<QueryRanks>
    where
        F: Fn(&[Triple]) -> Vec<f64>,
    {
        triple.check_entities(self.num_entities)?;

        let heads = self.prepare(
            corrupt_heads(self.num_entities, triple.predicate, triple.object),
            triple,
        );
        let tails = self.prepare(
            corrupt_tails(triple.subject, triple.predicate, self.num_entities),
            triple,
        );

        Ok(QueryRanks {
            head: rank_triple(&score_fn(&heads), &heads, triple)?,
            tail: rank_triple(&score_fn(&tails), &tails, triple)?,
        })
    }

    /// Evaluate every test triple in parallel. `score_fn` maps a candidate
    /// list to one score per candidate, higher meaning more plausible.
    pub fn evaluate<F>(&self, test_triples: &[Triple], score_fn: F) -> Result<LinkPredictionReport>
    where
        F: Fn(&[Triple]) -> Vec<f64> + Sync,
    {
        let ranks: Vec<QueryRanks> = test_triples
            .par_iter()
            .map(|t| self.query_ranks(t, &score_fn))
            .collect::<Result<Vec<_>>>()?;

        let head_ranks: Vec<usize> = ranks.iter().map(|r| r.head).collect();
        let tail_ranks: Vec<usize> = ranks.iter().map(|r| r.tail).collect();

        let head = RankMetrics::from_ranks(&head_ranks, &self.config.hits_at);
        let tail = RankMetrics::from_ranks(&tail_ranks, &self.config.hits_at);
        let both = RankMetrics::merge(&[head.clone(), tail.clone()]);

        log::info!(
            "Evaluated {} test triples ({}): {}",
            test_triples.len(),
            if self.config.filtered { "filtered" } else { "raw" },
            both.summary()
        );

        Ok(LinkPredictionReport { head, tail, both })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use pretty_assertions::assert_eq;

    fn create_known() -> Vec<Triple> {
        vec![
            Triple::new(0, 0, 1),
            Triple::new(0, 0, 2),
            Triple::new(1, 0, 2),
            Triple::new(3, 1, 0),
        ]
    }

    /// Scores every known triple 1.0 and everything else by -subject-object
    fn oracle(known: &[Triple]) -> impl Fn(&[Triple]) -> Vec<f64> + Sync + '_ {
        move |candidates: &[Triple]| {
            candidates
                .iter()
                .map(|t| {
                    if known.contains(t) {
                        1.0
                    } else {
                        -f64::from(t.subject + t.object)
                    }
                })
                .collect()
        }
    }

    #[test]
    fn test_filtered_oracle_is_perfect() {
        let known = create_known();
        let evaluator = LinkPredictionEvaluator::new(4, EvaluationConfig::default())
            .with_known_triples(&known);

        let report = evaluator.evaluate(&known, oracle(&known)).unwrap();

        assert_eq!(report.both.num_queries, 8);
        assert_eq!(report.both.mrr, 1.0);
        assert_eq!(report.both.hits[&1], 1.0);
        assert_eq!(report.head.mr, 1.0);
    }

    #[test]
    fn test_raw_protocol_penalises_other_true_triples() {
        let known = create_known();
        let config = EvaluationConfig {
            filtered: false,
            ..EvaluationConfig::default()
        };
        let evaluator = LinkPredictionEvaluator::new(4, config).with_known_triples(&known);

        // (0,0,2) ties with (0,0,1) on the tail side and comes later in input order
        let ranks = evaluator.query_ranks(&Triple::new(0, 0, 2), &oracle(&known)).unwrap();
        assert_eq!(ranks.tail, 2);

        let filtered = LinkPredictionEvaluator::new(4, EvaluationConfig::default())
            .with_known_triples(&known);
        let ranks = filtered.query_ranks(&Triple::new(0, 0, 2), &oracle(&known)).unwrap();
        assert_eq!(ranks.tail, 1);
    }

    #[test]
    fn test_out_of_range_test_triple() {
        let evaluator = LinkPredictionEvaluator::new(2, EvaluationConfig::default());
        let result = evaluator.evaluate(&[Triple::new(0, 0, 5)], |c: &[Triple]| vec![0.0; c.len()]);
        assert!(matches!(result, Err(GraphError::EntityOutOfRange { .. })));
    }

    #[test]
    fn test_empty_split() {
        let evaluator = LinkPredictionEvaluator::new(3, EvaluationConfig::default());
        let report = evaluator.evaluate(&[], |c: &[Triple]| vec![0.0; c.len()]).unwrap();
        assert_eq!(report.both.num_queries, 0);
    }
}
