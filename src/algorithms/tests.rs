#[cfg(test)]
mod tests {
    use crate::algorithms::{
        select_sampling, seeded_rng, EdgeNeighborhoodSampling, SamplingConfig, SamplingMethod,
        TripleSampler, UniformSampling,
    };
    use crate::error::GraphError;
    use crate::graph::{Triple, triples_from_record_batch};
    use hashbrown::HashSet;
    use pretty_assertions::assert_eq;

    /// Ring 0-1-2-3-4-5-0 plus two chords, connected
    fn create_test_triples() -> Vec<Triple> {
        vec![
            Triple::new(0, 0, 1),
            Triple::new(1, 0, 2),
            Triple::new(2, 1, 3),
            Triple::new(3, 1, 4),
            Triple::new(4, 0, 5),
            Triple::new(5, 1, 0),
            Triple::new(0, 2, 3),
            Triple::new(1, 2, 4),
        ]
    }

    #[test]
    fn test_select_sampling_by_name() {
        assert_eq!(select_sampling("uniform").unwrap().name(), "uniform");
        assert_eq!(select_sampling("Edge-Neighborhood").unwrap().name(), "edge-neighborhood");
        assert_eq!(select_sampling("  UNIFORM ").unwrap().name(), "uniform");
    }

    #[test]
    fn test_select_sampling_unknown_method() {
        match select_sampling("Snowball") {
            Err(GraphError::NotImplemented(msg)) => assert!(msg.starts_with("snowball")),
            other => panic!("expected NotImplemented, got {:?}", other),
        }
    }

    #[test]
    fn test_sampling_method_round_trip() {
        for method in [SamplingMethod::Uniform, SamplingMethod::EdgeNeighborhood] {
            assert_eq!(method.to_string().parse::<SamplingMethod>().unwrap(), method);
        }

        let json = serde_json::to_string(&SamplingMethod::EdgeNeighborhood).unwrap();
        assert_eq!(json, "\"edge-neighborhood\"");
    }

    #[test]
    fn test_uniform_sampling_subset() {
        let triples = create_test_triples();
        let mut rng = seeded_rng(Some(7));

        for size in 0..=triples.len() {
            let sample = UniformSampling.sample(&triples, size, 6, &mut rng).unwrap();
            let unique: HashSet<Triple> = sample.iter().copied().collect();

            assert_eq!(sample.len(), size);
            assert_eq!(unique.len(), size);
            assert!(sample.iter().all(|t| triples.contains(t)));
        }
    }

    #[test]
    fn test_uniform_sampling_too_large() {
        let triples = create_test_triples();
        let mut rng = seeded_rng(Some(7));

        let result = UniformSampling.sample(&triples, triples.len() + 1, 6, &mut rng);
        assert!(matches!(result, Err(GraphError::InvalidParameter(_))));
    }

    #[test]
    fn test_edge_neighborhood_uses_every_edge_once() {
        let triples = create_test_triples();

        for seed in 0..20 {
            let mut rng = seeded_rng(Some(seed));
            let sample = EdgeNeighborhoodSampling
                .sample(&triples, triples.len(), 6, &mut rng)
                .unwrap();

            let mut sorted = sample.clone();
            sorted.sort();
            let mut expected = triples.clone();
            expected.sort();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn test_edge_neighborhood_grows_connected_sample() {
        let triples = create_test_triples();
        let mut rng = seeded_rng(Some(42));
        let sample = EdgeNeighborhoodSampling.sample(&triples, 4, 6, &mut rng).unwrap();

        // Every edge after the first touches an entity reached earlier
        let mut touched: HashSet<u32> = HashSet::new();
        for (i, t) in sample.iter().enumerate() {
            if i > 0 {
                assert!(touched.contains(&t.subject) || touched.contains(&t.object));
            }
            touched.insert(t.subject);
            touched.insert(t.object);
        }
    }

    #[test]
    fn test_edge_neighborhood_disconnected_components() {
        // Two components; exhausting one forces the uniform fallback
        let triples = vec![
            Triple::new(0, 0, 1),
            Triple::new(2, 0, 3),
            Triple::new(3, 0, 4),
        ];
        let mut rng = seeded_rng(Some(3));
        let sample = EdgeNeighborhoodSampling.sample(&triples, 3, 5, &mut rng).unwrap();

        let unique: HashSet<Triple> = sample.iter().copied().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_edge_neighborhood_self_loops_and_duplicates() {
        let triples = vec![
            Triple::new(0, 0, 0),
            Triple::new(0, 0, 1),
            Triple::new(0, 0, 1),
            Triple::new(1, 1, 1),
        ];

        for seed in 0..10 {
            let mut rng = seeded_rng(Some(seed));
            let sample = EdgeNeighborhoodSampling.sample(&triples, 4, 2, &mut rng).unwrap();
            assert_eq!(sample.len(), 4);
            assert_eq!(sample.iter().filter(|t| **t == Triple::new(0, 0, 1)).count(), 2);
        }
    }

    #[test]
    fn test_edge_neighborhood_rejects_bad_input() {
        let triples = create_test_triples();
        let mut rng = seeded_rng(Some(1));

        assert!(matches!(
            EdgeNeighborhoodSampling.sample(&triples, triples.len() + 1, 6, &mut rng),
            Err(GraphError::InvalidParameter(_))
        ));
        assert!(matches!(
            EdgeNeighborhoodSampling.sample(&triples, 2, 4, &mut rng),
            Err(GraphError::EntityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let triples = create_test_triples();
        let config = SamplingConfig {
            method: SamplingMethod::EdgeNeighborhood,
            sample_size: 5,
            seed: Some(99),
        };

        assert_eq!(config.sample(&triples, 6).unwrap(), config.sample(&triples, 6).unwrap());
    }

    #[test]
    fn test_execute_returns_record_batch() {
        let triples = create_test_triples();
        let config = SamplingConfig {
            method: SamplingMethod::Uniform,
            sample_size: 3,
            seed: Some(5),
        };

        let batch = UniformSampling.execute(&triples, 6, &config).unwrap();
        assert_eq!(batch.num_rows(), 3);

        let sampled = triples_from_record_batch(&batch).unwrap();
        assert!(sampled.iter().all(|t| triples.contains(t)));
    }
}
