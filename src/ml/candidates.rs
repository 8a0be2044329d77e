use hashbrown::HashSet;
use indexmap::IndexSet;
use crate::graph::Triple;

/// `(s, predicate, object)` for every entity `s` in `[0, num_entities)`
pub fn corrupt_heads(num_entities: usize, predicate: u32, object: u32) -> Vec<Triple> {
    (0..num_entities as u32)
        .map(|s| Triple::new(s, predicate, object))
        .collect()
}

/// `(subject, predicate, o)` for every entity `o` in `[0, num_entities)`
pub fn corrupt_tails(subject: u32, predicate: u32, num_entities: usize) -> Vec<Triple> {
    (0..num_entities as u32)
        .map(|o| Triple::new(subject, predicate, o))
        .collect()
}

/// Filtered-protocol candidate set: duplicates collapse to their first
/// occurrence and every known triple except `correct` is dropped.
pub fn filter_triples(candidates: &[Triple], known: &HashSet<Triple>, correct: &Triple) -> Vec<Triple> {
    candidates
        .iter()
        .copied()
        .collect::<IndexSet<Triple>>()
        .into_iter()
        .filter(|t| t == correct || !known.contains(t))
        .collect()
}
