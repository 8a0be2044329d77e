use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use rand_pcg::Pcg64;
use crate::algorithms::TripleSampler;
use crate::error::{GraphError, Result};
use crate::graph::Triple;

/// Uniform random subset of the triple list, drawn without replacement
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSampling;

impl TripleSampler for UniformSampling {
    fn sample(
        &self,
        triples: &[Triple],
        sample_size: usize,
        _num_entities: usize,
        rng: &mut Pcg64,
    ) -> Result<Vec<Triple>> {
        check_population(triples, sample_size)?;

        let picked = rand::seq::index::sample(rng, triples.len(), sample_size);
        Ok(picked.iter().map(|i| triples[i]).collect())
    }

    fn name(&self) -> &'static str {
        "uniform"
    }

    fn description(&self) -> &'static str {
        "Draw a uniformly random subset of triples without replacement"
    }
}

/// Edge-neighborhood sampling as used for relational GCN training.
///
/// Grows the sample outward from already-touched entities: each step picks
/// an entity with probability proportional to its count of unpicked incident
/// edges (restricted to entities seen so far), then takes one of those edges
/// uniformly. When no seen entity has edges left the draw falls back to any
/// entity that still has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeNeighborhoodSampling;

impl TripleSampler for EdgeNeighborhoodSampling {
    fn sample(
        &self,
        triples: &[Triple],
        sample_size: usize,
        num_entities: usize,
        rng: &mut Pcg64,
    ) -> Result<Vec<Triple>> {
        check_population(triples, sample_size)?;

        let mut incidence = IncidenceLists::build(triples, num_entities)?;
        let mut seen = vec![false; num_entities];
        let mut picked = Vec::with_capacity(sample_size);

        for _ in 0..sample_size {
            let vertex = incidence.choose_vertex(&seen, rng)?;
            seen[vertex] = true;

            let incident = &incidence.lists[vertex];
            let Incidence { edge, slot } = incident[rng.gen_range(0..incident.len())];
            let triple = triples[edge];
            let other = match slot {
                Slot::Subject => triple.object,
                Slot::Object => triple.subject,
            };

            incidence.remove(edge, &triple);
            seen[other as usize] = true;
            picked.push(edge);
        }

        log::debug!(
            "Edge-neighborhood sampling drew {} of {} edges, touching {} of {} entities",
            picked.len(),
            triples.len(),
            seen.iter().filter(|&&s| s).count(),
            num_entities
        );

        Ok(picked.into_iter().map(|edge| triples[edge]).collect())
    }

    fn name(&self) -> &'static str {
        "edge-neighborhood"
    }

    fn description(&self) -> &'static str {
        "Weighted walk over the adjacency structure producing a locally connected edge sample"
    }
}

fn check_population(triples: &[Triple], sample_size: usize) -> Result<()> {
    if sample_size > triples.len() {
        return Err(GraphError::invalid_parameter(format!(
            "sample size {} exceeds population of {} triples",
            sample_size,
            triples.len()
        )));
    }
    Ok(())
}

/// Which end of the edge the list owner sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Subject,
    Object,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::Subject => 0,
            Slot::Object => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Incidence {
    edge: usize,
    slot: Slot,
}

/// Per-entity lists of unpicked incident edges.
///
/// `positions[edge]` holds where the edge sits in its subject's and its
/// object's list, so removal is a swap-remove on each side. A list's length
/// is the entity's remaining degree.
#[derive(Debug)]
struct IncidenceLists {
    lists: Vec<Vec<Incidence>>,
    positions: Vec<[usize; 2]>,
}

impl IncidenceLists {
    fn build(triples: &[Triple], num_entities: usize) -> Result<Self> {
        let mut lists: Vec<Vec<Incidence>> = vec![Vec::new(); num_entities];
        let mut positions = Vec::with_capacity(triples.len());

        for (edge, triple) in triples.iter().enumerate() {
            triple.check_entities(num_entities)?;

            let subject_list = &mut lists[triple.subject as usize];
            subject_list.push(Incidence { edge, slot: Slot::Subject });
            let subject_pos = subject_list.len() - 1;

            let object_list = &mut lists[triple.object as usize];
            object_list.push(Incidence { edge, slot: Slot::Object });
            let object_pos = object_list.len() - 1;

            positions.push([subject_pos, object_pos]);
        }

        Ok(Self { lists, positions })
    }

    fn degree(&self, vertex: usize) -> u64 {
        self.lists[vertex].len() as u64
    }

    fn choose_vertex(&self, seen: &[bool], rng: &mut Pcg64) -> Result<usize> {
        let mut weights: Vec<u64> = (0..self.lists.len())
            .map(|v| if seen[v] { self.degree(v) } else { 0 })
            .collect();

        if weights.iter().all(|&w| w == 0) {
            weights = (0..self.lists.len())
                .map(|v| u64::from(self.degree(v) > 0))
                .collect();
        }

        let distribution = WeightedIndex::new(&weights).map_err(|e| {
            GraphError::algorithm(format!("no entity has unpicked edges left: {}", e))
        })?;

        Ok(distribution.sample(rng))
    }

    fn remove(&mut self, edge: usize, triple: &Triple) {
        for slot in [Slot::Subject, Slot::Object] {
            let vertex = match slot {
                Slot::Subject => triple.subject as usize,
                Slot::Object => triple.object as usize,
            };

            let pos = self.positions[edge][slot.index()];
            let list = &mut self.lists[vertex];
            list.swap_remove(pos);

            if let Some(moved) = list.get(pos).copied() {
                self.positions[moved.edge][moved.slot.index()] = pos;
            }
        }
    }
}
