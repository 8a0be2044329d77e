use rand::Rng;
use rand::distributions::{Bernoulli, Distribution};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use crate::error::{GraphError, Result};
use crate::graph::Triple;

/// Generate `positives.len() * rate` negatives for training.
///
/// Subject and predicate columns repeat the positives cyclically; the object
/// is replaced by a uniformly random entity id in `[0, num_entities)`.
pub fn negative_sampling(
    positives: &[Triple],
    num_entities: usize,
    rate: usize,
    rng: &mut Pcg64,
) -> Result<Vec<Triple>> {
    let total = positives.len() * rate;
    if total == 0 {
        return Ok(Vec::new());
    }

    let high = entity_bound(num_entities)?;

    Ok((0..total)
        .map(|i| positives[i % positives.len()].with_object(rng.gen_range(0..high)))
        .collect())
}

fn entity_bound(num_entities: usize) -> Result<u32> {
    if num_entities == 0 {
        return Err(GraphError::invalid_parameter(
            "cannot draw replacement entities from an empty vocabulary"
        ));
    }
    u32::try_from(num_entities)
        .map_err(|_| GraphError::invalid_parameter("vocabulary exceeds u32 id space"))
}

/// Where corruption runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    #[default]
    Cpu,
    Accelerator(usize),
}

impl Device {
    /// Device the work actually runs on. Batches are host-resident, so an
    /// accelerator request falls back to the CPU.
    pub fn resolve(self) -> Device {
        match self {
            Device::Cpu => Device::Cpu,
            Device::Accelerator(index) => {
                log::warn!("Accelerator {} requested for corruption; running on CPU", index);
                Device::Cpu
            }
        }
    }
}

/// Owned `(batch, negatives)` block of triples, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegativeBatch {
    batch_size: usize,
    num_negatives: usize,
    rows: Vec<Triple>,
}

impl NegativeBatch {
    pub fn new(batch_size: usize, num_negatives: usize, rows: Vec<Triple>) -> Result<Self> {
        if rows.len() != batch_size * num_negatives {
            return Err(GraphError::invalid_parameter(format!(
                "batch of shape ({}, {}) needs {} rows, got {}",
                batch_size,
                num_negatives,
                batch_size * num_negatives,
                rows.len()
            )));
        }

        Ok(Self { batch_size, num_negatives, rows })
    }

    /// One slot per (positive, negative) pair, each starting as a copy of the positive
    pub fn from_positives(positives: &[Triple], num_negatives: usize) -> Self {
        let rows = positives
            .iter()
            .flat_map(|&t| std::iter::repeat(t).take(num_negatives))
            .collect();

        Self {
            batch_size: positives.len(),
            num_negatives,
            rows,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.batch_size, self.num_negatives)
    }

    pub fn get(&self, batch: usize, negative: usize) -> Option<&Triple> {
        if batch >= self.batch_size || negative >= self.num_negatives {
            return None;
        }
        self.rows.get(batch * self.num_negatives + negative)
    }

    pub fn into_flat(self) -> Vec<Triple> {
        self.rows
    }
}

/// Corrupt every row of `batch`, replacing the head with probability
/// `head_corrupt_prob` and the tail otherwise. The predicate is left alone.
/// Returns the `(batch * negatives)` rows flattened.
pub fn corrupt(
    batch: NegativeBatch,
    num_nodes: usize,
    head_corrupt_prob: f64,
    device: Device,
    rng: &mut Pcg64,
) -> Result<Vec<Triple>> {
    let head_mask = Bernoulli::new(head_corrupt_prob).map_err(|_| {
        GraphError::invalid_parameter(format!(
            "head_corrupt_prob must be in [0, 1], got {}",
            head_corrupt_prob
        ))
    })?;

    let mut rows = batch.into_flat();
    if rows.is_empty() {
        return Ok(rows);
    }

    let high = entity_bound(num_nodes)?;
    log::debug!("Corrupting {} rows on {:?}", rows.len(), device.resolve());

    for row in rows.iter_mut() {
        let replacement = rng.gen_range(0..high);
        *row = if head_mask.sample(rng) {
            row.with_subject(replacement)
        } else {
            row.with_object(replacement)
        };
    }

    Ok(rows)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorruptionConfig {
    pub head_corrupt_prob: f64,
    pub device: Device,
}

impl Default for CorruptionConfig {
    fn default() -> Self {
        Self {
            head_corrupt_prob: 0.5,
            device: Device::Cpu,
        }
    }
}

impl CorruptionConfig {
    pub fn apply(&self, batch: NegativeBatch, num_nodes: usize, rng: &mut Pcg64) -> Result<Vec<Triple>> {
        corrupt(batch, num_nodes, self.head_corrupt_prob, self.device, rng)
    }
}
