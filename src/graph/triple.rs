use arrow::array::{Array, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use crate::error::{GraphError, Result};

/// A (subject, predicate, object) fact with every element an integer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: u32,
    pub predicate: u32,
    pub object: u32,
}

impl Triple {
    pub const fn new(subject: u32, predicate: u32, object: u32) -> Self {
        Self { subject, predicate, object }
    }

    /// Same predicate and object, different subject
    pub fn with_subject(self, subject: u32) -> Self {
        Self { subject, ..self }
    }

    /// Same subject and predicate, different object
    pub fn with_object(self, object: u32) -> Self {
        Self { object, ..self }
    }

    /// Fails if either endpoint falls outside `[0, num_entities)`
    pub fn check_entities(&self, num_entities: usize) -> Result<()> {
        for id in [self.subject, self.object] {
            if id as usize >= num_entities {
                return Err(GraphError::entity_out_of_range(id, num_entities));
            }
        }
        Ok(())
    }
}

impl From<(u32, u32, u32)> for Triple {
    fn from((subject, predicate, object): (u32, u32, u32)) -> Self {
        Self::new(subject, predicate, object)
    }
}

impl From<Triple> for (u32, u32, u32) {
    fn from(t: Triple) -> Self {
        (t.subject, t.predicate, t.object)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

/// Arrow schema used for triple batches
pub fn triple_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("subject", DataType::UInt32, false),
        Field::new("predicate", DataType::UInt32, false),
        Field::new("object", DataType::UInt32, false),
    ]))
}

/// Convert triples into a columnar Arrow batch
pub fn triples_to_record_batch(triples: &[Triple]) -> Result<RecordBatch> {
    let subjects: Vec<u32> = triples.iter().map(|t| t.subject).collect();
    let predicates: Vec<u32> = triples.iter().map(|t| t.predicate).collect();
    let objects: Vec<u32> = triples.iter().map(|t| t.object).collect();

    RecordBatch::try_new(
        triple_schema(),
        vec![
            Arc::new(UInt32Array::from(subjects)),
            Arc::new(UInt32Array::from(predicates)),
            Arc::new(UInt32Array::from(objects)),
        ],
    ).map_err(GraphError::from)
}

/// Read triples back out of a batch with `subject`, `predicate`, `object` columns
pub fn triples_from_record_batch(batch: &RecordBatch) -> Result<Vec<Triple>> {
    let subjects = uint32_column(batch, "subject")?;
    let predicates = uint32_column(batch, "predicate")?;
    let objects = uint32_column(batch, "object")?;

    if subjects.null_count() + predicates.null_count() + objects.null_count() > 0 {
        return Err(GraphError::graph_construction(
            "triple columns must not contain nulls"
        ));
    }

    Ok((0..batch.num_rows())
        .map(|i| Triple::new(subjects.value(i), predicates.value(i), objects.value(i)))
        .collect())
}

fn uint32_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a UInt32Array> {
    batch
        .column_by_name(name)
        .ok_or_else(|| GraphError::graph_construction(format!("missing column '{}'", name)))?
        .as_any()
        .downcast_ref::<UInt32Array>()
        .ok_or_else(|| GraphError::graph_construction(format!("column '{}' must be UInt32", name)))
}
