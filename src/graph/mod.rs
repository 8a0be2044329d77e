pub mod triple;
pub mod vocabulary;
pub mod dataset;

pub use triple::{Triple, triple_schema, triples_to_record_batch, triples_from_record_batch};
pub use vocabulary::Vocabulary;
pub use dataset::{KnowledgeGraphDataset, DatasetStats};
