use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use crate::error::{GraphError, Result};
use crate::graph::{Triple, Vocabulary};

/// Triples loaded from disk together with the vocabularies that name them
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraphDataset {
    pub entities: Vocabulary,
    pub relations: Vocabulary,
    pub triples: Vec<Triple>,
}

/// Dataset statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_triples: usize,
    pub unique_triples: usize,
    pub num_entities: usize,
    pub num_relations: usize,
}

impl KnowledgeGraphDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tab-separated `subject\tpredicate\tobject` lines
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let dataset = Self::from_reader(BufReader::new(file))?;

        log::debug!(
            "Loaded {} triples ({} entities, {} relations) from {}",
            dataset.triples.len(),
            dataset.entities.len(),
            dataset.relations.len(),
            path.as_ref().display()
        );

        Ok(dataset)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut dataset = Self::new();
        dataset.extend_from_reader(reader)?;
        Ok(dataset)
    }

    /// Append triples from another split, reusing the existing vocabularies
    /// so that ids stay consistent across train/valid/test files
    pub fn extend_from_reader<R: BufRead>(&mut self, reader: R) -> Result<Vec<Triple>> {
        let mut added = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() != 3 || fields.iter().any(|f| f.is_empty()) {
                return Err(GraphError::graph_construction(format!(
                    "line {}: expected 3 tab-separated fields, found {}",
                    line_no + 1,
                    fields.len()
                )));
            }

            let triple = self.add_named_triple(fields[0], fields[1], fields[2])?;
            added.push(triple);
        }

        Ok(added)
    }

    /// Add a triple by name, extending the vocabularies as needed
    pub fn add_named_triple(&mut self, subject: &str, predicate: &str, object: &str) -> Result<Triple> {
        let triple = Triple::new(
            self.entities.get_or_insert(subject)?,
            self.relations.get_or_insert(predicate)?,
            self.entities.get_or_insert(object)?,
        );
        self.triples.push(triple);
        Ok(triple)
    }

    pub fn num_entities(&self) -> usize {
        self.entities.len()
    }

    /// Render a triple with vocabulary names
    pub fn describe(&self, triple: &Triple) -> Result<(String, String, String)> {
        let lookup = |vocab: &Vocabulary, id: u32| {
            vocab
                .name(id)
                .map(str::to_string)
                .ok_or_else(|| GraphError::entity_out_of_range(id, vocab.len()))
        };

        Ok((
            lookup(&self.entities, triple.subject)?,
            lookup(&self.relations, triple.predicate)?,
            lookup(&self.entities, triple.object)?,
        ))
    }

    /// Write triples as TSV using vocabulary names
    pub fn write_tsv<W: Write>(&self, triples: &[Triple], mut writer: W) -> Result<()> {
        for triple in triples {
            let (s, p, o) = self.describe(triple)?;
            writeln!(writer, "{}\t{}\t{}", s, p, o)?;
        }
        Ok(())
    }

    pub fn get_statistics(&self) -> DatasetStats {
        let unique: HashSet<&Triple> = self.triples.iter().collect();

        DatasetStats {
            total_triples: self.triples.len(),
            unique_triples: unique.len(),
            num_entities: self.entities.len(),
            num_relations: self.relations.len(),
        }
    }
}
